use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use super::block::Block;
use super::builder::{BlockBuilder, DefaultBlockBuilder};
use super::config::{DefinitionsConfig, FamilyDef, ShapeDef};
use super::error::FamilyError;
use super::factory::{self, FamilyKind};
use super::family::BlockFamily;
use super::uri::BlockUri;

pub type BlockId = u16;

/// Id of the empty cell; never assigned to a block.
pub const AIR_ID: BlockId = 0;

/// Every loaded family, plus a numeric id for each distinct block.
#[derive(Default, Clone, Debug)]
pub struct FamilyRegistry {
    pub shapes: HashMap<String, ShapeDef>,
    families: Vec<BlockFamily>,
    by_uri: HashMap<BlockUri, usize>,
    // Index is the block id; slot 0 stays empty for air.
    blocks: Vec<Option<Block>>,
    ids: HashMap<Block, BlockId>,
    known_ids: HashMap<String, BlockId>,
}

impl FamilyRegistry {
    pub fn new() -> Self {
        Self {
            blocks: vec![None],
            ..Self::default()
        }
    }

    /// Previously assigned ids, keyed by full block uri. Blocks registered
    /// afterwards keep these ids where they can.
    pub fn with_known_ids(known: HashMap<String, BlockId>) -> Self {
        let mut reg = Self::new();
        reg.known_ids = known
            .into_iter()
            .map(|(uri, id)| (uri.to_ascii_lowercase(), id))
            .collect();
        reg
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let text = fs::read_to_string(path)?;
        let cfg: DefinitionsConfig = toml::from_str(&text)?;
        Ok(Self::from_config(cfg, &DefaultBlockBuilder)?)
    }

    pub fn from_config(
        cfg: DefinitionsConfig,
        builder: &dyn BlockBuilder,
    ) -> Result<Self, FamilyError> {
        let mut reg = FamilyRegistry::with_known_ids(cfg.ids);
        for shape in cfg.shapes {
            if reg.shapes.insert(shape.name.clone(), shape).is_some() {
                log::warn!("shape defined twice; keeping the later definition");
            }
        }
        for def in &cfg.families {
            let family = reg.build_family(def, builder)?;
            reg.register(family)?;
        }
        log::info!(
            "loaded {} families, {} blocks, {} shapes",
            reg.families.len(),
            reg.ids.len(),
            reg.shapes.len()
        );
        Ok(reg)
    }

    /// Resolves the definition's shape and kind, then builds through the factory.
    pub fn build_family(
        &self,
        def: &FamilyDef,
        builder: &dyn BlockBuilder,
    ) -> Result<BlockFamily, FamilyError> {
        let shape = match &def.shape {
            None => None,
            Some(name) => Some(self.shapes.get(name).ok_or_else(|| {
                FamilyError::UnknownShape {
                    family: def.uri.family_uri(),
                    shape: name.clone(),
                }
            })?),
        };
        let kind: FamilyKind = factory::default_kind(def, shape)?;
        factory::create_kind(kind, def, shape, builder)
    }

    /// Adds a family and assigns ids to its blocks. Rejects a uri already registered.
    pub fn register(&mut self, family: BlockFamily) -> Result<(), FamilyError> {
        if self.by_uri.contains_key(family.uri()) {
            return Err(FamilyError::DuplicateFamily(family.uri().clone()));
        }
        for block in family.blocks() {
            self.assign_id(block)?;
        }
        log::debug!(
            "registered {} ({}, {} blocks)",
            family.uri(),
            family.kind(),
            family.blocks().len()
        );
        self.by_uri.insert(family.uri().clone(), self.families.len());
        self.families.push(family);
        Ok(())
    }

    fn assign_id(&mut self, block: &Block) -> Result<BlockId, FamilyError> {
        if let Some(&id) = self.ids.get(block) {
            return Ok(id);
        }
        let wanted = self.known_ids.get(&block.uri().to_string()).copied();
        let id = match wanted {
            Some(id) if id != AIR_ID && self.slot_free(id) => id,
            other => {
                if let Some(id) = other {
                    log::warn!("{}: id {} is taken, assigning a new one", block.uri(), id);
                }
                self.next_free_id().ok_or_else(|| FamilyError::InvalidDefinition {
                    family: block.family_uri(),
                    reason: "block id space exhausted".to_string(),
                })?
            }
        };
        let slot = id as usize;
        if self.blocks.len() <= slot {
            self.blocks.resize(slot + 1, None);
        }
        self.blocks[slot] = Some(block.clone());
        self.ids.insert(block.clone(), id);
        Ok(id)
    }

    fn slot_free(&self, id: BlockId) -> bool {
        self.blocks.get(id as usize).is_none_or(Option::is_none)
    }

    fn next_free_id(&self) -> Option<BlockId> {
        (1..=BlockId::MAX).find(|&id| {
            self.slot_free(id) && !self.known_ids.values().any(|&k| k == id)
        })
    }

    /// Family for a uri, ignoring any variant identifier.
    pub fn family(&self, uri: &BlockUri) -> Option<&BlockFamily> {
        let key = uri.family_uri();
        self.by_uri.get(&key).map(|&i| &self.families[i])
    }

    pub fn family_of(&self, block: &Block) -> Option<&BlockFamily> {
        self.family(block.uri())
    }

    pub fn families(&self) -> impl Iterator<Item = &BlockFamily> {
        self.families.iter()
    }

    /// Families tagged with `category`.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a BlockFamily> {
        self.families.iter().filter(move |f| f.has_category(category))
    }

    /// Parses `uri` and resolves it through its family. Malformed or unknown uris yield `None`.
    pub fn block_by_uri(&self, uri: &str) -> Option<&Block> {
        let uri: BlockUri = match uri.parse() {
            Ok(u) => u,
            Err(e) => {
                log::warn!("{}", e);
                return None;
            }
        };
        self.family(&uri)?.get_block_for(&uri)
    }

    #[inline]
    pub fn id_of(&self, block: &Block) -> Option<BlockId> {
        self.ids.get(block).copied()
    }

    #[inline]
    pub fn block_by_id(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id as usize)?.as_ref()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.families.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    #[inline]
    pub fn block_count(&self) -> usize {
        self.ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFS: &str = r#"
[[shapes]]
name = "stair"
placement = "horizontal"

[[families]]
uri = "core:stone"
categories = ["Natural"]

[[families]]
uri = "core:stair"
shape = "stair"

[ids]
"core:stair.front" = 40
"core:stone" = 40
"#;

    fn load() -> FamilyRegistry {
        let cfg: DefinitionsConfig = toml::from_str(DEFS).unwrap();
        FamilyRegistry::from_config(cfg, &DefaultBlockBuilder).unwrap()
    }

    #[test]
    fn ids_are_unique_and_resolve_back() {
        let reg = load();
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.block_count(), 5);
        let mut seen = Vec::new();
        for fam in reg.families() {
            for b in fam.blocks() {
                let id = reg.id_of(b).unwrap();
                assert_ne!(id, AIR_ID);
                assert!(!seen.contains(&id));
                seen.push(id);
                assert_eq!(reg.block_by_id(id), Some(b));
            }
        }
        assert!(reg.block_by_id(AIR_ID).is_none());
    }

    #[test]
    fn known_id_goes_to_first_claimant() {
        let reg = load();
        let stone = reg.block_by_uri("core:stone").unwrap();
        assert_eq!(reg.id_of(stone), Some(40));
        let stair = reg.block_by_uri("core:stair.front").unwrap();
        assert_ne!(reg.id_of(stair), Some(40));
    }

    #[test]
    fn lookup_by_uri() {
        let reg = load();
        assert!(reg.block_by_uri("CORE:STAIR.left").is_some());
        assert!(reg.block_by_uri("core:stair.up").is_none());
        assert!(reg.block_by_uri("core:glass").is_none());
        assert!(reg.block_by_uri("not a uri").is_none());
        let fam = reg.family(&"core:stair.back".parse().unwrap()).unwrap();
        assert_eq!(fam.kind(), FamilyKind::Horizontal);
        assert_eq!(reg.in_category("natural").count(), 1);
    }

    #[test]
    fn duplicate_family_is_rejected() {
        let mut reg = load();
        let def = FamilyDef::new("core:stone".parse().unwrap());
        let fam = reg.build_family(&def, &DefaultBlockBuilder).unwrap();
        assert_eq!(
            reg.register(fam),
            Err(FamilyError::DuplicateFamily("core:stone".parse().unwrap()))
        );
    }

    #[test]
    fn unknown_shape_is_an_error() {
        let reg = FamilyRegistry::new();
        let mut def = FamilyDef::new("core:slab".parse().unwrap());
        def.shape = Some("slab".into());
        assert!(matches!(
            reg.build_family(&def, &DefaultBlockBuilder),
            Err(FamilyError::UnknownShape { .. })
        ));
    }
}
