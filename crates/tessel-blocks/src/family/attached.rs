use std::collections::HashMap;

use super::keys::{AttachmentKey, parse_key};
use crate::block::Block;
use crate::builder::BuildContext;
use crate::error::FamilyError;
use crate::placement::BlockPlacementData;
use crate::uri::BlockUri;

/// One authored shape rotated onto each allowed side, corner or edge.
///
/// For symmetric shapes only one of each opposite pair gets its own block;
/// the other key is bound to the same block.
#[derive(Clone, Debug)]
pub struct AttachedFamily<K: AttachmentKey> {
    allowed: Vec<K>,
    variants: HashMap<K, Block>,
    archetype: Block,
}

impl<K: AttachmentKey> AttachedFamily<K> {
    pub fn build(ctx: &BuildContext<'_>) -> Result<Self, FamilyError> {
        let allowed = allowed_keys::<K>(ctx)?;
        let symmetric = ctx.is_symmetric();
        let family = ctx.family_uri();

        let mut variants: HashMap<K, Block> = HashMap::with_capacity(allowed.len());
        for &key in &allowed {
            let equiv = key.symmetric_equivalent();
            let rep = if symmetric && !key.is_canonical() && allowed.contains(&equiv) {
                equiv
            } else {
                key
            };
            let block = match variants.get(&rep) {
                Some(b) => b.clone(),
                None => ctx.build(
                    None,
                    family.with_identifier(rep),
                    rep.rotation_from_archetype(),
                )?,
            };
            variants.entry(rep).or_insert_with(|| block.clone());
            variants.insert(key, block);
        }

        let archetype_key = if allowed.contains(&K::ARCHETYPE) {
            K::ARCHETYPE
        } else {
            allowed[0]
        };
        let archetype = variants
            .get(&archetype_key)
            .cloned()
            .ok_or_else(|| FamilyError::MissingVariant {
                family: family.clone(),
                key: archetype_key.to_string(),
            })?;
        log::debug!(
            "{}: {} {} variant(s){}",
            family,
            allowed.len(),
            K::KIND,
            if symmetric { ", symmetric" } else { "" }
        );
        Ok(Self {
            allowed,
            variants,
            archetype,
        })
    }

    #[inline]
    pub fn archetype(&self) -> &Block {
        &self.archetype
    }

    pub fn variant(&self, key: K) -> Option<&Block> {
        self.variants.get(&key)
    }

    /// Nearest key to the hit point; the archetype when that key is not allowed.
    pub fn get_block_for_placement(&self, data: &BlockPlacementData) -> &Block {
        self.variant(K::detect(data.relative_hit))
            .unwrap_or(&self.archetype)
    }

    pub fn get_block_for(&self, uri: &BlockUri) -> Option<&Block> {
        self.variant(parse_key::<K>(uri)?)
    }

    /// Allowed keys in declaration order.
    pub fn keys(&self) -> &[K] {
        &self.allowed
    }

    /// Distinct blocks, each once.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.allowed
            .iter()
            .enumerate()
            .filter_map(move |(i, k)| {
                let b = self.variants.get(k)?;
                let first = self.allowed[..i]
                    .iter()
                    .all(|prev| self.variants.get(prev) != Some(b));
                first.then_some(b)
            })
    }
}

fn allowed_keys<K: AttachmentKey>(ctx: &BuildContext<'_>) -> Result<Vec<K>, FamilyError> {
    let Some(names) = &ctx.def.allowed else {
        return Ok(K::ALL.to_vec());
    };
    let mut parsed = Vec::with_capacity(names.len());
    for name in names {
        let key = name
            .parse::<K>()
            .map_err(|_| ctx.invalid(format!("`{}` is not a {}", name, K::KIND)))?;
        parsed.push(key);
    }
    let keys: Vec<K> = K::ALL
        .iter()
        .copied()
        .filter(|k| parsed.contains(k))
        .collect();
    if keys.is_empty() {
        return Err(ctx.invalid(format!("no allowed {} values", K::KIND)));
    }
    Ok(keys)
}
