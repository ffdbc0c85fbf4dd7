//! Block families: the closed set of variants a logical block can take, and
//! the rules for picking one at placement time or after a neighbor changes.

mod attached;
mod full_rotation;
mod horizontal;
pub mod keys;
mod multi_connect;
mod symmetric;

pub use attached::AttachedFamily;
pub use full_rotation::FullRotationFamily;
pub use horizontal::HorizontalFamily;
pub use multi_connect::MultiConnectFamily;
pub use symmetric::SymmetricFamily;

use tessel_geom::{BlockPos, Corner, Edge, Side};

use crate::block::Block;
use crate::error::FamilyError;
use crate::factory::FamilyKind;
use crate::placement::{BlockPlacementData, WorldView};
use crate::uri::BlockUri;

/// Kind-specific variant storage.
#[derive(Clone, Debug)]
pub enum FamilyVariants {
    Symmetric(SymmetricFamily),
    Horizontal(HorizontalFamily),
    FullRotation(FullRotationFamily),
    Side(AttachedFamily<Side>),
    Corner(AttachedFamily<Corner>),
    Edge(AttachedFamily<Edge>),
    MultiConnect(MultiConnectFamily),
}

#[derive(Clone, Debug)]
pub struct BlockFamily {
    uri: BlockUri,
    categories: Vec<String>,
    archetype: Block,
    variants: FamilyVariants,
}

impl BlockFamily {
    /// Fails when the variants have no archetype to offer.
    pub fn new(
        uri: BlockUri,
        categories: Vec<String>,
        variants: FamilyVariants,
    ) -> Result<BlockFamily, FamilyError> {
        let uri = uri.family_uri();
        let archetype = match &variants {
            FamilyVariants::Symmetric(f) => Some(f.block()),
            FamilyVariants::Horizontal(f) => f.archetype(),
            FamilyVariants::FullRotation(f) => f.archetype(),
            FamilyVariants::Side(f) => Some(f.archetype()),
            FamilyVariants::Corner(f) => Some(f.archetype()),
            FamilyVariants::Edge(f) => Some(f.archetype()),
            FamilyVariants::MultiConnect(f) => Some(f.archetype()),
        }
        .cloned()
        .ok_or_else(|| FamilyError::MissingVariant {
            family: uri.clone(),
            key: "archetype".to_string(),
        })?;
        Ok(BlockFamily {
            uri,
            categories: categories
                .into_iter()
                .map(|c| c.to_ascii_lowercase())
                .collect(),
            archetype,
            variants,
        })
    }

    #[inline]
    pub fn uri(&self) -> &BlockUri {
        &self.uri
    }

    #[inline]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }

    #[inline]
    pub fn variants(&self) -> &FamilyVariants {
        &self.variants
    }

    pub fn kind(&self) -> FamilyKind {
        match &self.variants {
            FamilyVariants::Symmetric(_) => FamilyKind::Symmetric,
            FamilyVariants::Horizontal(_) => FamilyKind::Horizontal,
            FamilyVariants::FullRotation(_) => FamilyKind::FullRotation,
            FamilyVariants::Side(_) => FamilyKind::Side,
            FamilyVariants::Corner(_) => FamilyKind::Corner,
            FamilyVariants::Edge(_) => FamilyKind::Edge,
            FamilyVariants::MultiConnect(_) => FamilyKind::MultiConnect,
        }
    }

    /// Representative variant, used for display and as a fallback.
    #[inline]
    pub fn archetype(&self) -> &Block {
        &self.archetype
    }

    /// Reverse lookup by variant uri. The bare family uri names the archetype;
    /// another family's uri or an identifier this family does not know yields `None`.
    pub fn get_block_for(&self, uri: &BlockUri) -> Option<&Block> {
        if !uri.same_family(&self.uri) {
            return None;
        }
        if uri.is_family() {
            return Some(&self.archetype);
        }
        match &self.variants {
            FamilyVariants::Symmetric(f) => f.get_block_for(uri),
            FamilyVariants::Horizontal(f) => f.get_block_for(uri),
            FamilyVariants::FullRotation(f) => f.get_block_for(uri),
            FamilyVariants::Side(f) => f.get_block_for(uri),
            FamilyVariants::Corner(f) => f.get_block_for(uri),
            FamilyVariants::Edge(f) => f.get_block_for(uri),
            FamilyVariants::MultiConnect(f) => f.get_block_for(uri),
        }
    }

    /// Variant to place for `data`. `None` means the placement is rejected.
    pub fn get_block_for_placement<W: WorldView + ?Sized>(
        &self,
        data: &BlockPlacementData,
        world: &W,
    ) -> Option<&Block> {
        match &self.variants {
            FamilyVariants::Symmetric(f) => Some(f.block()),
            FamilyVariants::Horizontal(f) => f.get_block_for_placement(data),
            FamilyVariants::FullRotation(f) => f.get_block_for_placement(data),
            FamilyVariants::Side(f) => Some(f.get_block_for_placement(data)),
            FamilyVariants::Corner(f) => Some(f.get_block_for_placement(data)),
            FamilyVariants::Edge(f) => Some(f.get_block_for_placement(data)),
            FamilyVariants::MultiConnect(f) => f.get_block_for_placement(data, world),
        }
    }

    /// Variant for the block at `pos` after a neighbor changed. Families that
    /// do not connect keep `old`.
    pub fn get_block_for_neighbor_update<W: WorldView + ?Sized>(
        &self,
        pos: BlockPos,
        old: &Block,
        world: &W,
    ) -> Option<Block> {
        match &self.variants {
            FamilyVariants::MultiConnect(f) => f.get_block_for_neighbor_update(pos, world).cloned(),
            _ => Some(old.clone()),
        }
    }

    #[inline]
    pub fn updates_with_neighbors(&self) -> bool {
        matches!(self.variants, FamilyVariants::MultiConnect(_))
    }

    /// Every distinct block of the family, each once.
    pub fn blocks(&self) -> Vec<&Block> {
        match &self.variants {
            FamilyVariants::Symmetric(f) => vec![f.block()],
            FamilyVariants::Horizontal(f) => f.blocks().collect(),
            FamilyVariants::FullRotation(f) => f.blocks().collect(),
            FamilyVariants::Side(f) => f.blocks().collect(),
            FamilyVariants::Corner(f) => f.blocks().collect(),
            FamilyVariants::Edge(f) => f.blocks().collect(),
            FamilyVariants::MultiConnect(f) => f.blocks().collect(),
        }
    }

    /// True if `block` is one of this family's variants.
    pub fn contains(&self, block: &Block) -> bool {
        block.uri().same_family(&self.uri) && self.get_block_for(block.uri()) == Some(block)
    }
}
