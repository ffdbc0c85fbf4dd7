use std::collections::HashMap;
use std::hash::BuildHasher;

use tessel_geom::{BlockPos, Side, Vec3};

use crate::block::Block;
use crate::uri::BlockUri;

/// One placement attempt. Lives only for the duration of a resolution call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlockPlacementData {
    pub pos: BlockPos,
    /// Direction from the supporting surface towards the new block.
    pub attachment_side: Side,
    pub view_direction: Vec3,
    /// Hit point relative to the target cell centre, each component in `[-0.5, 0.5]`.
    pub relative_hit: Vec3,
}

impl BlockPlacementData {
    /// Clamps `relative_hit` into the cell.
    pub fn new(
        pos: BlockPos,
        attachment_side: Side,
        view_direction: Vec3,
        relative_hit: Vec3,
    ) -> Self {
        Self {
            pos,
            attachment_side,
            view_direction,
            relative_hit: relative_hit.clamp(-0.5, 0.5),
        }
    }
}

/// Read access to placed blocks, used for neighbor connectivity.
pub trait WorldView {
    fn block_at(&self, pos: BlockPos) -> Option<&Block>;
}

impl<S: BuildHasher> WorldView for HashMap<BlockPos, Block, S> {
    fn block_at(&self, pos: BlockPos) -> Option<&Block> {
        self.get(&pos)
    }
}

/// Which neighbors a multi-connect block links up with.
#[derive(Clone, Debug, PartialEq)]
pub enum ConnectionRule {
    SameFamily,
    /// Own family plus the listed families.
    Families(Vec<BlockUri>),
    /// Own family plus any solid block.
    Solid,
    Any,
}

impl ConnectionRule {
    pub fn connects(&self, family: &BlockUri, neighbor: &Block) -> bool {
        let uri = neighbor.uri();
        match self {
            ConnectionRule::SameFamily => uri.same_family(family),
            ConnectionRule::Families(list) => {
                uri.same_family(family) || list.iter().any(|f| uri.same_family(f))
            }
            ConnectionRule::Solid => uri.same_family(family) || neighbor.is_solid(),
            ConnectionRule::Any => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockProps;
    use tessel_geom::Rotation;

    fn block(uri: &str, solid: bool) -> Block {
        let props = BlockProps {
            solid,
            ..BlockProps::default()
        };
        Block::new(uri.parse().unwrap(), None, None, Rotation::none(), props)
    }

    #[test]
    fn rules_filter_neighbors() {
        let fence: BlockUri = "core:fence".parse().unwrap();
        let other_fence = block("core:fence.18", false);
        let glass = block("core:glass", false);
        let stone = block("core:stone", true);

        assert!(ConnectionRule::SameFamily.connects(&fence, &other_fence));
        assert!(!ConnectionRule::SameFamily.connects(&fence, &stone));
        assert!(ConnectionRule::Solid.connects(&fence, &stone));
        assert!(ConnectionRule::Solid.connects(&fence, &other_fence));
        assert!(!ConnectionRule::Solid.connects(&fence, &glass));
        let listed = ConnectionRule::Families(vec!["core:glass".parse().unwrap()]);
        assert!(listed.connects(&fence, &glass));
        assert!(!listed.connects(&fence, &stone));
        assert!(ConnectionRule::Any.connects(&fence, &glass));
    }

    #[test]
    fn placement_hit_is_clamped() {
        let data = BlockPlacementData::new(
            BlockPos::new(0, 0, 0),
            Side::Top,
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.9, -0.2, -3.0),
        );
        assert_eq!(data.relative_hit, Vec3::new(0.5, -0.2, -0.5));
    }

    #[test]
    fn hashmap_is_a_world() {
        let mut world = HashMap::new();
        let stone = block("core:stone", true);
        world.insert(BlockPos::new(1, 2, 3), stone.clone());
        assert_eq!(world.block_at(BlockPos::new(1, 2, 3)), Some(&stone));
        assert!(world.block_at(BlockPos::new(0, 0, 0)).is_none());
    }
}
