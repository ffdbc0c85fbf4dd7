use tessel_geom::{Rotation, Side};

use super::keys::parse_key;
use crate::block::Block;
use crate::builder::BuildContext;
use crate::error::FamilyError;
use crate::placement::BlockPlacementData;
use crate::uri::BlockUri;

/// Four yaw orientations keyed by the horizontal side the block faces.
#[derive(Clone, Debug)]
pub struct HorizontalFamily {
    variants: Vec<(Side, Block)>,
}

impl HorizontalFamily {
    pub fn build(ctx: &BuildContext<'_>) -> Result<Self, FamilyError> {
        let family = ctx.family_uri();
        let mut variants = Vec::with_capacity(4);
        for side in Side::HORIZONTAL {
            let rot = Rotation::horizontal()
                .into_iter()
                .find(|r| r.rotate(Side::ARCHETYPE) == side)
                .unwrap_or_default();
            let block = ctx.build(None, family.with_identifier(side), rot)?;
            variants.push((side, block));
        }
        Ok(Self { variants })
    }

    pub fn variant(&self, side: Side) -> Option<&Block> {
        self.variants
            .iter()
            .find(|(s, _)| *s == side)
            .map(|(_, b)| b)
    }

    pub fn archetype(&self) -> Option<&Block> {
        self.variant(Side::ARCHETYPE)
    }

    /// A horizontal attachment faces away from the supporting wall; anything
    /// else faces back towards the viewer.
    pub fn get_block_for_placement(&self, data: &BlockPlacementData) -> Option<&Block> {
        let side = if data.attachment_side.is_horizontal() {
            data.attachment_side
        } else {
            let v = data.view_direction;
            Side::in_horizontal_direction(-v.x, -v.z)
        };
        self.variant(side)
    }

    pub fn get_block_for(&self, uri: &BlockUri) -> Option<&Block> {
        self.variant(parse_key::<Side>(uri)?)
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.variants.iter().map(|(_, b)| b)
    }
}
