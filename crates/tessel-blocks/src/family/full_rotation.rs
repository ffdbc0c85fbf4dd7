use tessel_geom::{ExtendedSide, Side};

use super::keys::parse_key;
use crate::block::Block;
use crate::builder::BuildContext;
use crate::error::FamilyError;
use crate::placement::BlockPlacementData;
use crate::uri::BlockUri;

/// Upright in each horizontal facing, or lying on the floor or ceiling
/// pointing in a horizontal direction. Twelve of the 24 pairs.
#[derive(Clone, Debug)]
pub struct FullRotationFamily {
    variants: Vec<(ExtendedSide, Block)>,
}

fn populated_pairs() -> impl Iterator<Item = ExtendedSide> {
    let upright = Side::HORIZONTAL
        .into_iter()
        .filter_map(|h| ExtendedSide::new(h, Side::Top));
    let lying = Side::VERTICAL.into_iter().flat_map(|v| {
        Side::HORIZONTAL
            .into_iter()
            .filter_map(move |h| ExtendedSide::new(v, h))
    });
    upright.chain(lying)
}

impl FullRotationFamily {
    pub fn build(ctx: &BuildContext<'_>) -> Result<Self, FamilyError> {
        let family = ctx.family_uri();
        let mut variants = Vec::with_capacity(12);
        for pair in populated_pairs() {
            let block = ctx.build(None, family.with_identifier(pair), pair.rotation())?;
            variants.push((pair, block));
        }
        Ok(Self { variants })
    }

    pub fn variant(&self, pair: ExtendedSide) -> Option<&Block> {
        self.variants
            .iter()
            .find(|(p, _)| *p == pair)
            .map(|(_, b)| b)
    }

    pub fn archetype(&self) -> Option<&Block> {
        self.variant(ExtendedSide::ARCHETYPE)
    }

    pub fn get_block_for_placement(&self, data: &BlockPlacementData) -> Option<&Block> {
        let attach = data.attachment_side;
        let secondary = if attach.is_vertical() {
            let v = data.view_direction;
            Side::in_horizontal_direction(-v.x, -v.z)
        } else {
            Side::Top
        };
        self.variant(ExtendedSide::new(attach, secondary)?)
    }

    pub fn get_block_for(&self, uri: &BlockUri) -> Option<&Block> {
        self.variant(parse_key::<ExtendedSide>(uri)?)
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.variants.iter().map(|(_, b)| b)
    }
}
