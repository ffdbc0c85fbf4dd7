use tessel_geom::{BlockPos, Rotation, SideMask};

use super::keys::parse_key;
use crate::block::Block;
use crate::builder::BuildContext;
use crate::error::FamilyError;
use crate::placement::{BlockPlacementData, ConnectionRule, WorldView};
use crate::uri::BlockUri;
use crate::variants::{CANONICAL_SHAPES, VariantRegistry};

/// Picks a variant from which neighbors it links up with: fences, rails, pipes.
///
/// Each canonical shape is authored in the definition section of the same
/// name. Shapes that cannot fit the connectable sides need no section; any
/// other missing section leaves some pattern uncovered and fails the build.
#[derive(Clone, Debug)]
pub struct MultiConnectFamily {
    uri: BlockUri,
    rule: ConnectionRule,
    registry: VariantRegistry,
    archetype: Block,
}

impl MultiConnectFamily {
    pub fn build(ctx: &BuildContext<'_>) -> Result<Self, FamilyError> {
        let uri = ctx.family_uri();
        let connectable = ctx.def.connectable_mask().map_err(|e| ctx.invalid(e))?;
        let rule = ctx.def.connection_rule().map_err(|e| ctx.invalid(e))?;
        let horizontal = Rotation::horizontal();
        let rotations: &[Rotation] = if connectable.is_subset_of(SideMask::HORIZONTAL) {
            &horizontal
        } else {
            Rotation::all()
        };

        let mut registry = VariantRegistry::new(uri.clone(), connectable);
        for shape in &CANONICAL_SHAPES {
            let mask = shape.mask();
            if !rotations
                .iter()
                .any(|r| r.rotate_mask(mask).is_subset_of(connectable))
            {
                continue;
            }
            if !ctx.def.has_section(shape.name) {
                log::debug!("{}: no `{}` section", uri, shape.name);
                continue;
            }
            registry.register_variants(ctx, Some(shape.name), mask, rotations)?;
        }
        registry.check_complete()?;

        let archetype = registry
            .get(SideMask::EMPTY)
            .cloned()
            .ok_or_else(|| FamilyError::MissingVariant {
                family: uri.clone(),
                key: SideMask::EMPTY.to_string(),
            })?;
        log::debug!(
            "{}: {} connection variant(s) over sides {}",
            uri,
            registry.len(),
            connectable
        );
        Ok(Self {
            uri,
            rule,
            registry,
            archetype,
        })
    }

    #[inline]
    pub fn archetype(&self) -> &Block {
        &self.archetype
    }

    #[inline]
    pub fn connectable(&self) -> SideMask {
        self.registry.connectable()
    }

    #[inline]
    pub fn rule(&self) -> &ConnectionRule {
        &self.rule
    }

    pub fn variant(&self, mask: SideMask) -> Option<&Block> {
        self.registry.get(mask)
    }

    /// Connectable sides whose neighbor satisfies the connection rule.
    pub fn connection_mask<W: WorldView + ?Sized>(&self, pos: BlockPos, world: &W) -> SideMask {
        self.connectable()
            .sides()
            .filter(|&side| {
                world
                    .block_at(pos.offset(side))
                    .is_some_and(|b| self.rule.connects(&self.uri, b))
            })
            .collect()
    }

    pub fn get_block_for_placement<W: WorldView + ?Sized>(
        &self,
        data: &BlockPlacementData,
        world: &W,
    ) -> Option<&Block> {
        self.variant(self.connection_mask(data.pos, world))
    }

    pub fn get_block_for_neighbor_update<W: WorldView + ?Sized>(
        &self,
        pos: BlockPos,
        world: &W,
    ) -> Option<&Block> {
        self.variant(self.connection_mask(pos, world))
    }

    pub fn get_block_for(&self, uri: &BlockUri) -> Option<&Block> {
        self.variant(parse_key::<SideMask>(uri)?)
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.registry.iter().map(|(_, b)| b)
    }
}
