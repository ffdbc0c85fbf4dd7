use tessel_geom::Rotation;

use crate::block::Block;
use crate::builder::BuildContext;
use crate::error::FamilyError;
use crate::uri::BlockUri;

/// A single block that looks the same however it is placed.
#[derive(Clone, Debug)]
pub struct SymmetricFamily {
    block: Block,
}

impl SymmetricFamily {
    pub fn build(ctx: &BuildContext<'_>) -> Result<Self, FamilyError> {
        let block = ctx.build(None, ctx.family_uri(), Rotation::none())?;
        Ok(Self { block })
    }

    #[inline]
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// Only the bare family uri names the block.
    pub fn get_block_for(&self, uri: &BlockUri) -> Option<&Block> {
        match uri.identifier() {
            None => Some(&self.block),
            Some(id) => {
                log::warn!("{}: symmetric family has no variant `{}`", uri.family_uri(), id);
                None
            }
        }
    }
}
