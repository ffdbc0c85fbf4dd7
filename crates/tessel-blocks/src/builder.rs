use tessel_geom::Rotation;

use crate::block::Block;
use crate::config::{FamilyDef, ShapeDef};
use crate::error::FamilyError;
use crate::uri::BlockUri;

/// Produces one oriented variant of a family. Geometry lives behind this seam;
/// families only decide which variants exist and under which identifiers.
pub trait BlockBuilder {
    /// `section` of `None` is the definition's base section.
    fn build_variant(
        &self,
        def: &FamilyDef,
        section: Option<&str>,
        shape: Option<&ShapeDef>,
        uri: BlockUri,
        rotation: Rotation,
    ) -> Result<Block, FamilyError>;
}

/// Everything a family constructor needs: the definition, its resolved shape
/// and the builder that turns sections into blocks.
#[derive(Clone, Copy)]
pub struct BuildContext<'a> {
    pub def: &'a FamilyDef,
    pub shape: Option<&'a ShapeDef>,
    pub builder: &'a dyn BlockBuilder,
}

impl<'a> BuildContext<'a> {
    pub fn new(
        def: &'a FamilyDef,
        shape: Option<&'a ShapeDef>,
        builder: &'a dyn BlockBuilder,
    ) -> Self {
        Self {
            def,
            shape,
            builder,
        }
    }

    #[inline]
    pub fn family_uri(&self) -> BlockUri {
        self.def.uri.family_uri()
    }

    /// Definition flag first, then the shape's.
    pub fn is_symmetric(&self) -> bool {
        self.def
            .symmetric
            .or(self.shape.map(|s| s.symmetric))
            .unwrap_or(false)
    }

    pub fn build(
        &self,
        section: Option<&str>,
        uri: BlockUri,
        rotation: Rotation,
    ) -> Result<Block, FamilyError> {
        self.builder
            .build_variant(self.def, section, self.shape, uri, rotation)
    }

    pub(crate) fn invalid(&self, reason: impl Into<String>) -> FamilyError {
        FamilyError::InvalidDefinition {
            family: self.family_uri(),
            reason: reason.into(),
        }
    }
}

/// Builds blocks straight from definition sections.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultBlockBuilder;

impl BlockBuilder for DefaultBlockBuilder {
    fn build_variant(
        &self,
        def: &FamilyDef,
        section: Option<&str>,
        shape: Option<&ShapeDef>,
        uri: BlockUri,
        rotation: Rotation,
    ) -> Result<Block, FamilyError> {
        let resolved = def
            .section(section)
            .ok_or_else(|| FamilyError::MissingSection {
                family: def.uri.family_uri(),
                section: section.unwrap_or("base").to_string(),
            })?;
        let props = def.props_for(&resolved);
        let shape_name = resolved
            .shape
            .or_else(|| shape.map(|s| s.name.clone()));
        Ok(Block::new(
            uri,
            section.map(str::to_string),
            shape_name,
            rotation,
            props,
        ))
    }
}
