use tessel_geom::{MaskParseError, OrientationParseError, SideMask};

use crate::uri::{BlockUri, UriParseError};

/// Construction-time failures. A family either builds completely or returns one of these.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FamilyError {
    #[error("{family}: no section `{section}` in definition")]
    MissingSection { family: BlockUri, section: String },
    #[error("{family}: required variant `{key}` was not built")]
    MissingVariant { family: BlockUri, key: String },
    #[error("{family}: kind `{kind}` requires a shape")]
    ShapeRequired { family: BlockUri, kind: &'static str },
    #[error("{family}: unknown shape `{shape}`")]
    UnknownShape { family: BlockUri, shape: String },
    #[error("{family}: unknown family kind `{kind}`")]
    UnknownKind { family: BlockUri, kind: String },
    #[error("{family}: {reason}")]
    InvalidDefinition { family: BlockUri, reason: String },
    #[error("{family}: connection pattern {mask} is reachable but no authored shape rotates onto it")]
    Incomplete { family: BlockUri, mask: SideMask },
    #[error("family `{0}` is already registered")]
    DuplicateFamily(BlockUri),
    #[error(transparent)]
    Uri(#[from] UriParseError),
    #[error(transparent)]
    Orientation(#[from] OrientationParseError),
    #[error(transparent)]
    Mask(#[from] MaskParseError),
}
