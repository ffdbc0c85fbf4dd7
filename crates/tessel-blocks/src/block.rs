use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tessel_geom::Rotation;

use crate::uri::BlockUri;

/// Attributes a variant takes from its definition section.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockProps {
    pub display_name: String,
    pub solid: bool,
    pub emission: u8,
}

impl Default for BlockProps {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            solid: true,
            emission: 0,
        }
    }
}

#[derive(Debug)]
struct BlockData {
    uri: BlockUri,
    section: Option<String>,
    shape: Option<String>,
    rotation: Rotation,
    props: BlockProps,
}

/// Shared handle to one pre-built variant.
///
/// Cloning is a reference-count bump. Two handles are equal only when they
/// point at the same variant, so a symmetric family binding one block under
/// two identifiers hands out equal handles for both.
#[derive(Clone)]
pub struct Block(Arc<BlockData>);

impl Block {
    pub fn new(
        uri: BlockUri,
        section: Option<String>,
        shape: Option<String>,
        rotation: Rotation,
        props: BlockProps,
    ) -> Block {
        Block(Arc::new(BlockData {
            uri,
            section,
            shape,
            rotation,
            props,
        }))
    }

    #[inline]
    pub fn uri(&self) -> &BlockUri {
        &self.0.uri
    }

    pub fn family_uri(&self) -> BlockUri {
        self.0.uri.family_uri()
    }

    #[inline]
    pub fn section(&self) -> Option<&str> {
        self.0.section.as_deref()
    }

    #[inline]
    pub fn shape(&self) -> Option<&str> {
        self.0.shape.as_deref()
    }

    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.0.rotation
    }

    #[inline]
    pub fn display_name(&self) -> &str {
        &self.0.props.display_name
    }

    #[inline]
    pub fn is_solid(&self) -> bool {
        self.0.props.solid
    }

    #[inline]
    pub fn emission(&self) -> u8 {
        self.0.props.emission
    }

    #[inline]
    pub fn props(&self) -> &BlockProps {
        &self.0.props
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Block {}

impl Hash for Block {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("uri", &self.0.uri.to_string())
            .field("rotation", &self.0.rotation)
            .finish()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.uri, f)
    }
}
