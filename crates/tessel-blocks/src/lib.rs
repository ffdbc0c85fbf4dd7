//! Block families: variant registration, placement and connectivity resolution.
#![forbid(unsafe_code)]

pub mod block;
pub mod builder;
pub mod config;
pub mod error;
pub mod factory;
pub mod family;
pub mod placement;
pub mod registry;
pub mod uri;
pub mod variants;

pub use block::{Block, BlockProps};
pub use builder::{BlockBuilder, BuildContext, DefaultBlockBuilder};
pub use config::{DefinitionsConfig, FamilyDef, PlacementTopology, SectionDef, ShapeDef};
pub use error::FamilyError;
pub use factory::FamilyKind;
pub use family::{BlockFamily, FamilyVariants};
pub use placement::{BlockPlacementData, ConnectionRule, WorldView};
pub use registry::{AIR_ID, BlockId, FamilyRegistry};
pub use uri::{BlockUri, UriParseError};
pub use variants::{CANONICAL_SHAPES, CanonicalShape, VariantRegistry};
