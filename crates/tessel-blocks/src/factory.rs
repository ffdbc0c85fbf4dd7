use std::fmt;
use std::str::FromStr;

use tessel_geom::{Corner, Edge, Side};

use crate::builder::{BlockBuilder, BuildContext};
use crate::config::{FamilyDef, PlacementTopology, ShapeDef};
use crate::error::FamilyError;
use crate::family::{
    AttachedFamily, BlockFamily, FamilyVariants, FullRotationFamily, HorizontalFamily,
    MultiConnectFamily, SymmetricFamily,
};

/// Every family kind a definition can name.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FamilyKind {
    Symmetric,
    Horizontal,
    FullRotation,
    Side,
    Corner,
    Edge,
    MultiConnect,
    /// Resolved to one of the others from the shape's placement topology.
    Freeform,
}

impl FamilyKind {
    pub const ALL: [FamilyKind; 8] = [
        FamilyKind::Symmetric,
        FamilyKind::Horizontal,
        FamilyKind::FullRotation,
        FamilyKind::Side,
        FamilyKind::Corner,
        FamilyKind::Edge,
        FamilyKind::MultiConnect,
        FamilyKind::Freeform,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FamilyKind::Symmetric => "symmetric",
            FamilyKind::Horizontal => "horizontal",
            FamilyKind::FullRotation => "full_rotation",
            FamilyKind::Side => "side",
            FamilyKind::Corner => "corner",
            FamilyKind::Edge => "edge",
            FamilyKind::MultiConnect => "multi_connect",
            FamilyKind::Freeform => "freeform",
        }
    }

    /// Kind used for a shape's placement topology.
    pub fn for_topology(topology: PlacementTopology) -> FamilyKind {
        match topology {
            PlacementTopology::Cube => FamilyKind::Symmetric,
            PlacementTopology::Horizontal => FamilyKind::Horizontal,
            PlacementTopology::Full => FamilyKind::FullRotation,
            PlacementTopology::Side => FamilyKind::Side,
            PlacementTopology::Corner => FamilyKind::Corner,
            PlacementTopology::Edge => FamilyKind::Edge,
        }
    }
}

impl fmt::Display for FamilyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FamilyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase().replace('-', "_");
        FamilyKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or(s)
    }
}

type Constructor = fn(&BuildContext<'_>) -> Result<FamilyVariants, FamilyError>;

fn constructor(kind: FamilyKind) -> Constructor {
    match kind {
        FamilyKind::Symmetric => symmetric,
        FamilyKind::Horizontal => horizontal,
        FamilyKind::FullRotation => full_rotation,
        FamilyKind::Side => attached_side,
        FamilyKind::Corner => attached_corner,
        FamilyKind::Edge => attached_edge,
        FamilyKind::MultiConnect => multi_connect,
        FamilyKind::Freeform => freeform,
    }
}

fn symmetric(ctx: &BuildContext<'_>) -> Result<FamilyVariants, FamilyError> {
    SymmetricFamily::build(ctx).map(FamilyVariants::Symmetric)
}

fn horizontal(ctx: &BuildContext<'_>) -> Result<FamilyVariants, FamilyError> {
    HorizontalFamily::build(ctx).map(FamilyVariants::Horizontal)
}

fn full_rotation(ctx: &BuildContext<'_>) -> Result<FamilyVariants, FamilyError> {
    FullRotationFamily::build(ctx).map(FamilyVariants::FullRotation)
}

fn attached_side(ctx: &BuildContext<'_>) -> Result<FamilyVariants, FamilyError> {
    AttachedFamily::<Side>::build(ctx).map(FamilyVariants::Side)
}

fn attached_corner(ctx: &BuildContext<'_>) -> Result<FamilyVariants, FamilyError> {
    AttachedFamily::<Corner>::build(ctx).map(FamilyVariants::Corner)
}

fn attached_edge(ctx: &BuildContext<'_>) -> Result<FamilyVariants, FamilyError> {
    AttachedFamily::<Edge>::build(ctx).map(FamilyVariants::Edge)
}

fn multi_connect(ctx: &BuildContext<'_>) -> Result<FamilyVariants, FamilyError> {
    MultiConnectFamily::build(ctx).map(FamilyVariants::MultiConnect)
}

fn freeform(ctx: &BuildContext<'_>) -> Result<FamilyVariants, FamilyError> {
    let shape = ctx.shape.ok_or_else(|| FamilyError::ShapeRequired {
        family: ctx.family_uri(),
        kind: FamilyKind::Freeform.name(),
    })?;
    let kind = FamilyKind::for_topology(shape.placement);
    log::debug!("{}: freeform shape `{}` builds as {}", ctx.family_uri(), shape.name, kind);
    constructor(kind)(ctx)
}

/// Kind a definition builds as: its explicit `kind`, otherwise inferred.
///
/// Without a kind, connection settings mean multi-connect and no shape or a
/// cube shape means symmetric. Any other shape is freeform, resolved from its
/// placement topology; the `symmetric` flags only collapse attached variants.
pub fn default_kind(
    def: &FamilyDef,
    shape: Option<&ShapeDef>,
) -> Result<FamilyKind, FamilyError> {
    if let Some(kind) = &def.kind {
        return kind.parse().map_err(|k| FamilyError::UnknownKind {
            family: def.uri.family_uri(),
            kind: k,
        });
    }
    if def.connections.is_some() || def.connects_to.is_some() {
        return Ok(FamilyKind::MultiConnect);
    }
    Ok(match shape {
        None => FamilyKind::Symmetric,
        Some(s) if s.placement == PlacementTopology::Cube => FamilyKind::Symmetric,
        Some(_) => FamilyKind::Freeform,
    })
}

/// Builds a family of the named kind.
pub fn create(
    kind_id: &str,
    def: &FamilyDef,
    shape: Option<&ShapeDef>,
    builder: &dyn BlockBuilder,
) -> Result<BlockFamily, FamilyError> {
    let kind = kind_id.parse().map_err(|k| FamilyError::UnknownKind {
        family: def.uri.family_uri(),
        kind: k,
    })?;
    create_kind(kind, def, shape, builder)
}

pub fn create_kind(
    kind: FamilyKind,
    def: &FamilyDef,
    shape: Option<&ShapeDef>,
    builder: &dyn BlockBuilder,
) -> Result<BlockFamily, FamilyError> {
    let ctx = BuildContext::new(def, shape, builder);
    let variants = constructor(kind)(&ctx)?;
    BlockFamily::new(def.uri.clone(), def.categories.clone(), variants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DefaultBlockBuilder;

    fn shape(placement: PlacementTopology, symmetric: bool) -> ShapeDef {
        ShapeDef {
            name: "s".into(),
            placement,
            symmetric,
        }
    }

    #[test]
    fn kind_names_round_trip() {
        for k in FamilyKind::ALL {
            assert_eq!(k.name().parse::<FamilyKind>(), Ok(k));
        }
        assert_eq!("Multi-Connect".parse::<FamilyKind>(), Ok(FamilyKind::MultiConnect));
        assert!("stairs".parse::<FamilyKind>().is_err());
    }

    #[test]
    fn inferred_kinds() {
        let mut def = FamilyDef::new("core:x".parse().unwrap());
        assert_eq!(default_kind(&def, None), Ok(FamilyKind::Symmetric));
        let cube = shape(PlacementTopology::Cube, false);
        assert_eq!(default_kind(&def, Some(&cube)), Ok(FamilyKind::Symmetric));
        let sym_cube = shape(PlacementTopology::Cube, true);
        assert_eq!(default_kind(&def, Some(&sym_cube)), Ok(FamilyKind::Symmetric));
        let sym_edge = shape(PlacementTopology::Edge, true);
        assert_eq!(default_kind(&def, Some(&sym_edge)), Ok(FamilyKind::Freeform));
        def.symmetric = Some(true);
        assert_eq!(default_kind(&def, Some(&sym_edge)), Ok(FamilyKind::Freeform));
        def.symmetric = None;
        let stair = shape(PlacementTopology::Horizontal, false);
        assert_eq!(default_kind(&def, Some(&stair)), Ok(FamilyKind::Freeform));
        def.connects_to = Some(crate::config::ConnectsToCfg::Simple("solid".into()));
        assert_eq!(default_kind(&def, None), Ok(FamilyKind::MultiConnect));
        def.kind = Some("bogus".into());
        assert!(matches!(
            default_kind(&def, None),
            Err(FamilyError::UnknownKind { .. })
        ));
    }

    #[test]
    fn freeform_dispatches_on_topology() {
        let def = FamilyDef::new("core:slope".parse().unwrap());
        let cases = [
            (PlacementTopology::Cube, FamilyKind::Symmetric),
            (PlacementTopology::Horizontal, FamilyKind::Horizontal),
            (PlacementTopology::Full, FamilyKind::FullRotation),
            (PlacementTopology::Side, FamilyKind::Side),
            (PlacementTopology::Corner, FamilyKind::Corner),
            (PlacementTopology::Edge, FamilyKind::Edge),
        ];
        for (topology, expected) in cases {
            let s = shape(topology, false);
            let fam = create("freeform", &def, Some(&s), &DefaultBlockBuilder).unwrap();
            assert_eq!(fam.kind(), expected);
        }
    }

    #[test]
    fn symmetric_edge_shape_builds_collapsed_edges() {
        let def = FamilyDef::new("core:beam".parse().unwrap());
        let s = shape(PlacementTopology::Edge, true);
        let kind = default_kind(&def, Some(&s)).unwrap();
        let fam = create_kind(kind, &def, Some(&s), &DefaultBlockBuilder).unwrap();
        assert_eq!(fam.kind(), FamilyKind::Edge);
        let blocks = fam.blocks();
        assert_eq!(blocks.len(), 6);
        for (i, a) in blocks.iter().enumerate() {
            assert!(blocks[i + 1..].iter().all(|b| b != a));
        }
    }

    #[test]
    fn freeform_without_shape_fails() {
        let def = FamilyDef::new("core:slope".parse().unwrap());
        let err = create("freeform", &def, None, &DefaultBlockBuilder).unwrap_err();
        assert!(matches!(err, FamilyError::ShapeRequired { kind: "freeform", .. }));
    }

    #[test]
    fn unknown_kind_fails() {
        let def = FamilyDef::new("core:slope".parse().unwrap());
        let err = create("ladder", &def, None, &DefaultBlockBuilder).unwrap_err();
        assert!(matches!(err, FamilyError::UnknownKind { ref kind, .. } if kind == "ladder"));
    }
}
