//! Identifier encodings for family variants.
//!
//! Sides, corners and edges use their lowercase names, side pairs use
//! `{primary}_{secondary}` and connection masks their decimal value.

use std::fmt::Display;
use std::hash::Hash;
use std::str::FromStr;

use tessel_geom::{Corner, Edge, ExtendedSide, Rotation, Side, SideMask, Vec3};

use crate::uri::BlockUri;

pub trait VariantKey: Copy + Eq + Hash + Display + FromStr {
    /// Used in log messages.
    const KIND: &'static str;
}

impl VariantKey for Side {
    const KIND: &'static str = "side";
}

impl VariantKey for Corner {
    const KIND: &'static str = "corner";
}

impl VariantKey for Edge {
    const KIND: &'static str = "edge";
}

impl VariantKey for ExtendedSide {
    const KIND: &'static str = "side pair";
}

impl VariantKey for SideMask {
    const KIND: &'static str = "connection mask";
}

/// Parses the identifier of `uri` as a `K`. A malformed identifier is logged and
/// yields `None`; a missing identifier also yields `None`.
pub fn parse_key<K: VariantKey>(uri: &BlockUri) -> Option<K> {
    let id = uri.identifier()?;
    match id.parse::<K>() {
        Ok(key) => Some(key),
        Err(_) => {
            log::warn!("{}: `{}` is not a valid {} identifier", uri.family_uri(), id, K::KIND);
            None
        }
    }
}

/// Keys for families that author one shape and rotate it into each position.
pub trait AttachmentKey: VariantKey + 'static {
    const ALL: &'static [Self];
    const ARCHETYPE: Self;

    fn rotation_from_archetype(self) -> Rotation;
    fn symmetric_equivalent(self) -> Self;
    fn is_canonical(self) -> bool;
    /// Classifies a hit point relative to the cell centre.
    fn detect(relative_hit: Vec3) -> Self;
}

impl AttachmentKey for Side {
    const ALL: &'static [Side] = &Side::ALL;
    const ARCHETYPE: Side = Side::ARCHETYPE;

    fn rotation_from_archetype(self) -> Rotation {
        Side::rotation_from_archetype(self)
    }
    fn symmetric_equivalent(self) -> Side {
        Side::symmetric_equivalent(self)
    }
    fn is_canonical(self) -> bool {
        Side::is_canonical(self)
    }
    fn detect(relative_hit: Vec3) -> Side {
        Side::in_direction(relative_hit)
    }
}

impl AttachmentKey for Corner {
    const ALL: &'static [Corner] = &Corner::ALL;
    const ARCHETYPE: Corner = Corner::ARCHETYPE;

    fn rotation_from_archetype(self) -> Rotation {
        Corner::rotation_from_archetype(self)
    }
    fn symmetric_equivalent(self) -> Corner {
        Corner::symmetric_equivalent(self)
    }
    fn is_canonical(self) -> bool {
        Corner::is_canonical(self)
    }
    fn detect(relative_hit: Vec3) -> Corner {
        Corner::nearest(relative_hit)
    }
}

impl AttachmentKey for Edge {
    const ALL: &'static [Edge] = &Edge::ALL;
    const ARCHETYPE: Edge = Edge::ARCHETYPE;

    fn rotation_from_archetype(self) -> Rotation {
        Edge::rotation_from_archetype(self)
    }
    fn symmetric_equivalent(self) -> Edge {
        Edge::symmetric_equivalent(self)
    }
    fn is_canonical(self) -> bool {
        Edge::is_canonical(self)
    }
    fn detect(relative_hit: Vec3) -> Edge {
        Edge::nearest(relative_hit)
    }
}
