//! Connection-mask keyed variant storage for multi-connect families.

use std::collections::HashMap;

use tessel_geom::{Rotation, Side, SideMask};

use crate::block::Block;
use crate::builder::BuildContext;
use crate::error::FamilyError;
use crate::uri::BlockUri;

/// An authored connection pattern; every other pattern with the same number
/// of connections is one of these rotated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CanonicalShape {
    pub name: &'static str,
    pub sides: &'static [Side],
}

impl CanonicalShape {
    pub fn mask(&self) -> SideMask {
        self.sides.iter().copied().collect()
    }

    #[inline]
    pub fn connections(&self) -> u32 {
        self.sides.len() as u32
    }
}

/// Authored shapes in search order. Names double as definition section names.
pub const CANONICAL_SHAPES: [CanonicalShape; 10] = [
    CanonicalShape {
        name: "no_connections",
        sides: &[],
    },
    CanonicalShape {
        name: "one_connection",
        sides: &[Side::Back],
    },
    CanonicalShape {
        name: "line_connection",
        sides: &[Side::Back, Side::Front],
    },
    CanonicalShape {
        name: "2d_corner",
        sides: &[Side::Left, Side::Back],
    },
    CanonicalShape {
        name: "2d_t",
        sides: &[Side::Left, Side::Back, Side::Right],
    },
    CanonicalShape {
        name: "3d_corner",
        sides: &[Side::Left, Side::Back, Side::Top],
    },
    CanonicalShape {
        name: "cross",
        sides: &[Side::Right, Side::Left, Side::Back, Side::Front],
    },
    CanonicalShape {
        name: "4d_side",
        sides: &[Side::Left, Side::Back, Side::Front, Side::Top],
    },
    CanonicalShape {
        name: "5d_side",
        sides: &[Side::Left, Side::Back, Side::Front, Side::Top, Side::Bottom],
    },
    CanonicalShape {
        name: "all",
        sides: &[
            Side::Top,
            Side::Left,
            Side::Front,
            Side::Bottom,
            Side::Right,
            Side::Back,
        ],
    },
];

#[derive(Clone, Debug)]
struct Authored {
    mask: SideMask,
    rotations: Vec<Rotation>,
}

/// Binds rotated connection masks to built variants.
#[derive(Clone, Debug)]
pub struct VariantRegistry {
    family: BlockUri,
    // Rotated masks outside this set are not bound.
    connectable: SideMask,
    authored: Vec<Authored>,
    variants: HashMap<SideMask, Block>,
}

impl VariantRegistry {
    pub fn new(family: BlockUri, connectable: SideMask) -> Self {
        Self {
            family: family.family_uri(),
            connectable,
            authored: Vec::new(),
            variants: HashMap::new(),
        }
    }

    /// Builds `canonical` under each rotation and binds the result to the
    /// rotated mask, with identifier `decimal(mask)`.
    ///
    /// Within one call a rotation that reproduces an already computed mask is
    /// skipped, so the first rotation wins. A mask already bound by an earlier
    /// call is overwritten. Returns how many masks were bound.
    pub fn register_variants(
        &mut self,
        ctx: &BuildContext<'_>,
        section: Option<&str>,
        canonical: SideMask,
        rotations: &[Rotation],
    ) -> Result<usize, FamilyError> {
        let mut seen: Vec<SideMask> = Vec::with_capacity(rotations.len());
        for &rot in rotations {
            let mask = rot.rotate_mask(canonical);
            if seen.contains(&mask) || !mask.is_subset_of(self.connectable) {
                continue;
            }
            seen.push(mask);
            let block = ctx.build(section, self.family.with_identifier(mask), rot)?;
            if let Some(prev) = self.variants.insert(mask, block) {
                log::debug!(
                    "{}: mask {} rebound, replacing variant built with {}",
                    self.family,
                    mask,
                    prev.rotation()
                );
            }
        }
        self.authored.push(Authored {
            mask: canonical,
            rotations: rotations.to_vec(),
        });
        log::debug!(
            "{}: {} bound {} variant(s)",
            self.family,
            section.unwrap_or("base"),
            seen.len()
        );
        Ok(seen.len())
    }

    /// First authored shape and rotation reproducing `target` exactly.
    ///
    /// Shapes are tried in registration order, skipping those with a
    /// different number of connections, and each shape's rotations in the
    /// order they were registered with.
    pub fn find_rotation(&self, target: SideMask) -> Option<(SideMask, Rotation)> {
        self.authored
            .iter()
            .filter(|a| a.mask.count() == target.count())
            .find_map(|a| {
                a.rotations
                    .iter()
                    .copied()
                    .find(|r| r.rotate_mask(a.mask) == target)
                    .map(|r| (a.mask, r))
            })
    }

    /// Every connectable pattern must be reachable from an authored shape and bound.
    pub fn check_complete(&self) -> Result<(), FamilyError> {
        for mask in self.connectable.subsets() {
            if self.find_rotation(mask).is_none() {
                return Err(FamilyError::Incomplete {
                    family: self.family.clone(),
                    mask,
                });
            }
            if !self.variants.contains_key(&mask) {
                return Err(FamilyError::MissingVariant {
                    family: self.family.clone(),
                    key: mask.to_string(),
                });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn get(&self, mask: SideMask) -> Option<&Block> {
        self.variants.get(&mask)
    }

    #[inline]
    pub fn connectable(&self) -> SideMask {
        self.connectable
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Bound variants in increasing mask order.
    pub fn iter(&self) -> impl Iterator<Item = (SideMask, &Block)> {
        let mut keys: Vec<SideMask> = self.variants.keys().copied().collect();
        keys.sort();
        keys.into_iter()
            .filter_map(move |k| self.variants.get(&k).map(|b| (k, b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DefaultBlockBuilder;
    use crate::config::{FamilyDef, SectionDef};

    fn def() -> FamilyDef {
        let mut def = FamilyDef::new("test:pipe".parse().unwrap());
        for shape in CANONICAL_SHAPES {
            def.sections.insert(shape.name.into(), SectionDef::default());
        }
        def
    }

    #[test]
    fn one_connection_over_horizontal_rotations() {
        let def = def();
        let ctx = BuildContext::new(&def, None, &DefaultBlockBuilder);
        let mut reg = VariantRegistry::new(def.uri.clone(), SideMask::ALL);
        let rotations = Rotation::horizontal();
        let bound = reg
            .register_variants(&ctx, Some("one_connection"), Side::Back.into(), &rotations)
            .unwrap();
        assert_eq!(bound, 4);
        for (rot, side) in rotations
            .iter()
            .zip([Side::Back, Side::Left, Side::Front, Side::Right])
        {
            assert_eq!(rot.rotate(Side::Back), side);
            let b = reg.get(side.into()).unwrap();
            assert_eq!(b.rotation(), *rot);
            assert_eq!(b.uri().identifier(), Some(side.flag().to_string().as_str()));
        }
    }

    #[test]
    fn first_rotation_wins_within_a_call() {
        let def = def();
        let ctx = BuildContext::new(&def, None, &DefaultBlockBuilder);
        let mut reg = VariantRegistry::new(def.uri.clone(), SideMask::ALL);
        let line: SideMask = [Side::Back, Side::Front].into_iter().collect();
        let bound = reg
            .register_variants(&ctx, Some("line_connection"), line, Rotation::all())
            .unwrap();
        assert_eq!(bound, 3);
        assert!(reg.get(line).unwrap().rotation().is_none());
    }

    #[test]
    fn later_call_overwrites() {
        let def = def();
        let ctx = BuildContext::new(&def, None, &DefaultBlockBuilder);
        let mut reg = VariantRegistry::new(def.uri.clone(), SideMask::ALL);
        let back: SideMask = Side::Back.into();
        reg.register_variants(&ctx, Some("one_connection"), back, &[Rotation::none()])
            .unwrap();
        let first = reg.get(back).cloned().unwrap();
        reg.register_variants(&ctx, Some("cross"), back, &[Rotation::none()])
            .unwrap();
        let second = reg.get(back).unwrap();
        assert_ne!(&first, second);
        assert_eq!(second.section(), Some("cross"));
    }

    #[test]
    fn restricted_to_connectable_sides() {
        let def = def();
        let ctx = BuildContext::new(&def, None, &DefaultBlockBuilder);
        let mut reg = VariantRegistry::new(def.uri.clone(), SideMask::HORIZONTAL);
        let bound = reg
            .register_variants(&ctx, Some("one_connection"), Side::Back.into(), Rotation::all())
            .unwrap();
        assert_eq!(bound, 4);
        assert!(reg.get(Side::Top.into()).is_none());
    }

    #[test]
    fn search_prefers_declaration_order() {
        let def = def();
        let ctx = BuildContext::new(&def, None, &DefaultBlockBuilder);
        let mut reg = VariantRegistry::new(def.uri.clone(), SideMask::ALL);
        for shape in CANONICAL_SHAPES {
            reg.register_variants(&ctx, Some(shape.name), shape.mask(), Rotation::all())
                .unwrap();
        }
        assert_eq!(reg.len(), 64);
        reg.check_complete().unwrap();

        let lr: SideMask = [Side::Left, Side::Right].into_iter().collect();
        let (shape, rot) = reg.find_rotation(lr).unwrap();
        assert_eq!(shape, CANONICAL_SHAPES[2].mask());
        assert_eq!(rot.rotate_mask(shape), lr);
        assert_eq!(Some(rot), Rotation::all().iter().copied().find(|r| r.rotate_mask(shape) == lr));
    }

    #[test]
    fn missing_shape_is_incomplete() {
        let def = def();
        let ctx = BuildContext::new(&def, None, &DefaultBlockBuilder);
        let mut reg = VariantRegistry::new(def.uri.clone(), SideMask::HORIZONTAL);
        for shape in CANONICAL_SHAPES.iter().filter(|s| s.name != "2d_t") {
            reg.register_variants(&ctx, Some(shape.name), shape.mask(), &Rotation::horizontal())
                .unwrap();
        }
        let err = reg.check_complete().unwrap_err();
        assert!(matches!(err, FamilyError::Incomplete { mask, .. } if mask.count() == 3));
    }

    #[test]
    fn canonical_table_is_ordered_by_connections() {
        let counts: Vec<u32> = CANONICAL_SHAPES.iter().map(|s| s.connections()).collect();
        assert!(counts.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(CANONICAL_SHAPES[9].mask(), SideMask::ALL);
    }
}
