use core::fmt;
use core::str::FromStr;
use std::sync::OnceLock;

use crate::{OrientationParseError, Rotation, Side, Vec3};

/// The eight corners of a cell, named x-side, y-side, z-side.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Corner {
    LeftBottomFront = 0,
    RightBottomFront = 1,
    LeftBottomBack = 2,
    RightBottomBack = 3,
    LeftTopFront = 4,
    RightTopFront = 5,
    LeftTopBack = 6,
    RightTopBack = 7,
}

impl Corner {
    pub const ALL: [Corner; 8] = [
        Corner::LeftBottomFront,
        Corner::RightBottomFront,
        Corner::LeftBottomBack,
        Corner::RightBottomBack,
        Corner::LeftTopFront,
        Corner::RightTopFront,
        Corner::LeftTopBack,
        Corner::RightTopBack,
    ];

    pub const ARCHETYPE: Corner = Corner::LeftBottomFront;

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Corner from the sign of each axis; `true` means the positive half.
    #[inline]
    pub fn from_signs(x_pos: bool, y_pos: bool, z_pos: bool) -> Corner {
        Corner::ALL[(x_pos as usize) | ((z_pos as usize) << 1) | ((y_pos as usize) << 2)]
    }

    /// Corner nearest to a point relative to the cell centre. Zero counts as positive.
    pub fn nearest(p: Vec3) -> Corner {
        Corner::from_signs(p.x >= 0.0, p.y >= 0.0, p.z >= 0.0)
    }

    #[inline]
    pub fn vector(self) -> [i32; 3] {
        let i = self as usize;
        let s = |bit: usize| if i & bit != 0 { 1 } else { -1 };
        [s(1), s(4), s(2)]
    }

    pub fn from_vector(v: [i32; 3]) -> Option<Corner> {
        match v {
            [x, y, z] if x.abs() == 1 && y.abs() == 1 && z.abs() == 1 => {
                Some(Corner::from_signs(x > 0, y > 0, z > 0))
            }
            _ => None,
        }
    }

    /// The three sides meeting at this corner, x then y then z.
    pub fn sides(self) -> [Side; 3] {
        let [x, y, z] = self.vector();
        [
            if x > 0 { Side::Right } else { Side::Left },
            if y > 0 { Side::Top } else { Side::Bottom },
            if z > 0 { Side::Back } else { Side::Front },
        ]
    }

    /// Rotation carrying [`Corner::ARCHETYPE`] onto this corner; the first
    /// such rotation in [`Rotation::all`] order.
    pub fn rotation_from_archetype(self) -> Rotation {
        static TABLE: OnceLock<[Rotation; 8]> = OnceLock::new();
        let table = TABLE.get_or_init(|| {
            let mut found: [Option<Rotation>; 8] = [None; 8];
            for &r in Rotation::all() {
                let slot = &mut found[r.rotate_corner(Corner::ARCHETYPE).index()];
                if slot.is_none() {
                    *slot = Some(r);
                }
            }
            found.map(Option::unwrap_or_default)
        });
        table[self.index()]
    }

    /// The diagonally opposite corner.
    pub fn symmetric_equivalent(self) -> Corner {
        Corner::ALL[7 - self.index()]
    }

    #[inline]
    pub fn is_canonical(self) -> bool {
        self.index() <= self.symmetric_equivalent().index()
    }

    pub fn name(self) -> &'static str {
        match self {
            Corner::LeftBottomFront => "left_bottom_front",
            Corner::RightBottomFront => "right_bottom_front",
            Corner::LeftBottomBack => "left_bottom_back",
            Corner::RightBottomBack => "right_bottom_back",
            Corner::LeftTopFront => "left_top_front",
            Corner::RightTopFront => "right_top_front",
            Corner::LeftTopBack => "left_top_back",
            Corner::RightTopBack => "right_top_back",
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Corner {
    type Err = OrientationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Corner::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| OrientationParseError::new("corner", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn vector_round_trips() {
        for c in Corner::ALL {
            assert_eq!(Corner::from_vector(c.vector()), Some(c));
        }
        assert_eq!(Corner::LeftBottomFront.vector(), [-1, -1, -1]);
        assert_eq!(Corner::RightTopBack.vector(), [1, 1, 1]);
        assert_eq!(Corner::from_vector([1, 0, 1]), None);
    }

    #[test]
    fn sides_name_the_corner() {
        assert_eq!(
            Corner::RightBottomBack.sides(),
            [Side::Right, Side::Bottom, Side::Back]
        );
    }

    #[test]
    fn bottom_corners_are_canonical() {
        let canonical: Vec<Corner> = Corner::ALL.into_iter().filter(|c| c.is_canonical()).collect();
        assert_eq!(canonical.len(), 4);
        assert!(canonical.iter().all(|c| c.sides()[1] == Side::Bottom));
    }

    #[test]
    fn bottom_corners_only_need_yaw() {
        for c in Corner::ALL.into_iter().filter(|c| c.sides()[1] == Side::Bottom) {
            assert!(c.rotation_from_archetype().is_horizontal());
        }
    }

    proptest! {
        #[test]
        fn archetype_rotation_lands_on_corner(c in any::<Corner>()) {
            prop_assert_eq!(c.rotation_from_archetype().rotate_corner(Corner::ARCHETYPE), c);
        }

        #[test]
        fn symmetric_equivalent_is_involution(c in any::<Corner>()) {
            prop_assert_eq!(c.symmetric_equivalent().symmetric_equivalent(), c);
            prop_assert_ne!(c.symmetric_equivalent(), c);
        }

        #[test]
        fn name_parses_back(c in any::<Corner>()) {
            prop_assert_eq!(c.name().parse::<Corner>(), Ok(c));
        }
    }
}
