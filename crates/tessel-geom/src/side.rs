use core::fmt;
use core::str::FromStr;

use crate::{OrientationParseError, Rotation, Vec3};

/// The six faces of a cell.
///
/// FRONT faces towards -Z, so LEFT and RIGHT are the viewer's right and left
/// when looking at the front of a block.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Side {
    Top = 0,
    Left = 1,
    Front = 2,
    Bottom = 3,
    Right = 4,
    Back = 5,
}

impl Side {
    /// Every side, in bit-flag order.
    pub const ALL: [Side; 6] = [
        Side::Top,
        Side::Left,
        Side::Front,
        Side::Bottom,
        Side::Right,
        Side::Back,
    ];
    pub const HORIZONTAL: [Side; 4] = [Side::Left, Side::Right, Side::Front, Side::Back];
    pub const VERTICAL: [Side; 2] = [Side::Top, Side::Bottom];

    /// The side an authored single-face shape is modelled against.
    pub const ARCHETYPE: Side = Side::Front;

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(i: usize) -> Option<Side> {
        Side::ALL.get(i).copied()
    }

    /// Connection bit for this side: TOP=1, LEFT=2, FRONT=4, BOTTOM=8, RIGHT=16, BACK=32.
    #[inline]
    pub fn flag(self) -> u8 {
        1u8 << (self as u8)
    }

    #[inline]
    pub fn vector(self) -> [i32; 3] {
        match self {
            Side::Top => [0, 1, 0],
            Side::Left => [-1, 0, 0],
            Side::Front => [0, 0, -1],
            Side::Bottom => [0, -1, 0],
            Side::Right => [1, 0, 0],
            Side::Back => [0, 0, 1],
        }
    }

    /// Inverse of [`Side::vector`]; `None` for anything but a unit axis vector.
    pub fn from_vector(v: [i32; 3]) -> Option<Side> {
        match v {
            [0, 1, 0] => Some(Side::Top),
            [-1, 0, 0] => Some(Side::Left),
            [0, 0, -1] => Some(Side::Front),
            [0, -1, 0] => Some(Side::Bottom),
            [1, 0, 0] => Some(Side::Right),
            [0, 0, 1] => Some(Side::Back),
            _ => None,
        }
    }

    #[inline]
    pub fn reverse(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Front => Side::Back,
            Side::Back => Side::Front,
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Left | Side::Front | Side::Right | Side::Back)
    }

    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }

    /// Side whose normal is closest to `dir`. Ties resolve towards Z, then Y.
    pub fn in_direction(dir: Vec3) -> Side {
        let (ax, ay, az) = (dir.x.abs(), dir.y.abs(), dir.z.abs());
        if ax > ay {
            if ax > az {
                return if dir.x > 0.0 { Side::Right } else { Side::Left };
            }
        } else if ay > az {
            return if dir.y > 0.0 { Side::Top } else { Side::Bottom };
        }
        if dir.z > 0.0 { Side::Back } else { Side::Front }
    }

    /// Horizontal side closest to the (x, z) direction. Ties resolve towards Z.
    pub fn in_horizontal_direction(x: f32, z: f32) -> Side {
        if x.abs() > z.abs() {
            if x > 0.0 { Side::Right } else { Side::Left }
        } else if z > 0.0 {
            Side::Back
        } else {
            Side::Front
        }
    }

    /// Rotation carrying [`Side::ARCHETYPE`] onto this side.
    pub fn rotation_from_archetype(self) -> Rotation {
        Rotation::all()
            .iter()
            .copied()
            .find(|r| r.rotate(Side::ARCHETYPE) == self)
            .unwrap_or_default()
    }

    /// The side that shares a stored variant with this one on symmetric shapes.
    #[inline]
    pub fn symmetric_equivalent(self) -> Side {
        self.reverse()
    }

    /// True for the half of the sides that are authored when symmetry collapses pairs.
    #[inline]
    pub fn is_canonical(self) -> bool {
        self.index() <= self.symmetric_equivalent().index()
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Left => "left",
            Side::Front => "front",
            Side::Bottom => "bottom",
            Side::Right => "right",
            Side::Back => "back",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Side {
    type Err = OrientationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Side::ALL
            .into_iter()
            .find(|side| side.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| OrientationParseError::new("side", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_match_bit_layout() {
        let flags: Vec<u8> = Side::ALL.iter().map(|s| s.flag()).collect();
        assert_eq!(flags, vec![1, 2, 4, 8, 16, 32]);
    }

    #[test]
    fn reverse_is_opposite_vector() {
        for s in Side::ALL {
            let [x, y, z] = s.vector();
            assert_eq!(s.reverse().vector(), [-x, -y, -z]);
            assert_eq!(Side::from_vector(s.vector()), Some(s));
        }
    }

    #[test]
    fn in_direction_picks_dominant_axis() {
        assert_eq!(Side::in_direction(Vec3::new(0.9, 0.1, -0.2)), Side::Right);
        assert_eq!(Side::in_direction(Vec3::new(0.1, -0.9, 0.2)), Side::Bottom);
        assert_eq!(Side::in_direction(Vec3::new(0.1, 0.2, -0.9)), Side::Front);
        assert_eq!(Side::in_horizontal_direction(-0.7, 0.3), Side::Left);
        assert_eq!(Side::in_horizontal_direction(0.0, 1.0), Side::Back);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("TOP".parse::<Side>(), Ok(Side::Top));
        assert_eq!("Back".parse::<Side>(), Ok(Side::Back));
        assert!("sideways".parse::<Side>().is_err());
    }

    #[test]
    fn archetype_rotation_reaches_every_side() {
        for s in Side::ALL {
            assert_eq!(s.rotation_from_archetype().rotate(Side::ARCHETYPE), s);
        }
        assert_eq!(Side::Front.rotation_from_archetype(), Rotation::none());
    }

    #[test]
    fn three_sides_are_canonical() {
        let canonical: Vec<Side> = Side::ALL.into_iter().filter(|s| s.is_canonical()).collect();
        assert_eq!(canonical, vec![Side::Top, Side::Left, Side::Front]);
    }
}
