use core::fmt;
use core::str::FromStr;

use crate::{OrientationParseError, Rotation, Side};

/// A facing plus an up-direction: two perpendicular sides.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ExtendedSide {
    primary: Side,
    secondary: Side,
}

impl ExtendedSide {
    /// The unrotated orientation: facing front, top up.
    pub const ARCHETYPE: ExtendedSide = ExtendedSide {
        primary: Side::Front,
        secondary: Side::Top,
    };

    /// `None` unless the two sides are perpendicular.
    pub fn new(primary: Side, secondary: Side) -> Option<ExtendedSide> {
        if primary == secondary || primary.reverse() == secondary {
            return None;
        }
        Some(ExtendedSide { primary, secondary })
    }

    #[inline]
    pub fn primary(self) -> Side {
        self.primary
    }

    #[inline]
    pub fn secondary(self) -> Side {
        self.secondary
    }

    /// Rotation taking FRONT to the primary side and TOP to the secondary side.
    pub fn rotation(self) -> Rotation {
        Rotation::find(&[
            (Side::Front, self.primary),
            (Side::Top, self.secondary),
        ])
        .unwrap_or_default()
    }
}

impl fmt::Display for ExtendedSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.primary, self.secondary)
    }
}

impl FromStr for ExtendedSide {
    type Err = OrientationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || OrientationParseError::new("side pair", s);
        let (a, b) = s.trim().split_once('_').ok_or_else(err)?;
        let primary: Side = a.parse().map_err(|_| err())?;
        let secondary: Side = b.parse().map_err(|_| err())?;
        ExtendedSide::new(primary, secondary).ok_or_else(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_parallel_pairs() {
        assert!(ExtendedSide::new(Side::Top, Side::Bottom).is_none());
        assert!(ExtendedSide::new(Side::Left, Side::Left).is_none());
        assert!("top_bottom".parse::<ExtendedSide>().is_err());
    }

    #[test]
    fn rotation_matches_pair() {
        for p in Side::ALL {
            for s in Side::ALL {
                if let Some(pair) = ExtendedSide::new(p, s) {
                    let r = pair.rotation();
                    assert_eq!(r.rotate(Side::Front), p);
                    assert_eq!(r.rotate(Side::Top), s);
                }
            }
        }
        assert_eq!(ExtendedSide::ARCHETYPE.rotation(), Rotation::none());
    }

    #[test]
    fn identifier_round_trips() {
        let pair = ExtendedSide::new(Side::Top, Side::Left).unwrap();
        assert_eq!(pair.to_string(), "top_left");
        assert_eq!("TOP_left".parse::<ExtendedSide>(), Ok(pair));
    }
}
