use core::fmt;
use core::ops::BitOr;
use core::str::FromStr;

use crate::Side;

/// A set of sides packed into the low six bits, one bit per [`Side::flag`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SideMask(u8);

impl SideMask {
    pub const EMPTY: SideMask = SideMask(0);
    pub const ALL: SideMask = SideMask(0b11_1111);
    pub const HORIZONTAL: SideMask = SideMask(0b11_0110);
    pub const VERTICAL: SideMask = SideMask(0b00_1001);

    /// `None` when bits above the sixth are set.
    #[inline]
    pub fn from_bits(bits: u8) -> Option<SideMask> {
        (bits & !Self::ALL.0 == 0).then_some(SideMask(bits))
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn with(self, side: Side) -> SideMask {
        SideMask(self.0 | side.flag())
    }

    #[inline]
    pub fn contains(self, side: Side) -> bool {
        self.0 & side.flag() != 0
    }

    #[inline]
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn is_subset_of(self, other: SideMask) -> bool {
        self.0 & !other.0 == 0
    }

    /// Sides in the mask, in bit order.
    pub fn sides(self) -> impl Iterator<Item = Side> {
        Side::ALL.into_iter().filter(move |s| self.contains(*s))
    }

    /// Every subset of this mask, including empty and itself, in increasing bit value.
    pub fn subsets(self) -> impl Iterator<Item = SideMask> {
        (0..=Self::ALL.0)
            .map(SideMask)
            .filter(move |m| m.is_subset_of(self))
    }
}

impl BitOr for SideMask {
    type Output = SideMask;
    fn bitor(self, rhs: SideMask) -> SideMask {
        SideMask(self.0 | rhs.0)
    }
}

impl From<Side> for SideMask {
    fn from(side: Side) -> Self {
        SideMask(side.flag())
    }
}

impl FromIterator<Side> for SideMask {
    fn from_iter<I: IntoIterator<Item = Side>>(iter: I) -> Self {
        iter.into_iter().fold(SideMask::EMPTY, SideMask::with)
    }
}

impl fmt::Display for SideMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse failure for a decimal connection mask.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("`{0}` is not a connection mask in 0..=63")]
pub struct MaskParseError(pub String);

impl FromStr for SideMask {
    type Err = MaskParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(SideMask::from_bits)
            .ok_or_else(|| MaskParseError(s.to_string()))
    }
}
