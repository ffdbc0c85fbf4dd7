use core::fmt;
use core::ops::Mul;
use std::sync::OnceLock;

use crate::{Corner, Edge, Side, SideMask, Vec3};

/// One of the 24 axis-aligned rotations of a cube.
///
/// Stored as a signed permutation matrix acting on column vectors. The only
/// way to build one is from quarter turns, so every value is a proper
/// rotation and the set is closed under `*`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Rotation {
    m: [[i8; 3]; 3],
}

const IDENTITY: Rotation = Rotation {
    m: [[1, 0, 0], [0, 1, 0], [0, 0, 1]],
};
// About +Y: BACK -> LEFT -> FRONT -> RIGHT.
const YAW_QUARTER: Rotation = Rotation {
    m: [[0, 0, -1], [0, 1, 0], [1, 0, 0]],
};
// About +X: FRONT -> TOP -> BACK -> BOTTOM.
const PITCH_QUARTER: Rotation = Rotation {
    m: [[1, 0, 0], [0, 0, -1], [0, 1, 0]],
};
// About +Z: TOP -> LEFT -> BOTTOM -> RIGHT.
const ROLL_QUARTER: Rotation = Rotation {
    m: [[0, -1, 0], [1, 0, 0], [0, 0, 1]],
};

impl Default for Rotation {
    fn default() -> Self {
        IDENTITY
    }
}

impl Rotation {
    /// The identity rotation.
    #[inline]
    pub const fn none() -> Rotation {
        IDENTITY
    }

    fn turns(quarter: Rotation, turns: i32) -> Rotation {
        let mut r = IDENTITY;
        for _ in 0..turns.rem_euclid(4) {
            r = quarter * r;
        }
        r
    }

    pub fn yaw(turns: i32) -> Rotation {
        Rotation::turns(YAW_QUARTER, turns)
    }

    pub fn pitch(turns: i32) -> Rotation {
        Rotation::turns(PITCH_QUARTER, turns)
    }

    pub fn roll(turns: i32) -> Rotation {
        Rotation::turns(ROLL_QUARTER, turns)
    }

    /// Roll first, then pitch, then yaw.
    pub fn new(yaw: i32, pitch: i32, roll: i32) -> Rotation {
        Rotation::yaw(yaw) * Rotation::pitch(pitch) * Rotation::roll(roll)
    }

    /// The 24 distinct rotations. The first four are the yaw-only rotations in
    /// increasing quarter turns; the order is fixed and drives every
    /// "first match wins" search in the crates above.
    pub fn all() -> &'static [Rotation] {
        static ALL: OnceLock<Vec<Rotation>> = OnceLock::new();
        ALL.get_or_init(|| {
            let mut out: Vec<Rotation> = Vec::with_capacity(24);
            for pitch in 0..4 {
                for roll in 0..4 {
                    for yaw in 0..4 {
                        let r = Rotation::new(yaw, pitch, roll);
                        if !out.contains(&r) {
                            out.push(r);
                        }
                    }
                }
            }
            out
        })
    }

    /// The four yaw rotations: none, one, two and three quarter turns.
    pub fn horizontal() -> [Rotation; 4] {
        [
            Rotation::yaw(0),
            Rotation::yaw(1),
            Rotation::yaw(2),
            Rotation::yaw(3),
        ]
    }

    /// First rotation in [`Rotation::all`] that maps every `from` onto its `to`.
    pub fn find(mapping: &[(Side, Side)]) -> Option<Rotation> {
        Rotation::all()
            .iter()
            .copied()
            .find(|r| mapping.iter().all(|&(from, to)| r.rotate(from) == to))
    }

    /// (yaw, pitch, roll) quarter turns that rebuild this rotation through [`Rotation::new`].
    pub fn decompose(self) -> (u8, u8, u8) {
        for pitch in 0..4u8 {
            for roll in 0..4u8 {
                for yaw in 0..4u8 {
                    if Rotation::new(yaw as i32, pitch as i32, roll as i32) == self {
                        return (yaw, pitch, roll);
                    }
                }
            }
        }
        (0, 0, 0)
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == IDENTITY
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        self.rotate(Side::Top) == Side::Top
    }

    /// Transpose; signed permutation matrices are orthogonal.
    pub fn inverse(self) -> Rotation {
        let mut m = [[0i8; 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = self.m[j][i];
            }
        }
        Rotation { m }
    }

    #[inline]
    pub fn apply(self, v: [i32; 3]) -> [i32; 3] {
        let mut out = [0i32; 3];
        for (i, o) in out.iter_mut().enumerate() {
            *o = (0..3).map(|j| self.m[i][j] as i32 * v[j]).sum();
        }
        out
    }

    pub fn apply_vec(self, v: Vec3) -> Vec3 {
        let a = v.to_array();
        let c = |i: usize| (0..3).map(|j| self.m[i][j] as f32 * a[j]).sum::<f32>();
        Vec3::new(c(0), c(1), c(2))
    }

    pub fn rotate(self, side: Side) -> Side {
        match Side::from_vector(self.apply(side.vector())) {
            Some(s) => s,
            None => unreachable!("rotation matrices map unit axes to unit axes"),
        }
    }

    pub fn rotate_corner(self, corner: Corner) -> Corner {
        match Corner::from_vector(self.apply(corner.vector())) {
            Some(c) => c,
            None => unreachable!("rotation matrices map corners to corners"),
        }
    }

    pub fn rotate_edge(self, edge: Edge) -> Edge {
        match Edge::from_vector(self.apply(edge.vector())) {
            Some(e) => e,
            None => unreachable!("rotation matrices map edges to edges"),
        }
    }

    /// Rotates every side in the mask.
    pub fn rotate_mask(self, mask: SideMask) -> SideMask {
        mask.sides().map(|s| self.rotate(s)).collect()
    }
}

impl Mul for Rotation {
    type Output = Rotation;

    /// `(a * b).rotate(s) == a.rotate(b.rotate(s))`
    fn mul(self, rhs: Rotation) -> Rotation {
        let mut m = [[0i8; 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = (0..3).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
            }
        }
        Rotation { m }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (yaw, pitch, roll) = self.decompose();
        let deg = |turns: u8| u32::from(turns) * 90;
        write!(f, "yaw={} pitch={} roll={}", deg(yaw), deg(pitch), deg(roll))
    }
}
