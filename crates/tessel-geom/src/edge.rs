use core::fmt;
use core::str::FromStr;
use std::sync::OnceLock;

use crate::{OrientationParseError, Rotation, Side, Vec3};

/// The twelve edges of a cell: the bottom ring, the four upright edges, then the top ring.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Edge {
    BottomFront = 0,
    BottomRight = 1,
    BottomBack = 2,
    BottomLeft = 3,
    FrontLeft = 4,
    FrontRight = 5,
    BackRight = 6,
    BackLeft = 7,
    TopFront = 8,
    TopRight = 9,
    TopBack = 10,
    TopLeft = 11,
}

impl Edge {
    pub const ALL: [Edge; 12] = [
        Edge::BottomFront,
        Edge::BottomRight,
        Edge::BottomBack,
        Edge::BottomLeft,
        Edge::FrontLeft,
        Edge::FrontRight,
        Edge::BackRight,
        Edge::BackLeft,
        Edge::TopFront,
        Edge::TopRight,
        Edge::TopBack,
        Edge::TopLeft,
    ];

    pub const ARCHETYPE: Edge = Edge::BottomFront;

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The two faces meeting along this edge.
    pub fn sides(self) -> (Side, Side) {
        match self {
            Edge::BottomFront => (Side::Bottom, Side::Front),
            Edge::BottomRight => (Side::Bottom, Side::Right),
            Edge::BottomBack => (Side::Bottom, Side::Back),
            Edge::BottomLeft => (Side::Bottom, Side::Left),
            Edge::FrontLeft => (Side::Front, Side::Left),
            Edge::FrontRight => (Side::Front, Side::Right),
            Edge::BackRight => (Side::Back, Side::Right),
            Edge::BackLeft => (Side::Back, Side::Left),
            Edge::TopFront => (Side::Top, Side::Front),
            Edge::TopRight => (Side::Top, Side::Right),
            Edge::TopBack => (Side::Top, Side::Back),
            Edge::TopLeft => (Side::Top, Side::Left),
        }
    }

    /// Edge between two faces, in either order. `None` for parallel faces.
    pub fn between(a: Side, b: Side) -> Option<Edge> {
        Edge::ALL.into_iter().find(|e| {
            let (x, y) = e.sides();
            (x, y) == (a, b) || (y, x) == (a, b)
        })
    }

    /// Edge nearest to a point relative to the cell centre: the two largest
    /// components pick the faces. Zero counts as positive.
    pub fn nearest(p: Vec3) -> Edge {
        let a = p.to_array();
        let face = |axis: usize| {
            let mut v = [0i32; 3];
            v[axis] = if a[axis] >= 0.0 { 1 } else { -1 };
            v
        };
        let mut axes = [0usize, 1, 2];
        axes.sort_by(|&i, &j| a[j].abs().total_cmp(&a[i].abs()));
        let (f0, f1) = (face(axes[0]), face(axes[1]));
        let v = [f0[0] + f1[0], f0[1] + f1[1], f0[2] + f1[2]];
        Edge::from_vector(v).unwrap_or(Edge::ARCHETYPE)
    }

    #[inline]
    pub fn vector(self) -> [i32; 3] {
        let (a, b) = self.sides();
        let (va, vb) = (a.vector(), b.vector());
        [va[0] + vb[0], va[1] + vb[1], va[2] + vb[2]]
    }

    pub fn from_vector(v: [i32; 3]) -> Option<Edge> {
        Edge::ALL.into_iter().find(|e| e.vector() == v)
    }

    /// Rotation carrying [`Edge::ARCHETYPE`] onto this edge; the first such
    /// rotation in [`Rotation::all`] order.
    pub fn rotation_from_archetype(self) -> Rotation {
        static TABLE: OnceLock<[Rotation; 12]> = OnceLock::new();
        let table = TABLE.get_or_init(|| {
            let mut found: [Option<Rotation>; 12] = [None; 12];
            for &r in Rotation::all() {
                let slot = &mut found[r.rotate_edge(Edge::ARCHETYPE).index()];
                if slot.is_none() {
                    *slot = Some(r);
                }
            }
            found.map(Option::unwrap_or_default)
        });
        table[self.index()]
    }

    /// The edge diagonally across the cell.
    pub fn symmetric_equivalent(self) -> Edge {
        let [x, y, z] = self.vector();
        Edge::from_vector([-x, -y, -z]).unwrap_or(self)
    }

    #[inline]
    pub fn is_canonical(self) -> bool {
        self.index() <= self.symmetric_equivalent().index()
    }

    pub fn name(self) -> &'static str {
        match self {
            Edge::BottomFront => "bottom_front",
            Edge::BottomRight => "bottom_right",
            Edge::BottomBack => "bottom_back",
            Edge::BottomLeft => "bottom_left",
            Edge::FrontLeft => "front_left",
            Edge::FrontRight => "front_right",
            Edge::BackRight => "back_right",
            Edge::BackLeft => "back_left",
            Edge::TopFront => "top_front",
            Edge::TopRight => "top_right",
            Edge::TopBack => "top_back",
            Edge::TopLeft => "top_left",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Edge {
    type Err = OrientationParseError;

    /// Accepts the two face names in either order, e.g. `bottom_front` or `front_bottom`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || OrientationParseError::new("edge", s);
        let (a, b) = s.trim().split_once('_').ok_or_else(err)?;
        let a: Side = a.parse().map_err(|_| err())?;
        let b: Side = b.parse().map_err(|_| err())?;
        Edge::between(a, b).ok_or_else(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn six_edges_are_canonical() {
        let canonical: Vec<Edge> = Edge::ALL.into_iter().filter(|e| e.is_canonical()).collect();
        assert_eq!(
            canonical,
            vec![
                Edge::BottomFront,
                Edge::BottomRight,
                Edge::BottomBack,
                Edge::BottomLeft,
                Edge::FrontLeft,
                Edge::FrontRight,
            ]
        );
    }

    #[test]
    fn nearest_uses_two_dominant_axes() {
        assert_eq!(Edge::nearest(Vec3::new(0.1, -0.5, -0.4)), Edge::BottomFront);
        assert_eq!(Edge::nearest(Vec3::new(0.45, 0.05, 0.5)), Edge::BackRight);
        assert_eq!(Edge::nearest(Vec3::new(-0.5, 0.3, 0.0)), Edge::TopLeft);
    }

    #[test]
    fn parses_either_order() {
        assert_eq!("front_bottom".parse::<Edge>(), Ok(Edge::BottomFront));
        assert_eq!("Bottom_Front".parse::<Edge>(), Ok(Edge::BottomFront));
        assert!("top_bottom".parse::<Edge>().is_err());
        assert!("top".parse::<Edge>().is_err());
    }

    proptest! {
        #[test]
        fn archetype_rotation_lands_on_edge(e in any::<Edge>()) {
            prop_assert_eq!(e.rotation_from_archetype().rotate_edge(Edge::ARCHETYPE), e);
        }

        #[test]
        fn symmetric_equivalent_is_opposite(e in any::<Edge>()) {
            let [x, y, z] = e.vector();
            prop_assert_eq!(e.symmetric_equivalent().vector(), [-x, -y, -z]);
            prop_assert_eq!(e.symmetric_equivalent().symmetric_equivalent(), e);
        }

        #[test]
        fn vector_round_trips(e in any::<Edge>()) {
            prop_assert_eq!(Edge::from_vector(e.vector()), Some(e));
        }
    }
}
