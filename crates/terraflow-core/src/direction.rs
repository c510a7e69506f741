//! Compass [`Direction`]s and the [`Neighborhood`] adjacency shared by the
//! filters and the solver.

use std::f64::consts::SQRT_2;

use crate::geom::Point;

/// One of the eight compass steps between adjacent cells.
///
/// North is `y - 1` (screen coordinates).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    /// All eight directions, clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// The four cardinal directions, clockwise from north.
    pub const CARDINAL: [Direction; 4] = [Direction::N, Direction::E, Direction::S, Direction::W];

    /// Coordinate offset of one step in this direction.
    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            Self::N => Point::new(0, -1),
            Self::NE => Point::new(1, -1),
            Self::E => Point::new(1, 0),
            Self::SE => Point::new(1, 1),
            Self::S => Point::new(0, 1),
            Self::SW => Point::new(-1, 1),
            Self::W => Point::new(-1, 0),
            Self::NW => Point::new(-1, -1),
        }
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(self, Self::NE | Self::SE | Self::SW | Self::NW)
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::N => Self::S,
            Self::NE => Self::SW,
            Self::E => Self::W,
            Self::SE => Self::NW,
            Self::S => Self::N,
            Self::SW => Self::NE,
            Self::W => Self::E,
            Self::NW => Self::SE,
        }
    }

    /// Multiplier applied to a cell cost when entering it with this step:
    /// 1 for cardinal moves, √2 for diagonal ones.
    #[inline]
    pub fn step_factor(self) -> f64 {
        if self.is_diagonal() { SQRT_2 } else { 1.0 }
    }

    /// The direction of a single step from `from` to `to`, if they are
    /// distinct and 8-adjacent.
    pub fn between(from: Point, to: Point) -> Option<Self> {
        let d = to - from;
        Self::ALL.into_iter().find(|dir| dir.delta() == d)
    }

    /// The cell one step from `p` in this direction.
    #[inline]
    pub fn step(self, p: Point) -> Point {
        p + self.delta()
    }
}

/// Cell adjacency used throughout the pipeline.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Neighborhood {
    /// Von Neumann neighborhood: N, E, S, W.
    Four,
    /// Moore neighborhood: all eight surrounding cells.
    #[default]
    Eight,
}

impl Neighborhood {
    /// Directions in the fixed enumeration order used for tie-breaking.
    #[inline]
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Self::Four => &Direction::CARDINAL,
            Self::Eight => &Direction::ALL,
        }
    }

    /// Whether `a` and `b` are distinct neighbors under this adjacency.
    pub fn adjacent(self, a: Point, b: Point) -> bool {
        match Direction::between(a, b) {
            Some(d) => self == Self::Eight || !d.is_diagonal(),
            None => false,
        }
    }

    /// Neighbors of `p` in enumeration order, paired with their direction
    /// from `p`. No bounds filtering is applied.
    pub fn around(self, p: Point) -> impl Iterator<Item = (Direction, Point)> {
        self.directions().iter().map(move |&d| (d, d.step(p)))
    }
}
