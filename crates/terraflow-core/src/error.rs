//! The error type shared by every stage of the pipeline.

use std::fmt;

use crate::geom::Point;

/// Errors raised by grid construction, filtering, solving and path
/// extraction.
///
/// All of them are local, synchronous precondition failures: retrying with
/// the same input reproduces the same error.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A grid was requested with a non-positive width or height.
    InvalidDimensions { width: i32, height: i32 },
    /// A coordinate outside `[0, width) × [0, height)` was accessed.
    OutOfBounds { pos: Point, size: Point },
    /// Two grids that must share dimensions do not.
    DimensionMismatch { expected: Point, found: Point },
    /// The goal cell is out of bounds or impassable.
    InvalidGoal(Point),
    /// The start cell is out of bounds.
    InvalidStart(Point),
    /// Following a flow field revisited a cell; the field is corrupt.
    CycleDetected(Point),
    /// A filter was built with parameters it cannot apply.
    InvalidFilter(String),
    /// A generator or map configuration is unusable.
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid grid dimensions {width}x{height}: both must be positive")
            }
            Self::OutOfBounds { pos, size } => {
                write!(f, "coordinate {pos} is outside a {}x{} grid", size.x, size.y)
            }
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "grid dimensions {}x{} do not match expected {}x{}",
                found.x, found.y, expected.x, expected.y
            ),
            Self::InvalidGoal(p) => write!(f, "goal {p} is out of bounds or impassable"),
            Self::InvalidStart(p) => write!(f, "start {p} is out of bounds"),
            Self::CycleDetected(p) => write!(f, "flow field revisits cell {p}"),
            Self::InvalidFilter(msg) => write!(f, "invalid filter: {msg}"),
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_coordinates() {
        let e = Error::OutOfBounds {
            pos: Point::new(7, -1),
            size: Point::new(5, 4),
        };
        assert_eq!(e.to_string(), "coordinate (7, -1) is outside a 5x4 grid");
        assert_eq!(
            Error::CycleDetected(Point::new(1, 2)).to_string(),
            "flow field revisits cell (1, 2)"
        );
    }

    #[test]
    fn is_std_error() {
        let e: Box<dyn std::error::Error> = Box::new(Error::InvalidGoal(Point::ZERO));
        assert!(e.to_string().contains("goal (0, 0)"));
    }
}
