//! Types shared by every stage of the terrain → cost → flow-field pipeline.
//!
//! Grids are addressed by [`Point`] with `y` growing downward. Costs are
//! plain `f64`; [`INFINITE_COST`] marks a cell that can never be entered.

pub mod direction;
pub mod error;
pub mod geom;
pub mod grid;

pub use direction::{Direction, Neighborhood};
pub use error::{Error, Result};
pub use geom::{Point, Range};
pub use grid::Grid;

/// Normalized elevation samples in `[0, 1]`.
pub type TerrainGrid = Grid<f64>;

/// Non-negative traversal costs; impassable cells hold [`INFINITE_COST`].
pub type CostGrid = Grid<f64>;

/// Sentinel cost of an impassable cell.
pub const INFINITE_COST: f64 = f64::INFINITY;

/// Whether a cost value can be traversed: finite and non-negative.
#[inline]
pub fn is_passable(cost: f64) -> bool {
    cost.is_finite() && cost >= 0.0
}
