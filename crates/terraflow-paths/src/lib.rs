//! Flow-field search on cost grids.
//!
//! A [`FlowSolver`] runs a reverse Dijkstra propagation from a goal cell and
//! records, for every reachable cell, the cumulative cost to the goal and
//! the step direction that reduces it. [`extract`] then follows those
//! directions from any start cell in O(1) per step.
//!
//! ```text
//! CostGrid ──solve(goal)──▶ FlowField ──extract(start)──▶ Path
//! ```
//!
//! The frontier is a binary heap keyed by cumulative cost, so a solve is
//! O(N log N) in the number of cells. Ties are broken by discovery order,
//! which makes fields fully deterministic.

mod distance;
mod flowfield;
mod path;

pub use distance::{chebyshev, manhattan, octile};
pub use flowfield::{FlowField, FlowSolver, solve};
pub use path::{Path, extract};
