//! Terrain to path pipeline.
//!
//! ```text
//! generate_map ──▶ TerrainGrid ──derive_cost_grid──▶ CostGrid ──solve_path──▶ Path
//! ```
//!
//! The free functions in this crate run one stage each. [`Session`] keeps a
//! map, its flags and the last solved path together and reports progress to
//! a [`StatusSink`].

mod config;
mod flags;
mod render;
mod session;
mod sink;
mod stages;
mod timing;

pub use config::{FilterConfig, MapConfig};
pub use flags::{Flag, FlagKind, FlagSet};
pub use render::{CellFeature, PATH_GLYPH, Surface, TerrainBand, TextSurface, render};
pub use session::{MISSING_FLAGS, Session};
pub use sink::{NullSink, StatusSink};
pub use stages::{derive_cost_grid, generate_map, solve_path};
pub use timing::{Timed, measure};

pub use terraflow_core::{CostGrid, Error, Neighborhood, Point, Result, TerrainGrid};
pub use terraflow_gen::{TerrainAlgorithm, TerrainConfig};
pub use terraflow_paths::Path;
