//! Terrain generation and cost-field filtering for terraflow.
//!
//! - [`generate`] synthesizes a normalized [`TerrainGrid`](terraflow_core::TerrainGrid)
//!   with fractal Perlin noise or diamond-square.
//! - [`Filter`] and [`FilterPipeline`] turn terrain into a
//!   [`CostGrid`](terraflow_core::CostGrid) through pure, ordered transforms.
//! - [`block_average`] coarsens a grid for low-resolution solving.
//!
//! Per-cell work is split across rows with rayon; outputs are identical to a
//! sequential evaluation.

mod config;
mod downsample;
mod filter;
mod pipeline;
mod raster;
mod terrain;

pub use config::{MAX_OCTAVES, TerrainAlgorithm, TerrainConfig};
pub use downsample::block_average;
pub use filter::{Filter, MAX_MEDIAN_RADIUS};
pub use pipeline::{FilterPipeline, apply};
pub use terrain::generate;
