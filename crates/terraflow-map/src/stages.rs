//! One-shot entry points for each stage of the map pipeline.

use terraflow_core::{CostGrid, Error, Neighborhood, Point, Result, TerrainGrid};
use terraflow_gen::TerrainConfig;
use terraflow_paths::{FlowSolver, Path};

use crate::config::FilterConfig;

/// Generate a normalized `[0, 1]` height map. Same inputs, same grid.
pub fn generate_map(width: i32, height: i32, seed: u64, config: &TerrainConfig) -> Result<TerrainGrid> {
    terraflow_gen::generate(width, height, seed, config)
}

/// Turn elevation into traversal cost using the pipeline `config` describes.
pub fn derive_cost_grid(terrain: &TerrainGrid, config: &FilterConfig) -> Result<CostGrid> {
    config.pipeline()?.apply(terrain)
}

/// Solve a flow field toward `goal` and walk it from `start`.
///
/// Returns an empty path when `start` cannot reach `goal`.
pub fn solve_path(cost: &CostGrid, start: Point, goal: Point, neighborhood: Neighborhood) -> Result<Path> {
    if !cost.contains(start) {
        return Err(Error::InvalidStart(start));
    }
    FlowSolver::new(neighborhood).solve(cost, goal)?.extract_path(start)
}
