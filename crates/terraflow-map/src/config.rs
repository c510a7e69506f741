//! Map and cost-derivation configuration.

use terraflow_core::{Error, Neighborhood, Result};
use terraflow_gen::{Filter, FilterPipeline, TerrainConfig};

/// How terrain elevation is turned into traversal cost.
///
/// The derived pipeline is: `smoothing_passes` × smoothing, then a water
/// threshold, then normalization into `[min_cost, max_cost]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FilterConfig {
    /// Elevations below this are water and become impassable.
    pub water_level: f64,
    pub smoothing_passes: u32,
    pub smoothing_center_weight: f64,
    pub min_cost: f64,
    pub max_cost: f64,
    /// Adjacency shared by smoothing and by the solver.
    pub neighborhood: Neighborhood,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            water_level: 0.3,
            smoothing_passes: 1,
            smoothing_center_weight: 2.0,
            min_cost: 1.0,
            max_cost: 10.0,
            neighborhood: Neighborhood::Eight,
        }
    }
}

impl FilterConfig {
    /// Build the validated filter pipeline described by this config.
    pub fn pipeline(&self) -> Result<FilterPipeline> {
        let smoothing = Filter::Smoothing {
            center_weight: self.smoothing_center_weight,
            neighborhood: self.neighborhood,
        };
        let mut filters = vec![smoothing; self.smoothing_passes as usize];
        filters.push(Filter::Threshold {
            cutoff: self.water_level,
        });
        filters.push(Filter::Normalize {
            min_cost: self.min_cost,
            max_cost: self.max_cost,
        });
        FilterPipeline::new(filters)
    }
}

/// Everything needed to build a map from scratch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapConfig {
    pub width: i32,
    pub height: i32,
    pub seed: u64,
    pub terrain: TerrainConfig,
    pub filters: FilterConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 96,
            height: 48,
            seed: 42,
            terrain: TerrainConfig::default(),
            filters: FilterConfig::default(),
        }
    }
}

impl MapConfig {
    #[inline]
    pub fn neighborhood(&self) -> Neighborhood {
        self.filters.neighborhood
    }

    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        self.terrain.validate()?;
        self.filters.pipeline().map(|_| ())
    }
}
