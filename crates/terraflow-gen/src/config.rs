//! Terrain generator configuration.

use terraflow_core::{Error, Result};

use crate::filter::MAX_MEDIAN_RADIUS;

/// Most noise layers a config may request.
pub const MAX_OCTAVES: u32 = 32;

/// Procedural algorithm used to synthesize raw elevation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainAlgorithm {
    /// Layered Perlin noise (fractal Brownian motion).
    #[default]
    FractalNoise,
    /// Midpoint displacement on a `2^k + 1` lattice.
    DiamondSquare,
}

/// Parameters for [`generate`](crate::generate).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TerrainConfig {
    pub algorithm: TerrainAlgorithm,
    /// Number of noise layers combined (fractal noise only).
    pub octaves: u32,
    /// Amplitude falloff per octave. Diamond-square uses it as the
    /// roughness decay per subdivision level.
    pub persistence: f64,
    /// Spatial frequency of the first octave, in cycles per cell.
    pub scale: f64,
    /// Frequency multiplier per octave.
    pub lacunarity: f64,
    /// Initial displacement amplitude (diamond-square only).
    pub roughness: f64,
    /// Radius of the median post-filter; 0 disables it.
    pub median_radius: u32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            algorithm: TerrainAlgorithm::FractalNoise,
            octaves: 5,
            persistence: 0.5,
            scale: 1.0 / 32.0,
            lacunarity: 2.0,
            roughness: 0.98,
            median_radius: 0,
        }
    }
}

impl TerrainConfig {
    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        if self.octaves == 0 || self.octaves > MAX_OCTAVES {
            return Err(Error::InvalidConfig(format!(
                "octaves must be between 1 and {MAX_OCTAVES}, got {}",
                self.octaves
            )));
        }
        if self.median_radius > MAX_MEDIAN_RADIUS {
            return Err(Error::InvalidConfig(format!(
                "median radius must be at most {MAX_MEDIAN_RADIUS}, got {}",
                self.median_radius
            )));
        }
        if !(self.persistence.is_finite() && self.persistence > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "persistence must be positive, got {}",
                self.persistence
            )));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "scale must be positive, got {}",
                self.scale
            )));
        }
        if !(self.lacunarity.is_finite() && self.lacunarity > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "lacunarity must be positive, got {}",
                self.lacunarity
            )));
        }
        if !(self.roughness.is_finite() && self.roughness >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "roughness must be non-negative, got {}",
                self.roughness
            )));
        }
        Ok(())
    }
}
