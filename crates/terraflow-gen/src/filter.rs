//! Pure, dimension-preserving grid transforms used to turn terrain into a
//! traversal-cost grid.
//!
//! Each [`Filter`] variant carries its own parameters and is validated once
//! with [`Filter::validate`] (done by
//! [`FilterPipeline::new`](crate::FilterPipeline::new)) rather than at every
//! application.

use terraflow_core::{Error, Grid, INFINITE_COST, Neighborhood, Point, Result};

use crate::raster::{par_map, reflect, rescale_finite};

/// A single grid transform.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Filter {
    /// Values strictly below `cutoff` become [`INFINITE_COST`]; all others
    /// pass through unchanged.
    Threshold { cutoff: f64 },
    /// Weighted average of a cell and its in-bounds neighbors. The cell
    /// counts `center_weight` times, each finite neighbor once.
    /// Impassable cells stay impassable and are left out of their
    /// neighbors' averages.
    Smoothing {
        center_weight: f64,
        neighborhood: Neighborhood,
    },
    /// Linearly rescale the finite values into `[min_cost, max_cost]`,
    /// preserving their order.
    Normalize { min_cost: f64, max_cost: f64 },
    /// Median over a `(2 * radius + 1)²` window with mirrored borders.
    Median { radius: u32 },
}

impl Filter {
    /// Check the filter's parameters, failing with `InvalidFilter`.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Threshold { cutoff } => {
                if cutoff.is_nan() {
                    return Err(Error::InvalidFilter("threshold cutoff is NaN".into()));
                }
            }
            Self::Smoothing { center_weight, .. } => {
                if !(center_weight.is_finite() && center_weight >= 0.0) {
                    return Err(Error::InvalidFilter(format!(
                        "smoothing center weight must be finite and non-negative, got {center_weight}"
                    )));
                }
            }
            Self::Normalize { min_cost, max_cost } => {
                if !(min_cost.is_finite() && max_cost.is_finite()) {
                    return Err(Error::InvalidFilter(format!(
                        "normalize range [{min_cost}, {max_cost}] must be finite"
                    )));
                }
                if min_cost < 0.0 || min_cost > max_cost {
                    return Err(Error::InvalidFilter(format!(
                        "normalize range [{min_cost}, {max_cost}] must satisfy 0 <= min <= max"
                    )));
                }
            }
            Self::Median { radius } => {
                if radius == 0 {
                    return Err(Error::InvalidFilter("median radius must be at least 1".into()));
                }
                if radius > MAX_MEDIAN_RADIUS {
                    return Err(Error::InvalidFilter(format!(
                        "median radius must be at most {MAX_MEDIAN_RADIUS}, got {radius}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Short name used in log output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Threshold { .. } => "threshold",
            Self::Smoothing { .. } => "smoothing",
            Self::Normalize { .. } => "normalize",
            Self::Median { .. } => "median",
        }
    }

    /// Apply the filter to `input`, producing a new grid of the same size.
    pub fn apply(&self, input: &Grid<f64>) -> Result<Grid<f64>> {
        match *self {
            Self::Threshold { cutoff } => threshold(input, cutoff),
            Self::Smoothing {
                center_weight,
                neighborhood,
            } => smooth(input, center_weight, neighborhood),
            Self::Normalize { min_cost, max_cost } => {
                rescale_finite(input, min_cost, max_cost, min_cost)
            }
            Self::Median { radius } => median(input, radius),
        }
    }
}

fn threshold(input: &Grid<f64>, cutoff: f64) -> Result<Grid<f64>> {
    par_map(input, |_, v| if v < cutoff { INFINITE_COST } else { v })
}

fn smooth(input: &Grid<f64>, center_weight: f64, neighborhood: Neighborhood) -> Result<Grid<f64>> {
    par_map(input, |p, v| {
        if !v.is_finite() {
            return v;
        }
        let mut sum = center_weight * v;
        let mut weight = center_weight;
        for (_, n) in neighborhood.around(p) {
            if let Some(&nv) = input.get(n) {
                if nv.is_finite() {
                    sum += nv;
                    weight += 1.0;
                }
            }
        }
        if weight > 0.0 { sum / weight } else { v }
    })
}

/// Largest accepted median radius: a 129 × 129 window.
pub const MAX_MEDIAN_RADIUS: u32 = 64;

/// Median filter with mirrored borders.
///
/// Fails with `InvalidFilter` when `radius` exceeds [`MAX_MEDIAN_RADIUS`].
pub(crate) fn median(input: &Grid<f64>, radius: u32) -> Result<Grid<f64>> {
    if radius > MAX_MEDIAN_RADIUS {
        return Err(Error::InvalidFilter(format!(
            "median radius must be at most {MAX_MEDIAN_RADIUS}, got {radius}"
        )));
    }
    let side = 2 * radius as usize + 1;
    let r = radius as i32;
    let (w, h) = (input.width(), input.height());
    par_map(input, |p, v| {
        let mut window = Vec::with_capacity(side * side);
        for dy in -r..=r {
            for dx in -r..=r {
                let q = Point::new(reflect(p.x + dx, w), reflect(p.y + dy, h));
                if let Some(&nv) = input.get(q) {
                    window.push(nv);
                }
            }
        }
        if window.is_empty() {
            return v;
        }
        window.sort_by(f64::total_cmp);
        window[window.len() / 2]
    })
}
