//! Terrain synthesis.
//!
//! Two algorithms produce a raw elevation field which is then optionally
//! median-filtered and finally min-max rescaled into `[0, 1]`:
//!
//! - **Fractal noise**: `octaves` layers of Perlin noise summed at
//!   increasing frequency (`lacunarity`) and decreasing amplitude
//!   (`persistence`).
//! - **Diamond-square**: midpoint displacement on a `2^k + 1` lattice
//!   covering the requested size, then cropped.
//!
//! Both are fully determined by `(width, height, seed, config)`.

use noise::{NoiseFn, Perlin, Seedable};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use terraflow_core::{Error, Grid, Point, Result, TerrainGrid};

use crate::config::{TerrainAlgorithm, TerrainConfig};
use crate::filter::median;
use crate::raster::{par_from_fn, rescale_finite};

/// Value assigned to every cell when the raw field is perfectly flat.
const FLAT_ELEVATION: f64 = 0.5;

/// Added after frequency scaling to keep samples off the integer lattice,
/// where Perlin noise is always zero. Irrational, so no dyadic frequency
/// brings a sample back onto the lattice.
const SAMPLE_OFFSET: f64 = 0.618_033_988_749_895;

/// Generate a normalized terrain grid.
///
/// Fails with `InvalidDimensions` when `width` or `height` is not positive
/// and with `InvalidConfig` when `config` does not validate.
pub fn generate(width: i32, height: i32, seed: u64, config: &TerrainConfig) -> Result<TerrainGrid> {
    if width <= 0 || height <= 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    config.validate()?;

    let raw = match config.algorithm {
        TerrainAlgorithm::FractalNoise => fractal_noise(width, height, seed, config)?,
        TerrainAlgorithm::DiamondSquare => diamond_square(width, height, seed, config)?,
    };
    let smoothed = if config.median_radius > 0 {
        median(&raw, config.median_radius)?
    } else {
        raw
    };
    let terrain = rescale_finite(&smoothed, 0.0, 1.0, FLAT_ELEVATION)?;
    log::debug!(
        "generated {width}x{height} terrain with {:?} (seed {seed})",
        config.algorithm
    );
    Ok(terrain)
}

/// Per-octave noise seed derived from the 64-bit map seed.
fn octave_seed(seed: u64, octave: u32) -> u32 {
    let folded = (seed ^ (seed >> 32)) as u32;
    folded.wrapping_add(octave.wrapping_mul(0x9E37_79B9))
}

fn fractal_noise(width: i32, height: i32, seed: u64, config: &TerrainConfig) -> Result<Grid<f64>> {
    let layers: Vec<Perlin> = (0..config.octaves)
        .map(|o| Perlin::new(1).set_seed(octave_seed(seed, o)))
        .collect();

    par_from_fn(width, height, |p| {
        let mut amplitude = 1.0;
        let mut frequency = config.scale;
        let mut sum = 0.0;
        for layer in &layers {
            sum += amplitude * layer.get(sample_point(p, frequency));
            amplitude *= config.persistence;
            frequency *= config.lacunarity;
        }
        sum
    })
}

fn sample_point(p: Point, frequency: f64) -> [f64; 2] {
    [
        p.x as f64 * frequency + SAMPLE_OFFSET,
        p.y as f64 * frequency + SAMPLE_OFFSET,
    ]
}

/// Smallest `2^k + 1` that is at least `n`.
fn lattice_size(n: usize) -> usize {
    let mut side = 1usize;
    while side + 1 < n {
        side *= 2;
    }
    side + 1
}

fn diamond_square(width: i32, height: i32, seed: u64, config: &TerrainConfig) -> Result<Grid<f64>> {
    let size = lattice_size(width.max(height) as usize);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut h = vec![0.0f64; size * size];
    let at = |x: usize, y: usize| y * size + x;

    let last = size - 1;
    for (x, y) in [(0, 0), (last, 0), (0, last), (last, last)] {
        h[at(x, y)] = rng.random::<f64>();
    }

    let mut roughness = config.roughness;
    let mut step = last;
    while step > 1 {
        let half = step / 2;

        // Diamond step: centre of each square from its four corners.
        for y in (half..size).step_by(step) {
            for x in (half..size).step_by(step) {
                let avg = (h[at(x - half, y - half)]
                    + h[at(x + half, y - half)]
                    + h[at(x - half, y + half)]
                    + h[at(x + half, y + half)])
                    / 4.0;
                let offset = (rng.random::<f64>() - 0.5) * roughness;
                h[at(x, y)] = (avg + offset).clamp(0.0, 1.0);
            }
        }

        // Square step: edge midpoints from their in-bounds axial neighbors.
        for y in (0..size).step_by(half) {
            let x0 = if (y / half) % 2 == 0 { half } else { 0 };
            for x in (x0..size).step_by(step) {
                let mut sum = 0.0;
                let mut count = 0.0;
                if y >= half {
                    sum += h[at(x, y - half)];
                    count += 1.0;
                }
                if y + half < size {
                    sum += h[at(x, y + half)];
                    count += 1.0;
                }
                if x >= half {
                    sum += h[at(x - half, y)];
                    count += 1.0;
                }
                if x + half < size {
                    sum += h[at(x + half, y)];
                    count += 1.0;
                }
                let offset = (rng.random::<f64>() - 0.5) * roughness;
                h[at(x, y)] = (sum / count + offset).clamp(0.0, 1.0);
            }
        }

        roughness *= config.persistence;
        step = half;
    }

    Grid::from_fn(width, height, |p| h[at(p.x as usize, p.y as usize)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> TerrainConfig {
        TerrainConfig {
            algorithm: TerrainAlgorithm::DiamondSquare,
            ..Default::default()
        }
    }

    #[test]
    fn samples_stay_off_lattice_at_every_octave() {
        let cfg = TerrainConfig::default();
        let mut frequency = cfg.scale;
        for _ in 0..12 {
            for x in 0..64 {
                let [sx, sy] = sample_point(Point::new(x, x + 1), frequency);
                assert_ne!(sx.fract(), 0.0, "x {x} at frequency {frequency}");
                assert_ne!(sy.fract(), 0.0, "y {} at frequency {frequency}", x + 1);
            }
            frequency *= cfg.lacunarity;
        }
    }

    #[test]
    fn lattice_covers_requested_size() {
        assert_eq!(lattice_size(1), 2);
        assert_eq!(lattice_size(2), 2);
        assert_eq!(lattice_size(3), 3);
        assert_eq!(lattice_size(4), 5);
        assert_eq!(lattice_size(17), 17);
        assert_eq!(lattice_size(18), 33);
    }

    #[test]
    fn same_inputs_same_terrain() {
        for cfg in [TerrainConfig::default(), diamond()] {
            let a = generate(40, 25, 1234, &cfg).unwrap();
            let b = generate(40, 25, 1234, &cfg).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_seeds_differ() {
        for cfg in [TerrainConfig::default(), diamond()] {
            let a = generate(32, 32, 1, &cfg).unwrap();
            let b = generate(32, 32, 2, &cfg).unwrap();
            assert_ne!(a, b);
        }
    }

    #[test]
    fn values_span_unit_interval() {
        for cfg in [TerrainConfig::default(), diamond()] {
            let t = generate(48, 30, 99, &cfg).unwrap();
            assert_eq!(t.size(), Point::new(48, 30));
            let min = t.values().iter().cloned().fold(f64::INFINITY, f64::min);
            let max = t.values().iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(min, 0.0);
            assert_eq!(max, 1.0);
        }
    }

    #[test]
    fn single_cell_is_flat() {
        let t = generate(1, 1, 5, &TerrainConfig::default()).unwrap();
        assert_eq!(t.values(), &[FLAT_ELEVATION]);
    }

    #[test]
    fn median_post_filter_keeps_range() {
        let cfg = TerrainConfig {
            median_radius: 2,
            ..diamond()
        };
        let t = generate(33, 33, 7, &cfg).unwrap();
        assert!(t.values().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn rejects_invalid_dimensions_and_config() {
        let cfg = TerrainConfig::default();
        assert_eq!(
            generate(0, 10, 1, &cfg),
            Err(Error::InvalidDimensions {
                width: 0,
                height: 10
            })
        );
        assert!(generate(10, -3, 1, &cfg).is_err());
        let bad = TerrainConfig {
            octaves: 0,
            ..cfg
        };
        assert!(matches!(generate(4, 4, 1, &bad), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn oversized_config_fails_before_work() {
        let wide = TerrainConfig {
            median_radius: u32::MAX,
            ..diamond()
        };
        assert!(matches!(generate(2, 2, 1, &wide), Err(Error::InvalidConfig(_))));
        let deep = TerrainConfig {
            octaves: u32::MAX,
            ..Default::default()
        };
        assert!(matches!(generate(2, 2, 1, &deep), Err(Error::InvalidConfig(_))));
    }
}
