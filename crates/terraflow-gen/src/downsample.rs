use terraflow_core::{Error, Grid, Result};

use crate::raster::par_from_fn;

/// Downsample by averaging `block × block` tiles.
///
/// The result is `(width / block) × (height / block)`; trailing cells that
/// do not fill a whole tile are dropped. A tile containing an
/// `INFINITE_COST` cell averages to `INFINITE_COST`, so walls survive
/// coarsening. Fails with `InvalidDimensions` when the coarse grid would be
/// empty.
pub fn block_average(grid: &Grid<f64>, block: u32) -> Result<Grid<f64>> {
    let b = block as i32;
    if b <= 0 || b > grid.width() || b > grid.height() {
        return Err(Error::InvalidDimensions {
            width: if b > 0 { grid.width() / b } else { 0 },
            height: if b > 0 { grid.height() / b } else { 0 },
        });
    }
    let area = (b * b) as f64;
    let coarse = par_from_fn(grid.width() / b, grid.height() / b, |p| {
        let mut sum = 0.0;
        for dy in 0..b {
            let Some(row) = grid.row(p.y * b + dy) else {
                continue;
            };
            let x0 = (p.x * b) as usize;
            sum += row[x0..x0 + b as usize].iter().sum::<f64>();
        }
        sum / area
    })?;
    log::debug!(
        "block average: {}x{} -> {}x{} (block {block})",
        grid.width(),
        grid.height(),
        coarse.width(),
        coarse.height()
    );
    Ok(coarse)
}
