use rayon::prelude::*;
use terraflow_core::{Grid, Point, Result};

/// Build a `width × height` grid by evaluating `f` for every cell, one
/// rayon task per row. Each cell is written exactly once, so the result is
/// identical to a sequential pass.
pub(crate) fn par_from_fn<F>(width: i32, height: i32, f: F) -> Result<Grid<f64>>
where
    F: Fn(Point) -> f64 + Sync,
{
    if width <= 0 || height <= 0 {
        // Let Grid produce the canonical error.
        return Grid::from_vec(width, height, Vec::new());
    }
    let w = width as usize;
    let mut cells = vec![0.0; w * height as usize];
    cells.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = f(Point::new(x as i32, y as i32));
        }
    });
    Grid::from_vec(width, height, cells)
}

/// Same-size per-cell transform of `src`, computed row-parallel.
pub(crate) fn par_map<F>(src: &Grid<f64>, f: F) -> Result<Grid<f64>>
where
    F: Fn(Point, f64) -> f64 + Sync,
{
    let w = src.width() as usize;
    let mut cells = vec![0.0; src.len()];
    cells.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
        let y = y as i32;
        for (x, cell) in row.iter_mut().enumerate() {
            let p = Point::new(x as i32, y);
            let v = src.values()[(y as usize) * w + x];
            *cell = f(p, v);
        }
    });
    Grid::from_vec(src.width(), src.height(), cells)
}

/// Reflect an index into `[0, n)` the way a mirror border does:
/// `d c b a | a b c d | d c b a`.
pub(crate) fn reflect(mut i: i32, n: i32) -> i32 {
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= n {
            i = 2 * n - i - 1;
        } else {
            return i;
        }
    }
}

/// Rescale every finite value linearly so the minimum maps to `lo` and the
/// maximum to `hi`. When every finite value is equal they all become `flat`.
/// Non-finite values pass through.
pub(crate) fn rescale_finite(src: &Grid<f64>, lo: f64, hi: f64, flat: f64) -> Result<Grid<f64>> {
    let (min, max) = src
        .values()
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(mn, mx), &v| {
            (mn.min(v), mx.max(v))
        });
    let span = max - min;
    par_map(src, |_, v| {
        if !v.is_finite() {
            v
        } else if span > 0.0 {
            lo + (v - min) / span * (hi - lo)
        } else {
            flat
        }
    })
}
