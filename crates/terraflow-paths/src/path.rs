use terraflow_core::{CostGrid, Direction, Error, Neighborhood, Point, Result};

use crate::flowfield::FlowField;

/// An ordered route from start to goal, both inclusive.
///
/// An empty path means the goal cannot be reached from the start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// The "no route" path.
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn goal(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.points.contains(&p)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn into_vec(self) -> Vec<Point> {
        self.points
    }

    /// Whether consecutive cells are adjacent under `neighborhood` and no
    /// cell repeats. The empty path is trivially valid.
    pub fn is_valid(&self, neighborhood: Neighborhood) -> bool {
        let adjacent = self
            .points
            .windows(2)
            .all(|w| neighborhood.adjacent(w[0], w[1]));
        let mut sorted = self.points.clone();
        sorted.sort();
        sorted.dedup();
        adjacent && sorted.len() == self.points.len()
    }

    /// Total cost of walking the path over `cost`: every cell entered after
    /// the start is left again at its own cost, matching the solver's
    /// cumulative cost at the start cell.
    ///
    /// Fails with `OutOfBounds` if a cell lies outside `cost`.
    pub fn cost(&self, cost: &CostGrid) -> Result<f64> {
        let mut total = 0.0;
        for w in self.points.windows(2) {
            let factor = Direction::between(w[0], w[1]).map_or(1.0, Direction::step_factor);
            total += cost.at(w[0])? * factor;
        }
        Ok(total)
    }

    /// Map a path found on a grid coarsened by `block` back onto the fine
    /// grid: each coarse cell becomes the centre of its tile. Consecutive
    /// waypoints of the result are `block` cells apart.
    pub fn upscaled(&self, block: u32) -> Path {
        let b = block.max(1) as i32;
        Path::new(
            self.points
                .iter()
                .map(|&p| p * b + Point::new(b / 2, b / 2))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Walk `field` from `start` toward its goal.
///
/// - `InvalidStart` if `start` is outside the field.
/// - An empty path if `start` cannot reach the goal.
/// - `CycleDetected` if the walk revisits a cell, which only happens for a
///   corrupted field.
///
/// The walk ends at the first cell without a direction, which for a solved
/// field is the goal.
pub fn extract(field: &FlowField, start: Point) -> Result<Path> {
    let dirs = field.directions();
    let Some(si) = dirs.index(start) else {
        return Err(Error::InvalidStart(start));
    };
    if !field.is_reachable(start) {
        return Ok(Path::empty());
    }

    let mut visited = vec![false; dirs.len()];
    visited[si] = true;
    let mut points = vec![start];
    let mut current = start;
    while let Some(dir) = *dirs.at(current)? {
        let next = dir.step(current);
        let Some(ni) = dirs.index(next) else {
            return Err(Error::OutOfBounds {
                pos: next,
                size: dirs.size(),
            });
        };
        if visited[ni] {
            return Err(Error::CycleDetected(next));
        }
        visited[ni] = true;
        points.push(next);
        current = next;
    }

    if current != field.goal() {
        log::warn!(
            "flow walk from {start} stopped at {current}, not at goal {}",
            field.goal()
        );
    }
    Ok(Path::new(points))
}
