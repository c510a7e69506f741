use std::cmp::Ordering;
use std::collections::BinaryHeap;

use terraflow_core::{
    CostGrid, Direction, Error, Grid, INFINITE_COST, Neighborhood, Point, Result, is_passable,
};

use crate::path::{Path, extract};

// ---------------------------------------------------------------------------
// FlowField
// ---------------------------------------------------------------------------

/// Cumulative cost-to-goal and best step direction for every cell.
///
/// A flow field is only meaningful for the goal and cost grid it was solved
/// against. Unreachable and impassable cells hold [`INFINITE_COST`] and no
/// direction; the goal holds cost 0 and no direction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FlowField {
    costs: Grid<f64>,
    directions: Grid<Option<Direction>>,
    goal: Point,
    neighborhood: Neighborhood,
    settled: usize,
}

impl FlowField {
    /// Assemble a flow field from precomputed grids.
    ///
    /// Fails with `DimensionMismatch` when the grids differ in size and with
    /// `InvalidGoal` when `goal` lies outside them. The contents are not
    /// checked; [`extract`] guards against cyclic directions.
    pub fn from_parts(
        costs: Grid<f64>,
        directions: Grid<Option<Direction>>,
        goal: Point,
        neighborhood: Neighborhood,
    ) -> Result<Self> {
        costs.ensure_same_size(&directions)?;
        if !costs.contains(goal) {
            return Err(Error::InvalidGoal(goal));
        }
        let settled = costs.count_fn(|c| c.is_finite());
        Ok(Self {
            costs,
            directions,
            goal,
            neighborhood,
            settled,
        })
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    #[inline]
    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    /// Cumulative cost-to-goal grid.
    #[inline]
    pub fn costs(&self) -> &Grid<f64> {
        &self.costs
    }

    /// Best-direction grid.
    #[inline]
    pub fn directions(&self) -> &Grid<Option<Direction>> {
        &self.directions
    }

    /// Number of cells whose cost was finalized (the goal included).
    #[inline]
    pub fn settled(&self) -> usize {
        self.settled
    }

    pub fn cost_at(&self, p: Point) -> Result<f64> {
        self.costs.at(p).copied()
    }

    pub fn direction_at(&self, p: Point) -> Result<Option<Direction>> {
        self.directions.at(p).copied()
    }

    /// Whether `p` is inside the field and can reach the goal.
    pub fn is_reachable(&self, p: Point) -> bool {
        self.costs.get(p).is_some_and(|c| c.is_finite())
    }

    /// Follow the field from `start` to the goal. See [`extract`].
    pub fn extract_path(&self, start: Point) -> Result<Path> {
        extract(self, start)
    }
}

// ---------------------------------------------------------------------------
// Frontier
// ---------------------------------------------------------------------------

/// Frontier entry. Ordered so that `BinaryHeap` (a max-heap) pops the lowest
/// cost first, and among equal costs the earliest pushed.
#[derive(Clone, Copy, Debug)]
struct FrontierRef {
    idx: usize,
    cost: f64,
    seq: u64,
}

impl PartialEq for FrontierRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierRef {}

impl Ord for FrontierRef {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// FlowSolver
// ---------------------------------------------------------------------------

/// Reverse Dijkstra propagation from a goal cell over a cost grid.
///
/// The solver keeps its frontier and settled-set allocations between calls;
/// their contents are reset at the start of every [`solve`](Self::solve), so
/// repeated solves with the same input yield identical fields.
#[derive(Debug, Default)]
pub struct FlowSolver {
    neighborhood: Neighborhood,
    open: BinaryHeap<FrontierRef>,
    closed: Vec<bool>,
}

impl FlowSolver {
    pub fn new(neighborhood: Neighborhood) -> Self {
        Self {
            neighborhood,
            open: BinaryHeap::new(),
            closed: Vec::new(),
        }
    }

    #[inline]
    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    /// Compute the flow field of `cost` toward `goal`.
    ///
    /// Entering a cell costs its grid value, scaled by √2 on diagonal steps.
    /// When two routes reach a cell at the same cumulative cost, the one
    /// discovered first (settle order, then neighbor enumeration order)
    /// keeps the cell's direction.
    ///
    /// Fails with `InvalidGoal` if `goal` is out of bounds or impassable.
    pub fn solve(&mut self, cost: &CostGrid, goal: Point) -> Result<FlowField> {
        let gi = match cost.index(goal) {
            Some(i) if is_passable(cost.values()[i]) => i,
            _ => return Err(Error::InvalidGoal(goal)),
        };

        let n = cost.len();
        let mut acc = vec![INFINITE_COST; n];
        let mut dirs: Vec<Option<Direction>> = vec![None; n];
        self.open.clear();
        self.closed.clear();
        self.closed.resize(n, false);

        let mut seq = 0u64;
        let mut settled = 0usize;
        acc[gi] = 0.0;
        self.open.push(FrontierRef {
            idx: gi,
            cost: 0.0,
            seq,
        });

        while let Some(current) = self.open.pop() {
            let ci = current.idx;
            // Skip stale entries.
            if self.closed[ci] {
                continue;
            }
            self.closed[ci] = true;
            settled += 1;

            let current_cost = acc[ci];
            let cp = cost.point(ci);
            for (dir, np) in self.neighborhood.around(cp) {
                let Some(ni) = cost.index(np) else {
                    continue;
                };
                if self.closed[ni] {
                    continue;
                }
                let step = cost.values()[ni];
                if !is_passable(step) {
                    continue;
                }
                let candidate = current_cost + step * dir.step_factor();
                if candidate < acc[ni] {
                    acc[ni] = candidate;
                    // A follower at `np` steps back toward `cp`.
                    dirs[ni] = Some(dir.opposite());
                    seq += 1;
                    self.open.push(FrontierRef {
                        idx: ni,
                        cost: candidate,
                        seq,
                    });
                }
            }
        }

        log::debug!(
            "flow field: goal {goal}, settled {settled}/{n} cells, {seq} frontier pushes"
        );

        Ok(FlowField {
            costs: Grid::from_vec(cost.width(), cost.height(), acc)?,
            directions: Grid::from_vec(cost.width(), cost.height(), dirs)?,
            goal,
            neighborhood: self.neighborhood,
            settled,
        })
    }
}

/// Solve a flow field with a throwaway [`FlowSolver`].
pub fn solve(cost: &CostGrid, goal: Point, neighborhood: Neighborhood) -> Result<FlowField> {
    FlowSolver::new(neighborhood).solve(cost, goal)
}
