use std::time::Duration;

use terraflow_core::{CostGrid, Error, Point, Result, TerrainGrid};
use terraflow_gen::{FilterPipeline, block_average};
use terraflow_paths::{FlowSolver, Path};

use crate::config::MapConfig;
use crate::flags::{Flag, FlagKind, FlagSet};
use crate::render::{CellFeature, Surface, render};
use crate::sink::{NullSink, StatusSink};
use crate::timing::measure;

/// Status line emitted when a solve is requested without both flags.
pub const MISSING_FLAGS: &str = "Cannot solve path: both start and goal flags must be placed";

/// An interactive map: terrain, derived costs, flags and the last solved
/// path, with status lines reported to `S`.
#[derive(Debug)]
pub struct Session<S = NullSink> {
    config: MapConfig,
    pipeline: FilterPipeline,
    solver: FlowSolver,
    terrain: TerrainGrid,
    cost: CostGrid,
    flags: FlagSet,
    path: Option<Path>,
    sink: S,
}

impl Session<NullSink> {
    pub fn new(config: MapConfig) -> Result<Self> {
        Self::with_sink(config, NullSink)
    }
}

impl<S: StatusSink> Session<S> {
    pub fn with_sink(config: MapConfig, sink: S) -> Result<Self> {
        config.validate()?;
        let pipeline = config.filters.pipeline()?;
        let (terrain, cost) = build(&config, config.seed, &pipeline)?;
        Ok(Self {
            solver: FlowSolver::new(config.neighborhood()),
            config,
            pipeline,
            terrain,
            cost,
            flags: FlagSet::new(),
            path: None,
            sink,
        })
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    pub fn terrain(&self) -> &TerrainGrid {
        &self.terrain
    }

    pub fn cost(&self) -> &CostGrid {
        &self.cost
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    /// The last solved path, cleared whenever the map or flags change.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Rebuild terrain and costs from a new seed. Flags and path are cleared.
    pub fn regenerate(&mut self, seed: u64) -> Result<Duration> {
        let timed = measure(|| build(&self.config, seed, &self.pipeline)).transpose()?;
        let (terrain, cost) = timed.value;
        self.terrain = terrain;
        self.cost = cost;
        self.config.seed = seed;
        self.flags.clear();
        self.path = None;
        log::debug!("regenerated map with seed {seed} in {:?}", timed.elapsed);
        self.sink.status(&format!(
            "Generated {}x{} map (seed {seed}) in {:.1} ms",
            self.config.width,
            self.config.height,
            millis(timed.elapsed)
        ));
        Ok(timed.elapsed)
    }

    /// Place a flag of `kind`, replacing any previous one.
    ///
    /// Fails with `InvalidStart` or `InvalidGoal` when `pos` is off the map.
    pub fn place_flag(&mut self, kind: FlagKind, pos: Point) -> Result<Option<Flag>> {
        if !self.terrain.contains(pos) {
            return Err(match kind {
                FlagKind::Start => Error::InvalidStart(pos),
                FlagKind::Goal => Error::InvalidGoal(pos),
            });
        }
        self.path = None;
        Ok(self.flags.place(kind, pos))
    }

    /// Place the next flag in start/goal alternation.
    pub fn click(&mut self, pos: Point) -> Result<FlagKind> {
        if !self.terrain.contains(pos) {
            return Err(Error::OutOfBounds {
                pos,
                size: self.terrain.size(),
            });
        }
        self.path = None;
        let kind = self.flags.place_next(pos);
        self.sink.status(&format!("Placed {kind} flag at {pos}"));
        Ok(kind)
    }

    pub fn clear_flags(&mut self) {
        self.flags.clear();
        self.path = None;
    }

    /// Solve from the start flag to the goal flag at full resolution.
    ///
    /// Returns `Ok(None)` after reporting [`MISSING_FLAGS`] when a flag is
    /// missing. An unreachable goal yields an empty path.
    pub fn solve(&mut self) -> Result<Option<&Path>> {
        let Some((start, goal)) = self.endpoints() else {
            return Ok(None);
        };
        let (solver, cost) = (&mut self.solver, &self.cost);
        let timed = measure(|| -> Result<(Path, f64)> {
            let field = solver.solve(cost, goal)?;
            Ok((field.extract_path(start)?, field.cost_at(start)?))
        })
        .transpose()?;
        let (path, total) = timed.value;
        let summary = format!("Path of {} cells, cost {total:.2}", path.len());
        Ok(self.finish(start, goal, path, summary, timed.elapsed))
    }

    /// Solve on a `block`-averaged copy of the cost grid and scale the path
    /// back up. Points of the result sit at tile centers, so consecutive
    /// points are `block` cells apart. The reported cost is the coarse
    /// field's cost at the start tile.
    pub fn solve_coarse(&mut self, block: u32) -> Result<Option<&Path>> {
        let Some((start, goal)) = self.endpoints() else {
            return Ok(None);
        };
        let (solver, cost) = (&mut self.solver, &self.cost);
        let timed = measure(|| -> Result<(Path, f64)> {
            let coarse = block_average(cost, block)?;
            let b = block as i32;
            let shrink = |p: Point| {
                Point::new(
                    (p.x / b).min(coarse.width() - 1),
                    (p.y / b).min(coarse.height() - 1),
                )
            };
            let field = solver.solve(&coarse, shrink(goal)).map_err(|e| match e {
                Error::InvalidGoal(_) => Error::InvalidGoal(goal),
                e => e,
            })?;
            let path = field.extract_path(shrink(start))?.upscaled(block);
            Ok((path, field.cost_at(shrink(start))?))
        })
        .transpose()?;
        log::debug!("coarse solve with block {block}");
        let (path, total) = timed.value;
        let summary = format!(
            "Coarse path of {} waypoints (block {block}), coarse cost {total:.2}",
            path.len()
        );
        Ok(self.finish(start, goal, path, summary, timed.elapsed))
    }

    /// Draw terrain, then the current path, then flags.
    pub fn render(&self, surface: &mut dyn Surface) {
        let path = self.path.as_ref().map(CellFeature::PathOverlay);
        let flags = self.flags.iter().map(CellFeature::Flag);
        render(
            std::iter::once(CellFeature::Terrain(&self.terrain))
                .chain(path)
                .chain(flags),
            surface,
        );
    }

    fn endpoints(&mut self) -> Option<(Point, Point)> {
        let endpoints = self.flags.endpoints();
        if endpoints.is_none() {
            log::warn!("solve requested without both flags placed");
            self.sink.status(MISSING_FLAGS);
        }
        endpoints
    }

    fn finish(
        &mut self,
        start: Point,
        goal: Point,
        path: Path,
        summary: String,
        elapsed: Duration,
    ) -> Option<&Path> {
        if path.is_empty() {
            self.sink
                .status(&format!("No path from {start} to {goal} ({:.1} ms)", millis(elapsed)));
        } else {
            self.sink
                .status(&format!("{summary}, solved in {:.1} ms", millis(elapsed)));
        }
        log::debug!("solved {start} -> {goal}: {} cells in {elapsed:?}", path.len());
        self.path = Some(path);
        self.path.as_ref()
    }
}

fn build(config: &MapConfig, seed: u64, pipeline: &FilterPipeline) -> Result<(TerrainGrid, CostGrid)> {
    let terrain = terraflow_gen::generate(config.width, config.height, seed, &config.terrain)?;
    let cost = pipeline.apply(&terrain)?;
    Ok((terrain, cost))
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
