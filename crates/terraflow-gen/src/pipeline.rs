use terraflow_core::{CostGrid, Grid, Result, TerrainGrid};

use crate::filter::Filter;

/// An ordered, pre-validated sequence of [`Filter`]s applied left to right.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FilterPipeline {
    filters: Vec<Filter>,
}

impl FilterPipeline {
    /// Build a pipeline, validating every filter up front.
    pub fn new(filters: Vec<Filter>) -> Result<Self> {
        for f in &filters {
            f.validate()?;
        }
        Ok(Self { filters })
    }

    /// Append a filter, validating it.
    pub fn with(mut self, filter: Filter) -> Result<Self> {
        filter.validate()?;
        self.filters.push(filter);
        Ok(self)
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run every filter in order. The output of filter *i* feeds filter
    /// *i + 1*; a stage returning a grid of a different size fails with
    /// `DimensionMismatch`.
    pub fn apply(&self, input: &Grid<f64>) -> Result<Grid<f64>> {
        let mut current = input.clone();
        for (i, filter) in self.filters.iter().enumerate() {
            let next = filter.apply(&current)?;
            current.ensure_same_size(&next)?;
            log::trace!("filter stage {i} ({}) applied", filter.name());
            current = next;
        }
        log::debug!(
            "filter pipeline: {} stage(s) over {}x{} grid",
            self.filters.len(),
            input.width(),
            input.height()
        );
        Ok(current)
    }
}

/// Apply `filters` in order to a terrain grid, producing a cost grid.
pub fn apply(filters: &[Filter], input: &TerrainGrid) -> Result<CostGrid> {
    FilterPipeline::new(filters.to_vec())?.apply(input)
}
