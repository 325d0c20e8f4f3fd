//! Synthetic analysis samples for demos and tests.
//!
//! Batches are plain values: nothing here touches the store. Hand the result
//! to [`AnalysisDatabase::insert_batch`](crate::storage::AnalysisDatabase::insert_batch)
//! to persist it.

use crate::cli::types::{round2, DateWindow};
use crate::error::{AnalysisError, Result};
use crate::storage::NewAnalysis;
use chrono::{Duration, NaiveDate};
use rand::Rng;
use std::ops::RangeInclusive;
use tracing::debug;

/// Range production energy is drawn from.
pub const PRODUCTION_RANGE: RangeInclusive<f64> = 1000.0..=5000.0;

/// Range consumption energy is drawn from. The lower bound keeps the
/// efficiency denominator away from zero.
pub const CONSUMPTION_RANGE: RangeInclusive<f64> = 800.0..=4500.0;

/// Generate `count` samples dated within `[start, end)` using the thread RNG.
pub fn generate(count: usize, start: NaiveDate, end: NaiveDate) -> Result<Vec<NewAnalysis>> {
    let window = DateWindow::new(start, end)?;
    generate_with(&mut rand::rng(), count, window)
}

/// Generate `count` samples from a caller-supplied RNG.
///
/// Each record draws its own date, so dates repeat and arrive unordered.
pub fn generate_with<R: Rng>(
    rng: &mut R,
    count: usize,
    window: DateWindow,
) -> Result<Vec<NewAnalysis>> {
    let span = window.span_days();
    let mut batch = Vec::with_capacity(count);

    for _ in 0..count {
        let offset = rng.random_range(0..span);
        let analysis_date = window
            .start()
            .checked_add_signed(Duration::days(offset))
            .ok_or_else(|| {
                AnalysisError::invalid_input(format!("date out of range in window {window}"))
            })?;

        let production = round2(rng.random_range(PRODUCTION_RANGE));
        let consumption = round2(rng.random_range(CONSUMPTION_RANGE));
        batch.push(NewAnalysis::derived(analysis_date, production, consumption)?);
    }

    debug!(count, %window, "generated synthetic batch");
    Ok(batch)
}
