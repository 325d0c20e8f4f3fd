//! Calendar date helpers for analysis records and generator windows.

use crate::error::{AnalysisError, Result};
use chrono::{Months, NaiveDate};
use std::fmt;

/// Date format accepted on input and written to the store.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date, trimming surrounding whitespace.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)?)
}

/// Half-open window `[start, end)` that synthetic dates are drawn from.
///
/// `start == end` is allowed and collapses to that single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(AnalysisError::invalid_input(format!(
                "window end {end} is before start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Window from optional bounds.
    ///
    /// With neither bound this is the default window. A lone bound gets a
    /// partner one year away from it.
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self> {
        let year = Months::new(12);
        match (start, end) {
            (None, None) => Ok(Self::default()),
            (Some(start), Some(end)) => Self::new(start, end),
            (Some(start), None) => {
                let end = start.checked_add_months(year).ok_or_else(|| {
                    AnalysisError::invalid_input(format!("no date one year after {start}"))
                })?;
                Self::new(start, end)
            }
            (None, Some(end)) => {
                let start = end.checked_sub_months(year).ok_or_else(|| {
                    AnalysisError::invalid_input(format!("no date one year before {end}"))
                })?;
                Self::new(start, end)
            }
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of distinct days a date can be drawn from (at least one).
    pub fn span_days(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_days().max(1)
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN),
        }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
