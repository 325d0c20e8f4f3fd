//! Type-safe wrappers for analysis identifiers, dates and energy amounts.

pub mod amounts;
pub mod ids;
pub mod time;

pub use amounts::{parse_amount, round2};
pub use ids::AnalysisId;
pub use time::{parse_date, DateWindow, DATE_FORMAT};
