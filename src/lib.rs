//! Efficiency Analysis Library
//!
//! Records energy efficiency samples (production, consumption, derived
//! efficiency ratio, date) in a SQLite table and queries them back.
//!
//! ## Features
//!
//! - **Repository**: insert, batch insert, list, lookup by id, efficiency
//!   threshold and date range queries, full-field update and delete
//! - **Synthetic Data**: random sample batches for demos and tests
//! - **Reporting**: JSON export, PNG efficiency charts and terminal tables
//! - **Interactive Menu**: a numbered text menu over the same operations
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use efficiency_analysis::{generator, storage::AnalysisDatabase, ConnectionConfig};
//! use chrono::NaiveDate;
//!
//! # fn example() -> efficiency_analysis::Result<()> {
//! let db = AnalysisDatabase::new(ConnectionConfig::for_path("analysis.db"));
//! db.ensure_schema()?;
//!
//! let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let batch = generator::generate(10, start, end)?;
//! db.insert_batch(&batch)?;
//!
//! for record in db.find_below_efficiency(100.0)? {
//!     println!("{} {}", record.analysis_date, record.efficiency);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! The binary reads the connection options from the environment:
//! ```bash
//! export DB_NAME=plant_a   # or a path such as ./plant_a.db
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod generator;
pub mod report;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{AnalysisId, DateWindow};
pub use config::ConnectionConfig;
pub use error::{AnalysisError, Result};
pub use storage::{AnalysisDatabase, AnalysisRecord, NewAnalysis};
