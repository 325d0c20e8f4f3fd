//! CLI argument definitions and parsing.

pub mod types;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::AnalysisId;

/// The three measurements a full-field update or manual insert supplies.
#[derive(Debug, Args)]
pub struct Measurements {
    /// Production energy (non-negative, two decimals).
    #[clap(long)]
    pub production: f64,

    /// Consumption energy (non-negative, two decimals).
    #[clap(long)]
    pub consumption: f64,

    /// Efficiency percentage, stored as given.
    #[clap(long)]
    pub efficiency: f64,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the analysis table if it does not exist yet.
    Init,

    /// Generate synthetic samples, optionally inserting them.
    Generate {
        /// How many samples to generate.
        #[clap(long, short)]
        count: usize,

        /// First possible date (inclusive), YYYY-MM-DD. Defaults to one
        /// year before --end, or 2023-01-01.
        #[clap(long)]
        start: Option<NaiveDate>,

        /// Date after the last possible one (exclusive), YYYY-MM-DD.
        /// Defaults to one year after --start, or 2024-01-01.
        #[clap(long)]
        end: Option<NaiveDate>,

        /// Seed for a reproducible batch.
        #[clap(long)]
        seed: Option<u64>,

        /// Insert the batch into the database after generating it.
        #[clap(long)]
        insert: bool,

        /// Print the batch as JSON instead of a one-line summary.
        #[clap(long)]
        json: bool,
    },

    /// List every record, oldest first.
    List {
        /// Output results as JSON instead of a table.
        #[clap(long)]
        json: bool,
    },

    /// Show one record by id.
    Get {
        id: AnalysisId,
    },

    /// List records with efficiency strictly below a threshold.
    Below {
        threshold: f64,
    },

    /// List records dated within an inclusive range.
    Range {
        start: NaiveDate,
        end: NaiveDate,
    },

    /// Insert one record with explicit values.
    Insert {
        /// Analysis date, YYYY-MM-DD.
        #[clap(long)]
        date: NaiveDate,

        #[clap(flatten)]
        values: Measurements,
    },

    /// Overwrite the measurements of an existing record.
    Update {
        id: AnalysisId,

        #[clap(flatten)]
        values: Measurements,
    },

    /// Delete a record by id.
    Delete {
        id: AnalysisId,
    },

    /// Export every record to a JSON file.
    Export {
        /// Destination file.
        #[clap(long, short, default_value = crate::report::DEFAULT_EXPORT_PATH)]
        path: PathBuf,
    },

    /// Plot efficiency over time to a PNG file.
    Chart {
        /// Destination file.
        #[clap(long, short, default_value = crate::report::DEFAULT_CHART_PATH)]
        path: PathBuf,
    },

    /// Interactive numbered menu.
    Menu,
}

#[derive(Debug, Parser)]
#[clap(
    name = "efficiency-analysis",
    about = "Record and query energy efficiency analyses"
)]
pub struct AnalysisCli {
    /// Store name or SQLite file path (overrides `DB_NAME`).
    #[clap(long, global = true)]
    pub database: Option<String>,

    /// Log debug output to stderr.
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}
