//! Command implementations for the efficiency analysis CLI

pub mod analysis;
pub mod menu;

use crate::{config::ConnectionConfig, storage::AnalysisDatabase};
use tracing::warn;

/// Build the repository for `config` and make sure the table exists.
///
/// An unreachable store is logged by the connector and is not fatal; each
/// command then degrades on its own.
pub fn open_database(config: ConnectionConfig) -> AnalysisDatabase {
    let db = AnalysisDatabase::new(config);
    if let Err(e) = db.ensure_schema() {
        warn!("schema check failed: {e}");
    }
    db
}

#[cfg(test)]
mod tests;
