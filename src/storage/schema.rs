//! Database schema and connection management

use crate::config::{ConnectionConfig, MEMORY_DATABASE};
use anyhow::Context;
use rusqlite::Connection;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// Name of the single table this crate owns.
pub const TABLE_NAME: &str = "analysis_records";

/// Opens one short-lived connection per call.
#[derive(Debug, Clone)]
pub struct Connector {
    path: PathBuf,
    target: String,
}

impl Connector {
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            path: config.database_path(),
            target: config.to_string(),
        }
    }

    /// Human-readable store location for diagnostics.
    pub fn location(&self) -> String {
        self.path.display().to_string()
    }

    /// Open a connection, or `None` when the store cannot be reached.
    ///
    /// The failure is logged here; callers only decide how to degrade.
    pub fn open_connection(&self) -> Option<Connection> {
        match self.try_open() {
            Ok(conn) => {
                debug!(location = %self.location(), "opened connection");
                Some(conn)
            }
            Err(e) => {
                error!(target_db = %self.target, "could not connect: {e:#}");
                None
            }
        }
    }

    fn try_open(&self) -> anyhow::Result<Connection> {
        anyhow::ensure!(
            self.path.as_os_str() != MEMORY_DATABASE,
            "in-memory databases do not persist between operations"
        );
        let conn = Connection::open(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;
        // An unreadable or non-database file must fail here, not on the first statement.
        conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .context("reading schema version")?;
        Ok(conn)
    }
}

/// Repository over the analysis table
#[derive(Debug, Clone)]
pub struct AnalysisDatabase {
    pub(crate) connector: Connector,
}

impl AnalysisDatabase {
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            connector: Connector::new(config),
        }
    }

    pub fn connector(&self) -> &Connector {
        &self.connector
    }

    /// Create the analysis table and its indexes if they are missing.
    ///
    /// Returns `Ok(false)` when no connection could be opened; the caller
    /// may carry on without a schema.
    pub fn ensure_schema(&self) -> crate::Result<bool> {
        let Some(conn) = self.connector.open_connection() else {
            warn!(location = %self.connector.location(), "no connection, schema check skipped");
            return Ok(false);
        };

        conn.execute(
            "CREATE TABLE IF NOT EXISTS analysis_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                analysis_date DATE NOT NULL,
                production_energy DECIMAL(10,2) NOT NULL CHECK (production_energy >= 0),
                consumption_energy DECIMAL(10,2) NOT NULL CHECK (consumption_energy >= 0),
                efficiency DECIMAL(10,2) NOT NULL
            )",
            [],
        )?;

        // Back the two ordered range queries
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_analysis_records_date
             ON analysis_records(analysis_date)",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_analysis_records_efficiency
             ON analysis_records(efficiency)",
            [],
        )?;

        info!(table = TABLE_NAME, "schema verified");
        Ok(true)
    }
}
