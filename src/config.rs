//! Connection options and their environment glue.
//!
//! The storage layer only ever sees a [`ConnectionConfig`]; reading the
//! process environment happens here, once, at startup.

use crate::error::{AnalysisError, Result};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

pub const HOST_ENV_VAR: &str = "DB_HOST";
pub const USER_ENV_VAR: &str = "DB_USER";
pub const PASSWORD_ENV_VAR: &str = "DB_PASS";
pub const DATABASE_ENV_VAR: &str = "DB_NAME";
pub const PORT_ENV_VAR: &str = "DB_PORT";

/// SQLite's name for a private in-memory database.
pub const MEMORY_DATABASE: &str = ":memory:";

/// Directory under the platform data dir that holds named stores.
const APP_DIR: &str = "efficiency-analysis";

/// The five recognized connection options.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub port: u16,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "db".to_string(),
            user: "enova_user".to_string(),
            password: "enova_pass".to_string(),
            database: "enova".to_string(),
            port: 3306,
        }
    }
}

impl ConnectionConfig {
    /// Config pointing at an explicit store file, other options defaulted.
    pub fn for_path(path: impl AsRef<Path>) -> Self {
        Self {
            database: path.as_ref().to_string_lossy().into_owned(),
            ..Self::default()
        }
    }

    /// Build the config from `DB_*` variables, loading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let port = match env::var(PORT_ENV_VAR) {
            Ok(raw) => parse_port(&raw)?,
            Err(_) => defaults.port,
        };

        let config = Self {
            host: env::var(HOST_ENV_VAR).unwrap_or(defaults.host),
            user: env::var(USER_ENV_VAR).unwrap_or(defaults.user),
            password: env::var(PASSWORD_ENV_VAR).unwrap_or(defaults.password),
            database: env::var(DATABASE_ENV_VAR).unwrap_or(defaults.database),
            port,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject a `database` that cannot hold data across operations.
    ///
    /// Every operation opens its own connection, so an in-memory store
    /// would lose the table as soon as the schema check returns.
    pub fn validate(&self) -> Result<()> {
        let name = self.database.trim();
        if name.is_empty() || name == MEMORY_DATABASE {
            return Err(AnalysisError::InvalidConfig {
                var: DATABASE_ENV_VAR.to_string(),
                value: self.database.clone(),
            });
        }
        Ok(())
    }

    /// Whether `database` names a file directly rather than a store name.
    pub fn is_explicit_path(&self) -> bool {
        let db = self.database.as_str();
        db == MEMORY_DATABASE
            || db.contains(std::path::MAIN_SEPARATOR)
            || db.contains('/')
            || db.ends_with(".db")
            || db.ends_with(".sqlite")
    }

    /// Location of the SQLite file backing this config.
    pub fn database_path(&self) -> PathBuf {
        if self.is_explicit_path() {
            return PathBuf::from(&self.database);
        }
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join(APP_DIR).join(format!("{}.db", self.database))
    }

    /// Validate the config and create the data directory for named stores.
    ///
    /// Explicit paths are left alone so a missing directory surfaces as an
    /// unavailable connection.
    pub fn prepare_location(&self) -> Result<()> {
        self.validate()?;
        if self.is_explicit_path() {
            return Ok(());
        }
        if let Some(parent) = self.database_path().parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("port", &self.port)
            .finish()
    }
}

impl fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}:{}/{} ({})",
            self.user,
            self.host,
            self.port,
            self.database,
            self.database_path().display()
        )
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(AnalysisError::InvalidConfig {
            var: PORT_ENV_VAR.to_string(),
            value: raw.to_string(),
        }),
    }
}
