//! Storage layer for the efficiency analysis table
//!
//! This module wraps the SQLite store, organized into logical components:
//! - `models`: Record types and the efficiency formula
//! - `schema`: Connection provider and idempotent schema creation
//! - `queries`: CRUD operations, one connection per call

pub mod models;
pub mod queries;
pub mod schema;


// Re-export the main types and database struct for easy access
pub use models::*;
pub use schema::{AnalysisDatabase, Connector, TABLE_NAME};
