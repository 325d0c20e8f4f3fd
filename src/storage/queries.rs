//! CRUD operations on the analysis table
//!
//! Every method opens its own connection and drops it before returning.

use super::models::{validate_measurements, AnalysisRecord, NewAnalysis};
use super::schema::AnalysisDatabase;
use crate::cli::types::{round2, AnalysisId};
use crate::error::{AnalysisError, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info, warn};

const SELECT_COLUMNS: &str =
    "SELECT id, analysis_date, production_energy, consumption_energy, efficiency
     FROM analysis_records";

impl AnalysisDatabase {
    /// Insert one sample and return it with its assigned id.
    pub fn insert_one(&self, analysis: &NewAnalysis) -> Result<AnalysisRecord> {
        let analysis = analysis.normalized();
        analysis.validate()?;
        let conn = self.require_connection()?;

        let id = insert_row(&conn, &analysis)?;
        info!(%id, date = %analysis.analysis_date, "inserted analysis");
        Ok(analysis.with_id(id))
    }

    /// Insert each sample as its own statement and return how many landed.
    ///
    /// The whole batch is validated before the store is touched. A row that
    /// fails at the store is logged and skipped; rows already written stay.
    pub fn insert_batch(&self, batch: &[NewAnalysis]) -> Result<usize> {
        let batch: Vec<NewAnalysis> = batch.iter().map(NewAnalysis::normalized).collect();
        for (index, analysis) in batch.iter().enumerate() {
            analysis.validate().map_err(|e| {
                AnalysisError::invalid_input(format!("batch row {index}: {e}"))
            })?;
        }
        if batch.is_empty() {
            return Ok(0);
        }

        let Some(conn) = self.connector.open_connection() else {
            warn!(rows = batch.len(), "no connection, batch not inserted");
            return Ok(0);
        };

        let mut inserted = 0;
        for (index, analysis) in batch.iter().enumerate() {
            match insert_row(&conn, analysis) {
                Ok(_) => inserted += 1,
                Err(e) => warn!(row = index, "batch row failed: {e}"),
            }
        }

        info!(inserted, requested = batch.len(), "batch insert finished");
        Ok(inserted)
    }

    /// All samples ordered by date (ties by id)
    pub fn find_all(&self) -> Result<Vec<AnalysisRecord>> {
        let Some(conn) = self.connector.open_connection() else {
            warn!("no connection, returning no records");
            return Ok(Vec::new());
        };

        query_records(
            &conn,
            &format!("{SELECT_COLUMNS} ORDER BY analysis_date ASC, id ASC"),
            [],
        )
    }

    /// Look up one sample by id
    pub fn find_by_id(&self, id: AnalysisId) -> Result<AnalysisRecord> {
        let conn = self.require_connection()?;

        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?"))?;
        let record = stmt.query_row(params![id.as_i64()], row_to_record).optional()?;
        record.ok_or(AnalysisError::NotFound { id })
    }

    /// Samples with efficiency strictly below `threshold`, lowest first
    pub fn find_below_efficiency(&self, threshold: f64) -> Result<Vec<AnalysisRecord>> {
        if threshold.is_nan() {
            return Err(AnalysisError::invalid_input("efficiency threshold is NaN"));
        }
        let Some(conn) = self.connector.open_connection() else {
            warn!(threshold, "no connection, returning no records");
            return Ok(Vec::new());
        };

        query_records(
            &conn,
            &format!("{SELECT_COLUMNS} WHERE efficiency < ? ORDER BY efficiency ASC, id ASC"),
            params![threshold],
        )
    }

    /// Samples dated within `[start, end]`, oldest first
    pub fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AnalysisRecord>> {
        let Some(conn) = self.connector.open_connection() else {
            warn!(%start, %end, "no connection, returning no records");
            return Ok(Vec::new());
        };

        query_records(
            &conn,
            &format!(
                "{SELECT_COLUMNS} WHERE analysis_date BETWEEN ? AND ?
                 ORDER BY analysis_date ASC, id ASC"
            ),
            params![start, end],
        )
    }

    /// Overwrite the three measurements of an existing sample.
    ///
    /// The efficiency is stored as given; it is not recomputed from the
    /// energies.
    pub fn update(
        &self,
        id: AnalysisId,
        production_energy: f64,
        consumption_energy: f64,
        efficiency: f64,
    ) -> Result<()> {
        let (production_energy, consumption_energy, efficiency) = (
            round2(production_energy),
            round2(consumption_energy),
            round2(efficiency),
        );
        validate_measurements(production_energy, consumption_energy, efficiency)?;
        let conn = self.require_connection()?;

        let rows_affected = conn.execute(
            "UPDATE analysis_records
             SET production_energy = ?, consumption_energy = ?, efficiency = ?
             WHERE id = ?",
            params![production_energy, consumption_energy, efficiency, id.as_i64()],
        )?;

        if rows_affected == 0 {
            return Err(AnalysisError::NotFound { id });
        }
        info!(%id, "updated analysis");
        Ok(())
    }

    /// Remove a sample by id
    pub fn delete(&self, id: AnalysisId) -> Result<()> {
        let conn = self.require_connection()?;

        let rows_affected =
            conn.execute("DELETE FROM analysis_records WHERE id = ?", params![id.as_i64()])?;

        if rows_affected == 0 {
            return Err(AnalysisError::NotFound { id });
        }
        info!(%id, "deleted analysis");
        Ok(())
    }

    fn require_connection(&self) -> Result<Connection> {
        self.connector
            .open_connection()
            .ok_or_else(|| AnalysisError::ConnectionUnavailable {
                location: self.connector.location(),
            })
    }
}

fn insert_row(conn: &Connection, analysis: &NewAnalysis) -> Result<AnalysisId> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO analysis_records
         (analysis_date, production_energy, consumption_energy, efficiency)
         VALUES (?, ?, ?, ?)",
    )?;
    stmt.execute(params![
        analysis.analysis_date,
        analysis.production_energy,
        analysis.consumption_energy,
        analysis.efficiency
    ])?;
    Ok(AnalysisId::new(conn.last_insert_rowid()))
}

fn query_records<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<AnalysisRecord>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, row_to_record)?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    debug!(count = records.len(), "query returned records");
    Ok(records)
}

/// Helper to convert a database row to an AnalysisRecord
fn row_to_record(row: &Row) -> rusqlite::Result<AnalysisRecord> {
    Ok(AnalysisRecord {
        id: AnalysisId::new(row.get(0)?),
        analysis_date: row.get(1)?,
        production_energy: round2(row.get(2)?),
        consumption_energy: round2(row.get(3)?),
        efficiency: round2(row.get(4)?),
    })
}
