//! Handlers for the one-shot analysis subcommands.
//!
//! Handlers write to any `Write` so the interactive menu can reuse them.

use crate::{
    cli::types::{AnalysisId, DateWindow},
    generator::generate_with,
    report::{export_json, render_chart, render_row, render_table},
    storage::{AnalysisDatabase, AnalysisRecord, NewAnalysis},
    Result,
};
use chrono::NaiveDate;
use rand::{rngs::StdRng, SeedableRng};
use std::io::Write;
use std::path::Path;

/// Parameters for the generate command
#[derive(Debug, Clone)]
pub struct GenerateParams {
    pub count: usize,
    pub window: DateWindow,
    pub seed: Option<u64>,
    pub insert: bool,
    pub as_json: bool,
}

impl GenerateParams {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            window: DateWindow::default(),
            seed: None,
            insert: false,
            as_json: false,
        }
    }
}

/// Handle the init command
pub fn handle_init(db: &AnalysisDatabase, out: &mut dyn Write) -> Result<()> {
    if db.ensure_schema()? {
        writeln!(out, "✓ Table verified at {}", db.connector().location())?;
    } else {
        writeln!(out, "⚠ No database connection; table not checked.")?;
    }
    Ok(())
}

/// Handle the generate command, returning the batch it produced.
pub fn handle_generate(
    db: &AnalysisDatabase,
    params: &GenerateParams,
    out: &mut dyn Write,
) -> Result<Vec<NewAnalysis>> {
    let batch = match params.seed {
        Some(seed) => generate_with(&mut StdRng::seed_from_u64(seed), params.count, params.window)?,
        None => generate_with(&mut rand::rng(), params.count, params.window)?,
    };

    if params.as_json {
        writeln!(out, "{}", serde_json::to_string_pretty(&batch)?)?;
    } else {
        writeln!(
            out,
            "{} records generated in memory for {}.",
            batch.len(),
            params.window
        )?;
    }

    if params.insert {
        handle_insert_batch(db, &batch, out)?;
    }
    Ok(batch)
}

/// Persist a previously generated batch
pub fn handle_insert_batch(
    db: &AnalysisDatabase,
    batch: &[NewAnalysis],
    out: &mut dyn Write,
) -> Result<usize> {
    let inserted = db.insert_batch(batch)?;
    if inserted < batch.len() {
        writeln!(
            out,
            "⚠ Inserted {} of {} records; see log for failures.",
            inserted,
            batch.len()
        )?;
    } else {
        writeln!(out, "✓ {} records inserted.", inserted)?;
    }
    Ok(inserted)
}

/// Handle the list command
pub fn handle_list(db: &AnalysisDatabase, as_json: bool, out: &mut dyn Write) -> Result<()> {
    let records = db.find_all()?;
    print_records(&records, as_json, out)
}

/// Handle the get command
pub fn handle_get(db: &AnalysisDatabase, id: AnalysisId, out: &mut dyn Write) -> Result<()> {
    let record = db.find_by_id(id)?;
    writeln!(out, "{}", render_table(std::slice::from_ref(&record)))?;
    Ok(())
}

/// Handle the below command
pub fn handle_below(db: &AnalysisDatabase, threshold: f64, out: &mut dyn Write) -> Result<()> {
    let records = db.find_below_efficiency(threshold)?;
    print_records(&records, false, out)
}

/// Handle the range command
pub fn handle_range(
    db: &AnalysisDatabase,
    start: NaiveDate,
    end: NaiveDate,
    out: &mut dyn Write,
) -> Result<()> {
    let records = db.find_by_date_range(start, end)?;
    print_records(&records, false, out)
}

/// Handle the insert command
pub fn handle_insert(
    db: &AnalysisDatabase,
    analysis: &NewAnalysis,
    out: &mut dyn Write,
) -> Result<AnalysisRecord> {
    let record = db.insert_one(analysis)?;
    writeln!(out, "✓ Inserted record {}", record.id)?;
    writeln!(out, "{}", render_row(&record))?;
    Ok(record)
}

/// Handle the update command
pub fn handle_update(
    db: &AnalysisDatabase,
    id: AnalysisId,
    production: f64,
    consumption: f64,
    efficiency: f64,
    out: &mut dyn Write,
) -> Result<()> {
    db.update(id, production, consumption, efficiency)?;
    writeln!(out, "✓ Record {} updated.", id)?;
    Ok(())
}

/// Handle the delete command
pub fn handle_delete(db: &AnalysisDatabase, id: AnalysisId, out: &mut dyn Write) -> Result<()> {
    db.delete(id)?;
    writeln!(out, "✓ Record {} deleted.", id)?;
    Ok(())
}

/// Handle the export command
pub fn handle_export(db: &AnalysisDatabase, path: &Path, out: &mut dyn Write) -> Result<usize> {
    let records = db.find_all()?;
    let written = export_json(&records, path)?;
    if written == 0 {
        writeln!(out, "No data to export.")?;
    } else {
        writeln!(out, "✓ Exported {} records to {}", written, path.display())?;
    }
    Ok(written)
}

/// Handle the chart command
pub fn handle_chart(db: &AnalysisDatabase, path: &Path, out: &mut dyn Write) -> Result<usize> {
    let records = db.find_all()?;
    let plotted = render_chart(&records, path)?;
    if plotted == 0 {
        writeln!(out, "No data to plot.")?;
    } else {
        writeln!(out, "✓ Chart of {} records saved to {}", plotted, path.display())?;
    }
    Ok(plotted)
}

fn print_records(records: &[AnalysisRecord], as_json: bool, out: &mut dyn Write) -> Result<()> {
    if as_json {
        writeln!(out, "{}", serde_json::to_string_pretty(records)?)?;
    } else if records.is_empty() {
        writeln!(out, "No records found.")?;
    } else {
        write!(out, "{}", render_table(records))?;
    }
    Ok(())
}
