//! Reporting over query results: JSON export, PNG charts and terminal tables.

use crate::cli::types::DATE_FORMAT;
use crate::error::{AnalysisError, Result};
use crate::storage::AnalysisRecord;
use chrono::NaiveDate;
use plotters::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Default file written by the export command.
pub const DEFAULT_EXPORT_PATH: &str = "analysis_export.json";

/// Default file written by the chart command.
pub const DEFAULT_CHART_PATH: &str = "efficiency_chart.png";

const CHART_SIZE: (u32, u32) = (1000, 500);

/// Write `records` as a pretty JSON array, one object per row.
///
/// Returns the number of rows written. An empty slice writes no file.
pub fn export_json(records: &[AnalysisRecord], path: &Path) -> Result<usize> {
    if records.is_empty() {
        return Ok(0);
    }

    create_parent(path)?;

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(rows = records.len(), path = %path.display(), "exported records");
    Ok(records.len())
}

/// Plot efficiency against date as a PNG line chart.
///
/// Points are drawn in date order whatever order `records` arrive in.
/// Returns the number of points plotted. An empty slice writes no file.
pub fn render_chart(records: &[AnalysisRecord], path: &Path) -> Result<usize> {
    let mut points: Vec<(NaiveDate, f64)> = records
        .iter()
        .map(|r| (r.analysis_date, r.efficiency))
        .collect();
    points.sort_by_key(|&(date, _)| date);

    let (Some(&(first, _)), Some(&(last, _))) = (points.first(), points.last()) else {
        return Ok(0);
    };
    let (low, high) = efficiency_bounds(&points);

    create_parent(path)?;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Efficiency over time", ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(first..last.succ_opt().unwrap_or(last), low..high)
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Efficiency (%)")
        .x_label_formatter(&|date: &NaiveDate| date.format(DATE_FORMAT).to_string())
        .draw()
        .map_err(chart_error)?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), BLUE.stroke_width(2)))
        .map_err(chart_error)?;

    root.present().map_err(chart_error)?;

    info!(points = points.len(), path = %path.display(), "saved efficiency chart");
    Ok(points.len())
}

/// Y-axis range with a little headroom; never empty.
fn efficiency_bounds(points: &[(NaiveDate, f64)]) -> (f64, f64) {
    let (min, max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, e)| {
            (lo.min(e), hi.max(e))
        });
    let pad = ((max - min) * 0.05).max(1.0);
    (min - pad, max + pad)
}

fn chart_error(err: impl std::fmt::Display) -> AnalysisError {
    AnalysisError::Chart {
        message: err.to_string(),
    }
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Render records as aligned columns for the terminal.
pub fn render_table(records: &[AnalysisRecord]) -> String {
    let mut out = format!(
        "{:>6}  {:<10}  {:>12}  {:>12}  {:>10}\n",
        "id", "date", "production", "consumption", "efficiency"
    );
    for record in records {
        out.push_str(&render_row(record));
        out.push('\n');
    }
    out
}

/// Render a single record on one line (no header).
pub fn render_row(record: &AnalysisRecord) -> String {
    format!(
        "{:>6}  {:<10}  {:>12.2}  {:>12.2}  {:>10.2}",
        record.id.as_i64(),
        record.analysis_date.to_string(),
        record.production_energy,
        record.consumption_energy,
        record.efficiency
    )
}
