//! Unit tests for command handlers and the interactive menu

use super::analysis::*;
use super::menu::run_menu;
use super::*;
use crate::cli::types::{AnalysisId, DateWindow};
use crate::error::AnalysisError;
use crate::storage::NewAnalysis;
use chrono::NaiveDate;
use std::io::Cursor;
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_test_db() -> (TempDir, AnalysisDatabase) {
    let dir = tempfile::tempdir().unwrap();
    let db = open_database(ConnectionConfig::for_path(dir.path().join("menu.db")));
    (dir, db)
}

fn run_script(db: &AnalysisDatabase, script: &str) -> String {
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut out = Vec::new();
    run_menu(db, &mut input, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_open_database_creates_table() {
    let (_dir, db) = create_test_db();
    assert!(db.find_all().unwrap().is_empty());
}

#[test]
fn test_handle_generate_without_insert_leaves_store_empty() {
    let (_dir, db) = create_test_db();
    let params = GenerateParams {
        seed: Some(1),
        ..GenerateParams::new(5)
    };
    let mut out = Vec::new();

    let batch = handle_generate(&db, &params, &mut out).unwrap();
    assert_eq!(batch.len(), 5);
    assert!(db.find_all().unwrap().is_empty());
    assert!(String::from_utf8(out).unwrap().contains("5 records generated"));
}

#[test]
fn test_handle_generate_with_insert() {
    let (_dir, db) = create_test_db();
    let params = GenerateParams {
        seed: Some(2),
        insert: true,
        as_json: true,
        window: DateWindow::new(date(2023, 6, 1), date(2023, 7, 1)).unwrap(),
        ..GenerateParams::new(4)
    };
    let mut out = Vec::new();

    handle_generate(&db, &params, &mut out).unwrap();
    let stored = db.find_all().unwrap();
    assert_eq!(stored.len(), 4);
    assert!(stored
        .iter()
        .all(|r| r.analysis_date >= date(2023, 6, 1) && r.analysis_date < date(2023, 7, 1)));
    assert!(String::from_utf8(out).unwrap().contains("analysis_date"));
}

#[test]
fn test_handle_list_empty() {
    let (_dir, db) = create_test_db();
    let mut out = Vec::new();
    handle_list(&db, false, &mut out).unwrap();
    assert!(String::from_utf8(out).unwrap().contains("No records found."));
}

#[test]
fn test_handle_list_json() {
    let (_dir, db) = create_test_db();
    db.insert_one(&NewAnalysis::new(date(2023, 1, 1), 2000.0, 1000.0, 200.0))
        .unwrap();
    let mut out = Vec::new();

    handle_list(&db, true, &mut out).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value[0]["efficiency"], 200.0);
}

#[test]
fn test_handle_get_missing_is_not_found() {
    let (_dir, db) = create_test_db();
    let mut out = Vec::new();
    assert!(matches!(
        handle_get(&db, AnalysisId::new(3), &mut out),
        Err(AnalysisError::NotFound { .. })
    ));
}

#[test]
fn test_handle_export() {
    let (dir, db) = create_test_db();
    let path = dir.path().join("export.json");
    let mut out = Vec::new();

    assert_eq!(handle_export(&db, &path, &mut out).unwrap(), 0);
    assert!(String::from_utf8(out.clone()).unwrap().contains("No data to export."));

    db.insert_one(&NewAnalysis::new(date(2023, 1, 1), 2000.0, 1000.0, 200.0))
        .unwrap();
    assert_eq!(handle_export(&db, &path, &mut out).unwrap(), 1);
    assert!(path.exists());
}

#[test]
fn test_handle_chart() {
    let (dir, db) = create_test_db();
    let path = dir.path().join("chart.png");
    let mut out = Vec::new();

    assert_eq!(handle_chart(&db, &path, &mut out).unwrap(), 0);
    assert!(String::from_utf8(out.clone()).unwrap().contains("No data to plot."));
    assert!(!path.exists());

    db.insert_batch(&[
        NewAnalysis::new(date(2023, 1, 2), 1100.0, 1000.0, 110.0),
        NewAnalysis::new(date(2023, 1, 1), 450.0, 1000.0, 45.0),
    ])
    .unwrap();
    assert_eq!(handle_chart(&db, &path, &mut out).unwrap(), 2);
    assert!(path.exists());
}

#[test]
fn test_menu_generate_then_insert() {
    let (_dir, db) = create_test_db();
    let output = run_script(&db, "1\n3\n2\n0\n");

    assert!(output.contains("3 records generated"));
    assert!(output.contains("3 records inserted"));
    assert!(output.contains("Exiting..."));
    assert_eq!(db.find_all().unwrap().len(), 3);
}

#[test]
fn test_menu_insert_before_generate() {
    let (_dir, db) = create_test_db();
    let output = run_script(&db, "2\n0\n");
    assert!(output.contains("Nothing generated yet"));
    assert!(db.find_all().unwrap().is_empty());
}

#[test]
fn test_menu_manual_insert_update_delete() {
    let (_dir, db) = create_test_db();
    let script = "10\n2023-01-01\n1000\n500\n200\n\
                  8\n1\n2000\n1000\n150\n\
                  5\n1\n\
                  9\n1\n\
                  5\n1\n\
                  0\n";
    let output = run_script(&db, script);

    assert!(output.contains("Inserted record 1"));
    assert!(output.contains("Record 1 updated."));
    assert!(output.contains("Record 1 deleted."));
    assert!(output.contains("Error: No analysis record with id 1"));
    assert!(db.find_all().unwrap().is_empty());
}

#[test]
fn test_menu_queries() {
    let (_dir, db) = create_test_db();
    db.insert_batch(&[
        NewAnalysis::new(date(2023, 1, 1), 450.0, 1000.0, 45.0),
        NewAnalysis::new(date(2023, 1, 2), 1100.0, 1000.0, 110.0),
    ])
    .unwrap();

    let output = run_script(&db, "6\n100\n7\n2023-06-01\n2023-06-30\n0\n");
    assert!(output.contains("45.00"));
    assert!(!output.contains("110.00"));
    assert!(output.contains("No records found."));
}

#[test]
fn test_menu_threshold_keeps_extra_decimals() {
    let (_dir, db) = create_test_db();
    db.insert_batch(&[
        NewAnalysis::new(date(2023, 1, 1), 999.9, 1000.0, 99.99),
        NewAnalysis::new(date(2023, 1, 2), 1000.0, 1000.0, 100.0),
    ])
    .unwrap();

    let output = run_script(&db, "6\n99.994\n0\n");
    assert!(output.contains("99.99"));
    assert!(!output.contains("100.00"));
    assert!(!output.contains("No records found."));
}

#[test]
fn test_menu_chart_with_empty_store() {
    let (_dir, db) = create_test_db();
    let output = run_script(&db, "11\n0\n");
    assert!(output.contains("No data to plot."));
    assert!(output.contains("Exiting..."));
}

#[test]
fn test_menu_reports_bad_input_and_continues() {
    let (_dir, db) = create_test_db();
    let output = run_script(&db, "5\nabc\n10\n2023-02-30\n42\n3\n0\n");

    assert!(output.contains("Error: Invalid input"));
    assert!(output.contains("Invalid option."));
    assert!(output.contains("No records found."));
    assert!(output.contains("Exiting..."));
}

#[test]
fn test_menu_stops_at_end_of_input() {
    let (_dir, db) = create_test_db();
    let output = run_script(&db, "3\n");
    assert!(output.contains("No records found."));
    assert!(!output.contains("Exiting..."));
}
