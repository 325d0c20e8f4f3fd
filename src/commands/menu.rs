//! Interactive numbered menu over the analysis commands.

use super::analysis::{
    handle_below, handle_chart, handle_delete, handle_export, handle_generate, handle_get,
    handle_insert, handle_insert_batch, handle_list, handle_range, handle_update, GenerateParams,
};
use crate::{
    cli::types::{parse_amount, parse_date, AnalysisId},
    error::AnalysisError,
    report::{DEFAULT_CHART_PATH, DEFAULT_EXPORT_PATH},
    storage::{AnalysisDatabase, NewAnalysis},
    Result,
};
use std::io::{BufRead, Write};
use std::path::Path;

const MENU: &str = "
==== MENU ====
1  - Generate synthetic data (in memory only)
2  - Insert the last generated batch
3  - List all records
4  - Export JSON
5  - Find by id
6  - Find efficiency below a value
7  - Find by date range
8  - Update a record
9  - Delete a record
10 - Insert a record manually
11 - Save efficiency chart (PNG)
0  - Exit";

enum MenuFlow {
    Continue,
    Exit,
}

/// Run the menu until the user exits or input ends.
///
/// Operation failures are printed and the loop keeps going. The last
/// generated batch lives only for the duration of this call.
pub fn run_menu<R: BufRead, W: Write>(
    db: &AnalysisDatabase,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let mut last_batch: Option<Vec<NewAnalysis>> = None;

    loop {
        writeln!(out, "{MENU}")?;
        let Some(choice) = read_answer(input, out, "Choice: ")? else {
            break;
        };

        match run_choice(db, &mut last_batch, choice.trim(), input, out) {
            Ok(MenuFlow::Continue) => {}
            Ok(MenuFlow::Exit) => {
                writeln!(out, "Exiting...")?;
                break;
            }
            Err(e) => writeln!(out, "Error: {e}")?,
        }
    }
    Ok(())
}

fn run_choice<R: BufRead, W: Write>(
    db: &AnalysisDatabase,
    last_batch: &mut Option<Vec<NewAnalysis>>,
    choice: &str,
    input: &mut R,
    out: &mut W,
) -> Result<MenuFlow> {
    match choice {
        "1" => {
            let count: usize = ask(input, out, "How many records? ")?.trim().parse()?;
            let batch = handle_generate(db, &GenerateParams::new(count), out)?;
            writeln!(out, "Use option 2 to insert them.")?;
            *last_batch = Some(batch);
        }
        "2" => match last_batch {
            Some(batch) => {
                handle_insert_batch(db, batch, out)?;
            }
            None => writeln!(out, "Nothing generated yet. Use option 1 first.")?,
        },
        "3" => handle_list(db, false, out)?,
        "4" => {
            handle_export(db, Path::new(DEFAULT_EXPORT_PATH), out)?;
        }
        "5" => {
            let id: AnalysisId = ask(input, out, "Id: ")?.parse()?;
            handle_get(db, id, out)?;
        }
        "6" => {
            // Unrounded: the comparison is strict
            let threshold: f64 = ask(input, out, "Efficiency threshold (%): ")?.trim().parse()?;
            handle_below(db, threshold, out)?;
        }
        "7" => {
            let start = parse_date(&ask(input, out, "Start date (YYYY-MM-DD): ")?)?;
            let end = parse_date(&ask(input, out, "End date (YYYY-MM-DD): ")?)?;
            handle_range(db, start, end, out)?;
        }
        "8" => {
            let id: AnalysisId = ask(input, out, "Id: ")?.parse()?;
            let (production, consumption, efficiency) = ask_measurements(input, out)?;
            handle_update(db, id, production, consumption, efficiency, out)?;
        }
        "9" => {
            let id: AnalysisId = ask(input, out, "Id to delete: ")?.parse()?;
            handle_delete(db, id, out)?;
        }
        "10" => {
            let date = parse_date(&ask(input, out, "Date (YYYY-MM-DD): ")?)?;
            let (production, consumption, efficiency) = ask_measurements(input, out)?;
            let analysis = NewAnalysis::new(date, production, consumption, efficiency);
            handle_insert(db, &analysis, out)?;
        }
        "11" => {
            handle_chart(db, Path::new(DEFAULT_CHART_PATH), out)?;
        }
        "0" => return Ok(MenuFlow::Exit),
        _ => writeln!(out, "Invalid option.")?,
    }
    Ok(MenuFlow::Continue)
}

fn ask_measurements<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<(f64, f64, f64)> {
    let production = parse_amount(&ask(input, out, "Production: ")?)?;
    let consumption = parse_amount(&ask(input, out, "Consumption: ")?)?;
    let efficiency = parse_amount(&ask(input, out, "Efficiency: ")?)?;
    Ok((production, consumption, efficiency))
}

/// Prompt for a required answer; end of input is an error.
fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<String> {
    read_answer(input, out, label)?
        .ok_or_else(|| AnalysisError::invalid_input("input ended before an answer was given"))
}

/// Prompt and read one line, `None` at end of input.
fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
