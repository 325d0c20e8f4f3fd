//! Entry point: parse CLI, set up logging and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use efficiency_analysis::{
    cli::{AnalysisCli, Commands},
    commands::{
        analysis::{
            handle_below, handle_chart, handle_delete, handle_export, handle_generate, handle_get,
            handle_init, handle_insert, handle_list, handle_range, handle_update, GenerateParams,
        },
        menu::run_menu,
        open_database,
    },
    ConnectionConfig, DateWindow, NewAnalysis,
};
use tracing_subscriber::EnvFilter;

/// Run the CLI.
fn main() -> anyhow::Result<()> {
    let app = AnalysisCli::parse();
    init_logging(app.verbose);

    let mut config = ConnectionConfig::from_env().context("reading connection settings")?;
    if let Some(database) = app.database {
        config.database = database;
    }
    config
        .prepare_location()
        .with_context(|| format!("preparing data directory for {}", config))?;

    let db = open_database(config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let outcome = match app.command {
        Commands::Init => handle_init(&db, &mut out),
        Commands::Generate {
            count,
            start,
            end,
            seed,
            insert,
            json,
        } => {
            DateWindow::from_bounds(start, end).and_then(|window| {
                let params = GenerateParams {
                    count,
                    window,
                    seed,
                    insert,
                    as_json: json,
                };
                handle_generate(&db, &params, &mut out).map(|_| ())
            })
        }
        Commands::List { json } => handle_list(&db, json, &mut out),
        Commands::Get { id } => handle_get(&db, id, &mut out),
        Commands::Below { threshold } => handle_below(&db, threshold, &mut out),
        Commands::Range { start, end } => handle_range(&db, start, end, &mut out),
        Commands::Insert { date, values } => {
            let analysis =
                NewAnalysis::new(date, values.production, values.consumption, values.efficiency);
            handle_insert(&db, &analysis, &mut out).map(|_| ())
        }
        Commands::Update { id, values } => handle_update(
            &db,
            id,
            values.production,
            values.consumption,
            values.efficiency,
            &mut out,
        ),
        Commands::Delete { id } => handle_delete(&db, id, &mut out),
        Commands::Export { path } => handle_export(&db, &path, &mut out).map(|_| ()),
        Commands::Chart { path } => handle_chart(&db, &path, &mut out).map(|_| ()),
        Commands::Menu => {
            let stdin = std::io::stdin();
            run_menu(&db, &mut stdin.lock(), &mut out)
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
