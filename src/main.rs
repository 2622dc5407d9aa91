//! Scryfall set importer CLI.
//!
//! Fetches one set from Scryfall, saves a sample dump and upserts the cards
//! into a DuckDB database. `--dry-run` skips the database entirely.

use clap::Parser;
use scryfall_import::{config, ImportOptions, Importer};
use std::fs;
use std::path::PathBuf;
use std::process;

/// Import a Magic: The Gathering set from Scryfall into DuckDB
#[derive(Parser, Debug)]
#[command(name = "scryfall-import")]
#[command(version, about, long_about = None)]
#[command(after_help = "Popular recent sets:\n  dsk - Duskmourn: House of Horror\n  blb - Bloomburrow\n  mh3 - Modern Horizons 3\n  otj - Outlaws of Thunder Junction")]
struct Args {
    /// Set code to import (e.g. dsk)
    set_code: String,

    /// Fetch, validate and transform, but do not write to the database
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Skip writing the sample dump
    #[arg(long, default_value_t = false)]
    no_save: bool,

    /// Also write every transformed card to the output directory
    #[arg(long, default_value_t = false)]
    complete: bool,

    /// Gzip the complete dump
    #[arg(long, default_value_t = false, requires = "complete")]
    gzip: bool,

    /// Directory for JSON dumps
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// DuckDB database file (defaults to $SCRYFALL_IMPORT_DATABASE, then the platform data dir)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Cards per upsert batch
    #[arg(long, default_value_t = config::DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Scryfall API root (defaults to $SCRYFALL_API_BASE, then the public API)
    #[arg(long)]
    api_base: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("Import failed: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> scryfall_import::Result<()> {
    let api_base = args.api_base.clone().unwrap_or_else(config::api_base);
    let mut builder = Importer::builder()
        .base_url(&api_base)
        .batch_size(args.batch_size);

    if args.dry_run {
        log::info!("DRY RUN: Simulating import of set: {}", args.set_code.to_uppercase());
        log::info!("(This will NOT write to the database)");
    } else {
        let db_path = config::database_path(args.database.as_deref())?;
        log::info!("Database path: {}", db_path.display());
        builder = builder.database(db_path);
    }

    let mut importer = builder.build()?;
    fs::create_dir_all(&args.output_dir)?;

    let options = ImportOptions {
        dry_run: args.dry_run,
        save_to_file: !args.no_save,
        save_complete: args.complete,
        gzip: args.gzip,
        output_dir: args.output_dir.clone(),
    };
    let result = importer.import_set(&args.set_code, &options)?;

    log::info!("{} Summary:", if args.dry_run { "Dry Run" } else { "Import" });
    log::info!("Set: {}", result.set_metadata.name);
    log::info!(
        "Cards {}: {}",
        if args.dry_run { "processed" } else { "imported" },
        result.cards_imported
    );
    log::info!(
        "Validation passed: {}",
        if result.validation_passed { "✅" } else { "❌" }
    );
    if let Some(path) = &result.saved_to_file {
        log::info!("Sample saved to: {}", path.display());
    }
    if let Some(path) = &result.saved_complete {
        log::info!("Complete dump saved to: {}", path.display());
    }
    if args.dry_run {
        log::info!(
            "To actually import, run: scryfall-import {}",
            args.set_code
        );
    }
    Ok(())
}
