//! Scryfall set importer.
//!
//! Fetches every printing of a Magic: The Gathering set from the Scryfall
//! API, checks the count against the set's declared size, maps the cards to
//! the `cards` table shape and upserts them into DuckDB in batches.
//!
//! # Quick start
//!
//! ```no_run
//! use scryfall_import::{ImportOptions, Importer};
//!
//! let mut importer = Importer::builder()
//!     .database("cards.duckdb")
//!     .build()
//!     .unwrap();
//!
//! let result = importer.import_set("dsk", &ImportOptions::default()).unwrap();
//! println!("{} cards imported", result.cards_imported);
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod client;
pub mod config;
pub mod dump;
pub mod error;
pub mod models;
pub mod rate_limit;
pub mod store;
pub mod transform;
pub mod upload;
pub mod validate;

#[cfg(feature = "async")]
pub use async_client::AsyncImporter;
pub use client::{CardPages, CatalogClient};
pub use error::{ImportError, Result};
pub use rate_limit::RateLimiter;
pub use store::{CardStore, DuckDbStore};
pub use upload::UploadSummary;

use models::ScryfallSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// ImporterBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`Importer`].
pub struct ImporterBuilder {
    base_url: String,
    request_interval: Duration,
    timeout: Duration,
    batch_size: usize,
    store: Option<Box<dyn CardStore + Send>>,
    database: Option<PathBuf>,
}

impl Default for ImporterBuilder {
    fn default() -> Self {
        Self {
            base_url: config::SCRYFALL_API_BASE.to_string(),
            request_interval: config::REQUEST_DELAY,
            timeout: config::DEFAULT_TIMEOUT,
            batch_size: config::DEFAULT_BATCH_SIZE,
            store: None,
            database: None,
        }
    }
}

impl ImporterBuilder {
    /// Point the client at a different API root (mirrors, test servers).
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Minimum spacing between API requests. Defaults to 100ms.
    pub fn request_interval(mut self, interval: Duration) -> Self {
        self.request_interval = interval;
        self
    }

    /// Per-request HTTP timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Cards per upsert batch. Defaults to 1000.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Use an already-open store. Takes precedence over [`database`](Self::database).
    pub fn store<S: CardStore + Send + 'static>(mut self, store: S) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Open (or create) a DuckDB database file at build time.
    pub fn database<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the importer, opening the database if one was configured.
    ///
    /// No network request is made here.
    pub fn build(self) -> Result<Importer> {
        if self.batch_size == 0 {
            return Err(ImportError::Configuration(
                "batch size must be at least 1".to_string(),
            ));
        }

        let store = match (self.store, self.database) {
            (Some(store), _) => Some(store),
            (None, Some(path)) => {
                Some(Box::new(DuckDbStore::open(path)?) as Box<dyn CardStore + Send>)
            }
            (None, None) => None,
        };

        Ok(Importer {
            client: CatalogClient::new(&self.base_url, self.request_interval, self.timeout),
            store,
            batch_size: self.batch_size,
        })
    }
}

// ---------------------------------------------------------------------------
// ImportOptions / ImportResult
// ---------------------------------------------------------------------------

/// Per-run switches for [`Importer::import_set`].
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Run every step except the store upload.
    pub dry_run: bool,
    /// Write a sample dump (first few cards) to `output_dir`.
    pub save_to_file: bool,
    /// Also write every card to `output_dir`.
    pub save_complete: bool,
    /// Gzip the complete dump.
    pub gzip: bool,
    /// Directory the dumps are written to; created when missing.
    pub output_dir: PathBuf,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            save_to_file: false,
            save_complete: false,
            gzip: false,
            output_dir: PathBuf::from(config::DEFAULT_OUTPUT_DIR),
        }
    }
}

/// Summary of one import run.
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub set_metadata: ScryfallSet,
    /// Transformed cards; in a dry run these were not written.
    pub cards_imported: usize,
    pub validation_passed: bool,
    pub saved_to_file: Option<PathBuf>,
    pub saved_complete: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Importer
// ---------------------------------------------------------------------------

/// Runs the fetch, validate, transform, dump and upload pipeline for a set.
///
/// Created via [`Importer::builder()`].
pub struct Importer {
    client: CatalogClient,
    store: Option<Box<dyn CardStore + Send>>,
    batch_size: usize,
}

impl std::fmt::Debug for Importer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Importer")
            .field("batch_size", &self.batch_size)
            .finish_non_exhaustive()
    }
}

impl Importer {
    pub fn builder() -> ImporterBuilder {
        ImporterBuilder::default()
    }

    /// The catalog client, e.g. for streaming pages directly.
    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    /// Import one set end to end.
    ///
    /// Steps run strictly in order: set metadata, all card pages, count
    /// validation, transform, optional dumps, then upload unless
    /// `dry_run`. A count mismatch is only logged. Any other failure
    /// aborts the run and is returned unchanged; nothing is compensated,
    /// and a re-run starts from scratch.
    pub fn import_set(&mut self, set_code: &str, options: &ImportOptions) -> Result<ImportResult> {
        if !options.dry_run && self.store.is_none() {
            return Err(ImportError::Configuration(
                "no card store configured; use a dry run or configure a database".to_string(),
            ));
        }
        let set_code = client::checked_set_code(set_code)?;

        log::info!(
            "Starting import of set: {}{}",
            set_code,
            if options.dry_run { " (DRY RUN)" } else { "" }
        );

        match self.run_pipeline(set_code, options) {
            Ok(result) => {
                log::info!(
                    "Set {} import {}completed successfully",
                    set_code,
                    if options.dry_run { "simulation " } else { "" }
                );
                Ok(result)
            }
            Err(e) => {
                log::error!("Failed to import set {}: {}", set_code, e);
                Err(e)
            }
        }
    }

    fn run_pipeline(&mut self, set_code: &str, options: &ImportOptions) -> Result<ImportResult> {
        log::info!("Fetching set metadata...");
        let set_metadata = self.client.fetch_set_metadata(set_code)?;
        log::info!("Set: {} ({} cards)", set_metadata.name, set_metadata.card_count);

        log::info!("Fetching cards from Scryfall...");
        let cards = self.client.search_cards_in_set(set_code)?;

        log::info!("Validating card count...");
        let validation_passed = validate::validate_set_import(&self.client, set_code, &cards)?;
        if !validation_passed {
            log::warn!("Validation failed, but continuing...");
        }

        log::info!("Transforming cards for database...");
        let rows = transform::transform_cards(&cards);
        log_summary(&set_metadata, &rows);

        let saved_to_file = if options.save_to_file {
            Some(dump::save_sample(&rows, set_code, &options.output_dir)?)
        } else {
            None
        };
        let saved_complete = if options.save_complete {
            Some(dump::save_complete(
                &rows,
                set_code,
                &options.output_dir,
                options.gzip,
            )?)
        } else {
            None
        };

        if options.dry_run {
            log::info!("DRY RUN: Would upload to database but skipping...");
            log::info!("Would insert {} cards", rows.len());
        } else if let Some(store) = self.store.as_deref_mut() {
            log::info!("Uploading cards to database...");
            upload::upload_cards(store, &rows, self.batch_size)?;
        }

        Ok(ImportResult {
            set_metadata,
            cards_imported: rows.len(),
            validation_passed,
            saved_to_file,
            saved_complete,
        })
    }
}

fn log_summary(set: &ScryfallSet, rows: &[models::CardRow]) {
    log::info!("Data Summary:");
    log::info!("  Set: {}", set.name);
    log::info!("  Cards: {}", rows.len());
    if let Some(card) = rows.first() {
        log::info!("  Sample card fields:");
        log::info!("    Name: {}", card.name);
        log::info!("    Mana Cost: {}", card.mana_cost.as_deref().unwrap_or("N/A"));
        log::info!("    Type: {}", card.type_line);
        log::info!("    Rarity: {}", card.rarity);
        log::info!("    Set: {}", card.set_code);
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Importer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Importer(base_url={}, request_interval={:?}, batch_size={}, store={})",
            self.client.base_url(),
            self.client.limiter().interval(),
            self.batch_size,
            if self.store.is_some() { "configured" } else { "none" }
        )
    }
}
