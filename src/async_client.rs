//! Async wrapper around [`Importer`] for use in async runtimes (Tokio, etc.).
//!
//! The pipeline itself is blocking and sequential; this wrapper moves each
//! run onto [`tokio::task::spawn_blocking`] so the event loop stays free.
//!
//! # Example
//!
//! ```no_run
//! use scryfall_import::{AsyncImporter, ImportOptions, Importer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let importer = AsyncImporter::build(Importer::builder().database("cards.duckdb"))
//!         .await
//!         .unwrap();
//!
//!     let result = importer
//!         .import_set("dsk", ImportOptions::default())
//!         .await
//!         .unwrap();
//!     println!("{} cards", result.cards_imported);
//!
//!     importer.close().await.unwrap();
//! }
//! ```

use std::sync::{Arc, Mutex};

use crate::error::{ImportError, Result};
use crate::{ImportOptions, ImportResult, Importer, ImporterBuilder};

/// Async wrapper around [`Importer`].
///
/// The importer sits behind a [`Mutex`], so concurrent calls on one
/// `AsyncImporter` run one after another and share its rate limiter.
#[derive(Clone)]
pub struct AsyncImporter {
    inner: Arc<Mutex<Importer>>,
}

impl AsyncImporter {
    /// Build the importer on the blocking pool (opening the database may
    /// touch the disk).
    pub async fn build(builder: ImporterBuilder) -> Result<Self> {
        tokio::task::spawn_blocking(move || {
            let importer = builder.build()?;
            Ok(AsyncImporter {
                inner: Arc::new(Mutex::new(importer)),
            })
        })
        .await
        .map_err(|e| ImportError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Run an arbitrary operation against the wrapped importer.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Importer) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let importer = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = importer
                .lock()
                .map_err(|_| ImportError::InvalidArgument("Importer lock poisoned".into()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| ImportError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Async form of [`Importer::import_set`].
    pub async fn import_set(&self, set_code: &str, options: ImportOptions) -> Result<ImportResult> {
        let code = set_code.to_string();
        self.run(move |importer| importer.import_set(&code, &options))
            .await
    }

    /// Release this handle on the blocking pool.
    ///
    /// The importer owns a blocking HTTP client, which must not be dropped
    /// on an async worker thread. Call this instead of letting the last
    /// handle fall out of scope inside a runtime.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || drop(self))
            .await
            .map_err(|e| ImportError::InvalidArgument(format!("Task join error: {e}")))
    }
}
