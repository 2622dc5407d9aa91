use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ImportError, Result};

pub const SCRYFALL_API_BASE: &str = "https://api.scryfall.com";
pub const USER_AGENT: &str = "MTG-Deck-Builder-Assistant/1.0";

/// Scryfall asks for 50-100ms between requests.
pub const REQUEST_DELAY: Duration = Duration::from_millis(100);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_BATCH_SIZE: usize = 1000;
pub const SAMPLE_SIZE: usize = 5;
pub const DEFAULT_OUTPUT_DIR: &str = "./data";

pub const DATABASE_ENV: &str = "SCRYFALL_IMPORT_DATABASE";
pub const API_BASE_ENV: &str = "SCRYFALL_API_BASE";

pub fn default_database_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("scryfall-import").join("cards.duckdb"))
}

/// Resolve where the card store lives.
///
/// Order: the explicit path, then `SCRYFALL_IMPORT_DATABASE`, then the
/// platform data directory. A set-but-blank env var is treated as a
/// misconfiguration rather than silently skipped.
pub fn database_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    match env::var(DATABASE_ENV) {
        Ok(value) if value.trim().is_empty() => Err(ImportError::Configuration(format!(
            "{} is set but empty",
            DATABASE_ENV
        ))),
        Ok(value) => Ok(PathBuf::from(value)),
        Err(_) => default_database_path().ok_or_else(|| {
            ImportError::Configuration(format!(
                "No database path given. Pass --database or set {}",
                DATABASE_ENV
            ))
        }),
    }
}

/// API base URL, overridable through `SCRYFALL_API_BASE`.
pub fn api_base() -> String {
    env::var(API_BASE_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| SCRYFALL_API_BASE.to_string())
}
