#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The catalog API answered with a non-success status or a body that
    /// could not be decoded. `code` and `details` are the API's own.
    #[error("Scryfall API error: {details} ({code}, HTTP {status})")]
    Catalog {
        code: String,
        status: u16,
        details: String,
    },

    /// A store batch failed to commit. `batch` is 1-based.
    #[error("Failed to upload cards batch {batch}: {source}")]
    Upload {
        batch: usize,
        #[source]
        source: Box<ImportError>,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ImportError {
    /// Index of the failed batch when this is an upload failure.
    pub fn failed_batch(&self) -> Option<usize> {
        match self {
            ImportError::Upload { batch, .. } => Some(*batch),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
