//! Configuration resolution tests.
//!
//! Environment variables are process-global, so every case that touches
//! them lives in a single test.

use scryfall_import::{config, ImportError};
use std::env;
use std::path::{Path, PathBuf};

#[test]
fn database_path_resolution_order() {
    env::remove_var(config::DATABASE_ENV);

    // Explicit path wins over everything.
    env::set_var(config::DATABASE_ENV, "/from/env.duckdb");
    let explicit = config::database_path(Some(Path::new("/explicit.duckdb"))).unwrap();
    assert_eq!(explicit, PathBuf::from("/explicit.duckdb"));

    // Then the env var.
    let from_env = config::database_path(None).unwrap();
    assert_eq!(from_env, PathBuf::from("/from/env.duckdb"));

    // A blank env var is a configuration error.
    env::set_var(config::DATABASE_ENV, "   ");
    let err = config::database_path(None).unwrap_err();
    assert!(matches!(err, ImportError::Configuration(_)));

    // Unset falls back to the platform default when there is one.
    env::remove_var(config::DATABASE_ENV);
    match config::default_database_path() {
        Some(default) => assert_eq!(config::database_path(None).unwrap(), default),
        None => assert!(matches!(
            config::database_path(None),
            Err(ImportError::Configuration(_))
        )),
    }

    env::remove_var(config::API_BASE_ENV);
    assert_eq!(config::api_base(), config::SCRYFALL_API_BASE);
    env::set_var(config::API_BASE_ENV, "http://localhost:9999");
    assert_eq!(config::api_base(), "http://localhost:9999");
    env::remove_var(config::API_BASE_ENV);
}

#[test]
fn default_database_lives_under_app_dir() {
    if let Some(path) = config::default_database_path() {
        assert!(path.ends_with("scryfall-import/cards.duckdb"));
    }
}
