//! JSON dumps of transformed cards for inspection.
//!
//! Files are written next to their destination with a `.tmp` suffix and
//! renamed on success, so an interrupted write never leaves a partial dump.

use crate::client::checked_set_code;
use crate::config;
use crate::error::{ImportError, Result};
use crate::models::CardRow;
use chrono::{SecondsFormat, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DumpMetadata<'a> {
    set_code: &'a str,
    card_count: usize,
    exported_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SampleDump<'a> {
    metadata: DumpMetadata<'a>,
    cards: &'a [CardRow],
    sample: bool,
    full_data_message: String,
}

#[derive(Debug, Serialize)]
struct CompleteDump<'a> {
    metadata: DumpMetadata<'a>,
    cards: &'a [CardRow],
}

/// Write the first few cards plus set-wide metadata to
/// `{set}-cards-{date}.json` under `output_dir`.
pub fn save_sample(cards: &[CardRow], set_code: &str, output_dir: &Path) -> Result<PathBuf> {
    let set_code = file_set_code(set_code)?;
    let path = output_dir.join(format!("{}-cards-{}.json", set_code, today()));
    let sample = &cards[..cards.len().min(config::SAMPLE_SIZE)];

    let dump = SampleDump {
        metadata: metadata(set_code, cards.len()),
        cards: sample,
        sample: true,
        full_data_message: format!(
            "This file contains a sample of {} cards. Full dataset has {} cards.",
            config::SAMPLE_SIZE,
            cards.len()
        ),
    };

    write_atomic(&path, serde_json::to_vec_pretty(&dump)?.as_slice())?;
    log::info!("Sample data saved to: {}", path.display());
    Ok(path)
}

/// Write every card to `{set}-cards-complete-{date}.json`, or `.json.gz`
/// when `gzip` is set.
pub fn save_complete(
    cards: &[CardRow],
    set_code: &str,
    output_dir: &Path,
    gzip: bool,
) -> Result<PathBuf> {
    let set_code = file_set_code(set_code)?;
    let ext = if gzip { "json.gz" } else { "json" };
    let path = output_dir.join(format!("{}-cards-complete-{}.{}", set_code, today(), ext));

    let dump = CompleteDump {
        metadata: metadata(set_code, cards.len()),
        cards,
    };
    let json = serde_json::to_vec_pretty(&dump)?;

    let bytes = if gzip {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&json)?;
        encoder.finish()?
    } else {
        json
    };

    write_atomic(&path, &bytes)?;
    log::info!("Complete data saved to: {}", path.display());
    log::info!(
        "File size: {:.2} MB",
        bytes.len() as f64 / 1024.0 / 1024.0
    );
    Ok(path)
}

/// Trimmed set code, restricted to characters safe in a file name.
fn file_set_code(set_code: &str) -> Result<&str> {
    let code = checked_set_code(set_code)?;
    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ImportError::InvalidArgument(format!(
            "Set code is not usable in a file name: {:?}",
            code
        )));
    }
    Ok(code)
}

fn metadata(set_code: &str, card_count: usize) -> DumpMetadata<'_> {
    DumpMetadata {
        set_code,
        card_count,
        exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

fn write_atomic(dest: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = dest.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_dest = PathBuf::from(tmp_name);

    let result = fs::write(&tmp_dest, bytes).and_then(|_| fs::rename(&tmp_dest, dest));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_dest);
    }
    result.map_err(Into::into)
}
