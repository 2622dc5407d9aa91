//! Batched, idempotent upload of card rows.
//!
//! Batches run in order, one store call each. The first failing batch stops
//! the upload; batches committed before it stay committed. There is no
//! rollback across batches and no resume point: re-running the whole import
//! is safe because every write is an upsert on `scryfall_id`.

use crate::error::{ImportError, Result};
use crate::models::CardRow;
use crate::store::CardStore;

/// Outcome of a completed upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadSummary {
    pub cards: usize,
    pub batches: usize,
}

/// Upsert `cards` into `store` in consecutive chunks of at most `batch_size`.
///
/// Fails with [`ImportError::Upload`] carrying the 1-based index of the
/// batch that failed. Later batches are not attempted.
pub fn upload_cards<S: CardStore + ?Sized>(
    store: &mut S,
    cards: &[CardRow],
    batch_size: usize,
) -> Result<UploadSummary> {
    if batch_size == 0 {
        return Err(ImportError::InvalidArgument(
            "Batch size must be at least 1".to_string(),
        ));
    }

    let total_batches = cards.len().div_ceil(batch_size);
    log::info!(
        "Uploading {} cards to database in batches of {}...",
        cards.len(),
        batch_size
    );

    for (i, batch) in cards.chunks(batch_size).enumerate() {
        let batch_number = i + 1;
        log::info!(
            "Uploading batch {}/{} ({} cards)...",
            batch_number,
            total_batches,
            batch.len()
        );

        if let Err(e) = store.upsert_cards(batch) {
            log::error!("Error uploading batch {}: {}", batch_number, e);
            return Err(ImportError::Upload {
                batch: batch_number,
                source: Box::new(e),
            });
        }

        log::info!(
            "Batch {}/{} uploaded successfully",
            batch_number,
            total_batches
        );
    }

    log::info!("Successfully uploaded all {} cards to database", cards.len());
    Ok(UploadSummary {
        cards: cards.len(),
        batches: total_batches,
    })
}
