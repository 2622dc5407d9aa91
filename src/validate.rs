//! Card-count validation against the set's declared size.

use crate::client::CatalogClient;
use crate::error::Result;
use crate::models::ScryfallCard;

/// True iff the declared count equals the fetched count.
pub fn counts_match(declared: usize, fetched: usize) -> bool {
    declared == fetched
}

/// Re-fetch the set metadata and compare its `card_count` with `fetched`.
///
/// A mismatch is logged and reported as `false`; only the metadata request
/// itself can fail.
pub fn validate_set_import(
    client: &CatalogClient,
    set_code: &str,
    fetched: &[ScryfallCard],
) -> Result<bool> {
    let expected = client.fetch_set_metadata(set_code)?.card_count;
    let actual = fetched.len();

    if !counts_match(expected, actual) {
        log::warn!(
            "Card count mismatch for set {}: expected {}, got {}",
            set_code,
            expected,
            actual
        );
        return Ok(false);
    }

    log::info!(
        "Set {} validation passed: {}/{} cards",
        set_code,
        actual,
        expected
    );
    Ok(true)
}
