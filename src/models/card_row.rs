use serde::{Deserialize, Serialize};

use super::scryfall::ImageUris;

// ---------------------------------------------------------------------------
// CardRow — Insert shape of the `cards` table
// ---------------------------------------------------------------------------

/// One row of the `cards` table as written by the importer.
///
/// `scryfall_id` is the conflict key: re-importing a printing updates the
/// existing row. The store-managed `id`, `created_at` and `updated_at`
/// columns are not part of the insert shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRow {
    pub scryfall_id: String,
    pub name: String,
    pub mana_cost: Option<String>,
    pub cmc: f64,
    pub type_line: String,
    pub colors: Option<Vec<String>>,
    pub color_identity: Option<Vec<String>>,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub rarity: String,
    pub set_code: String,
    pub collector_number: Option<String>,
    /// Comma-and-space joined, empty when the card has no keywords.
    pub keywords: String,
    pub image_uris: Option<ImageUris>,
    pub card_object_uri: String,
    pub scryfall_uri: Option<String>,
}
