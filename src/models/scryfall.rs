use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// ScryfallCard — One printing as returned by /cards/search
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScryfallCard {
    pub id: String,
    pub oracle_id: Option<String>,
    pub name: String,
    pub lang: Option<String>,
    pub released_at: Option<String>,
    pub uri: String,
    pub scryfall_uri: Option<String>,
    pub layout: Option<String>,
    pub image_uris: Option<ImageUris>,
    pub mana_cost: Option<String>,
    pub cmc: f64,
    pub type_line: String,
    pub oracle_text: Option<String>,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub colors: Option<Vec<String>>,
    pub color_identity: Option<Vec<String>>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub legalities: HashMap<String, String>,
    pub set: String,
    pub set_name: Option<String>,
    pub collector_number: Option<String>,
    pub rarity: String,
    #[serde(default)]
    pub prices: Prices,
    #[serde(default)]
    pub related_uris: HashMap<String, String>,
    #[serde(default)]
    pub purchase_uris: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUris {
    pub small: Option<String>,
    pub normal: Option<String>,
    pub large: Option<String>,
    pub png: Option<String>,
    pub art_crop: Option<String>,
    pub border_crop: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Prices {
    pub usd: Option<String>,
    pub usd_foil: Option<String>,
    pub usd_etched: Option<String>,
    pub eur: Option<String>,
    pub eur_foil: Option<String>,
    pub tix: Option<String>,
}

// ---------------------------------------------------------------------------
// ScryfallSet — /sets/{code}
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScryfallSet {
    pub id: String,
    pub code: String,
    pub name: String,
    pub uri: Option<String>,
    pub scryfall_uri: Option<String>,
    pub search_uri: Option<String>,
    pub released_at: Option<String>,
    pub set_type: Option<String>,
    pub card_count: usize,
    #[serde(default)]
    pub digital: bool,
    #[serde(default)]
    pub nonfoil_only: bool,
    #[serde(default)]
    pub foil_only: bool,
    pub icon_svg_uri: Option<String>,
}

// ---------------------------------------------------------------------------
// SearchPage — one page of a paginated list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    pub total_cards: Option<usize>,
    #[serde(default)]
    pub has_more: bool,
    pub next_page: Option<String>,
    #[serde(default)]
    pub data: Vec<ScryfallCard>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Error object returned with any non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScryfallErrorBody {
    pub code: String,
    pub status: u16,
    pub details: String,
    #[serde(default)]
    pub warnings: Vec<String>,
}
