//! Shared test fixtures for the importer integration tests.
//!
//! Provides Scryfall-shaped JSON builders, wiremock helpers that serve a set
//! and its paginated search results, and a `RecordingStore` that captures
//! every upsert call.

#![allow(dead_code)]

use scryfall_import::models::CardRow;
use scryfall_import::{CardStore, CatalogClient, ImportError};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ---------------------------------------------------------------------------
// JSON builders
// ---------------------------------------------------------------------------

/// A fully populated card in set `set_code`.
pub fn card_json(set_code: &str, number: usize) -> Value {
    let id = card_id(set_code, number);
    json!({
        "object": "card",
        "id": id,
        "oracle_id": format!("oracle-{}", id),
        "multiverse_ids": [],
        "name": format!("Test Card {}", number),
        "lang": "en",
        "released_at": "2024-09-27",
        "uri": format!("https://api.scryfall.com/cards/{}", id),
        "scryfall_uri": format!("https://scryfall.com/card/{}/{}", set_code, number),
        "layout": "normal",
        "highres_image": true,
        "image_uris": {
            "small": "https://cards.scryfall.io/small/front.jpg",
            "normal": "https://cards.scryfall.io/normal/front.jpg",
            "large": "https://cards.scryfall.io/large/front.jpg",
            "png": "https://cards.scryfall.io/png/front.png",
            "art_crop": "https://cards.scryfall.io/art_crop/front.jpg",
            "border_crop": "https://cards.scryfall.io/border_crop/front.jpg"
        },
        "mana_cost": "{1}{R}",
        "cmc": 2.0,
        "type_line": "Creature \u{2014} Goblin",
        "oracle_text": "Haste",
        "power": "2",
        "toughness": "1",
        "colors": ["R"],
        "color_identity": ["R"],
        "keywords": ["Haste"],
        "legalities": {"standard": "legal", "vintage": "legal"},
        "games": ["paper", "arena"],
        "set": set_code,
        "set_name": "Test Set",
        "collector_number": number.to_string(),
        "rarity": "common",
        "prices": {"usd": "0.10", "eur": "0.08"},
        "related_uris": {"gatherer": "https://gatherer.wizards.com/"},
        "purchase_uris": {"cardmarket": "https://www.cardmarket.com/"}
    })
}

/// A basic land: no mana cost, power, toughness or keywords.
pub fn land_json(set_code: &str, number: usize) -> Value {
    let id = card_id(set_code, number);
    json!({
        "id": id,
        "name": "Mountain",
        "uri": format!("https://api.scryfall.com/cards/{}", id),
        "mana_cost": "",
        "cmc": 0.0,
        "type_line": "Basic Land \u{2014} Mountain",
        "colors": [],
        "color_identity": ["R"],
        "keywords": [],
        "set": set_code,
        "collector_number": number.to_string(),
        "rarity": "common"
    })
}

pub fn card_id(set_code: &str, number: usize) -> String {
    format!("{}-{:05}", set_code, number)
}

pub fn cards_json(set_code: &str, range: std::ops::Range<usize>) -> Vec<Value> {
    range.map(|n| card_json(set_code, n)).collect()
}

pub fn set_json(set_code: &str, card_count: usize) -> Value {
    json!({
        "object": "set",
        "id": format!("set-{}", set_code),
        "code": set_code,
        "name": format!("Test Set {}", set_code.to_uppercase()),
        "uri": format!("https://api.scryfall.com/sets/{}", set_code),
        "scryfall_uri": format!("https://scryfall.com/sets/{}", set_code),
        "search_uri": format!("https://api.scryfall.com/cards/search?q=set:{}", set_code),
        "released_at": "2024-09-27",
        "set_type": "expansion",
        "card_count": card_count,
        "digital": false,
        "nonfoil_only": false,
        "foil_only": false,
        "icon_svg_uri": "https://svgs.scryfall.io/sets/test.svg"
    })
}

pub fn error_json(code: &str, status: u16, details: &str) -> Value {
    json!({
        "object": "error",
        "code": code,
        "status": status,
        "details": details
    })
}

// ---------------------------------------------------------------------------
// Mock server helpers
// ---------------------------------------------------------------------------

/// Serve `/sets/{code}`, expecting exactly `expected_calls` requests.
pub async fn mount_set(server: &MockServer, set_code: &str, card_count: usize, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/sets/{}", set_code)))
        .respond_with(ResponseTemplate::new(200).set_body_json(set_json(set_code, card_count)))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Serve the search for `set:{code}` as the given pages, linked through
/// `next_page`. Page `i` (1-based) is requested exactly `expected_calls` times.
pub async fn mount_pages(
    server: &MockServer,
    set_code: &str,
    pages: Vec<Vec<Value>>,
    expected_calls: u64,
) {
    let total: usize = pages.iter().map(Vec::len).sum();
    let page_count = pages.len();

    for (i, data) in pages.into_iter().enumerate() {
        let page_number = i + 1;
        let next_page = (page_number < page_count).then(|| page_url(server, set_code, page_number + 1));

        let body = json!({
            "object": "list",
            "total_cards": total,
            "has_more": next_page.is_some(),
            "next_page": next_page,
            "data": data
        });

        let mock = Mock::given(method("GET"))
            .and(path("/cards/search"))
            .and(query_param("q", format!("set:{}", set_code)));
        let mock = if page_number == 1 {
            mock.and(query_param("unique", "prints"))
                .and(query_param("order", "set"))
                .and(query_param_is_missing("page"))
        } else {
            mock.and(query_param("page", page_number.to_string()))
        };

        mock.respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(expected_calls)
            .mount(server)
            .await;
    }
}

/// Run blocking client code off the async test runtime.
pub async fn blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}

pub fn client_for(server_uri: &str) -> CatalogClient {
    CatalogClient::new(server_uri, Duration::ZERO, Duration::from_secs(5))
}

/// Absolute URL of search page `n`, as Scryfall would put in `next_page`.
pub fn page_url(server: &MockServer, set_code: &str, n: usize) -> String {
    format!(
        "{}/cards/search?q=set%3A{}&unique=prints&order=set&page={}",
        server.uri(),
        set_code,
        n
    )
}

// ---------------------------------------------------------------------------
// Rows and stores
// ---------------------------------------------------------------------------

pub fn card_row(n: usize) -> CardRow {
    CardRow {
        scryfall_id: card_id("tst", n),
        name: format!("Row {}", n),
        mana_cost: Some("{U}".to_string()),
        cmc: 1.0,
        type_line: "Instant".to_string(),
        colors: Some(vec!["U".to_string()]),
        color_identity: Some(vec!["U".to_string()]),
        power: None,
        toughness: None,
        rarity: "uncommon".to_string(),
        set_code: "tst".to_string(),
        collector_number: Some(n.to_string()),
        keywords: String::new(),
        image_uris: None,
        card_object_uri: format!("https://api.scryfall.com/cards/{}", card_id("tst", n)),
        scryfall_uri: None,
    }
}

pub fn card_rows(count: usize) -> Vec<CardRow> {
    (0..count).map(card_row).collect()
}

/// `CardStore` that records the ids of every batch it receives and can be
/// told to fail on the n-th call (1-based).
#[derive(Clone, Default)]
pub struct RecordingStore {
    pub calls: Arc<Mutex<Vec<Vec<String>>>>,
    pub fail_on_call: Option<usize>,
}

impl RecordingStore {
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::default()
        }
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.calls.lock().unwrap().iter().map(Vec::len).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl CardStore for RecordingStore {
    fn upsert_cards(&mut self, batch: &[CardRow]) -> scryfall_import::Result<usize> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(batch.iter().map(|c| c.scryfall_id.clone()).collect());
        if self.fail_on_call == Some(calls.len()) {
            return Err(ImportError::InvalidArgument(
                "simulated store failure".to_string(),
            ));
        }
        Ok(batch.len())
    }
}
