//! Blocking Scryfall catalog client.
//!
//! Every request goes through the client's own [`RateLimiter`]. Card search
//! results are exposed page by page through [`CardPages`], so a caller can
//! stream a set instead of buffering it.

use crate::config;
use crate::error::{ImportError, Result};
use crate::models::{ScryfallCard, ScryfallErrorBody, ScryfallSet, SearchPage};
use crate::rate_limit::RateLimiter;
use reqwest::blocking::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::cell::OnceCell;
use std::iter::FusedIterator;
use std::time::Duration;

/// Fetches set metadata and card search pages from the catalog API.
pub struct CatalogClient {
    base_url: String,
    timeout: Duration,
    limiter: RateLimiter,
    client: OnceCell<Client>,
}

impl CatalogClient {
    /// Create a client against `base_url` (no trailing slash needed).
    pub fn new(base_url: &str, request_interval: Duration, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            limiter: RateLimiter::new(request_interval),
            client: OnceCell::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Lazy HTTP client, created on first use.
    fn client(&self) -> Result<&Client> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(config::USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(self.client.get_or_init(|| client))
    }

    /// Fetch metadata for one set from `/sets/{code}`.
    pub fn fetch_set_metadata(&self, set_code: &str) -> Result<ScryfallSet> {
        let code = checked_set_code(set_code)?;
        let url = self.endpoint(&["sets", code])?;
        self.get_json(url.as_str())
    }

    /// Lazily paginate `set:{code}` in set order, one request per page.
    ///
    /// Each call starts a fresh walk from the first page.
    pub fn card_pages(&self, set_code: &str) -> Result<CardPages<'_>> {
        let code = checked_set_code(set_code)?;
        let mut url = self.endpoint(&["cards", "search"])?;
        url.query_pairs_mut()
            .append_pair("q", &format!("set:{}", code))
            .append_pair("unique", "prints")
            .append_pair("order", "set");

        Ok(CardPages {
            client: self,
            set_code: code.to_string(),
            next: Some(url.to_string()),
            fetched: 0,
        })
    }

    /// Fetch every printing in a set, following `next_page` until absent.
    ///
    /// Any page failure discards what was fetched so far.
    pub fn search_cards_in_set(&self, set_code: &str) -> Result<Vec<ScryfallCard>> {
        let mut cards = Vec::new();
        for page in self.card_pages(set_code)? {
            cards.extend(page?.data);
        }
        log::info!(
            "Successfully fetched {} cards from set {}",
            cards.len(),
            set_code
        );
        Ok(cards)
    }

    /// `base_url` with `segments` appended as escaped path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ImportError::InvalidArgument(format!("Invalid API base URL {}: {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| invalid_base(&self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Rate-limited GET, decoding either the payload or the API error body.
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let client = self.client()?;
        self.limiter.acquire();
        log::debug!("GET {}", url);

        let resp = client.get(url).send()?;
        let status = resp.status();
        let body = resp.text()?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ScryfallErrorBody>(&body) {
                Ok(err) => ImportError::Catalog {
                    code: err.code,
                    status: err.status,
                    details: err.details,
                },
                Err(_) => ImportError::Catalog {
                    code: "unknown".to_string(),
                    status: status.as_u16(),
                    details: body,
                },
            });
        }

        serde_json::from_str(&body).map_err(|e| ImportError::Catalog {
            code: "malformed_response".to_string(),
            status: status.as_u16(),
            details: e.to_string(),
        })
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new(
            config::SCRYFALL_API_BASE,
            config::REQUEST_DELAY,
            config::DEFAULT_TIMEOUT,
        )
    }
}

fn invalid_base(base_url: &str) -> ImportError {
    ImportError::InvalidArgument(format!("API base URL cannot take a path: {}", base_url))
}

/// Trim a set code, rejecting empty codes.
pub(crate) fn checked_set_code(set_code: &str) -> Result<&str> {
    let code = set_code.trim();
    if code.is_empty() {
        return Err(ImportError::InvalidArgument(
            "Set code must not be empty".to_string(),
        ));
    }
    Ok(code)
}

// ---------------------------------------------------------------------------
// CardPages
// ---------------------------------------------------------------------------

/// Iterator over the search pages of one set.
///
/// Yields each page as it is fetched. Ends after the first page without a
/// `next_page` link, or right after yielding an error.
pub struct CardPages<'a> {
    client: &'a CatalogClient,
    set_code: String,
    next: Option<String>,
    fetched: usize,
}

impl CardPages<'_> {
    /// Number of cards yielded so far.
    pub fn fetched(&self) -> usize {
        self.fetched
    }
}

impl Iterator for CardPages<'_> {
    type Item = Result<SearchPage>;

    fn next(&mut self) -> Option<Self::Item> {
        let url = self.next.take()?;
        let page: SearchPage = match self.client.get_json(&url) {
            Ok(page) => page,
            Err(e) => return Some(Err(e)),
        };

        self.fetched += page.data.len();
        if page.has_more {
            log::info!(
                "Fetched {}/{} cards from {}...",
                self.fetched,
                page.total_cards
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "?".to_string()),
                self.set_code
            );
        }
        self.next = page.next_page.clone();
        Some(Ok(page))
    }
}

impl FusedIterator for CardPages<'_> {}
