//! Fetching product pages and pulling the current price out of them.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use thiserror::Error;

use crate::domain::types::ProductUrl;
use crate::models::config::FetchConfig;

pub mod price;
pub mod site;

use site::{Site, extract_price_text};

/// Why a product page did not yield price text.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure, timeout or unreadable body.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The storefront answered, but not with the page (blocked, gone, ...).
    #[error("blocked ({0})")]
    Status(reqwest::StatusCode),
    /// The page loaded but no price element was found.
    #[error("price element not found")]
    PriceNotFound,
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Source of raw price text for a product URL.
pub trait PageFetcher {
    fn fetch_price_text(&self, url: &ProductUrl) -> FetchResult<String>;
}

/// [`PageFetcher`] that downloads the page over HTTP with browser-like
/// headers and applies the site's selectors.
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(config: &FetchConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .default_headers(default_headers())
            .build()?;
        Ok(Self { client })
    }

    fn fetch_html(&self, url: &ProductUrl) -> FetchResult<String> {
        let response = self.client.get(url.as_str()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.text()?)
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers
}

impl PageFetcher for HttpPageFetcher {
    fn fetch_price_text(&self, url: &ProductUrl) -> FetchResult<String> {
        let html = self.fetch_html(url)?;
        let site = Site::detect(url.as_str());
        log::debug!("Extracting price from {url} as {site:?}");
        extract_price_text(&html, site).ok_or(FetchError::PriceNotFound)
    }
}
