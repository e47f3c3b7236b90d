//! Per-site price selectors and HTML extraction.

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

const AMAZON_SELECTORS: &[&str] = &[
    "#priceblock_ourprice",
    "#priceblock_dealprice",
    "span.a-price > span.a-offscreen",
    ".a-price-whole",
];

const FLIPKART_SELECTORS: &[&str] = &["div.Nx9bqj", "div._30jeq3._16Jk6d", "div._30jeq3"];

const GENERIC_SELECTORS: &[&str] = &[
    "meta[property='product:price:amount']",
    "meta[itemprop='price']",
    "[itemprop='price']",
    ".price",
    "[class*='price']",
];

const CURRENCY_SYMBOLS: &[char] = &['₹', '$'];

/// Storefronts with known price markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    Amazon,
    Flipkart,
    Generic,
}

impl Site {
    /// Pick the selector set from the URL host.
    pub fn detect(url: &str) -> Self {
        let host = Url::parse(url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
            .unwrap_or_default();

        if host.contains("amazon.") {
            Site::Amazon
        } else if host.contains("flipkart.") {
            Site::Flipkart
        } else {
            Site::Generic
        }
    }

    /// Selectors tried in order; the first usable match wins.
    pub fn selectors(self) -> &'static [&'static str] {
        match self {
            Site::Amazon => AMAZON_SELECTORS,
            Site::Flipkart => FLIPKART_SELECTORS,
            Site::Generic => GENERIC_SELECTORS,
        }
    }
}

/// Find the raw price text on a product page.
///
/// Falls back to the first amount following a currency symbol anywhere in
/// the document when none of the site's selectors match.
pub fn extract_price_text(html: &str, site: Site) -> Option<String> {
    let document = Html::parse_document(html);

    for raw in site.selectors() {
        let Ok(selector) = Selector::parse(raw) else {
            log::warn!("Skipping invalid selector {raw}");
            continue;
        };
        if let Some(text) = document.select(&selector).find_map(element_price_text) {
            return Some(text);
        }
    }

    currency_amount_in_text(&document)
}

fn element_price_text(element: ElementRef<'_>) -> Option<String> {
    let text = if element.value().name() == "meta" {
        element.value().attr("content")?.trim().to_string()
    } else {
        element.text().collect::<Vec<_>>().join(" ")
    };
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    text.chars().any(|c| c.is_ascii_digit()).then_some(text)
}

fn currency_amount_in_text(document: &Html) -> Option<String> {
    let text = document.root_element().text().collect::<Vec<_>>().join(" ");

    text.char_indices()
        .filter(|(_, c)| CURRENCY_SYMBOLS.contains(c))
        .find_map(|(idx, symbol)| {
            let amount: String = text[idx + symbol.len_utf8()..]
                .trim_start()
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
                .collect();
            amount
                .chars()
                .any(|c| c.is_ascii_digit())
                .then(|| format!("{symbol}{amount}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_site_from_host() {
        assert_eq!(Site::detect("https://www.amazon.in/dp/B0C1234"), Site::Amazon);
        assert_eq!(
            Site::detect("https://www.flipkart.com/realme/p/itm906a3c913a97f"),
            Site::Flipkart
        );
        assert_eq!(Site::detect("https://shop.example.com/item/1"), Site::Generic);
        assert_eq!(Site::detect("not a url"), Site::Generic);
    }

    #[test]
    fn amazon_prefers_offscreen_price() {
        let html = r#"<html><body>
            <span id="productTitle">Kettle</span>
            <span class="a-price"><span class="a-offscreen">₹1,499.00</span></span>
            <span class="a-price-whole">1,499.</span>
        </body></html>"#;

        assert_eq!(
            extract_price_text(html, Site::Amazon).as_deref(),
            Some("₹1,499.00")
        );
    }

    #[test]
    fn flipkart_uses_current_class_names() {
        let html = r#"<div class="VU-ZEz">Narzo 60x</div><div class="Nx9bqj CxhGGd">₹12,999</div>"#;

        assert_eq!(
            extract_price_text(html, Site::Flipkart).as_deref(),
            Some("₹12,999")
        );
    }

    #[test]
    fn generic_reads_meta_content() {
        let html = r#"<html><head>
            <meta property="product:price:amount" content="349.50">
        </head><body><div class="price">Price details</div></body></html>"#;

        assert_eq!(
            extract_price_text(html, Site::Generic).as_deref(),
            Some("349.50")
        );
    }

    #[test]
    fn skips_matches_without_digits() {
        let html = r#"<div class="price-label">Price</div><div class="price-value">$ 89.99</div>"#;

        assert_eq!(
            extract_price_text(html, Site::Generic).as_deref(),
            Some("$ 89.99")
        );
    }

    #[test]
    fn falls_back_to_currency_in_text() {
        let html = "<html><body><p>Deal of the day: only ₹ 2,499 today</p></body></html>";

        assert_eq!(
            extract_price_text(html, Site::Flipkart).as_deref(),
            Some("₹2,499")
        );
    }

    #[test]
    fn missing_price_yields_none() {
        let html = "<html><body><h1>Robot check</h1></body></html>";

        assert_eq!(extract_price_text(html, Site::Amazon), None);
    }
}
