use chrono::Utc;
use serde::Serialize;

use crate::crawler::PageFetcher;
use crate::crawler::price::parse_price;
use crate::domain::alert::PriceAlert;
use crate::domain::price_record::NewPriceRecord;
use crate::domain::product::ProductEntry;
use crate::notifier::Notifier;
use crate::repository::PriceRecordWriter;

use super::{ServiceError, ServiceResult};

/// A product left out of the current run and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedProduct {
    pub product_name: String,
    pub reason: String,
}

/// Outcome of one pass over the watchlist.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrackingReport {
    pub checked: usize,
    pub recorded: usize,
    pub alerts_sent: usize,
    pub alert_failures: usize,
    pub skipped: Vec<SkippedProduct>,
}

impl TrackingReport {
    fn skip(&mut self, product: &ProductEntry, reason: impl Into<String>) {
        self.skipped.push(SkippedProduct {
            product_name: product.name.to_string(),
            reason: reason.into(),
        });
    }
}

/// Run one tracking pass: fetch, parse, record and, when the price is at or
/// below target, notify, for every product in order.
///
/// Fetch and parse failures only skip the affected product. A failed
/// notification is logged and counted; the price is recorded before the
/// notification is attempted. A storage failure aborts the pass with
/// [`ServiceError::Internal`].
pub fn run_tracking_job<R, F, N>(
    products: &[ProductEntry],
    repo: &R,
    fetcher: &F,
    notifier: &N,
) -> ServiceResult<TrackingReport>
where
    R: PriceRecordWriter + ?Sized,
    F: PageFetcher + ?Sized,
    N: Notifier + ?Sized,
{
    let mut report = TrackingReport::default();

    for product in products {
        report.checked += 1;
        log::info!("Checking {} ({})", product.name, product.url);

        let text = match fetcher.fetch_price_text(&product.url) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Fetch failed for {}: {e}", product.name);
                report.skip(product, format!("fetch: {e}"));
                continue;
            }
        };

        let price = match parse_price(&text) {
            Ok(price) => price,
            Err(e) => {
                log::warn!("Could not parse price for {}: {e}", product.name);
                report.skip(product, format!("parse: {e}"));
                continue;
            }
        };

        let record = NewPriceRecord::new(product.name.clone(), price, Utc::now().naive_utc());
        if let Err(e) = repo.append_price_record(&record) {
            log::error!("Failed to record price for {}: {e}", product.name);
            return Err(ServiceError::Internal);
        }
        report.recorded += 1;
        log::info!(
            "{}: {price} (target {})",
            product.name,
            product.target_price
        );

        let Some(alert) = PriceAlert::check(product, price) else {
            continue;
        };

        match notifier.send(&alert.message()) {
            Ok(()) => {
                log::info!("Sent price alert for {}", product.name);
                report.alerts_sent += 1;
            }
            Err(e) => {
                log::error!("Failed to send price alert for {}: {e}", product.name);
                report.alert_failures += 1;
            }
        }
    }

    log::info!(
        "Tracking run finished: {} checked, {} recorded, {} alerts sent, {} alert failures, {} skipped",
        report.checked,
        report.recorded,
        report.alerts_sent,
        report.alert_failures,
        report.skipped.len()
    );

    Ok(report)
}
