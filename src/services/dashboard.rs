use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::price_record::PriceRecord;
use crate::domain::product::ProductEntry;
use crate::domain::types::{ProductName, TargetPrice};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{PriceHistoryQuery, PriceRecordReader};

use super::{ServiceError, ServiceResult};

/// Number of most recent records drawn on the history chart.
pub const CHART_POINTS: usize = 60;

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 220.0;
const CHART_PADDING: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceStatus {
    /// Latest price is at or below target.
    Deal,
    /// Latest price is still above target.
    Above,
    /// On the watchlist but never recorded.
    Pending,
    /// Recorded in the past but no longer on the watchlist.
    Untracked,
}

/// One row of the overview table.
#[derive(Debug, Clone, Serialize)]
pub struct ProductOverview {
    pub product_name: String,
    pub url: Option<String>,
    pub target_price: Option<f64>,
    pub latest_price: Option<f64>,
    pub checked_at: Option<NaiveDateTime>,
    pub status: PriceStatus,
}

/// Pre-computed SVG geometry for a price line chart.
#[derive(Debug, Clone, Serialize)]
pub struct PriceChart {
    pub width: f64,
    pub height: f64,
    /// `x,y` pairs for an SVG `polyline`, oldest first.
    pub points: String,
    pub min_price: f64,
    pub max_price: f64,
    pub target_y: Option<f64>,
}

/// Everything the history page renders.
#[derive(Debug, Clone, Serialize)]
pub struct ProductHistory {
    pub product_name: String,
    pub url: Option<String>,
    pub target_price: Option<f64>,
    pub records: Paginated<PriceRecord>,
    pub chart: Option<PriceChart>,
}

/// Core business logic for the overview page.
///
/// Lists every watchlist product with its latest recorded price, followed by
/// products that only exist in the history.
pub fn show_overview<R>(products: &[ProductEntry], repo: &R) -> ServiceResult<Vec<ProductOverview>>
where
    R: PriceRecordReader + ?Sized,
{
    let latest = match repo.list_latest_price_records() {
        Ok(records) => records,
        Err(e) => {
            log::error!("Failed to list latest prices: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let mut latest_by_name: HashMap<&str, &PriceRecord> = latest
        .iter()
        .map(|r| (r.product_name.as_str(), r))
        .collect();

    let mut rows = Vec::with_capacity(products.len());
    let mut listed = HashSet::new();

    for product in products {
        listed.insert(product.name.as_str());
        let record = latest_by_name.remove(product.name.as_str());
        let status = match record {
            Some(r) if r.price.is_at_or_below(product.target_price) => PriceStatus::Deal,
            Some(_) => PriceStatus::Above,
            None => PriceStatus::Pending,
        };
        rows.push(ProductOverview {
            product_name: product.name.to_string(),
            url: Some(product.url.to_string()),
            target_price: Some(product.target_price.get()),
            latest_price: record.map(|r| r.price.get()),
            checked_at: record.map(|r| r.recorded_at),
            status,
        });
    }

    rows.extend(
        latest
            .iter()
            .filter(|r| !listed.contains(r.product_name.as_str()))
            .map(|r| ProductOverview {
                product_name: r.product_name.to_string(),
                url: None,
                target_price: None,
                latest_price: Some(r.price.get()),
                checked_at: Some(r.recorded_at),
                status: PriceStatus::Untracked,
            }),
    );

    Ok(rows)
}

/// Core business logic for a product's history page.
///
/// Returns [`ServiceError::NotFound`] when the product has no records.
pub fn show_history<R>(
    product_name: &str,
    page: usize,
    products: &[ProductEntry],
    repo: &R,
) -> ServiceResult<ProductHistory>
where
    R: PriceRecordReader + ?Sized,
{
    let product_name = ProductName::new(product_name).map_err(|_| ServiceError::NotFound)?;
    let entry = products.iter().find(|p| p.name == product_name);

    let (total, items) = match repo.list_price_records(
        PriceHistoryQuery::new(product_name.clone()).paginate(page, DEFAULT_ITEMS_PER_PAGE),
    ) {
        Ok(result) => result,
        Err(e) => {
            log::error!("Failed to list price history for {product_name}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if total == 0 {
        return Err(ServiceError::NotFound);
    }

    let mut recent = match repo
        .list_price_records(PriceHistoryQuery::new(product_name.clone()).paginate(1, CHART_POINTS))
    {
        Ok((_total, items)) => items,
        Err(e) => {
            log::error!("Failed to load chart data for {product_name}: {e}");
            return Err(ServiceError::Internal);
        }
    };
    recent.reverse();

    Ok(ProductHistory {
        product_name: product_name.into_inner(),
        url: entry.map(|p| p.url.to_string()),
        target_price: entry.map(|p| p.target_price.get()),
        records: Paginated::new(items, page, total, DEFAULT_ITEMS_PER_PAGE),
        chart: build_chart(&recent, entry.map(|p| p.target_price)),
    })
}

/// Lay out `records` (oldest first) on a fixed-size canvas.
fn build_chart(records: &[PriceRecord], target: Option<TargetPrice>) -> Option<PriceChart> {
    if records.is_empty() {
        return None;
    }

    let prices: Vec<f64> = records.iter().map(|r| r.price.get()).collect();
    let min_price = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max_price = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let (mut low, mut high) = (min_price, max_price);
    if let Some(target) = target {
        low = low.min(target.get());
        high = high.max(target.get());
    }
    if high - low < f64::EPSILON {
        low -= 1.0;
        high += 1.0;
    }

    let plot_width = CHART_WIDTH - 2.0 * CHART_PADDING;
    let plot_height = CHART_HEIGHT - 2.0 * CHART_PADDING;
    let y_of = |price: f64| CHART_PADDING + (high - price) / (high - low) * plot_height;

    let step = if prices.len() > 1 {
        plot_width / (prices.len() - 1) as f64
    } else {
        0.0
    };
    let x_offset = if prices.len() > 1 {
        CHART_PADDING
    } else {
        CHART_WIDTH / 2.0
    };

    let points = prices
        .iter()
        .enumerate()
        .map(|(i, price)| format!("{:.1},{:.1}", x_offset + step * i as f64, y_of(*price)))
        .collect::<Vec<_>>()
        .join(" ");

    Some(PriceChart {
        width: CHART_WIDTH,
        height: CHART_HEIGHT,
        points,
        min_price,
        max_price,
        target_y: target.map(|t| y_of(t.get())),
    })
}
