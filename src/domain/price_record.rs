use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Price, PriceRecordId, ProductName};

/// One timestamped observation of a product's price.
///
/// Records are append-only: once stored they are never updated or removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceRecord {
    pub id: PriceRecordId,
    pub product_name: ProductName,
    pub price: Price,
    pub recorded_at: NaiveDateTime,
}

/// Data required to append a new [`PriceRecord`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPriceRecord {
    pub product_name: ProductName,
    pub price: Price,
    pub recorded_at: NaiveDateTime,
}

impl NewPriceRecord {
    pub fn new(product_name: ProductName, price: Price, recorded_at: NaiveDateTime) -> Self {
        Self {
            product_name,
            price,
            recorded_at,
        }
    }
}
