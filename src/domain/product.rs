use serde::{Deserialize, Serialize};

use crate::domain::types::{ProductName, ProductUrl, TargetPrice};

/// A product on the watchlist.
///
/// Entries are read from the external product list once per job run and are
/// never modified by the tracker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductEntry {
    pub name: ProductName,
    pub url: ProductUrl,
    pub target_price: TargetPrice,
}
