//! Loading the product watchlist from CSV.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::product::ProductEntry;
use crate::domain::types::{ProductName, ProductUrl, TargetPrice, TypeConstraintError};

const REQUIRED_HEADERS: [&str; 3] = ["product_name", "url", "target_price"];

#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error("failed to open watchlist: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read watchlist: {0}")]
    Csv(#[from] csv::Error),
    #[error("watchlist is missing the {0} column")]
    MissingColumn(&'static str),
}

#[derive(Debug, Deserialize)]
struct CsvProductRow {
    product_name: String,
    url: String,
    target_price: f64,
}

impl TryFrom<CsvProductRow> for ProductEntry {
    type Error = TypeConstraintError;

    fn try_from(row: CsvProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            name: ProductName::new(row.product_name)?,
            url: ProductUrl::new(row.url)?,
            target_price: TargetPrice::new(row.target_price)?,
        })
    }
}

/// Read the watchlist file at `path`.
pub fn load_watchlist(path: impl AsRef<Path>) -> Result<Vec<ProductEntry>, WatchlistError> {
    let file = File::open(path.as_ref())?;
    read_watchlist(file)
}

/// Parse watchlist rows from any reader.
///
/// Rows that fail validation, and repeated product names, are skipped with a
/// warning so one bad line does not stop the whole run.
pub fn read_watchlist<R: Read>(reader: R) -> Result<Vec<ProductEntry>, WatchlistError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for required in REQUIRED_HEADERS {
        if !headers.iter().any(|h| h == required) {
            return Err(WatchlistError::MissingColumn(required));
        }
    }

    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for (index, result) in rdr.deserialize::<CsvProductRow>().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let row = match result {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                log::warn!("Skipping watchlist line {line}: {e}");
                continue;
            }
        };

        let entry = match ProductEntry::try_from(row) {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping watchlist line {line}: {e}");
                continue;
            }
        };

        if !seen.insert(entry.name.clone()) {
            log::warn!(
                "Skipping watchlist line {line}: duplicate product {}",
                entry.name
            );
            continue;
        }

        entries.push(entry);
    }

    Ok(entries)
}
