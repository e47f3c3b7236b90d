use crate::db::{DbConnection, DbPool};
use crate::domain::price_record::{NewPriceRecord, PriceRecord};
use crate::domain::types::ProductName;
use crate::pagination::Pagination;

pub mod errors;
pub mod price_record;

use errors::RepositoryResult;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be shared between the job and HTTP handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing a product's price history.
#[derive(Debug, Clone)]
pub struct PriceHistoryQuery {
    /// Product whose records are listed.
    pub product_name: ProductName,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl PriceHistoryQuery {
    pub fn new(product_name: ProductName) -> Self {
        Self {
            product_name,
            pagination: None,
        }
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations over the price history.
pub trait PriceRecordReader {
    /// Last inserted record for a product, if it was ever observed.
    fn latest_price_record(&self, product_name: &ProductName)
    -> RepositoryResult<Option<PriceRecord>>;
    /// Records of one product, last inserted first, with the unpaginated total.
    fn list_price_records(
        &self,
        query: PriceHistoryQuery,
    ) -> RepositoryResult<(usize, Vec<PriceRecord>)>;
    /// The last inserted record of every product, ordered by product name.
    fn list_latest_price_records(&self) -> RepositoryResult<Vec<PriceRecord>>;
}

/// Append-only writes to the price history.
pub trait PriceRecordWriter {
    /// Persist a new observation and return the stored record.
    fn append_price_record(&self, record: &NewPriceRecord) -> RepositoryResult<PriceRecord>;
}
