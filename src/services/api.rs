use crate::domain::price_record::PriceRecord;
use crate::domain::types::ProductName;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{PriceHistoryQuery, PriceRecordReader};

use super::{ServiceError, ServiceResult};

/// Latest record of every product, for `GET /api/v1/latest`.
pub fn latest_prices<R>(repo: &R) -> ServiceResult<Vec<PriceRecord>>
where
    R: PriceRecordReader + ?Sized,
{
    match repo.list_latest_price_records() {
        Ok(records) => Ok(records),
        Err(e) => {
            log::error!("Failed to list latest prices: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// One page of a product's history, for `GET /api/v1/prices`.
///
/// An unknown product yields an empty page rather than an error.
pub fn price_history<R>(
    product_name: &str,
    page: usize,
    repo: &R,
) -> ServiceResult<Paginated<PriceRecord>>
where
    R: PriceRecordReader + ?Sized,
{
    let product_name = ProductName::new(product_name)?;

    match repo.list_price_records(
        PriceHistoryQuery::new(product_name).paginate(page, DEFAULT_ITEMS_PER_PAGE),
    ) {
        Ok((total, records)) => Ok(Paginated::new(
            records,
            page,
            total,
            DEFAULT_ITEMS_PER_PAGE,
        )),
        Err(e) => {
            log::error!("Failed to list price history: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Price, PriceRecordId};
    use crate::repository::test::TestRepository;
    use chrono::DateTime;
    use serde_json::Value;

    fn record(id: i32, name: &str, price: f64) -> PriceRecord {
        PriceRecord {
            id: PriceRecordId::new(id).unwrap(),
            product_name: ProductName::new(name).unwrap(),
            price: Price::new(price).unwrap(),
            recorded_at: DateTime::from_timestamp(id as i64 * 60, 0)
                .unwrap()
                .naive_utc(),
        }
    }

    #[test]
    fn history_serializes_as_page() {
        let repo = TestRepository::new(vec![
            record(1, "Kettle", 700.0),
            record(2, "Kettle", 450.0),
            record(3, "Toaster", 900.0),
        ]);

        let page = price_history("Kettle", 1, &repo).unwrap();
        let value: Value = serde_json::to_value(&page).unwrap();

        assert_eq!(value["page"], 1);
        assert_eq!(value["total_items"], 2);
        assert_eq!(value["items"][0]["price"], 450.0);
        assert_eq!(value["items"][0]["product_name"], "Kettle");
    }

    #[test]
    fn huge_page_number_yields_empty_page() {
        let repo = TestRepository::new(vec![record(1, "Kettle", 700.0)]);

        let page = price_history("Kettle", usize::MAX, &repo).unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 1);
        assert_eq!(page.page, usize::MAX);
    }

    #[test]
    fn blank_product_is_rejected() {
        let repo = TestRepository::default();

        assert!(matches!(
            price_history(" ", 1, &repo),
            Err(ServiceError::TypeConstraint(_))
        ));
    }

    #[test]
    fn latest_lists_one_record_per_product() {
        let repo = TestRepository::new(vec![
            record(1, "Kettle", 700.0),
            record(2, "Kettle", 450.0),
            record(3, "Toaster", 900.0),
        ]);

        let latest = latest_prices(&repo).unwrap();

        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].price, 450.0);
    }
}
