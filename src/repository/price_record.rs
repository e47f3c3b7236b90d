use diesel::prelude::*;

use crate::domain::price_record::{NewPriceRecord, PriceRecord};
use crate::domain::types::ProductName;
use crate::models::price_record::{
    NewPriceRecord as DbNewPriceRecord, PriceRecord as DbPriceRecord,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, PriceHistoryQuery, PriceRecordReader, PriceRecordWriter};

/// Latest row per product. `MAX(id)` follows insertion order, which is the
/// only ordering the table guarantees.
const LATEST_PER_PRODUCT_SQL: &str = "SELECT id, product_name, price, recorded_at \
     FROM price_records \
     WHERE id IN (SELECT MAX(id) FROM price_records GROUP BY product_name) \
     ORDER BY product_name ASC";

impl PriceRecordReader for DieselRepository {
    fn latest_price_record(
        &self,
        product_name: &ProductName,
    ) -> RepositoryResult<Option<PriceRecord>> {
        use crate::schema::price_records;

        let mut conn = self.conn()?;

        let result = price_records::table
            .filter(price_records::product_name.eq(product_name.as_str()))
            .order(price_records::id.desc())
            .first::<DbPriceRecord>(&mut conn)
            .optional()?;

        let result = result.map(TryInto::try_into).transpose()?;
        Ok(result)
    }

    fn list_price_records(
        &self,
        query: PriceHistoryQuery,
    ) -> RepositoryResult<(usize, Vec<PriceRecord>)> {
        use crate::schema::price_records;

        let mut conn = self.conn()?;

        let query_builder = || {
            price_records::table
                .filter(price_records::product_name.eq(query.product_name.as_str()))
                .into_boxed::<diesel::sqlite::Sqlite>()
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items =
            query_builder().order(price_records::id.desc());

        if let Some(pagination) = &query.pagination {
            items = items
                .offset(i64::try_from(pagination.offset()).unwrap_or(i64::MAX))
                .limit(i64::try_from(pagination.per_page).unwrap_or(i64::MAX));
        }

        let items = items
            .load::<DbPriceRecord>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<PriceRecord>, _>>()?;

        Ok((total, items))
    }

    fn list_latest_price_records(&self) -> RepositoryResult<Vec<PriceRecord>> {
        let mut conn = self.conn()?;

        let results = diesel::sql_query(LATEST_PER_PRODUCT_SQL)
            .load::<DbPriceRecord>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<PriceRecord>, _>>()?;

        Ok(results)
    }
}

impl PriceRecordWriter for DieselRepository {
    fn append_price_record(&self, record: &NewPriceRecord) -> RepositoryResult<PriceRecord> {
        use crate::schema::price_records;

        let mut conn = self.conn()?;

        let stored = diesel::insert_into(price_records::table)
            .values(DbNewPriceRecord::from(record))
            .get_result::<DbPriceRecord>(&mut conn)?;

        Ok(stored.try_into()?)
    }
}
