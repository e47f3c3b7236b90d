use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::price_record::{
    NewPriceRecord as DomainNewPriceRecord, PriceRecord as DomainPriceRecord,
};
use crate::domain::types::{Price, ProductName, TypeConstraintError};

/// Diesel model representing a row in the `price_records` table.
#[derive(Debug, Clone, Identifiable, Queryable, QueryableByName)]
#[diesel(table_name = crate::schema::price_records)]
pub struct PriceRecord {
    pub id: i32,
    pub product_name: String,
    pub price: f64,
    pub recorded_at: NaiveDateTime,
}

/// Insertable form of [`PriceRecord`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::price_records)]
pub struct NewPriceRecord<'a> {
    pub product_name: &'a str,
    pub price: f64,
    pub recorded_at: NaiveDateTime,
}

impl TryFrom<PriceRecord> for DomainPriceRecord {
    type Error = TypeConstraintError;

    fn try_from(record: PriceRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id.try_into()?,
            product_name: ProductName::new(record.product_name)?,
            price: Price::new(record.price)?,
            recorded_at: record.recorded_at,
        })
    }
}

impl<'a> From<&'a DomainNewPriceRecord> for NewPriceRecord<'a> {
    fn from(record: &'a DomainNewPriceRecord) -> Self {
        Self {
            product_name: record.product_name.as_str(),
            price: record.price.get(),
            recorded_at: record.recorded_at,
        }
    }
}
