//! Domain entities and value objects, independent of persistence and HTTP.

pub mod alert;
pub mod price_record;
pub mod product;
pub mod types;
