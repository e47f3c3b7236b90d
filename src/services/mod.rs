mod errors;

pub use errors::{ServiceError, ServiceResult};

pub mod api;
pub mod dashboard;
pub mod tracking;
