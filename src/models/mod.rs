//! Diesel row models and runtime configuration.

#[cfg(feature = "server")]
pub mod config;
pub mod price_record;
