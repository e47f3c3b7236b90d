//! Core library exports for the price tracker.
//!
//! The `data` feature exposes the domain, Diesel models and repositories so
//! other tools can read the price history. The `server` feature adds the page
//! crawler, the notifier, the tracking job and the Actix-web dashboard.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod crawler;
#[cfg(feature = "server")]
pub mod notifier;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod watchlist;

#[cfg(all(test, feature = "server"))]
mod test_support;
