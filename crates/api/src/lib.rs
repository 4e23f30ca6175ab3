//! Marketplace API - HTTP service for the product catalog.
//!
//! Products and categories are stored in a single JSON file and served over
//! a REST interface under `/api/v1`. The enriched product page is generated
//! on every request by [`marketplace_core::enrich`].
//!
//! The library half exists so the CLI and the integration tests can reuse the
//! store, the services and the router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;

pub use app::build_app;
pub use config::ApiConfig;
pub use state::AppState;
