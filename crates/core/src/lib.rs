//! Marketplace Core - Catalog types and product-detail enrichment.
//!
//! This crate provides the pieces shared by the marketplace components:
//! - `marketplace-api` - HTTP API over the catalog
//! - `marketplace-cli` - Command-line tools for seeding and inspecting data
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no file
//! access, no HTTP. Enrichment reads the clock only through
//! [`enrich::enrich_product`]; [`enrich::enrich_product_at`] takes it as an
//! argument.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and statuses
//! - [`catalog`] - Categories, products and lookup shapes
//! - [`pagination`] - Paged result envelope
//! - [`detail`] - The enriched product page view model
//! - [`enrich`] - Seeded generator and the enrichment engine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod detail;
pub mod enrich;
pub mod pagination;
pub mod types;

pub use types::*;
