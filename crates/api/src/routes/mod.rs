//! HTTP route handlers for the catalog API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                          - Liveness with app info
//! GET    /health/ready                    - Readiness (data file readable)
//!
//! # Products
//! GET    /api/v1/products                 - Paginated listing (?count&page&name&categoryId)
//! POST   /api/v1/products                 - Create
//! GET    /api/v1/products/{id}            - Basic detail
//! PUT    /api/v1/products/{id}            - Update
//! DELETE /api/v1/products/{id}            - Delete
//! GET    /api/v1/products/{id}/detail     - Enriched marketplace detail
//! GET    /api/v1/products/{id}/related    - Related product cards (?limit)
//!
//! # Categories
//! GET    /api/v1/categories               - Paginated listing (?count&page)
//! POST   /api/v1/categories               - Create
//! GET    /api/v1/categories/{id}          - Detail
//! ```

pub mod categories;
pub mod health;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
        .route("/{id}/detail", get(products::detail))
        .route("/{id}/related", get(products::related))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index).post(categories::create))
        .route("/{id}", get(categories::show))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api/v1/products", product_routes())
        .nest("/api/v1/categories", category_routes())
}
