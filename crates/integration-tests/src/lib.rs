//! Integration tests for the marketplace catalog API.
//!
//! Each test builds the full router (every middleware included) over its own
//! temporary data file and drives it in-process with
//! `tower::ServiceExt::oneshot`. No server or network is needed.
//!
//! ```bash
//! cargo test -p marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `products_api` - Product CRUD, listing, enrichment
//! - `categories_api` - Category CRUD and listing
//! - `health` - Health and readiness probes, cross-cutting headers

use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use marketplace_api::config::ApiConfig;
use marketplace_api::db::JsonStore;
use marketplace_api::{AppState, build_app};
use serde_json::Value;
use tower::ServiceExt;

/// A response with its body already read.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Body parsed as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    /// A header value as text.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// The application over a fresh seeded data file.
pub struct TestApp {
    router: Router,
    state: AppState,
    data_file: PathBuf,
}

impl TestApp {
    /// Build the app over a new temporary data file holding the seed catalog.
    ///
    /// # Panics
    ///
    /// Panics if the data file cannot be created.
    pub async fn spawn() -> Self {
        let data_file =
            std::env::temp_dir().join(format!("marketplace-it-{}.json", uuid::Uuid::new_v4()));
        let store = JsonStore::open(data_file.clone())
            .await
            .expect("Failed to open test data file");
        let state = AppState::new(ApiConfig::with_data_file(data_file.clone()), store);

        Self {
            router: build_app(state.clone()),
            state,
            data_file,
        }
    }

    /// Shared state, for inspecting the store directly.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Path of the temporary data file.
    #[must_use]
    pub fn data_file(&self) -> &std::path::Path {
        &self.data_file
    }

    /// Send a request with optional JSON body and extra headers.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<&Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("Failed to build request"))
            .await
            .expect("Router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body")
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None, &[]).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body), &[]).await
    }

    pub async fn put(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body), &[]).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None, &[]).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.data_file);
    }
}
