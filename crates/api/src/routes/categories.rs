//! Category route handlers.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use marketplace_core::types::CategoryId;
use serde::Deserialize;

use crate::error::Result;
use crate::extract::{ApiPath, ValidJson, ValidQuery};
use crate::services::CategoryService;
use crate::state::AppState;
use crate::validation::{Validate, ValidationErrors, check_text};

const MAX_NAME: usize = 100;

/// Listing query parameters. Both are required.
#[derive(Debug, Deserialize)]
pub struct CategoryListQuery {
    pub count: Option<u32>,
    pub page: Option<u32>,
}

impl Validate for CategoryListQuery {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        match self.count {
            None => errors.add("count", "Count is required"),
            Some(count) => errors.check(count >= 1, "count", "Count must be at least 1"),
        }
        match self.page {
            None => errors.add("page", "Page is required"),
            Some(page) => errors.check(page >= 1, "page", "Page must be at least 1"),
        }
        errors.into_result()
    }
}

/// Body of `POST /api/v1/categories`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateCategoryRequest {
    pub name: String,
}

impl Validate for CreateCategoryRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_text(&mut errors, "name", "Name", &self.name, 1, MAX_NAME);
        errors.into_result()
    }
}

/// Paginated category listing. 204 when the page is empty.
pub async fn index(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<CategoryListQuery>,
) -> Response {
    let page = CategoryService::new(state.store())
        .list(query.count.unwrap_or(1), query.page.unwrap_or(1))
        .await;

    if page.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        Json(page).into_response()
    }
}

/// Category detail.
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CategoryId>,
) -> Result<impl IntoResponse> {
    let category = CategoryService::new(state.store()).get(id).await?;
    Ok(Json(category))
}

/// Create a category. 201 with its location.
pub async fn create(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<CreateCategoryRequest>,
) -> Result<impl IntoResponse> {
    let category = CategoryService::new(state.store())
        .create(request.name.trim())
        .await?;
    let location = format!("/api/v1/categories/{}", category.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(category),
    ))
}
