//! Product route handlers.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use marketplace_core::catalog::ProductFields;
use marketplace_core::types::{CategoryId, ProductId};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::Result;
use crate::extract::{ApiPath, ValidJson, ValidQuery};
use crate::services::{ProductQuery, ProductService};
use crate::state::AppState;
use crate::validation::{Validate, ValidationErrors, check_text};

const MAX_NAME: usize = 200;
const MAX_DESCRIPTION: usize = 4000;
const MAX_PAGE_SIZE: u32 = 100;
const MAX_RELATED: u32 = 20;

const fn default_count() -> u32 {
    20
}

const fn default_page() -> u32 {
    1
}

const fn default_limit() -> u32 {
    6
}

/// Listing query parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default = "default_page")]
    pub page: u32,
    pub name: Option<String>,
    pub category_id: Option<i64>,
}

impl Validate for ProductListQuery {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            (1..=MAX_PAGE_SIZE).contains(&self.count),
            "count",
            format!("Count must be between 1 and {MAX_PAGE_SIZE}"),
        );
        errors.check(self.page >= 1, "page", "Page must be at least 1");
        errors.into_result()
    }
}

/// Related products query parameters.
#[derive(Debug, Deserialize)]
pub struct RelatedQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Validate for RelatedQuery {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            (1..=MAX_RELATED).contains(&self.limit),
            "limit",
            format!("Limit must be between 1 and {MAX_RELATED}"),
        );
        errors.into_result()
    }
}

/// Body of `POST /api/v1/products`.
///
/// Missing fields take their zero value and are reported by validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i32,
    pub category_id: i64,
}

impl Validate for CreateProductRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_text(&mut errors, "name", "Name", &self.name, 2, MAX_NAME);
        check_text(
            &mut errors,
            "description",
            "Description",
            &self.description,
            1,
            MAX_DESCRIPTION,
        );
        errors.check(
            self.price > Decimal::ZERO,
            "price",
            "Price must be greater than 0",
        );
        errors.check(self.stock >= 0, "stock", "Stock cannot be negative");
        errors.check(
            self.category_id > 0,
            "categoryId",
            "Category id must be greater than 0",
        );
        errors.into_result()
    }
}

impl From<CreateProductRequest> for ProductFields {
    fn from(request: CreateProductRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            price: request.price,
            stock: request.stock,
            category_id: CategoryId::new(request.category_id),
        }
    }
}

/// Body of `PUT /api/v1/products/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i32,
    pub category_id: i64,
}

impl Validate for UpdateProductRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_text(&mut errors, "name", "Name", &self.name, 1, MAX_NAME);
        check_text(
            &mut errors,
            "description",
            "Description",
            &self.description,
            1,
            MAX_DESCRIPTION,
        );
        errors.check(
            self.price >= Decimal::new(1, 2),
            "price",
            "Price must be at least 0.01",
        );
        errors.check(self.stock >= 0, "stock", "Stock cannot be negative");
        errors.into_result()
    }
}

impl From<UpdateProductRequest> for ProductFields {
    fn from(request: UpdateProductRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            price: request.price,
            stock: request.stock,
            category_id: CategoryId::new(request.category_id),
        }
    }
}

/// Paginated product listing. 204 when the page is empty.
pub async fn index(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<ProductListQuery>,
) -> Response {
    let page = ProductService::new(state.store())
        .list(ProductQuery {
            page: query.page,
            count: query.count,
            name: query.name,
            category_id: query.category_id.map(CategoryId::new),
        })
        .await;

    if page.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        Json(page).into_response()
    }
}

/// Basic product detail.
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
) -> Result<impl IntoResponse> {
    let detail = ProductService::new(state.store()).get(id).await?;
    Ok(Json(detail))
}

/// Enriched marketplace detail.
pub async fn detail(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
) -> Result<impl IntoResponse> {
    let detail = ProductService::new(state.store()).get_enriched(id).await?;
    Ok(Json(detail))
}

/// Related product cards.
pub async fn related(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
    ValidQuery(query): ValidQuery<RelatedQuery>,
) -> Result<impl IntoResponse> {
    let related = ProductService::new(state.store())
        .related(id, query.limit)
        .await?;
    Ok(Json(related))
}

/// Create a product. 201 with its location.
pub async fn create(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<CreateProductRequest>,
) -> Result<impl IntoResponse> {
    let detail = ProductService::new(state.store())
        .create(request.into())
        .await?;
    let location = format!("/api/v1/products/{}", detail.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(detail),
    ))
}

/// Replace a product's fields. 204 on success.
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
    ValidJson(request): ValidJson<UpdateProductRequest>,
) -> Result<StatusCode> {
    ProductService::new(state.store())
        .update(id, request.into())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a product. 204 on success.
pub async fn destroy(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
) -> Result<StatusCode> {
    ProductService::new(state.store()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_create() -> CreateProductRequest {
        CreateProductRequest {
            name: "Silla".to_string(),
            description: "Silla de madera".to_string(),
            price: Decimal::new(4500, 2),
            stock: 3,
            category_id: 2,
        }
    }

    #[test]
    fn test_create_request_accepts_valid_body() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn test_create_request_reports_every_field() {
        let request: CreateProductRequest =
            serde_json::from_str(r#"{"name":"x","price":0,"stock":-1}"#).unwrap();
        let errors = request.validate().unwrap_err();

        assert_eq!(
            errors.messages("name"),
            Some(&["Name must be between 2 and 200 characters".to_string()][..])
        );
        assert_eq!(
            errors.messages("description"),
            Some(&["Description is required".to_string()][..])
        );
        assert!(errors.messages("price").is_some());
        assert!(errors.messages("stock").is_some());
        assert!(errors.messages("categoryId").is_some());
    }

    #[test]
    fn test_create_request_description_limit() {
        let mut request = valid_create();
        request.description = "d".repeat(MAX_DESCRIPTION + 1);
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors.messages("description"),
            Some(&["Description must not exceed 4000 characters".to_string()][..])
        );
    }

    #[test]
    fn test_update_request_price_floor() {
        let mut request: UpdateProductRequest = serde_json::from_str(
            r#"{"name":"Silla","description":"Madera","price":0.001,"stock":0,"categoryId":2}"#,
        )
        .unwrap();
        assert!(request.validate().unwrap_err().messages("price").is_some());

        request.price = Decimal::new(1, 2);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_list_query_bounds() {
        let query: ProductListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!((query.count, query.page), (20, 1));
        assert!(query.validate().is_ok());

        let query = ProductListQuery {
            count: 101,
            page: 0,
            name: None,
            category_id: None,
        };
        let errors = query.validate().unwrap_err();
        assert!(errors.messages("count").is_some());
        assert!(errors.messages("page").is_some());
    }

    #[test]
    fn test_related_query_bounds() {
        assert!(RelatedQuery { limit: 20 }.validate().is_ok());
        assert!(RelatedQuery { limit: 0 }.validate().is_err());
        assert!(RelatedQuery { limit: 21 }.validate().is_err());
    }

    #[test]
    fn test_request_into_fields() {
        let fields = ProductFields::from(valid_create());
        assert_eq!(fields.category_id, CategoryId::new(2));
        assert_eq!(fields.price, Decimal::new(4500, 2));
    }
}
