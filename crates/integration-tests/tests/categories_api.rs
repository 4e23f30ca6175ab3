//! Integration tests for the category endpoints.

use axum::http::StatusCode;
use marketplace_integration_tests::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_list_categories() {
    let app = TestApp::spawn().await;

    let resp = app.get("/api/v1/categories?count=2&page=1").await;
    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["total"], 3);
    assert_eq!(body["items"], json!([
        {"id": 1, "name": "Electrónica"},
        {"id": 2, "name": "Hogar"}
    ]));

    let resp = app.get("/api/v1/categories?count=2&page=3").await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_list_categories_requires_paging() {
    let app = TestApp::spawn().await;

    let resp = app.get("/api/v1/categories").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    let body = resp.json();
    assert_eq!(body["errors"]["count"], json!(["Count is required"]));
    assert_eq!(body["errors"]["page"], json!(["Page is required"]));
}

#[tokio::test]
async fn test_show_category() {
    let app = TestApp::spawn().await;

    let resp = app.get("/api/v1/categories/2").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json(), json!({"id": 2, "name": "Hogar"}));

    let resp = app.get("/api/v1/categories/20").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.json()["code"], "API-GCD-01");
}

#[tokio::test]
async fn test_create_category() {
    let app = TestApp::spawn().await;

    let resp = app.post("/api/v1/categories", &json!({"name": "Libros"})).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.header("location"), Some("/api/v1/categories/4"));
    assert_eq!(resp.json(), json!({"id": 4, "name": "Libros"}));

    let resp = app.get("/api/v1/categories?count=10&page=1").await;
    assert_eq!(resp.json()["total"], 4);
}

#[tokio::test]
async fn test_create_duplicate_category() {
    let app = TestApp::spawn().await;

    let resp = app.post("/api/v1/categories", &json!({"name": "deportes"})).await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);

    let body = resp.json();
    assert_eq!(body["code"], "ATI-CC-01");
    assert_eq!(body["title"], "Business rule violated");
    assert_eq!(body["type"], "https://marketplace.com/errors/business");
}

#[tokio::test]
async fn test_create_category_validation() {
    let app = TestApp::spawn().await;

    let resp = app.post("/api/v1/categories", &json!({"name": "   "})).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["errors"]["name"], json!(["Name is required"]));

    let long = "c".repeat(101);
    let resp = app.post("/api/v1/categories", &json!({"name": long})).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}
