use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::models::product::ProductDto;
use crate::services::product_service::{self, ServiceError};

/// GET /api/products - List the product catalogue
pub async fn list_products(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match product_service::list_products(&db).await {
        Ok(products) => (StatusCode::OK, Json(json!({ "data": products }))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// GET /api/products/:id
pub async fn get_product(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match product_service::get_product(&db, id).await {
        Ok(product) => (StatusCode::OK, Json(json!({ "data": product }))).into_response(),
        Err(ServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Product not found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// POST /api/products
pub async fn create_product(
    State(db): State<DatabaseConnection>,
    Json(dto): Json<ProductDto>,
) -> impl IntoResponse {
    match product_service::create_product(&db, dto).await {
        Ok(product) => (StatusCode::CREATED, Json(json!({ "data": product }))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// PUT /api/products/:id
pub async fn update_product(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(dto): Json<ProductDto>,
) -> impl IntoResponse {
    match product_service::update_product(&db, id, dto).await {
        Ok(product) => (StatusCode::OK, Json(json!({ "data": product }))).into_response(),
        Err(ServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Product not found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// DELETE /api/products/:id
pub async fn delete_product(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match product_service::delete_product(&db, id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Product deleted successfully" })),
        )
            .into_response(),
        Err(ServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Product not found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
