use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::models::category::CategoryDto;
use crate::services::category_service;
use crate::services::product_service::ServiceError;

/// GET /api/categories
pub async fn list_categories(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match category_service::list_categories(&db).await {
        Ok(categories) => (StatusCode::OK, Json(json!({ "data": categories }))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// GET /api/categories/:id
pub async fn get_category(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match category_service::get_category(&db, id).await {
        Ok(category) => (StatusCode::OK, Json(json!({ "data": category }))).into_response(),
        Err(ServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Category not found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// POST /api/categories
pub async fn create_category(
    State(db): State<DatabaseConnection>,
    Json(dto): Json<CategoryDto>,
) -> impl IntoResponse {
    match category_service::create_category(&db, dto).await {
        Ok(category) => (StatusCode::CREATED, Json(json!({ "data": category }))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// PUT /api/categories/:id
pub async fn update_category(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(dto): Json<CategoryDto>,
) -> impl IntoResponse {
    match category_service::update_category(&db, id, dto).await {
        Ok(category) => (StatusCode::OK, Json(json!({ "data": category }))).into_response(),
        Err(ServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Category not found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// DELETE /api/categories/:id
pub async fn delete_category(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match category_service::delete_category(&db, id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Category deleted successfully" })),
        )
            .into_response(),
        Err(ServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Category not found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
