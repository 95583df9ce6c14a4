use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;

use crate::services::sale_service::{self, SaleError, SaleInput};

/// Request body for creating a sale transaction
#[derive(Debug, Deserialize)]
pub struct CreateSaleBody {
    pub data: SaleInput,
}

/// Map a reporting failure to its response. Client failures carry their own
/// message; anything else is logged and replaced by a fixed message.
fn summary_error_response(err: SaleError) -> Response {
    match err {
        SaleError::InvalidPeriod => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
        SaleError::TableMissing => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
        err => {
            tracing::error!("Error fetching sales summary: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "An error occurred while fetching the sales summary" })),
            )
                .into_response()
        }
    }
}

/// GET /api/sales/summary/:period - Aggregate summary for one period
#[utoipa::path(
    get,
    path = "/api/sales/summary/{period}",
    params(
        ("period" = String, Path, description = "Period token: week, two-weeks, month or last-month")
    ),
    responses(
        (status = 200, description = "Period summary"),
        (status = 400, description = "Invalid period specified"),
        (status = 404, description = "Sale table not found")
    )
)]
pub async fn get_summary(
    State(db): State<DatabaseConnection>,
    Path(period): Path<String>,
) -> impl IntoResponse {
    match sale_service::get_summary(&db, &period, Utc::now()).await {
        Ok(summary) => (StatusCode::OK, Json(json!({ "data": summary }))).into_response(),
        Err(err) => summary_error_response(err),
    }
}

/// GET /api/sales/summary - Summaries for every fixed period
#[utoipa::path(
    get,
    path = "/api/sales/summary",
    responses(
        (status = 200, description = "Summaries keyed by period token")
    )
)]
pub async fn get_all_summaries(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match sale_service::get_all_summaries(&db, Utc::now()).await {
        Ok(summaries) => (StatusCode::OK, Json(json!({ "data": summaries }))).into_response(),
        Err(err) => summary_error_response(err),
    }
}

/// GET /api/sales/chartdata - (date, total) points for the current month
#[utoipa::path(
    get,
    path = "/api/sales/chartdata",
    responses(
        (status = 200, description = "Chart points, ascending by date")
    )
)]
pub async fn get_charts_data(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match sale_service::get_charts_data(&db, Utc::now()).await {
        Ok(points) => (StatusCode::OK, Json(json!({ "data": points }))).into_response(),
        Err(err) => {
            tracing::error!("Error fetching chart data: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "An error occurred while fetching sales data" })),
            )
                .into_response()
        }
    }
}

/// POST /api/sales/transaction - Record a sale and decrement product stocks
///
/// The failure message is passed through to the caller as-is, matching the
/// established behavior of this endpoint (clients display it directly).
#[utoipa::path(
    post,
    path = "/api/sales/transaction",
    responses(
        (status = 200, description = "Sale created, stock decremented"),
        (status = 500, description = "Transaction rolled back")
    )
)]
pub async fn create_sale_transaction(
    State(db): State<DatabaseConnection>,
    Json(body): Json<CreateSaleBody>,
) -> impl IntoResponse {
    match sale_service::create_sale_transaction(&db, body.data).await {
        Ok(sale) => (
            StatusCode::OK,
            Json(json!({ "data": sale, "meta": { "success": true } })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!("Transaction error: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}

/// GET /api/sales - List sales with their line items
pub async fn list_sales(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match sale_service::list_sales(&db).await {
        Ok(sales) => (StatusCode::OK, Json(json!({ "data": sales }))).into_response(),
        Err(err) => {
            tracing::error!("Error listing sales: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "An error occurred while fetching sales data" })),
            )
                .into_response()
        }
    }
}
