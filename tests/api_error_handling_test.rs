use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Set, Statement};
use tower::util::ServiceExt; // for `oneshot`

use storefront::models::product;
use storefront::{api, db};

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

fn test_app(db: DatabaseConnection) -> Router {
    Router::new().nest("/api", api::api_router(db))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

#[tokio::test]
async fn invalid_period_maps_to_400() {
    let db = setup_test_db().await;
    let app = test_app(db);

    let req = Request::builder()
        .uri("/api/sales/summary/fortnight")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid period specified");
}

#[tokio::test]
async fn dropped_sales_table_maps_to_404() {
    let db = setup_test_db().await;
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "DROP TABLE sales".to_owned(),
    ))
    .await
    .expect("Failed to drop table");
    let app = test_app(db);

    let req = Request::builder()
        .uri("/api/sales/summary/week")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Sale table not found");
}

#[tokio::test]
async fn valid_period_returns_the_data_envelope() {
    let db = setup_test_db().await;
    let app = test_app(db);

    let req = Request::builder()
        .uri("/api/sales/summary/week")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["period"], "week");
    assert_eq!(body["data"]["count"], 0);
    assert_eq!(body["data"]["totalRevenue"], 0.0);
    assert!(body["data"]["startDate"].is_string());
    assert!(body["data"]["endDate"].is_string());
}

#[tokio::test]
async fn all_summaries_returns_every_period_key() {
    let db = setup_test_db().await;
    let app = test_app(db);

    let req = Request::builder()
        .uri("/api/sales/summary")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    for token in ["last-month", "month", "two-weeks", "week"] {
        assert_eq!(body["data"][token]["period"], token);
    }
}

#[tokio::test]
async fn transaction_endpoint_commits_and_reports_success() {
    let db = setup_test_db().await;

    let now = Utc::now().to_rfc3339();
    let created = product::ActiveModel {
        name: Set("Notebook".to_string()),
        description: Set(None),
        price: Set(3.9),
        stock: Set(Some(5)),
        category_id: Set(None),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect("Failed to create product");

    let app = test_app(db.clone());

    let payload = serde_json::json!({
        "data": {
            "customer_name": "Alice",
            "invoice_number": "INV-001",
            "customer_email": "a@example.com",
            "customer_phone": "123",
            "date": "2025-01-01T00:00:00.000Z",
            "notes": "Note",
            "products": [{ "product": created.id, "quantity": 2, "price": 3.9 }],
            "subtotal": 7.8,
            "discount_amount": 0.0,
            "tax_amount": 0.0,
            "total": 7.8
        }
    });

    let req = Request::builder()
        .uri("/api/sales/transaction")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["meta"]["success"], true);
    assert_eq!(body["data"]["customer_name"], "Alice");
    assert_eq!(body["data"]["products"][0]["quantity"], 2);

    let product = product::Entity::find_by_id(created.id)
        .one(&db)
        .await
        .expect("query failed")
        .expect("product vanished");
    assert_eq!(product.stock, Some(3));
}

#[tokio::test]
async fn transaction_failure_maps_to_500_and_names_the_product() {
    let db = setup_test_db().await;

    let now = Utc::now().to_rfc3339();
    let created = product::ActiveModel {
        name: Set("Scanner".to_string()),
        description: Set(None),
        price: Set(89.0),
        stock: Set(Some(1)),
        category_id: Set(None),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect("Failed to create product");

    let app = test_app(db.clone());

    let payload = serde_json::json!({
        "data": {
            "customer_name": "Bob",
            "invoice_number": "INV-002",
            "customer_email": null,
            "customer_phone": null,
            "date": "2025-01-01T00:00:00.000Z",
            "notes": null,
            "products": [{ "product": created.id, "quantity": 3, "price": 89.0 }],
            "subtotal": 267.0,
            "discount_amount": 0.0,
            "tax_amount": 0.0,
            "total": 267.0
        }
    });

    let req = Request::builder()
        .uri("/api/sales/transaction")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    let message = body["error"].as_str().expect("error is not a string");
    assert!(message.contains(&created.id.to_string()));
    assert!(message.contains("Insufficient stock"));

    // Rolled back: stock untouched
    let product = product::Entity::find_by_id(created.id)
        .one(&db)
        .await
        .expect("query failed")
        .expect("product vanished");
    assert_eq!(product.stock, Some(1));
}

#[tokio::test]
async fn product_crud_round_trips() {
    let db = setup_test_db().await;
    let app = test_app(db);

    let payload = serde_json::json!({
        "name": "Receipt printer",
        "description": "Thermal, 80mm",
        "price": 149.0,
        "stock": 12,
        "category_id": null
    });

    let req = Request::builder()
        .uri("/api/products")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let id = body["data"]["id"].as_i64().expect("no product id");

    let req = Request::builder()
        .uri(format!("/api/products/{}", id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "Receipt printer");
    assert_eq!(body["data"]["stock"], 12);

    // Unknown id maps to 404
    let req = Request::builder()
        .uri("/api/products/9999")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn category_crud_round_trips() {
    let db = setup_test_db().await;
    let app = test_app(db);

    let payload = serde_json::json!({
        "name": "Office Supplies",
        "description": null
    });

    let req = Request::builder()
        .uri("/api/categories")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["slug"], "office-supplies");
    let id = body["data"]["id"].as_i64().expect("no category id");

    let req = Request::builder()
        .uri(format!("/api/categories/{}", id))
        .method("DELETE")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let req = Request::builder()
        .uri(format!("/api/categories/{}", id))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn landing_page_carries_every_content_section() {
    let db = setup_test_db().await;
    let app = test_app(db);

    let req = Request::builder()
        .uri("/api/landing")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let data = &body["data"];
    for section in ["hero", "demo", "features", "whyUs", "pricing"] {
        assert!(!data[section].is_null(), "missing section {}", section);
    }
    assert!(data["hero"]["title"].is_string());
    assert!(data["features"].as_array().is_some_and(|f| !f.is_empty()));
    assert!(data["whyUs"]["bullets"]
        .as_array()
        .is_some_and(|b| !b.is_empty()));
    assert!(data["whyUs"]["metrics"][0]["value"].is_string());
}

#[tokio::test]
async fn health_check_reports_ok() {
    let db = setup_test_db().await;
    let app = test_app(db);

    let req = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "storefront");
}
