pub mod categories;
pub mod health;
pub mod landing;
pub mod products;
pub mod sales;

use axum::{
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;

pub fn api_router(db: DatabaseConnection) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Sales reporting
        .route("/sales/summary/:period", get(sales::get_summary))
        .route("/sales/summary", get(sales::get_all_summaries))
        .route("/sales/chartdata", get(sales::get_charts_data))
        // Sales
        .route("/sales", get(sales::list_sales))
        .route("/sales/transaction", post(sales::create_sale_transaction))
        // Products
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        // Categories
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/:id",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        // Marketing landing page
        .route("/landing", get(landing::get_landing))
        .with_state(db)
}
