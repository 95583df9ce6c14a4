//! Product Service - CRUD over the product catalogue
//!
//! Stock mutation during a sale lives in sale_service; this module owns
//! everything else about products.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::models::product::{self, Entity as Product, ProductDto};

/// Error type for service operations
#[derive(Debug)]
pub enum ServiceError {
    Database(String),
    NotFound,
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Database(msg) => write!(f, "Database error: {}", msg),
            ServiceError::NotFound => write!(f, "Resource not found"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Database(e.to_string())
    }
}

pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>, ServiceError> {
    let products = Product::find()
        .order_by_asc(product::Column::Name)
        .all(db)
        .await?;
    Ok(products)
}

pub async fn get_product(db: &DatabaseConnection, id: i32) -> Result<product::Model, ServiceError> {
    Product::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)
}

pub async fn create_product(
    db: &DatabaseConnection,
    dto: ProductDto,
) -> Result<product::Model, ServiceError> {
    let now = Utc::now().to_rfc3339();

    let new_product = product::ActiveModel {
        name: Set(dto.name),
        description: Set(dto.description),
        price: Set(dto.price),
        stock: Set(dto.stock),
        category_id: Set(dto.category_id),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(new_product.insert(db).await?)
}

pub async fn update_product(
    db: &DatabaseConnection,
    id: i32,
    dto: ProductDto,
) -> Result<product::Model, ServiceError> {
    let existing = Product::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let mut active: product::ActiveModel = existing.into();
    active.name = Set(dto.name);
    active.description = Set(dto.description);
    active.price = Set(dto.price);
    active.stock = Set(dto.stock);
    active.category_id = Set(dto.category_id);
    active.updated_at = Set(Utc::now().to_rfc3339());

    Ok(active.update(db).await?)
}

pub async fn delete_product(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = Product::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::NotFound);
    }
    Ok(())
}
