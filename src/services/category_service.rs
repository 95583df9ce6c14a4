//! Category Service - CRUD over product categories

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::models::category::{self, CategoryDto, Entity as Category};
use crate::services::product_service::ServiceError;

/// Derive a URL-safe slug when the payload does not provide one
fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

pub async fn list_categories(
    db: &DatabaseConnection,
) -> Result<Vec<category::Model>, ServiceError> {
    let categories = Category::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await?;
    Ok(categories)
}

pub async fn get_category(
    db: &DatabaseConnection,
    id: i32,
) -> Result<category::Model, ServiceError> {
    Category::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)
}

pub async fn create_category(
    db: &DatabaseConnection,
    dto: CategoryDto,
) -> Result<category::Model, ServiceError> {
    let now = Utc::now().to_rfc3339();
    let slug = dto.slug.unwrap_or_else(|| slugify(&dto.name));

    let new_category = category::ActiveModel {
        name: Set(dto.name),
        slug: Set(slug),
        description: Set(dto.description),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(new_category.insert(db).await?)
}

pub async fn update_category(
    db: &DatabaseConnection,
    id: i32,
    dto: CategoryDto,
) -> Result<category::Model, ServiceError> {
    let existing = Category::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let mut active: category::ActiveModel = existing.into();
    if let Some(slug) = dto.slug {
        active.slug = Set(slug);
    }
    active.name = Set(dto.name);
    active.description = Set(dto.description);
    active.updated_at = Set(Utc::now().to_rfc3339());

    Ok(active.update(db).await?)
}

pub async fn delete_category(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = Category::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::NotFound);
    }
    Ok(())
}
