use crate::models::{category, product};
use sea_orm::*;

/// Seed a small demo catalogue. No-op when products already exist.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    if product::Entity::find().count(db).await? > 0 {
        return Ok(());
    }

    let now = chrono::Utc::now().to_rfc3339();

    let stationery = category::ActiveModel {
        name: Set("Stationery".to_owned()),
        slug: Set("stationery".to_owned()),
        description: Set(Some("Office and school supplies".to_owned())),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let electronics = category::ActiveModel {
        name: Set("Electronics".to_owned()),
        slug: Set("electronics".to_owned()),
        description: Set(None),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let demo_products = [
        ("Ballpoint pen (box of 50)", 12.5, Some(200), stationery.id),
        ("A4 notebook", 3.9, Some(340), stationery.id),
        ("Wireless barcode scanner", 89.0, Some(25), electronics.id),
        ("Receipt printer", 149.0, Some(12), electronics.id),
    ];

    for (name, price, stock, category_id) in demo_products {
        product::ActiveModel {
            name: Set(name.to_owned()),
            description: Set(None),
            price: Set(price),
            stock: Set(stock),
            category_id: Set(Some(category_id)),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    Ok(())
}
