//! Sale Service - Business logic for sales reporting and sale transactions
//!
//! Two responsibilities live here: period-bucketed aggregate summaries over
//! the sales table (raw SQL), and the stock-decrementing sale transaction
//! (one SeaORM unit of work, all-or-nothing).

use chrono::{DateTime, Datelike, Duration, NaiveTime, SecondsFormat, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityName,
    EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect, Set, Statement,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::models::product::Entity as Product;
use crate::models::sale::{self, Entity as Sale};
use crate::models::sale_item;

/// Error type for sale operations
#[derive(Debug)]
pub enum SaleError {
    /// Unrecognized period token - rejected before any storage access
    InvalidPeriod,
    /// The sales table has no physical mapping in the schema
    TableMissing,
    ProductNotFound(String),
    StockNotSet(String),
    InsufficientStock(String),
    Database(String),
}

impl fmt::Display for SaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaleError::InvalidPeriod => write!(f, "Invalid period specified"),
            SaleError::TableMissing => write!(f, "Sale table not found"),
            SaleError::ProductNotFound(id) => write!(f, "Product with ID {} not found", id),
            SaleError::StockNotSet(id) => {
                write!(f, "Stock is not set for product with ID {}", id)
            }
            SaleError::InsufficientStock(id) => {
                write!(f, "Insufficient stock for product with ID {}", id)
            }
            SaleError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for SaleError {}

impl From<DbErr> for SaleError {
    fn from(e: DbErr) -> Self {
        SaleError::Database(e.to_string())
    }
}

/// Symbolic reporting period selecting a date window relative to "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    LastMonth,
    Month,
    TwoWeeks,
    Week,
}

impl Period {
    /// The fixed set reported by the all-summaries endpoint
    pub const ALL: [Period; 4] = [
        Period::LastMonth,
        Period::Month,
        Period::TwoWeeks,
        Period::Week,
    ];

    pub fn parse(token: &str) -> Option<Period> {
        match token {
            "last-month" => Some(Period::LastMonth),
            "month" => Some(Period::Month),
            "two-weeks" => Some(Period::TwoWeeks),
            "week" => Some(Period::Week),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::LastMonth => "last-month",
            Period::Month => "month",
            Period::TwoWeeks => "two-weeks",
            Period::Week => "week",
        }
    }

    /// Resolve the reporting window for this period, relative to `now`.
    ///
    /// Calendar-month windows run from midnight UTC on the first day to
    /// midnight UTC on the last day; the rolling windows end at `now`.
    pub fn window(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        match self {
            Period::LastMonth => {
                let last_of_previous = month_start(now) - Duration::days(1);
                (month_start(last_of_previous), last_of_previous)
            }
            Period::Month => (month_start(now), month_end(now)),
            Period::TwoWeeks => (now - Duration::days(15), now),
            Period::Week => (now - Duration::days(7), now),
        }
    }
}

/// Midnight UTC on the first day of `now`'s month
fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let date = now.date_naive();
    let first = date - Duration::days(date.day0() as i64);
    first.and_time(NaiveTime::MIN).and_utc()
}

/// Midnight UTC on the last day of `now`'s month
fn month_end(now: DateTime<Utc>) -> DateTime<Utc> {
    // 32 days past the first of the month always lands in the next month
    let into_next = month_start(now) + Duration::days(32);
    month_start(into_next) - Duration::days(1)
}

/// ISO-8601 with millisecond precision, `Z` suffix
fn iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Aggregate sales figures for one resolved period window.
/// Recomputed on every request, never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub period: String,
    pub start_date: String,
    pub end_date: String,
    pub count: i64,
    pub total_sales: f64,
    pub total_tax: f64,
    pub total_discount: f64,
    pub total_revenue: f64,
}

/// A sale date/total pair for the monthly chart
#[derive(Debug, Clone, Serialize, FromQueryResult)]
pub struct ChartPoint {
    pub date: String,
    pub total: f64,
}

/// One line item of an incoming sale
#[derive(Debug, Clone, Deserialize)]
pub struct SaleLineInput {
    pub product: i32,
    pub quantity: i32,
    pub price: f64,
}

/// Incoming sale payload (the `data` object of the request body)
#[derive(Debug, Deserialize)]
pub struct SaleInput {
    pub customer_name: String,
    pub invoice_number: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub date: String,
    pub notes: Option<String>,
    pub products: Vec<SaleLineInput>,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub tax_amount: f64,
    pub total: f64,
}

/// A persisted sale together with its line items
#[derive(Debug, Serialize)]
pub struct SaleWithItems {
    #[serde(flatten)]
    pub sale: sale::Model,
    pub products: Vec<sale_item::Model>,
}

/// Resolve the physical table backing the sale entity from the schema
/// metadata. Returns None when the table is not mapped.
async fn resolve_sales_table(db: &DatabaseConnection) -> Result<Option<String>, DbErr> {
    let logical_name = Sale.table_name();
    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
        [logical_name.into()],
    );
    match db.query_one(stmt).await? {
        Some(row) => Ok(Some(row.try_get::<String>("", "name")?)),
        None => Ok(None),
    }
}

/// Compute the aggregate summary for one period token.
///
/// The period is validated before any storage access, and the sales table
/// must have a physical mapping before the aggregate query runs. Sums over
/// an empty window coalesce to zero.
pub async fn get_summary(
    db: &DatabaseConnection,
    period_token: &str,
    now: DateTime<Utc>,
) -> Result<PeriodSummary, SaleError> {
    let period = Period::parse(period_token).ok_or(SaleError::InvalidPeriod)?;
    let (start, end) = period.window(now);
    let start_date = iso(start);
    let end_date = iso(end);

    let table = resolve_sales_table(db)
        .await?
        .ok_or(SaleError::TableMissing)?;

    let sql = format!(
        "SELECT COUNT(*) AS count, \
                SUM(subtotal) AS total_sales, \
                SUM(tax_amount) AS total_tax, \
                SUM(discount_amount) AS total_discount, \
                SUM(total) AS total_revenue \
         FROM \"{}\" WHERE date BETWEEN ? AND ?",
        table
    );
    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        sql.as_str(),
        [start_date.clone().into(), end_date.clone().into()],
    );
    let row = db.query_one(stmt).await?;

    let (count, total_sales, total_tax, total_discount, total_revenue) = match row {
        Some(row) => (
            row.try_get::<i64>("", "count")?,
            row.try_get::<Option<f64>>("", "total_sales")?.unwrap_or(0.0),
            row.try_get::<Option<f64>>("", "total_tax")?.unwrap_or(0.0),
            row.try_get::<Option<f64>>("", "total_discount")?
                .unwrap_or(0.0),
            row.try_get::<Option<f64>>("", "total_revenue")?
                .unwrap_or(0.0),
        ),
        None => (0, 0.0, 0.0, 0.0, 0.0),
    };

    Ok(PeriodSummary {
        period: period.as_str().to_string(),
        start_date,
        end_date,
        count,
        total_sales,
        total_tax,
        total_discount,
        total_revenue,
    })
}

/// Compute summaries for every fixed period, keyed by period token
pub async fn get_all_summaries(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
) -> Result<HashMap<String, PeriodSummary>, SaleError> {
    let mut summaries = HashMap::new();
    for period in Period::ALL {
        let summary = get_summary(db, period.as_str(), now).await?;
        summaries.insert(period.as_str().to_string(), summary);
    }
    Ok(summaries)
}

/// Fetch (date, total) for every sale in the current calendar month,
/// ascending by date, unpaginated
pub async fn get_charts_data(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
) -> Result<Vec<ChartPoint>, SaleError> {
    let start = iso(month_start(now));
    // End of the last day of the month, not midnight
    let end = iso(month_end(now) + Duration::days(1) - Duration::milliseconds(1));

    let points = Sale::find()
        .select_only()
        .column(sale::Column::Date)
        .column(sale::Column::Total)
        .filter(sale::Column::Date.between(start, end))
        .order_by_asc(sale::Column::Date)
        .into_model::<ChartPoint>()
        .all(db)
        .await?;

    Ok(points)
}

/// Validate available stock for a product and calculate the new stock value.
///
/// Fails when the product is missing, its stock is unset, or the sale would
/// drive the stock negative.
pub fn validate_product_stock(
    product: Option<&crate::models::product::Model>,
    product_id: impl fmt::Display,
    quantity: i32,
) -> Result<i32, SaleError> {
    let product = product.ok_or_else(|| SaleError::ProductNotFound(product_id.to_string()))?;

    let stock = product
        .stock
        .ok_or_else(|| SaleError::StockNotSet(product_id.to_string()))?;

    let updated_stock = stock - quantity;

    if updated_stock < 0 {
        return Err(SaleError::InsufficientStock(product_id.to_string()));
    }

    Ok(updated_stock)
}

/// Persist a sale and decrement each referenced product's stock, as one
/// atomic unit of work. Any line-item failure rolls the whole sale back
/// (the transaction rolls back on drop when an error propagates).
pub async fn create_sale_transaction(
    db: &DatabaseConnection,
    input: SaleInput,
) -> Result<SaleWithItems, SaleError> {
    let txn = db.begin().await?;

    let now = Utc::now().to_rfc3339();

    // 1. Validate each referenced product and decrement its stock. This runs
    // before any line item is written so a bad product reference surfaces as
    // a classified error, not a constraint failure.
    for line in &input.products {
        let product = Product::find_by_id(line.product).one(&txn).await?;
        let updated_stock = validate_product_stock(product.as_ref(), line.product, line.quantity)?;

        // Conditional decrement: the WHERE guard re-checks the stock at
        // write time, so a concurrent sale that already consumed it cannot
        // drive the count negative.
        let sql = format!(
            "UPDATE {} SET stock = stock - ?, updated_at = ? \
             WHERE id = ? AND stock IS NOT NULL AND stock >= ?",
            Product.table_name()
        );
        let decrement = Statement::from_sql_and_values(
            txn.get_database_backend(),
            sql.as_str(),
            [
                line.quantity.into(),
                Utc::now().to_rfc3339().into(),
                line.product.into(),
                line.quantity.into(),
            ],
        );
        let res = txn.execute(decrement).await?;
        if res.rows_affected() == 0 {
            return Err(SaleError::InsufficientStock(line.product.to_string()));
        }

        tracing::debug!(product_id = line.product, updated_stock, "stock decremented");
    }

    // 2. Create the sale record with its line items, in payload order
    let sale = sale::ActiveModel {
        customer_name: Set(input.customer_name),
        invoice_number: Set(input.invoice_number),
        customer_email: Set(input.customer_email),
        customer_phone: Set(input.customer_phone),
        date: Set(input.date),
        notes: Set(input.notes),
        subtotal: Set(input.subtotal),
        discount_amount: Set(input.discount_amount),
        tax_amount: Set(input.tax_amount),
        total: Set(input.total),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut items = Vec::with_capacity(input.products.len());
    for line in &input.products {
        let item = sale_item::ActiveModel {
            sale_id: Set(sale.id),
            product_id: Set(line.product),
            quantity: Set(line.quantity),
            price: Set(line.price),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        items.push(item);
    }

    txn.commit().await?;

    Ok(SaleWithItems {
        sale,
        products: items,
    })
}

/// List all sales with their line items
pub async fn list_sales(db: &DatabaseConnection) -> Result<Vec<SaleWithItems>, SaleError> {
    let rows = Sale::find()
        .find_with_related(sale_item::Entity)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(sale, products)| SaleWithItems { sale, products })
        .collect())
}
