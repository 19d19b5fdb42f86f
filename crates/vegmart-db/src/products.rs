//! Catalog reads over `products` joined with `farmers`, and the farmer-side
//! product writes that decide where a product is offered.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use vegmart_core::{CatalogProduct, FarmerSummary};

use crate::farmers::{blank_to_none, get_farmer_by_email};
use crate::DbError;

/// Number of products the storefront loads when the caller gives no limit.
pub const DEFAULT_CATALOG_LIMIT: i64 = 20;

/// Upper bound on one catalog page.
pub const MAX_CATALOG_LIMIT: i64 = 200;

/// An available product with its farmer's fields flattened in.
///
/// The farmer columns are `NULL` when `products.farmer_email` does not match
/// any farmer row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CatalogProductRow {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub price: Decimal,
    pub margin_percentage: Option<Decimal>,
    pub stock: i32,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub farmer_email: Option<String>,
    pub farmer_name: Option<String>,
    pub farmer_location: Option<String>,
}

impl From<CatalogProductRow> for CatalogProduct {
    fn from(row: CatalogProductRow) -> Self {
        let farmer = match (row.farmer_email, row.farmer_name) {
            (Some(email), Some(name)) => Some(FarmerSummary {
                name,
                email,
                location: row.farmer_location,
            }),
            _ => None,
        };

        CatalogProduct {
            id: row.id,
            name: row.name,
            category: row.category,
            price: row.price,
            margin_percentage: row.margin_percentage,
            stock: row.stock,
            image_url: row.image_url,
            location: row.location,
            farmer,
        }
    }
}

/// Available products, newest first, at most `limit` rows.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_available_products(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<CatalogProductRow>, sqlx::Error> {
    sqlx::query_as::<_, CatalogProductRow>(
        "SELECT p.id, p.name, p.category, p.price, p.margin_percentage, p.stock, \
                p.image_url, p.location, p.created_at, \
                f.email AS farmer_email, f.name AS farmer_name, f.location AS farmer_location \
         FROM products p \
         LEFT JOIN farmers f ON f.email = p.farmer_email \
         WHERE p.is_available = TRUE \
         ORDER BY p.created_at DESC, p.id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

const PRODUCT_COLUMNS: &str = "id, public_id, farmer_email, name, category, price, \
     margin_percentage, stock, is_available, image_url, location, created_at, updated_at";

/// A row from the `products` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub public_id: Uuid,
    pub farmer_email: Option<String>,
    pub name: String,
    pub category: Option<String>,
    pub price: Decimal,
    pub margin_percentage: Option<Decimal>,
    pub stock: i32,
    pub is_available: bool,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product a farmer is listing.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub farmer_email: String,
    pub name: String,
    pub category: Option<String>,
    pub price: Decimal,
    pub margin_percentage: Option<Decimal>,
    pub stock: i32,
    pub is_available: bool,
    pub image_url: Option<String>,
    /// Where the product is offered. Blank or `None` means the farmer's location.
    pub location: Option<String>,
}

/// Partial product edit; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub margin_percentage: Option<Decimal>,
    pub stock: Option<i32>,
    pub is_available: Option<bool>,
    pub image_url: Option<String>,
    /// Must be non-blank when present.
    pub location: Option<String>,
}

/// List a new product for a farmer.
///
/// The location is trimmed. When it is blank the farmer's own location is
/// stored instead, so the product is always filterable by delivery range.
///
/// # Errors
///
/// - [`DbError::InvalidProduct`] for a blank name or a negative price, margin or stock
/// - [`DbError::NotFound`] if no farmer has `farmer_email`
/// - [`DbError::MissingLocation`] if neither the product nor the farmer has a location
/// - [`DbError::Sqlx`] if the insert fails, including a duplicate name for the farmer
pub async fn create_product(pool: &PgPool, product: &NewProduct) -> Result<ProductRow, DbError> {
    let name = product.name.trim();
    if name.is_empty() {
        return Err(DbError::InvalidProduct("name must be non-empty".to_string()));
    }
    validate_amounts(
        Some(product.price),
        product.margin_percentage,
        Some(product.stock),
    )?;

    let farmer = get_farmer_by_email(pool, &product.farmer_email)
        .await?
        .ok_or(DbError::NotFound)?;

    let location = blank_to_none(product.location.as_deref())
        .or_else(|| blank_to_none(farmer.location.as_deref()))
        .ok_or_else(|| DbError::MissingLocation {
            farmer_email: farmer.email.clone(),
        })?;

    let row = sqlx::query_as::<_, ProductRow>(&format!(
        "INSERT INTO products \
             (farmer_email, name, category, price, margin_percentage, stock, is_available, \
              image_url, location) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(&farmer.email)
    .bind(name)
    .bind(blank_to_none(product.category.as_deref()))
    .bind(product.price)
    .bind(product.margin_percentage)
    .bind(product.stock)
    .bind(product.is_available)
    .bind(blank_to_none(product.image_url.as_deref()))
    .bind(location)
    .fetch_one(pool)
    .await?;

    tracing::info!(
        id = row.id,
        farmer = %farmer.email,
        location,
        "product listed"
    );
    Ok(row)
}

/// Apply a partial edit to product `id`.
///
/// # Errors
///
/// - [`DbError::InvalidProduct`] for a blank name or location, or a negative amount
/// - [`DbError::NotFound`] if no product has `id`
/// - [`DbError::Sqlx`] if the update fails
pub async fn update_product(
    pool: &PgPool,
    id: i64,
    update: &ProductUpdate,
) -> Result<ProductRow, DbError> {
    let name = update.name.as_deref().map(str::trim);
    if name.is_some_and(str::is_empty) {
        return Err(DbError::InvalidProduct("name must be non-empty".to_string()));
    }
    let location = update.location.as_deref().map(str::trim);
    if location.is_some_and(str::is_empty) {
        return Err(DbError::InvalidProduct(
            "location must be non-empty".to_string(),
        ));
    }
    validate_amounts(update.price, update.margin_percentage, update.stock)?;

    let row = sqlx::query_as::<_, ProductRow>(&format!(
        "UPDATE products SET \
             name              = COALESCE($2, name), \
             category          = COALESCE($3, category), \
             price             = COALESCE($4, price), \
             margin_percentage = COALESCE($5, margin_percentage), \
             stock             = COALESCE($6, stock), \
             is_available      = COALESCE($7, is_available), \
             image_url         = COALESCE($8, image_url), \
             location          = COALESCE($9, location), \
             updated_at        = NOW() \
         WHERE id = $1 \
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(id)
    .bind(name)
    .bind(blank_to_none(update.category.as_deref()))
    .bind(update.price)
    .bind(update.margin_percentage)
    .bind(update.stock)
    .bind(update.is_available)
    .bind(blank_to_none(update.image_url.as_deref()))
    .bind(location)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    tracing::info!(id, location = row.location.as_deref().unwrap_or(""), "product updated");
    Ok(row)
}

fn validate_amounts(
    price: Option<Decimal>,
    margin_percentage: Option<Decimal>,
    stock: Option<i32>,
) -> Result<(), DbError> {
    if price.is_some_and(|p| p.is_sign_negative()) {
        return Err(DbError::InvalidProduct("price must not be negative".to_string()));
    }
    if margin_percentage.is_some_and(|m| m.is_sign_negative()) {
        return Err(DbError::InvalidProduct(
            "margin_percentage must not be negative".to_string(),
        ));
    }
    if stock.is_some_and(|s| s < 0) {
        return Err(DbError::InvalidProduct("stock must not be negative".to_string()));
    }
    Ok(())
}
