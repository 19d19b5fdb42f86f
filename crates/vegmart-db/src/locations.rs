//! Distinct location values stored on farmer and product records.

use sqlx::PgPool;
use vegmart_core::LocationSource;

use crate::DbError;

/// Distinct, non-empty `farmers.location` values.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_farmer_locations(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT location \
         FROM farmers \
         WHERE location IS NOT NULL \
           AND location <> ''",
    )
    .fetch_all(pool)
    .await
}

/// Distinct, non-empty `products.location` values.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_product_locations(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT location \
         FROM products \
         WHERE location IS NOT NULL \
           AND location <> ''",
    )
    .fetch_all(pool)
    .await
}

/// [`LocationSource`] backed by the marketplace database.
#[derive(Debug, Clone)]
pub struct PgLocationSource {
    pool: PgPool,
}

impl PgLocationSource {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl LocationSource for PgLocationSource {
    type Error = DbError;

    async fn farmer_locations(&self) -> Result<Vec<String>, DbError> {
        Ok(list_farmer_locations(&self.pool).await?)
    }

    async fn product_locations(&self) -> Result<Vec<String>, DbError> {
        Ok(list_product_locations(&self.pool).await?)
    }
}
