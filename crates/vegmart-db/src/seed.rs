use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::DbError;

struct DemoProduct {
    name: &'static str,
    category: &'static str,
    /// Price in paise.
    price_minor: i64,
    margin_percentage: i64,
    stock: i32,
    location: Option<&'static str>,
}

const DEMO_FARMER_EMAIL: &str = "raj.patel@example.com";

const DEMO_PRODUCTS: &[DemoProduct] = &[
    DemoProduct {
        name: "Premium Tomatoes",
        category: "Premium",
        price_minor: 6000,
        margin_percentage: 10,
        stock: 50,
        location: None,
    },
    DemoProduct {
        name: "Leafy Greens",
        category: "Fresh",
        price_minor: 4000,
        margin_percentage: 10,
        stock: 30,
        location: Some("Pune, Maharashtra"),
    },
    DemoProduct {
        name: "Bell Peppers",
        category: "Fresh",
        price_minor: 8000,
        margin_percentage: 15,
        stock: 0,
        location: Some("Nashik, Maharashtra"),
    },
];

/// Upsert a demo farmer and a handful of products.
///
/// Returns the number of products processed. Runs in one transaction and is
/// safe to repeat.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_demo_catalog(pool: &PgPool) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO farmers (email, name, location, specialization, experience_years) \
         VALUES ($1, 'Raj Patel', 'Ratnagiri, Maharashtra', 'Tomatoes, greens', 12) \
         ON CONFLICT (email) DO UPDATE SET \
             name = EXCLUDED.name, \
             location = EXCLUDED.location, \
             specialization = EXCLUDED.specialization, \
             experience_years = EXCLUDED.experience_years, \
             updated_at = NOW()",
    )
    .bind(DEMO_FARMER_EMAIL)
    .execute(&mut *tx)
    .await?;

    for product in DEMO_PRODUCTS {
        sqlx::query(
            "INSERT INTO products \
                 (farmer_email, name, category, price, margin_percentage, stock, \
                  is_available, location) \
             VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7) \
             ON CONFLICT (farmer_email, name) DO UPDATE SET \
                 category          = EXCLUDED.category, \
                 price             = EXCLUDED.price, \
                 margin_percentage = EXCLUDED.margin_percentage, \
                 stock             = EXCLUDED.stock, \
                 location          = EXCLUDED.location, \
                 updated_at        = NOW()",
        )
        .bind(DEMO_FARMER_EMAIL)
        .bind(product.name)
        .bind(product.category)
        .bind(Decimal::new(product.price_minor, 2))
        .bind(Decimal::from(product.margin_percentage))
        .bind(product.stock)
        .bind(product.location)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        products = DEMO_PRODUCTS.len(),
        farmer = DEMO_FARMER_EMAIL,
        "demo catalog seeded"
    );
    Ok(DEMO_PRODUCTS.len())
}
