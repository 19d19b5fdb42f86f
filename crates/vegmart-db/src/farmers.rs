//! Database operations for the `farmers` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `farmers` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FarmerRow {
    pub id: i64,
    pub public_id: Uuid,
    pub email: String,
    pub name: String,
    /// Free text; `NULL` until the farmer sets it. Products without their own
    /// location inherit this one.
    pub location: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub specialization: Option<String>,
    pub experience_years: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Look up a farmer by email.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn get_farmer_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<FarmerRow>, sqlx::Error> {
    sqlx::query_as::<_, FarmerRow>(
        "SELECT id, public_id, email, name, location, phone, bio, specialization, \
                experience_years, created_at, updated_at \
         FROM farmers \
         WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Overwrite a farmer's location.
///
/// The value is trimmed; a blank value clears the location (stored as
/// `NULL`), which hides the farmer's location-less products from customers
/// that have selected a location. Returns the updated row.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no farmer has `email`, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn set_farmer_location(
    pool: &PgPool,
    email: &str,
    location: &str,
) -> Result<FarmerRow, DbError> {
    let location = blank_to_none(Some(location));

    let row = sqlx::query_as::<_, FarmerRow>(
        "UPDATE farmers \
         SET location = $2, updated_at = NOW() \
         WHERE email = $1 \
         RETURNING id, public_id, email, name, location, phone, bio, specialization, \
                   experience_years, created_at, updated_at",
    )
    .bind(email)
    .bind(location)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    tracing::info!(
        email,
        location = row.location.as_deref().unwrap_or(""),
        "farmer location updated"
    );
    Ok(row)
}

/// Editable farmer profile fields, keyed by email.
#[derive(Debug, Clone, Default)]
pub struct FarmerProfile {
    pub email: String,
    pub name: String,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub specialization: Option<String>,
    pub experience_years: i32,
}

/// Create the farmer's profile, or overwrite it when the email already exists.
///
/// Optional text fields are trimmed and stored as `NULL` when blank.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_farmer_profile(
    pool: &PgPool,
    profile: &FarmerProfile,
) -> Result<FarmerRow, DbError> {
    let row = sqlx::query_as::<_, FarmerRow>(
        "INSERT INTO farmers \
             (email, name, location, phone, bio, specialization, experience_years) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         ON CONFLICT (email) DO UPDATE SET \
             name             = EXCLUDED.name, \
             location         = EXCLUDED.location, \
             phone            = EXCLUDED.phone, \
             bio              = EXCLUDED.bio, \
             specialization   = EXCLUDED.specialization, \
             experience_years = EXCLUDED.experience_years, \
             updated_at       = NOW() \
         RETURNING id, public_id, email, name, location, phone, bio, specialization, \
                   experience_years, created_at, updated_at",
    )
    .bind(profile.email.trim())
    .bind(profile.name.trim())
    .bind(blank_to_none(profile.location.as_deref()))
    .bind(blank_to_none(profile.phone.as_deref()))
    .bind(blank_to_none(profile.bio.as_deref()))
    .bind(blank_to_none(profile.specialization.as_deref()))
    .bind(profile.experience_years)
    .fetch_one(pool)
    .await?;

    tracing::info!(email = %row.email, "farmer profile saved");
    Ok(row)
}

pub(crate) fn blank_to_none(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
