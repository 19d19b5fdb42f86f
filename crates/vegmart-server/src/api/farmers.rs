use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use vegmart_db::FarmerProfile;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct LocationUpdate {
    pub location: String,
}

#[derive(Debug, Serialize)]
pub(super) struct FarmerLocationItem {
    email: String,
    name: String,
    location: Option<String>,
}

/// Overwrite a farmer's location. The suggestion cache is not touched; the
/// new value shows up after the next explicit refresh.
pub(super) async fn update_farmer_location(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(email): Path<String>,
    Json(body): Json<LocationUpdate>,
) -> Result<Json<ApiResponse<FarmerLocationItem>>, ApiError> {
    if body.location.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "location must be non-empty",
        ));
    }

    let row = match vegmart_db::set_farmer_location(&state.pool, &email, &body.location).await {
        Ok(row) => row,
        Err(vegmart_db::DbError::NotFound) => {
            return Err(ApiError::new(
                req_id.0,
                "not_found",
                format!("farmer {email} not found"),
            ));
        }
        Err(e) => return Err(map_db_error(req_id.0, &e)),
    };

    Ok(Json(ApiResponse {
        data: FarmerLocationItem {
            email: row.email,
            name: row.name,
            location: row.location,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Deserialize)]
pub(super) struct ProfileBody {
    pub name: String,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub specialization: Option<String>,
    #[serde(default)]
    pub experience_years: i32,
}

#[derive(Debug, Serialize)]
pub(super) struct FarmerProfileItem {
    email: String,
    name: String,
    location: Option<String>,
    phone: Option<String>,
    bio: Option<String>,
    specialization: Option<String>,
    experience_years: i32,
}

/// Create or overwrite the farmer profile stored under `email`.
pub(super) async fn upsert_farmer(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(email): Path<String>,
    Json(body): Json<ProfileBody>,
) -> Result<Json<ApiResponse<FarmerProfileItem>>, ApiError> {
    if body.name.trim().is_empty() || email.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "email and name must be non-empty",
        ));
    }
    if body.experience_years < 0 {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "experience_years must not be negative",
        ));
    }

    let profile = FarmerProfile {
        email,
        name: body.name,
        location: body.location,
        phone: body.phone,
        bio: body.bio,
        specialization: body.specialization,
        experience_years: body.experience_years,
    };
    let row = vegmart_db::upsert_farmer_profile(&state.pool, &profile)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: FarmerProfileItem {
            email: row.email,
            name: row.name,
            location: row.location,
            phone: row.phone,
            bio: row.bio,
            specialization: row.specialization,
            experience_years: row.experience_years,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
