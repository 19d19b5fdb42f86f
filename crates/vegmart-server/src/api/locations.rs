use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vegmart_core::{
    classify_distance, is_within_delivery_range, offers_custom_entry, DistanceTier,
    RefreshOutcome, Suggestion, POPULAR_LOCATIONS,
};
use vegmart_db::PgLocationSource;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct SuggestionQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct SuggestionsData {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
    /// Whether the client should offer the typed text verbatim as a location.
    pub custom_entry: bool,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

pub(super) async fn list_suggestions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SuggestionQuery>,
) -> Json<ApiResponse<SuggestionsData>> {
    let partial = query.q.unwrap_or_default();
    let index = state.locations.read().await;
    let suggestions = index.suggest(&partial);
    let last_refreshed_at = index.last_refreshed_at();
    drop(index);

    let custom_entry = offers_custom_entry(&partial, &suggestions);

    Json(ApiResponse {
        data: SuggestionsData {
            query: partial,
            suggestions,
            custom_entry,
            last_refreshed_at,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn list_popular_locations(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<&'static [&'static str]>> {
    Json(ApiResponse {
        data: POPULAR_LOCATIONS,
        meta: ResponseMeta::new(req_id.0),
    })
}

#[derive(Debug, Deserialize)]
pub(super) struct DistanceQuery {
    /// Farmer or product location.
    pub from: Option<String>,
    /// Customer location.
    pub to: Option<String>,
    pub max_distance: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(super) struct DistanceData {
    pub distance: u32,
    pub tier: DistanceTier,
    pub max_distance: u32,
    pub within_range: bool,
}

pub(super) async fn get_distance(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<DistanceQuery>,
) -> Json<ApiResponse<DistanceData>> {
    let from = query.from.unwrap_or_default();
    let to = query.to.unwrap_or_default();
    let max_distance = query.max_distance.unwrap_or(state.max_delivery_distance);
    let tier = classify_distance(&from, &to);

    Json(ApiResponse {
        data: DistanceData {
            distance: tier.value(),
            tier,
            max_distance,
            within_range: is_within_delivery_range(&from, &to, max_distance),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[derive(Debug, Serialize)]
pub(super) struct RefreshData {
    pub refreshed: bool,
    pub outcome: RefreshOutcome,
    pub observed_count: usize,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

/// Explicitly re-read observed locations. A failed refresh is reported in
/// the body, not as an error status; suggestions keep working off the
/// previous set. Calls closer together than the configured minimum
/// interval get `rate_limited`.
pub(super) async fn refresh_locations(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<RefreshData>>, ApiError> {
    if let Err(retry_after) = state.refresh_throttle.try_acquire().await {
        return Err(ApiError::new(
            req_id.0,
            "rate_limited",
            format!(
                "location refresh throttled; retry in {}s",
                retry_after.as_secs().max(1)
            ),
        ));
    }

    let source = PgLocationSource::new(state.pool.clone());
    let outcome = state.locations.refresh(&source).await;

    let index = state.locations.read().await;
    let data = RefreshData {
        refreshed: matches!(outcome, RefreshOutcome::Refreshed { .. }),
        outcome,
        observed_count: index.observed().len(),
        last_refreshed_at: index.last_refreshed_at(),
    };
    drop(index);

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
