//! Location autocomplete.
//!
//! Suggestions come from two sources: locations observed on existing farmer
//! and product records, and the static reference list. Observed locations
//! are ranked first. Free text is always an acceptable location; the index
//! only helps discovery.

use std::collections::HashSet;
use std::future::Future;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::reference::builtin_reference_locations;

/// Maximum number of suggestions returned for one query.
pub const MAX_SUGGESTIONS: usize = 8;

/// A single autocomplete entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub location: String,
    /// `true` when the entry came from live farmer/product records. Only used
    /// for emphasis; ordering is already decided by source.
    pub from_observed: bool,
}

/// Read access to the locations stored on farmer and product records.
///
/// Implementations return the current snapshot of distinct, non-empty
/// `location` values. No pagination or ordering guarantees are assumed.
pub trait LocationSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn farmer_locations(&self) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send;

    fn product_locations(&self) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send;
}

/// Result of [`SuggestionIndex::refresh`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RefreshOutcome {
    Refreshed { count: usize },
    /// The previous observed set was kept.
    Failed { reason: String },
}

/// Query both collections and merge them into one deduplicated list.
///
/// Farmer locations come first, then product locations. Deduplication is
/// case-sensitive and keeps the first occurrence; empty strings are dropped.
///
/// # Errors
///
/// Returns the source's error if either query fails.
pub async fn fetch_observed_locations<S>(source: &S) -> Result<Vec<String>, S::Error>
where
    S: LocationSource + Sync,
{
    let (farmers, products) =
        futures::try_join!(source.farmer_locations(), source.product_locations())?;

    Ok(merge_observed(farmers, products))
}

fn merge_observed(farmers: Vec<String>, products: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    farmers
        .into_iter()
        .chain(products)
        .filter(|location| !location.is_empty())
        .filter(|location| seen.insert(location.clone()))
        .collect()
}

/// Autocomplete index over the reference list plus observed locations.
///
/// The observed set is only ever replaced wholesale, through
/// [`SuggestionIndex::replace_observed`] or [`SuggestionIndex::refresh`].
/// Nothing refreshes it implicitly.
#[derive(Debug, Clone)]
pub struct SuggestionIndex {
    reference: Vec<String>,
    observed: Vec<String>,
    last_refreshed_at: Option<DateTime<Utc>>,
}

impl Default for SuggestionIndex {
    fn default() -> Self {
        Self::with_builtin_reference()
    }
}

impl SuggestionIndex {
    #[must_use]
    pub fn new(reference: Vec<String>) -> Self {
        Self {
            reference,
            observed: Vec::new(),
            last_refreshed_at: None,
        }
    }

    #[must_use]
    pub fn with_builtin_reference() -> Self {
        Self::new(builtin_reference_locations())
    }

    #[must_use]
    pub fn reference(&self) -> &[String] {
        &self.reference
    }

    #[must_use]
    pub fn observed(&self) -> &[String] {
        &self.observed
    }

    /// When the observed set was last replaced; `None` if never.
    #[must_use]
    pub fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed_at
    }

    /// Swap in a new observed set and stamp the refresh marker.
    pub fn replace_observed(&mut self, observed: Vec<String>) {
        self.observed = observed;
        self.last_refreshed_at = Some(Utc::now());
    }

    /// Re-query `source` and replace the observed set.
    ///
    /// A failed query leaves the previous set and marker untouched. The
    /// failure is logged and reported in the outcome, never raised.
    pub async fn refresh<S>(&mut self, source: &S) -> RefreshOutcome
    where
        S: LocationSource + Sync,
    {
        let fetched = fetch_observed_locations(source).await;
        self.apply_refresh(fetched)
    }

    /// Apply the result of [`fetch_observed_locations`].
    ///
    /// `Ok` swaps the observed set in; `Err` keeps the previous set and
    /// marker and is reported as [`RefreshOutcome::Failed`].
    pub fn apply_refresh<E>(&mut self, fetched: Result<Vec<String>, E>) -> RefreshOutcome
    where
        E: std::fmt::Display,
    {
        match fetched {
            Ok(observed) => {
                let count = observed.len();
                self.replace_observed(observed);
                tracing::info!(count, "observed locations refreshed");
                RefreshOutcome::Refreshed { count }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    stale_count = self.observed.len(),
                    "observed location refresh failed; keeping previous set"
                );
                RefreshOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Case-insensitive membership test against the observed set.
    #[must_use]
    pub fn is_observed(&self, location: &str) -> bool {
        let needle = location.to_lowercase();
        self.observed.iter().any(|o| o.to_lowercase() == needle)
    }

    /// Ranked suggestions for a partially typed location.
    ///
    /// Observed matches come first in stored order, then reference matches
    /// that do not repeat an observed match case-insensitively. At most
    /// [`MAX_SUGGESTIONS`] entries are returned; an empty `partial` returns
    /// nothing.
    #[must_use]
    pub fn suggest(&self, partial: &str) -> Vec<Suggestion> {
        if partial.is_empty() {
            return Vec::new();
        }

        let needle = partial.to_lowercase();

        let observed_matches: Vec<&String> = self
            .observed
            .iter()
            .filter(|location| location.to_lowercase().contains(&needle))
            .collect();

        let observed_lower: HashSet<String> =
            observed_matches.iter().map(|o| o.to_lowercase()).collect();

        let reference_matches = self.reference.iter().filter(|location| {
            let lower = location.to_lowercase();
            lower.contains(&needle) && !observed_lower.contains(&lower)
        });

        observed_matches
            .into_iter()
            .map(|location| Suggestion {
                location: location.clone(),
                from_observed: true,
            })
            .chain(reference_matches.map(|location| Suggestion {
                location: location.clone(),
                from_observed: false,
            }))
            .take(MAX_SUGGESTIONS)
            .collect()
    }
}

/// Whether the caller should offer "use this exact text" as a location.
///
/// True when the trimmed input is non-empty and no suggestion equals it
/// case-insensitively.
#[must_use]
pub fn offers_custom_entry(partial: &str, suggestions: &[Suggestion]) -> bool {
    let trimmed = partial.trim();
    if trimmed.is_empty() {
        return false;
    }

    let needle = trimmed.to_lowercase();
    !suggestions
        .iter()
        .any(|s| s.location.to_lowercase() == needle)
}

#[cfg(test)]
#[path = "suggest_test.rs"]
mod tests;
