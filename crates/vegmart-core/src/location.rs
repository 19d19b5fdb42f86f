//! Free-text location matching.
//!
//! Locations are opaque, unvalidated strings, conventionally `"City, State"`.
//! There is no geocoding: two locations are compared by normalized equality,
//! then by city, then by state. Typos and aliases ("Mumbai" vs
//! "Mumbai City") never match by city.

use serde::Serialize;

/// Threshold used by storefront browsing when the caller does not pick one.
///
/// Sits between [`DistanceTier::SameState`] and [`DistanceTier::Elsewhere`],
/// so the default policy is "same city or same state".
pub const DEFAULT_MAX_DISTANCE: u32 = 100;

/// Coarse distance classification between two locations.
///
/// These are discrete tiers, not kilometres. Any threshold between 11 and 499
/// behaves exactly like 50, and any threshold of 500 or more admits every
/// location with a known value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceTier {
    Identical,
    SameCity,
    SameState,
    Elsewhere,
    /// At least one side was empty.
    Unknown,
}

impl DistanceTier {
    /// Numeric value compared against a `max_distance` threshold.
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            DistanceTier::Identical => 0,
            DistanceTier::SameCity => 10,
            DistanceTier::SameState => 50,
            DistanceTier::Elsewhere => 500,
            DistanceTier::Unknown => 1000,
        }
    }
}

impl std::fmt::Display for DistanceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceTier::Identical => write!(f, "identical"),
            DistanceTier::SameCity => write!(f, "same_city"),
            DistanceTier::SameState => write!(f, "same_state"),
            DistanceTier::Elsewhere => write!(f, "elsewhere"),
            DistanceTier::Unknown => write!(f, "unknown"),
        }
    }
}

/// Canonicalize a location for equality comparison.
///
/// Lowercases, trims, then drops every character that is not `a-z` or
/// whitespace. Commas, digits and punctuation disappear; inner whitespace is
/// kept as-is.
#[must_use]
pub fn normalize_location(location: &str) -> String {
    location
        .to_lowercase()
        .trim()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
        .collect()
}

/// Split a raw location into `(city, state)` on the first comma.
///
/// Both parts are trimmed and lowercased. A missing part is an empty string.
/// Anything after a second comma stays inside the state part:
/// `"Some Area, Mumbai, Maharashtra"` yields `("some area", "mumbai, maharashtra")`.
#[must_use]
pub fn extract_city_state(location: &str) -> (String, String) {
    let mut parts = location.splitn(2, ',');
    let city = parts.next().unwrap_or_default().trim().to_lowercase();
    let state = parts.next().unwrap_or_default().trim().to_lowercase();
    (city, state)
}

/// Classify how far apart two locations are.
///
/// The emptiness check runs on the raw inputs before normalization, so two
/// empty strings are [`DistanceTier::Unknown`], not identical. City and state
/// are taken from the raw inputs, not the normalized ones.
#[must_use]
pub fn classify_distance(a: &str, b: &str) -> DistanceTier {
    if a.is_empty() || b.is_empty() {
        return DistanceTier::Unknown;
    }

    if normalize_location(a) == normalize_location(b) {
        return DistanceTier::Identical;
    }

    let (city_a, state_a) = extract_city_state(a);
    let (city_b, state_b) = extract_city_state(b);

    if city_a == city_b {
        DistanceTier::SameCity
    } else if state_a == state_b {
        DistanceTier::SameState
    } else {
        DistanceTier::Elsewhere
    }
}

/// Numeric form of [`classify_distance`]: 0, 10, 50, 500 or 1000.
#[must_use]
pub fn location_distance(a: &str, b: &str) -> u32 {
    classify_distance(a, b).value()
}

/// Decide whether a product at `farmer_location` is visible to a customer at
/// `customer_location`.
///
/// - no customer location selected: everything is visible
/// - customer location selected but the product has none: hidden
/// - otherwise: `location_distance <= max_distance`
#[must_use]
pub fn is_within_delivery_range(
    farmer_location: &str,
    customer_location: &str,
    max_distance: u32,
) -> bool {
    if customer_location.is_empty() {
        return true;
    }

    if farmer_location.is_empty() {
        return false;
    }

    let tier = classify_distance(farmer_location, customer_location);
    let within = tier.value() <= max_distance;
    tracing::debug!(
        farmer_location,
        customer_location,
        %tier,
        distance = tier.value(),
        max_distance,
        within,
        "delivery range check"
    );
    within
}

#[cfg(test)]
#[path = "location_test.rs"]
mod tests;
