//! Domain logic for the vegetable marketplace: location matching, location
//! autocomplete, catalog browsing and configuration.

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod location;
pub mod preference;
pub mod reference;
pub mod suggest;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalog::{browse, BrowseFilter, CatalogProduct, FarmerSummary};
pub use config::{load_app_config, load_app_config_from_env, resolve_reference_locations};
pub use location::{
    classify_distance, extract_city_state, is_within_delivery_range, location_distance,
    normalize_location, DistanceTier, DEFAULT_MAX_DISTANCE,
};
pub use preference::{PreferenceError, PreferenceStore};
pub use reference::{
    builtin_reference_locations, load_reference_locations, POPULAR_LOCATIONS, REFERENCE_LOCATIONS,
};
pub use suggest::{
    fetch_observed_locations, offers_custom_entry, LocationSource, RefreshOutcome, Suggestion,
    SuggestionIndex, MAX_SUGGESTIONS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read reference locations file {path}: {source}")]
    ReferenceFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse reference locations file: {0}")]
    ReferenceFileParse(#[source] serde_yaml::Error),

    #[error("reference locations validation failed: {0}")]
    Validation(String),
}
