//! Location tools: normalization, tier distance, range checks and
//! autocomplete against the reference list or live records.

use std::path::Path;

use clap::Subcommand;
use vegmart_core::{
    builtin_reference_locations, classify_distance, extract_city_state,
    is_within_delivery_range, load_reference_locations, normalize_location, offers_custom_entry,
    RefreshOutcome, SuggestionIndex, DEFAULT_MAX_DISTANCE,
};

/// Sub-commands available under `location`.
#[derive(Debug, Subcommand)]
pub enum LocationCommands {
    /// Print the normalized form and city/state parts of a location
    Normalize { location: String },
    /// Print the tier distance between two locations
    Distance { from: String, to: String },
    /// Check whether a farmer location delivers to a customer location
    Check {
        farmer: String,
        customer: String,
        /// Tier threshold (0, 10, 50, 500 and 1000 are the only distances)
        #[arg(long, default_value_t = DEFAULT_MAX_DISTANCE)]
        max_distance: u32,
    },
    /// Autocomplete a partially typed location
    Suggest {
        partial: String,
        /// Merge in locations stored on farmer and product records
        #[arg(long)]
        live: bool,
    },
}

pub(crate) async fn run(
    command: LocationCommands,
    reference_path: Option<&Path>,
) -> anyhow::Result<()> {
    match command {
        LocationCommands::Normalize { location } => {
            let (city, state) = extract_city_state(&location);
            println!("normalized: {}", normalize_location(&location));
            println!("city:       {city}");
            println!("state:      {state}");
        }
        LocationCommands::Distance { from, to } => {
            let tier = classify_distance(&from, &to);
            println!("{} ({tier})", tier.value());
        }
        LocationCommands::Check {
            farmer,
            customer,
            max_distance,
        } => {
            let tier = classify_distance(&farmer, &customer);
            let verdict = if is_within_delivery_range(&farmer, &customer, max_distance) {
                "within range"
            } else {
                "out of range"
            };
            println!("{verdict}: distance {} ({tier}), max {max_distance}", tier.value());
        }
        LocationCommands::Suggest { partial, live } => {
            run_suggest(&partial, live, reference_path).await?;
        }
    }

    Ok(())
}

async fn run_suggest(
    partial: &str,
    live: bool,
    reference_path: Option<&Path>,
) -> anyhow::Result<()> {
    let reference = match reference_path {
        Some(path) => load_reference_locations(path)?,
        None => builtin_reference_locations(),
    };
    let mut index = SuggestionIndex::new(reference);

    if live {
        let config = vegmart_core::load_app_config()?;
        let pool = vegmart_db::connect_configured_pool(&config).await?;
        let source = vegmart_db::PgLocationSource::new(pool);
        if let RefreshOutcome::Failed { reason } = index.refresh(&source).await {
            tracing::warn!(%reason, "live locations unavailable; using reference list only");
        }
    }

    let suggestions = index.suggest(partial);
    if suggestions.is_empty() && partial.trim().is_empty() {
        println!("type part of a city or state to see suggestions");
        return Ok(());
    }

    for suggestion in &suggestions {
        let marker = if suggestion.from_observed { "*" } else { " " };
        println!("{marker} {}", suggestion.location);
    }
    if offers_custom_entry(partial, &suggestions) {
        println!("+ use \"{}\"", partial.trim());
    }

    Ok(())
}
