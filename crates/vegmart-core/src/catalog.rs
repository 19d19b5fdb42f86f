//! Storefront catalog browsing: search plus delivery-range filtering.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::location::{is_within_delivery_range, DEFAULT_MAX_DISTANCE};

/// Display name used when a product's farmer record is missing.
pub const UNKNOWN_FARMER_NAME: &str = "Verified Farmer";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmerSummary {
    pub name: String,
    pub email: String,
    pub location: Option<String>,
}

/// A product as shown on the storefront, joined with its farmer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    /// Farmer's base price, before the marketplace margin.
    pub price: Decimal,
    /// Marketplace margin in percent, e.g. `10` for 10%.
    pub margin_percentage: Option<Decimal>,
    pub stock: i32,
    pub image_url: Option<String>,
    /// Location set on the product itself, if any.
    pub location: Option<String>,
    pub farmer: Option<FarmerSummary>,
}

impl CatalogProduct {
    /// The location used for delivery-range checks.
    ///
    /// The product's own location wins; otherwise the farmer's; otherwise `""`
    /// (hidden whenever a customer location is selected).
    #[must_use]
    pub fn effective_location(&self) -> &str {
        non_empty(self.location.as_deref())
            .or_else(|| non_empty(self.farmer.as_ref().and_then(|f| f.location.as_deref())))
            .unwrap_or("")
    }

    /// Customer-facing price: base price plus margin, rounded to 2 places.
    #[must_use]
    pub fn final_price(&self) -> Decimal {
        let margin = self.margin_percentage.unwrap_or(Decimal::ZERO);
        let multiplier = Decimal::ONE + margin / Decimal::ONE_HUNDRED;
        (self.price * multiplier).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    #[must_use]
    pub fn farmer_name(&self) -> &str {
        self.farmer
            .as_ref()
            .map_or(UNKNOWN_FARMER_NAME, |f| f.name.as_str())
    }

    /// Case-insensitive substring search over name, farmer name and location.
    /// An empty term matches everything.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }

        let needle = term.to_lowercase();
        [self.name.as_str(), self.farmer_name(), self.effective_location()]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseFilter {
    pub search: Option<String>,
    /// `None` or empty means no location filter.
    pub customer_location: Option<String>,
    pub max_distance: u32,
}

impl Default for BrowseFilter {
    fn default() -> Self {
        Self {
            search: None,
            customer_location: None,
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }
}

/// Products that match the search term and are deliverable to the customer.
#[must_use]
pub fn browse<'a>(
    products: &'a [CatalogProduct],
    filter: &BrowseFilter,
) -> Vec<&'a CatalogProduct> {
    let search = filter.search.as_deref().unwrap_or("");
    let customer_location = filter.customer_location.as_deref().unwrap_or("");

    products
        .iter()
        .filter(|p| p.matches_search(search))
        .filter(|p| {
            is_within_delivery_range(
                p.effective_location(),
                customer_location,
                filter.max_distance,
            )
        })
        .collect()
}
