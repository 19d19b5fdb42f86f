//! Catalog browsing, product listings and farmer profile updates.

use std::path::Path;

use clap::Subcommand;
use rust_decimal::Decimal;
use vegmart_core::{browse, BrowseFilter, CatalogProduct, PreferenceStore, DEFAULT_MAX_DISTANCE};
use vegmart_db::{
    DbError, FarmerProfile, NewProduct, ProductRow, ProductUpdate, DEFAULT_CATALOG_LIMIT,
    MAX_CATALOG_LIMIT,
};

/// Sub-commands available under `products`.
#[derive(Debug, Subcommand)]
pub enum ProductsCommands {
    /// List available products deliverable to a location
    Browse {
        /// Customer location; defaults to the saved preference
        #[arg(long)]
        location: Option<String>,
        /// Match product name, farmer name or location
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = DEFAULT_MAX_DISTANCE)]
        max_distance: u32,
        /// Newest available products to load before filtering
        #[arg(
            long,
            default_value_t = DEFAULT_CATALOG_LIMIT,
            value_parser = clap::value_parser!(i64).range(1..=MAX_CATALOG_LIMIT)
        )]
        limit: i64,
    },
    /// List a new product for a farmer
    Add {
        #[arg(long)]
        farmer_email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long, default_value_t = 0)]
        stock: i32,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        margin: Option<Decimal>,
        /// Where the product is offered; defaults to the farmer's location
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        /// List the product as unavailable
        #[arg(long)]
        hidden: bool,
    },
    /// Edit an existing product; omitted fields keep their value
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        stock: Option<i32>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        margin: Option<Decimal>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        available: Option<bool>,
    },
}

/// Sub-commands available under `farmer`.
#[derive(Debug, Subcommand)]
pub enum FarmerCommands {
    /// Overwrite a farmer's location
    SetLocation {
        #[arg(long)]
        email: String,
        #[arg(long)]
        location: String,
    },
    /// Create or overwrite a farmer profile
    Upsert {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        specialization: Option<String>,
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i32).range(0..))]
        experience_years: i32,
    },
}

pub(crate) async fn run_products(
    command: ProductsCommands,
    preference_path: &Path,
) -> anyhow::Result<()> {
    match command {
        ProductsCommands::Browse {
            location,
            search,
            max_distance,
            limit,
        } => {
            let customer_location = match location {
                Some(location) => location,
                None => PreferenceStore::new(preference_path).load()?,
            };
            let filter = BrowseFilter {
                search,
                customer_location: Some(customer_location),
                max_distance,
            };
            run_browse(&filter, limit).await
        }
        ProductsCommands::Add {
            farmer_email,
            name,
            price,
            stock,
            category,
            margin,
            location,
            image_url,
            hidden,
        } => {
            let product = NewProduct {
                farmer_email,
                name,
                category,
                price,
                margin_percentage: margin,
                stock,
                is_available: !hidden,
                image_url,
                location,
            };
            let config = vegmart_core::load_app_config()?;
            let pool = vegmart_db::connect_configured_pool(&config).await?;
            let row = vegmart_db::create_product(&pool, &product)
                .await
                .map_err(|e| describe_product_error(e, &product.farmer_email))?;
            print_stored_product("listed", &row);
            Ok(())
        }
        ProductsCommands::Update {
            id,
            name,
            price,
            stock,
            category,
            margin,
            location,
            image_url,
            available,
        } => {
            let update = ProductUpdate {
                name,
                category,
                price,
                margin_percentage: margin,
                stock,
                is_available: available,
                image_url,
                location,
            };
            let config = vegmart_core::load_app_config()?;
            let pool = vegmart_db::connect_configured_pool(&config).await?;
            let row = match vegmart_db::update_product(&pool, id, &update).await {
                Ok(row) => row,
                Err(DbError::NotFound) => anyhow::bail!("product {id} not found"),
                Err(e) => return Err(e.into()),
            };
            print_stored_product("updated", &row);
            Ok(())
        }
    }
}

async fn run_browse(filter: &BrowseFilter, limit: i64) -> anyhow::Result<()> {
    let config = vegmart_core::load_app_config()?;
    let pool = vegmart_db::connect_configured_pool(&config).await?;
    let products: Vec<CatalogProduct> = vegmart_db::list_available_products(&pool, limit)
        .await?
        .into_iter()
        .map(CatalogProduct::from)
        .collect();

    let matches = browse(&products, filter);
    let customer_location = filter.customer_location.as_deref().unwrap_or("");

    if matches.is_empty() {
        if customer_location.is_empty() {
            println!("no products available");
        } else {
            println!("no products deliver to {customer_location}");
        }
        return Ok(());
    }

    let header = format!(
        "{:<24}{:<12}{:<8}{:<20}LOCATION",
        "PRODUCT", "PRICE", "STOCK", "FARMER"
    );
    println!("{header}");
    for product in matches {
        let stock = if product.in_stock() {
            product.stock.to_string()
        } else {
            "out".to_string()
        };
        println!(
            "{:<24}{:<12}{:<8}{:<20}{}",
            product.name,
            product.final_price(),
            stock,
            product.farmer_name(),
            product.effective_location()
        );
    }

    Ok(())
}

fn describe_product_error(error: DbError, farmer_email: &str) -> anyhow::Error {
    match error {
        DbError::NotFound => anyhow::anyhow!("farmer '{farmer_email}' not found"),
        DbError::MissingLocation { .. } => anyhow::anyhow!(
            "{error}; run `farmer set-location` or pass --location"
        ),
        other => other.into(),
    }
}

fn print_stored_product(verb: &str, row: &ProductRow) {
    println!(
        "{verb} #{} {} at {}",
        row.id,
        row.name,
        row.location.as_deref().unwrap_or("(no location)")
    );
}

pub(crate) async fn run_farmer(command: FarmerCommands) -> anyhow::Result<()> {
    match command {
        FarmerCommands::SetLocation { email, location } => {
            if location.trim().is_empty() {
                anyhow::bail!("location must be non-empty");
            }

            let config = vegmart_core::load_app_config()?;
            let pool = vegmart_db::connect_configured_pool(&config).await?;
            let row = match vegmart_db::set_farmer_location(&pool, &email, &location).await {
                Ok(row) => row,
                Err(DbError::NotFound) => anyhow::bail!("farmer '{email}' not found"),
                Err(e) => return Err(e.into()),
            };

            println!(
                "{} location set to {}",
                row.email,
                row.location.as_deref().unwrap_or("")
            );
        }
        FarmerCommands::Upsert {
            email,
            name,
            location,
            phone,
            bio,
            specialization,
            experience_years,
        } => {
            if name.trim().is_empty() {
                anyhow::bail!("name must be non-empty");
            }

            let profile = FarmerProfile {
                email,
                name,
                location,
                phone,
                bio,
                specialization,
                experience_years,
            };
            let config = vegmart_core::load_app_config()?;
            let pool = vegmart_db::connect_configured_pool(&config).await?;
            let row = vegmart_db::upsert_farmer_profile(&pool, &profile).await?;

            println!(
                "{} <{}> saved, location {}",
                row.name,
                row.email,
                row.location.as_deref().unwrap_or("(none)")
            );
        }
    }

    println!("run `location suggest --live` or POST /api/v1/locations/refresh to pick it up");
    Ok(())
}
