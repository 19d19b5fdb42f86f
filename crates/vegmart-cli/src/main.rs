mod catalog;
mod location;
mod preference;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::catalog::{FarmerCommands, ProductsCommands};
use crate::location::LocationCommands;
use crate::preference::PreferenceCommands;

#[derive(Debug, Parser)]
#[command(name = "vegmart-cli")]
#[command(about = "Vegmart marketplace command line interface")]
struct Cli {
    /// File holding the saved customer location
    #[arg(
        long,
        global = true,
        env = "VEGMART_PREFERENCE_PATH",
        default_value = "./.vegmart/customer-location.json"
    )]
    preference_path: PathBuf,

    /// YAML file replacing the built-in reference locations
    #[arg(long, global = true, env = "VEGMART_REFERENCE_LOCATIONS_PATH")]
    reference_locations: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Location matching and autocomplete tools
    Location {
        #[command(subcommand)]
        command: LocationCommands,
    },
    /// Saved customer location
    Preference {
        #[command(subcommand)]
        command: PreferenceCommands,
    },
    /// Storefront catalog
    Products {
        #[command(subcommand)]
        command: ProductsCommands,
    },
    /// Farmer profile maintenance
    Farmer {
        #[command(subcommand)]
        command: FarmerCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
    /// Insert a demo farmer and products
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(std::env::var("VEGMART_LOG_LEVEL").unwrap_or_else(|_| "warn".into()))
    })?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Db { command }) => run_db(command).await?,
        Some(Commands::Location { command }) => {
            location::run(command, cli.reference_locations.as_deref()).await?;
        }
        Some(Commands::Preference { command }) => {
            preference::run(command, &cli.preference_path)?;
        }
        Some(Commands::Products { command }) => {
            catalog::run_products(command, &cli.preference_path).await?;
        }
        Some(Commands::Farmer { command }) => catalog::run_farmer(command).await?,
        None => println!("vegmart-cli ready; run with --help for commands"),
    }

    Ok(())
}

async fn run_db(command: DbCommands) -> anyhow::Result<()> {
    let config = vegmart_core::load_app_config()?;
    let pool = vegmart_db::connect_configured_pool(&config).await?;

    match command {
        DbCommands::Ping => {
            vegmart_db::ping(&pool).await?;
            println!("database ok");
        }
        DbCommands::Migrate => {
            let applied = vegmart_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
        DbCommands::Seed => {
            if !config.allows_demo_seed() {
                anyhow::bail!("refusing to seed demo data when VEGMART_ENV={}", config.env);
            }
            let count = vegmart_db::seed_demo_catalog(&pool).await?;
            println!("seeded {count} demo product(s)");
        }
    }

    Ok(())
}
