//! Offline unit tests for vegmart-db pool configuration and row types.
//! These tests do not require a live database connection.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use rust_decimal::Decimal;
use vegmart_core::{AppConfig, CatalogProduct, Environment};
use vegmart_db::{CatalogProductRow, PoolConfig};

fn app_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        reference_locations_path: None,
        max_delivery_distance: 100,
        location_refresh_cron: None,
        location_refresh_min_interval_secs: 30,
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
    }
}

fn catalog_row(farmer: Option<(&str, &str, Option<&str>)>) -> CatalogProductRow {
    CatalogProductRow {
        id: 7,
        name: "Leafy Greens".to_string(),
        category: Some("Fresh".to_string()),
        price: Decimal::new(4000, 2),
        margin_percentage: Some(Decimal::new(10, 0)),
        stock: 5,
        image_url: None,
        location: None,
        created_at: chrono::Utc::now(),
        farmer_email: farmer.map(|(email, _, _)| email.to_string()),
        farmer_name: farmer.map(|(_, name, _)| name.to_string()),
        farmer_location: farmer.and_then(|(_, _, location)| location.map(str::to_string)),
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let pool_config = PoolConfig::from_app_config(&app_config());
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn catalog_row_with_farmer_inherits_farmer_location() {
    let row = catalog_row(Some((
        "raj@example.com",
        "Raj Patel",
        Some("Ratnagiri, Maharashtra"),
    )));
    let product = CatalogProduct::from(row);

    assert_eq!(product.farmer_name(), "Raj Patel");
    assert_eq!(product.effective_location(), "Ratnagiri, Maharashtra");
    assert_eq!(product.final_price(), Decimal::new(4400, 2));
}

#[test]
fn catalog_row_without_farmer_has_no_location() {
    let product = CatalogProduct::from(catalog_row(None));

    assert!(product.farmer.is_none());
    assert_eq!(product.effective_location(), "");
}
