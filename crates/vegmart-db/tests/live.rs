//! Live integration tests for vegmart-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/vegmart-db/`), so `"../../migrations"` resolves to the workspace
//! migration directory.

use rust_decimal::Decimal;
use vegmart_core::{fetch_observed_locations, CatalogProduct, RefreshOutcome, SuggestionIndex};
use vegmart_db::{
    create_product, get_farmer_by_email, list_available_products, list_farmer_locations,
    list_product_locations, seed_demo_catalog, set_farmer_location, update_product,
    upsert_farmer_profile, DbError, FarmerProfile, NewProduct, PgLocationSource, ProductUpdate,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn insert_farmer(pool: &sqlx::PgPool, email: &str, location: Option<&str>) {
    sqlx::query("INSERT INTO farmers (email, name, location) VALUES ($1, $2, $3)")
        .bind(email)
        .bind(format!("Farmer {email}"))
        .bind(location)
        .execute(pool)
        .await
        .unwrap_or_else(|e| panic!("insert_farmer failed for '{email}': {e}"));
}

async fn insert_product(
    pool: &sqlx::PgPool,
    farmer_email: Option<&str>,
    name: &str,
    location: Option<&str>,
    is_available: bool,
) {
    sqlx::query(
        "INSERT INTO products (farmer_email, name, price, stock, is_available, location) \
         VALUES ($1, $2, 10.00, 3, $3, $4)",
    )
    .bind(farmer_email)
    .bind(name)
    .bind(is_available)
    .bind(location)
    .execute(pool)
    .await
    .unwrap_or_else(|e| panic!("insert_product failed for '{name}': {e}"));
}

// ---------------------------------------------------------------------------
// locations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn farmer_locations_are_distinct_and_non_empty(pool: sqlx::PgPool) {
    insert_farmer(&pool, "a@example.com", Some("Pune, Maharashtra")).await;
    insert_farmer(&pool, "b@example.com", Some("Pune, Maharashtra")).await;
    insert_farmer(&pool, "c@example.com", Some("")).await;
    insert_farmer(&pool, "d@example.com", None).await;

    let locations = list_farmer_locations(&pool).await.expect("query");
    assert_eq!(locations, vec!["Pune, Maharashtra".to_string()]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn product_locations_skip_null_and_empty(pool: sqlx::PgPool) {
    insert_product(&pool, None, "Okra", Some("Surat, Gujarat"), true).await;
    insert_product(&pool, None, "Beans", Some(""), true).await;
    insert_product(&pool, None, "Peas", None, true).await;

    let locations = list_product_locations(&pool).await.expect("query");
    assert_eq!(locations, vec!["Surat, Gujarat".to_string()]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn pg_source_feeds_suggestion_index(pool: sqlx::PgPool) {
    insert_farmer(&pool, "a@example.com", Some("Ratnagiri, Maharashtra")).await;
    insert_product(&pool, None, "Okra", Some("Ratnagiri, Maharashtra"), true).await;
    insert_product(&pool, None, "Beans", Some("Surat, Gujarat"), true).await;

    let source = PgLocationSource::new(pool);
    let mut observed = fetch_observed_locations(&source).await.expect("fetch");
    observed.sort();
    assert_eq!(
        observed,
        vec![
            "Ratnagiri, Maharashtra".to_string(),
            "Surat, Gujarat".to_string()
        ]
    );

    let mut index = SuggestionIndex::with_builtin_reference();
    let outcome = index.refresh(&source).await;
    assert_eq!(outcome, RefreshOutcome::Refreshed { count: 2 });

    let suggestions = index.suggest("ratnagiri");
    assert_eq!(suggestions.len(), 1);
    assert!(suggestions[0].from_observed);
}

// ---------------------------------------------------------------------------
// farmers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn set_farmer_location_trims_and_overwrites(pool: sqlx::PgPool) {
    insert_farmer(&pool, "a@example.com", Some("Pune, Maharashtra")).await;

    let row = set_farmer_location(&pool, "a@example.com", "  Kochi, Kerala ")
        .await
        .expect("update");
    assert_eq!(row.location.as_deref(), Some("Kochi, Kerala"));

    let reloaded = get_farmer_by_email(&pool, "a@example.com")
        .await
        .expect("query")
        .expect("farmer exists");
    assert_eq!(reloaded.location.as_deref(), Some("Kochi, Kerala"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn set_farmer_location_blank_clears(pool: sqlx::PgPool) {
    insert_farmer(&pool, "a@example.com", Some("Pune, Maharashtra")).await;

    let row = set_farmer_location(&pool, "a@example.com", "   ")
        .await
        .expect("update");
    assert!(row.location.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn set_farmer_location_unknown_email_is_not_found(pool: sqlx::PgPool) {
    let err = set_farmer_location(&pool, "nobody@example.com", "Pune, Maharashtra")
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound), "got: {err:?}");
}

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_farmer_profile_creates_then_updates(pool: sqlx::PgPool) {
    let mut profile = FarmerProfile {
        email: "new@example.com".to_string(),
        name: "Meena Iyer".to_string(),
        location: Some(" Chennai, Tamil Nadu ".to_string()),
        phone: Some("   ".to_string()),
        experience_years: 4,
        ..FarmerProfile::default()
    };

    let created = upsert_farmer_profile(&pool, &profile).await.expect("insert");
    assert_eq!(created.location.as_deref(), Some("Chennai, Tamil Nadu"));
    assert!(created.phone.is_none());

    profile.location = Some("Madurai, Tamil Nadu".to_string());
    let updated = upsert_farmer_profile(&pool, &profile).await.expect("update");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.location.as_deref(), Some("Madurai, Tamil Nadu"));

    let locations = list_farmer_locations(&pool).await.expect("query");
    assert_eq!(locations, vec!["Madurai, Tamil Nadu".to_string()]);
}

// ---------------------------------------------------------------------------
// products
// ---------------------------------------------------------------------------

fn new_product(farmer_email: &str, name: &str, location: Option<&str>) -> NewProduct {
    NewProduct {
        farmer_email: farmer_email.to_string(),
        name: name.to_string(),
        category: Some("Fresh".to_string()),
        price: Decimal::new(5000, 2),
        margin_percentage: Some(Decimal::new(10, 0)),
        stock: 12,
        is_available: true,
        image_url: None,
        location: location.map(str::to_string),
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn create_product_trims_own_location(pool: sqlx::PgPool) {
    insert_farmer(&pool, "a@example.com", Some("Ratnagiri, Maharashtra")).await;

    let row = create_product(
        &pool,
        &new_product("a@example.com", "Okra", Some("  Pune, Maharashtra ")),
    )
    .await
    .expect("create");

    assert_eq!(row.location.as_deref(), Some("Pune, Maharashtra"));
    assert_eq!(row.farmer_email.as_deref(), Some("a@example.com"));
    assert_eq!(
        list_product_locations(&pool).await.expect("query"),
        vec!["Pune, Maharashtra".to_string()]
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn create_product_defaults_to_farmer_location(pool: sqlx::PgPool) {
    insert_farmer(&pool, "a@example.com", Some("Ratnagiri, Maharashtra")).await;

    let row = create_product(&pool, &new_product("a@example.com", "Okra", Some("   ")))
        .await
        .expect("create");
    assert_eq!(row.location.as_deref(), Some("Ratnagiri, Maharashtra"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn create_product_requires_some_location(pool: sqlx::PgPool) {
    insert_farmer(&pool, "a@example.com", None).await;

    let err = create_product(&pool, &new_product("a@example.com", "Okra", None))
        .await
        .unwrap_err();
    assert!(
        matches!(
            err,
            DbError::MissingLocation { ref farmer_email } if farmer_email == "a@example.com"
        ),
        "got: {err:?}"
    );

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await
        .expect("count");
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn create_product_for_unknown_farmer_is_not_found(pool: sqlx::PgPool) {
    let err = create_product(
        &pool,
        &new_product("ghost@example.com", "Okra", Some("Pune, Maharashtra")),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DbError::NotFound), "got: {err:?}");
}

#[sqlx::test(migrations = "../../migrations")]
async fn create_product_rejects_negative_stock(pool: sqlx::PgPool) {
    insert_farmer(&pool, "a@example.com", Some("Pune, Maharashtra")).await;
    let mut product = new_product("a@example.com", "Okra", None);
    product.stock = -1;

    let err = create_product(&pool, &product).await.unwrap_err();
    assert!(matches!(err, DbError::InvalidProduct(_)), "got: {err:?}");
}

#[sqlx::test(migrations = "../../migrations")]
async fn update_product_changes_only_given_fields(pool: sqlx::PgPool) {
    insert_farmer(&pool, "a@example.com", Some("Ratnagiri, Maharashtra")).await;
    let created = create_product(&pool, &new_product("a@example.com", "Okra", None))
        .await
        .expect("create");

    let update = ProductUpdate {
        location: Some(" Nashik, Maharashtra ".to_string()),
        stock: Some(0),
        ..ProductUpdate::default()
    };
    let updated = update_product(&pool, created.id, &update)
        .await
        .expect("update");

    assert_eq!(updated.location.as_deref(), Some("Nashik, Maharashtra"));
    assert_eq!(updated.stock, 0);
    assert_eq!(updated.name, "Okra");
    assert_eq!(updated.price, created.price);
}

#[sqlx::test(migrations = "../../migrations")]
async fn update_product_rejects_blank_location(pool: sqlx::PgPool) {
    insert_farmer(&pool, "a@example.com", Some("Ratnagiri, Maharashtra")).await;
    let created = create_product(&pool, &new_product("a@example.com", "Okra", None))
        .await
        .expect("create");

    let update = ProductUpdate {
        location: Some("  ".to_string()),
        ..ProductUpdate::default()
    };
    let err = update_product(&pool, created.id, &update).await.unwrap_err();
    assert!(matches!(err, DbError::InvalidProduct(_)), "got: {err:?}");
}

#[sqlx::test(migrations = "../../migrations")]
async fn update_unknown_product_is_not_found(pool: sqlx::PgPool) {
    let err = update_product(&pool, 999, &ProductUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound), "got: {err:?}");
}

#[sqlx::test(migrations = "../../migrations")]
async fn available_products_join_farmer_and_skip_unavailable(pool: sqlx::PgPool) {
    insert_farmer(&pool, "a@example.com", Some("Ratnagiri, Maharashtra")).await;
    insert_product(&pool, Some("a@example.com"), "Okra", None, true).await;
    insert_product(&pool, Some("a@example.com"), "Beans", None, false).await;
    insert_product(&pool, Some("ghost@example.com"), "Peas", None, true).await;

    let rows = list_available_products(&pool, 20).await.expect("query");
    assert_eq!(rows.len(), 2);

    let products: Vec<CatalogProduct> = rows.into_iter().map(CatalogProduct::from).collect();
    let okra = products.iter().find(|p| p.name == "Okra").expect("okra");
    assert_eq!(okra.effective_location(), "Ratnagiri, Maharashtra");
    assert_eq!(okra.price, Decimal::new(1000, 2));

    let peas = products.iter().find(|p| p.name == "Peas").expect("peas");
    assert!(peas.farmer.is_none());
    assert_eq!(peas.effective_location(), "");
}

#[sqlx::test(migrations = "../../migrations")]
async fn available_products_respect_limit(pool: sqlx::PgPool) {
    for name in ["A", "B", "C"] {
        insert_product(&pool, None, name, None, true).await;
    }

    let rows = list_available_products(&pool, 2).await.expect("query");
    assert_eq!(rows.len(), 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn seed_demo_catalog_is_idempotent(pool: sqlx::PgPool) {
    let first = seed_demo_catalog(&pool).await.expect("first seed");
    let second = seed_demo_catalog(&pool).await.expect("second seed");
    assert_eq!(first, second);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await
        .expect("count");
    assert_eq!(count, i64::try_from(first).unwrap());

    let farmer_locations = list_farmer_locations(&pool).await.expect("query");
    assert_eq!(farmer_locations, vec!["Ratnagiri, Maharashtra".to_string()]);
}
