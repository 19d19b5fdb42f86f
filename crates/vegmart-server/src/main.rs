mod api;
mod location_cache;
mod middleware;
mod scheduler;

use tracing_subscriber::EnvFilter;
use vegmart_core::SuggestionIndex;
use vegmart_db::PgLocationSource;

use crate::{
    api::{build_app, AppState},
    location_cache::{LocationCache, RefreshThrottle},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = vegmart_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool = vegmart_db::connect_configured_pool(&config).await?;
    vegmart_db::run_migrations(&pool).await?;

    let reference = vegmart_core::resolve_reference_locations(&config)?;
    let locations = LocationCache::new(SuggestionIndex::new(reference));
    locations
        .refresh(&PgLocationSource::new(pool.clone()))
        .await;

    let _scheduler = scheduler::build_scheduler(
        pool.clone(),
        locations.clone(),
        config.location_refresh_cron.as_deref(),
    )
    .await?;

    let app = build_app(AppState {
        pool,
        locations,
        refresh_throttle: RefreshThrottle::new(config.location_refresh_min_interval()),
        max_delivery_distance: config.max_delivery_distance,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        env = %config.env,
        "vegmart-server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
