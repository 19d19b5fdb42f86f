use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Optional YAML file replacing the built-in reference locations.
    pub reference_locations_path: Option<PathBuf>,
    pub max_delivery_distance: u32,
    /// Cron expression for periodic observed-location refresh; `None` disables it.
    pub location_refresh_cron: Option<String>,
    /// Minimum gap between two on-demand refreshes; `0` disables the check.
    pub location_refresh_min_interval_secs: u64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("reference_locations_path", &self.reference_locations_path)
            .field("max_delivery_distance", &self.max_delivery_distance)
            .field("location_refresh_cron", &self.location_refresh_cron)
            .field(
                "location_refresh_min_interval_secs",
                &self.location_refresh_min_interval_secs,
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}

impl AppConfig {
    #[must_use]
    pub fn location_refresh_min_interval(&self) -> Duration {
        Duration::from_secs(self.location_refresh_min_interval_secs)
    }

    /// Demo data must never be written to a production database.
    #[must_use]
    pub fn allows_demo_seed(&self) -> bool {
        self.env != Environment::Production
    }
}
