use std::env;

use crate::planner::DEFAULT_DBOX_VARIANT;

/// Config holds all application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub plan_workers: usize,
    pub uplink_speed_gbps: u32,
    pub default_dbox_variant: String,
}

impl Config {
    /// Load configuration from environment variables with defaults.
    /// A `.env` file in the working directory is read first when present.
    pub fn load() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        let default_workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        Self {
            listen_addr: get_env("LISTEN_ADDR", "0.0.0.0:8080"),
            plan_workers: get_env("PLAN_WORKERS", &default_workers.to_string())
                .parse()
                .unwrap_or(default_workers),
            uplink_speed_gbps: get_env("UPLINK_SPEED_GBPS", "400")
                .parse()
                .unwrap_or(400),
            default_dbox_variant: get_env("DEFAULT_DBOX_VARIANT", DEFAULT_DBOX_VARIANT),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            plan_workers: 4,
            uplink_speed_gbps: 400,
            default_dbox_variant: DEFAULT_DBOX_VARIANT.to_string(),
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
