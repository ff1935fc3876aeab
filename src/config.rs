use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use lazy_static::lazy_static;

/// Tunables for the plan loader. Everything has a sensible default so the
/// crate works without any config file on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Static plan resource fetched at startup.
    pub plan_url: String,
    /// Bound on the first fetch attempt; the retry attempt is unbounded.
    pub fetch_timeout_ms: u64,
    /// How long a cached plan stays valid.
    pub cache_ttl_days: i64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            plan_url: "http://localhost:8080/training-schedules/current/training.json".to_string(),
            fetch_timeout_ms: 3_000,
            cache_ttl_days: 7,
        }
    }
}

impl TrackerConfig {
    pub fn cache_ttl_millis(&self) -> i64 {
        self.cache_ttl_days * 24 * 60 * 60 * 1_000
    }
}

fn get_config_path() -> PathBuf {
    let mut dir = crate::storage::data_dir();
    dir.push("config.toml");
    dir
}

fn load_config_internal() -> TrackerConfig {
    let config_path = get_config_path();

    // Try to load from config file
    if let Ok(content) = fs::read_to_string(&config_path) {
        match toml::from_str::<TrackerConfig>(&content) {
            Ok(config) => {
                tracing::info!(path = ?config_path, "Loaded tracker config");
                return config;
            }
            Err(e) => {
                tracing::warn!(path = ?config_path, error = %e, "Failed to parse config.toml, using defaults");
            }
        }
    }

    // Return defaults if file doesn't exist or parsing fails
    TrackerConfig::default()
}

lazy_static! {
    static ref TRACKER_CONFIG: TrackerConfig = load_config_internal();
}

/// Get the cached tracker configuration (loaded once at startup)
pub fn get_config() -> &'static TrackerConfig {
    &TRACKER_CONFIG
}
