//! Process configuration from environment variables.

use std::path::PathBuf;

/// Runtime configuration for the API binary.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address (`STOCKFORGE_ADDR`).
    pub bind_addr: String,
    /// Path of the JSON document file (`STOCKFORGE_DATA`).
    pub data_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("STOCKFORGE_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let data_path = std::env::var("STOCKFORGE_DATA")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                tracing::info!("STOCKFORGE_DATA not set; using ./stockforge-data.json");
                PathBuf::from("stockforge-data.json")
            });

        Self {
            bind_addr,
            data_path,
        }
    }
}
