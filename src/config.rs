use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_addr: String,
    pub database_path: String,
    pub user_agent: String,
    pub fetch_timeout_seconds: u64,
    pub fetch_max_retries: u32,
}

impl Config {
    /// Defaults overridable through `PRICE_TRACKER_*` environment variables.
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("bind_addr", "127.0.0.1:5000")?
            .set_default("database_path", "price_tracker.db")?
            .set_default(
                "user_agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/86.0.4240.198 Safari/537.36 OPR/72.0.3815.378",
            )?
            .set_default("fetch_timeout_seconds", 25u64)?
            .set_default("fetch_max_retries", 3u64)?
            .add_source(config::Environment::with_prefix("PRICE_TRACKER"))
            .build()
            .context("Failed to build configuration")?;

        settings
            .try_deserialize()
            .context("Invalid configuration values")
    }
}
