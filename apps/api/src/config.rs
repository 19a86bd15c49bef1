use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_DATA_PATH: &str = "portfolio_data.json";
const DEFAULT_PORT: u16 = 5000;

/// Application configuration loaded from environment variables.
/// Nothing is required: without `ANTHROPIC_API_KEY` the service answers from rules only.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{raw}'"))?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            data_path: lookup("PORTFOLIO_DATA_PATH")
                .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string())
                .into(),
            anthropic_api_key: lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()),
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
