use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Missing required credentials fail startup, not individual calls.
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the generation provider (optimizer, outreach,
    /// preference extraction).
    pub openai_api_key: String,
    /// Credential for the search provider (job search, company lookup,
    /// interview prep).
    pub perplexity_api_key: String,
    /// Path of the persisted search-configuration file.
    pub search_config_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            perplexity_api_key: require_env("PERPLEXITY_API_KEY")?,
            search_config_path: std::env::var("SEARCH_CONFIG_PATH")
                .unwrap_or_else(|_| "search_configs.json".to_string())
                .into(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
