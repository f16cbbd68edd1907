use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default or is optional; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Used in PDF file names and PDF metadata.
    pub app_name: String,
    /// Origin and path that share tokens are appended to.
    pub share_base_url: String,
    /// Entitlement persistence; in-memory when unset.
    pub redis_url: Option<String>,
    /// Generation backend; generation endpoints answer 503 when unset.
    pub anthropic_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        Ok(Config {
            port,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            app_name: optional_env("APP_NAME").unwrap_or_else(|| "CareerKit".to_string()),
            share_base_url: optional_env("SHARE_BASE_URL")
                .unwrap_or_else(|| format!("http://localhost:{port}/view")),
            redis_url: optional_env("REDIS_URL"),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
        })
    }

    /// Defaults without reading the environment; used by tests.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            app_name: "CareerKit".to_string(),
            share_base_url: "http://localhost:8080/view".to_string(),
            redis_url: None,
            anthropic_api_key: None,
        }
    }
}

/// Reads `key`, treating an empty value like an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
