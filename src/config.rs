use crate::stats::DEFAULT_BUCKET_WIDTH;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_STAGE_API_URL: &str = "https://stage-api.klimatkollen.se/api";
pub const DEFAULT_PROD_API_URL: &str = "https://api.klimatkollen.se/api";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub stage_api_url: String,
    pub prod_api_url: String,
    /// Local snapshot file used instead of the staging API when set.
    pub stage_fixture_path: Option<PathBuf>,
    /// Local snapshot file used instead of the production API when set.
    pub prod_fixture_path: Option<PathBuf>,
    pub request_timeout_secs: u64,
    pub snapshot_cache_ttl_secs: u64,
    pub histogram_bucket_width: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            stage_api_url: DEFAULT_STAGE_API_URL.to_string(),
            prod_api_url: DEFAULT_PROD_API_URL.to_string(),
            stage_fixture_path: None,
            prod_fixture_path: None,
            request_timeout_secs: 30,
            snapshot_cache_ttl_secs: 300,
            histogram_bucket_width: DEFAULT_BUCKET_WIDTH,
        }
    }
}

fn base_url(var: &str, default: &str) -> anyhow::Result<String> {
    let url = std::env::var(var).unwrap_or_else(|_| default.to_string());
    let url = url.trim().trim_end_matches('/').to_string();
    if url.is_empty() {
        anyhow::bail!("{} cannot be empty", var);
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("{} must start with http:// or https://", var);
    }
    Ok(url)
}

fn optional_path(var: &str) -> Option<PathBuf> {
    std::env::var(var)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

fn number<T: std::str::FromStr>(var: &str, default: &str) -> anyhow::Result<T> {
    std::env::var(var)
        .unwrap_or_else(|_| default.to_string())
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("{} must be a valid number", var))
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: number("PORT", "3000")
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            stage_api_url: base_url("STAGE_API_URL", DEFAULT_STAGE_API_URL)?,
            prod_api_url: base_url("PROD_API_URL", DEFAULT_PROD_API_URL)?,
            stage_fixture_path: optional_path("STAGE_FIXTURE_PATH"),
            prod_fixture_path: optional_path("PROD_FIXTURE_PATH"),
            request_timeout_secs: number("REQUEST_TIMEOUT_SECS", "30").and_then(|secs: u64| {
                if secs == 0 {
                    anyhow::bail!("REQUEST_TIMEOUT_SECS must be greater than 0");
                }
                Ok(secs)
            })?,
            snapshot_cache_ttl_secs: number("SNAPSHOT_CACHE_TTL_SECS", "300")?,
            histogram_bucket_width: number("HISTOGRAM_BUCKET_WIDTH", "5").and_then(
                |width: u8| {
                    if width == 0 || width > 100 {
                        anyhow::bail!("HISTOGRAM_BUCKET_WIDTH must be between 1 and 100");
                    }
                    Ok(width)
                },
            )?,
        };

        tracing::info!("Configuration loaded successfully");
        match &config.stage_fixture_path {
            Some(path) => tracing::info!("Staging snapshot from fixture: {}", path.display()),
            None => tracing::debug!("Staging API URL: {}", config.stage_api_url),
        }
        match &config.prod_fixture_path {
            Some(path) => tracing::info!("Production snapshot from fixture: {}", path.display()),
            None => tracing::debug!("Production API URL: {}", config.prod_api_url),
        }
        tracing::debug!("Snapshot cache TTL: {}s", config.snapshot_cache_ttl_secs);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}
