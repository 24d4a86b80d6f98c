use crate::cache_validator::ValidatedSnapshot;
use crate::circuit_breaker::{create_upstream_circuit_breaker, UpstreamBreaker};
use crate::config::Config;
use crate::errors::{AppError, ResultExt};
use crate::models::{CompanyRecord, QualityReport};
use crate::report::build_report;
use moka::future::Cache;
use reqwest::Client;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Which side of the comparison a snapshot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Stage,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Stage => "stage",
            Environment::Production => "prod",
        }
    }

    fn cache_key(self) -> String {
        format!("snapshot:{}", self.as_str())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client for one environment's company API.
#[derive(Clone)]
pub struct SnapshotClient {
    client: Client,
    base_url: String,
    environment: Environment,
    breaker: Arc<UpstreamBreaker>,
}

impl SnapshotClient {
    /// Creates a new `SnapshotClient`.
    ///
    /// # Arguments
    ///
    /// * `environment` - The side this client fetches.
    /// * `base_url` - Base URL of the company API, without the `/companies` suffix.
    /// * `timeout` - Per-request timeout.
    pub fn new(
        environment: Environment,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            AppError::ExternalApiError(format!(
                "Failed to create {} API client: {}",
                environment, e
            ))
        })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            environment,
            breaker: Arc::new(create_upstream_circuit_breaker()),
        })
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    fn companies_url(&self) -> String {
        format!("{}/companies", self.base_url)
    }

    /// Fetches the company list, returning the raw body alongside the decoded records.
    ///
    /// Transport errors, non-2xx statuses and undecodable bodies all count as
    /// breaker failures.
    pub async fn fetch_snapshot(&self) -> Result<(String, Vec<CompanyRecord>), AppError> {
        if !self.breaker.is_call_permitted() {
            tracing::warn!("{} API circuit open, failing fast", self.environment);
            return Err(AppError::ExternalApiError(format!(
                "{} API temporarily unavailable (circuit open)",
                self.environment
            )));
        }

        let result = match self.request_companies().await {
            Ok(body) => self.decode(&body).map(|companies| (body, companies)),
            Err(e) => Err(e),
        };
        match &result {
            Ok(_) => self.breaker.on_success(),
            Err(_) => self.breaker.on_error(),
        }
        result
    }

    fn decode(&self, body: &str) -> Result<Vec<CompanyRecord>, AppError> {
        parse_snapshot(body).map_err(|e| {
            tracing::error!("{} API returned an undecodable body: {}", self.environment, e);
            AppError::ExternalApiError(format!(
                "Failed to parse {} API response: {}",
                self.environment, e
            ))
        })
    }

    async fn request_companies(&self) -> Result<String, AppError> {
        let url = self.companies_url();
        tracing::info!("Fetching {} companies from {}", self.environment, url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            AppError::ExternalApiError(format!("{} API request failed: {}", self.environment, e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(
                "{} API returned error {}: {}",
                self.environment,
                status,
                error_text
            );
            return Err(AppError::ExternalApiError(format!(
                "{} API returned status {}: {}",
                self.environment, status, error_text
            )));
        }

        let body = response.text().await.map_err(|e| {
            AppError::ExternalApiError(format!(
                "Failed to read {} API response: {}",
                self.environment, e
            ))
        })?;

        Ok(body)
    }

    /// Fetches and decodes the company list.
    pub async fn fetch_companies(&self) -> Result<Vec<CompanyRecord>, AppError> {
        let (_, companies) = self.fetch_snapshot().await?;

        tracing::info!(
            "Fetched {} companies from {} API",
            companies.len(),
            self.environment
        );
        Ok(companies)
    }
}

/// Decodes a snapshot payload (a JSON array of companies).
pub fn parse_snapshot(raw: &str) -> Result<Vec<CompanyRecord>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Where a snapshot comes from.
#[derive(Clone)]
pub enum SnapshotSource {
    /// Live company API.
    Remote(SnapshotClient),
    /// Static JSON file holding an array of companies.
    Fixture {
        environment: Environment,
        path: PathBuf,
    },
}

impl SnapshotSource {
    pub fn from_config(config: &Config, environment: Environment) -> Result<Self, AppError> {
        let (fixture, url) = match environment {
            Environment::Stage => (&config.stage_fixture_path, &config.stage_api_url),
            Environment::Production => (&config.prod_fixture_path, &config.prod_api_url),
        };

        match fixture {
            Some(path) => Ok(SnapshotSource::Fixture {
                environment,
                path: path.clone(),
            }),
            None => SnapshotClient::new(
                environment,
                url.clone(),
                Duration::from_secs(config.request_timeout_secs),
            )
            .map(SnapshotSource::Remote),
        }
    }

    pub fn environment(&self) -> Environment {
        match self {
            SnapshotSource::Remote(client) => client.environment(),
            SnapshotSource::Fixture { environment, .. } => *environment,
        }
    }

    /// Loads the payload, returning the raw body and the decoded companies.
    ///
    /// Undecodable upstream bodies are `ExternalApiError`s; an undecodable
    /// fixture file is a `BadRequest`.
    pub async fn load(&self) -> Result<(String, Vec<CompanyRecord>), AppError> {
        match self {
            SnapshotSource::Remote(client) => client.fetch_snapshot().await,
            SnapshotSource::Fixture { environment, path } => {
                let raw = tokio::fs::read_to_string(path).await.with_context(|| {
                    format!("Reading snapshot fixture {}", path.display())
                })?;
                let companies = parse_snapshot(&raw)
                    .with_context(|| format!("Decoding {} snapshot", environment))?;
                Ok((raw, companies))
            }
        }
    }
}

/// Loads both snapshots (cached) and produces comparison reports.
#[derive(Clone)]
pub struct QualityService {
    stage: SnapshotSource,
    prod: SnapshotSource,
    snapshot_cache: Cache<String, String>,
    bucket_width: u8,
}

impl QualityService {
    pub fn new(
        stage: SnapshotSource,
        prod: SnapshotSource,
        cache_ttl: Duration,
        bucket_width: u8,
    ) -> Self {
        let snapshot_cache = Cache::builder()
            .time_to_live(cache_ttl)
            .max_capacity(16)
            .build();

        Self {
            stage,
            prod,
            snapshot_cache,
            bucket_width,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Ok(Self::new(
            SnapshotSource::from_config(config, Environment::Stage)?,
            SnapshotSource::from_config(config, Environment::Production)?,
            Duration::from_secs(config.snapshot_cache_ttl_secs),
            config.histogram_bucket_width,
        ))
    }

    fn source(&self, environment: Environment) -> &SnapshotSource {
        match environment {
            Environment::Stage => &self.stage,
            Environment::Production => &self.prod,
        }
    }

    /// Returns the company list of one environment, served from cache when possible.
    pub async fn snapshot(&self, environment: Environment) -> Result<Vec<CompanyRecord>, AppError> {
        let cache_key = environment.cache_key();

        if let Some(cached) = self.snapshot_cache.get(&cache_key).await {
            match ValidatedSnapshot::deserialize_and_validate(&cached) {
                Some(entry) => {
                    if let Ok(companies) = parse_snapshot(&entry.data) {
                        tracing::debug!(
                            "Snapshot cache HIT (validated) for {}, fetched at {}",
                            environment,
                            entry.fetched_at
                        );
                        return Ok(companies);
                    }
                }
                None => {
                    tracing::warn!(
                        "Snapshot cache validation failed for {}, reloading",
                        environment
                    );
                    self.snapshot_cache.invalidate(&cache_key).await;
                }
            }
        }

        tracing::info!("Snapshot cache MISS - loading {} snapshot", environment);
        let (raw, companies) = self.source(environment).load().await?;

        let entry = ValidatedSnapshot::new(environment.as_str(), raw);
        self.snapshot_cache
            .insert(cache_key, entry.serialize())
            .await;

        Ok(companies)
    }

    /// Loads both snapshots concurrently and builds the full report.
    pub async fn report(&self) -> Result<QualityReport, AppError> {
        let (stage, prod) = tokio::try_join!(
            self.snapshot(Environment::Stage),
            self.snapshot(Environment::Production)
        )?;

        tracing::info!(
            "Loaded {} staging and {} production companies",
            stage.len(),
            prod.len()
        );
        build_report(&stage, &prod, self.bucket_width)
    }

    /// Drops cached snapshots so the next report reloads both sides.
    pub async fn refresh(&self) {
        self.snapshot_cache.invalidate_all();
        self.snapshot_cache.run_pending_tasks().await;
        tracing::info!("Snapshot cache cleared");
    }

    #[cfg(test)]
    pub(crate) async fn poison_cache(&self, environment: Environment, value: String) {
        self.snapshot_cache
            .insert(environment.cache_key(), value)
            .await;
    }
}
