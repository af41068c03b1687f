// crates/geoform-core/src/client.rs

//! # Catalog Client
//!
//! Thin async HTTP client for the countrystatecity.in reference API. The
//! crate only ever *reads* from the API; authentication is a static key
//! attached as a request header on every call.

use crate::error::{GeoFormError, Result};
use crate::model::{City, Country, State};
use crate::traits::CatalogSource;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Base URL of the hosted reference API.
pub const DEFAULT_BASE_URL: &str = "https://api.countrystatecity.in/v1";

/// Header carrying the static API key.
pub const API_KEY_HEADER: &str = "X-CSCAPI-KEY";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_RETRIES: u32 = 2;

const COUNTRIES_PATH: &str = "countries";
const STATES_PATH: &str = "states";

fn states_of_path(iso2: &str) -> String {
    format!("countries/{iso2}/states")
}

fn cities_of_path(iso2: &str) -> String {
    format!("countries/{iso2}/cities")
}

fn cities_of_state_path(iso2: &str, state_code: &str) -> String {
    format!("countries/{iso2}/states/{state_code}/cities")
}

/// Configures and constructs a [`CscClient`].
#[derive(Debug, Clone)]
pub struct CscClientBuilder {
    base_url: String,
    api_key: String,
    timeout: Duration,
    retries: u32,
}

impl CscClientBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
        }
    }

    /// Point the client at a different host (useful for proxies and tests).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Per-request timeout. Requests never hang indefinitely.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// How many times a transient failure is retried before giving up.
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn build(self) -> Result<CscClient> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(GeoFormError::ClientBuild)?;
        Ok(CscClient {
            http,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            api_key: self.api_key,
            retries: self.retries,
        })
    }
}

/// Async client for the reference API, implementing [`CatalogSource`].
///
/// Transient failures (transport errors, 5xx statuses) are retried with a
/// short linear backoff; client-side statuses and decode failures surface
/// immediately as typed errors.
#[derive(Debug, Clone)]
pub struct CscClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    retries: u32,
}

impl CscClient {
    /// Client with default base URL, timeout and retry budget.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        CscClientBuilder::new(api_key).build()
    }

    /// Reads the API key from the `CSC_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let key = std::env::var("CSC_API_KEY").map_err(|_| GeoFormError::MissingApiKey)?;
        if key.trim().is_empty() {
            return Err(GeoFormError::MissingApiKey);
        }
        Self::new(key)
    }

    pub fn builder(api_key: impl Into<String>) -> CscClientBuilder {
        CscClientBuilder::new(api_key)
    }

    async fn get_once<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|source| GeoFormError::Transport {
                endpoint: path.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeoFormError::ApiStatus {
                endpoint: path.to_string(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| GeoFormError::Transport {
                endpoint: path.to_string(),
                source,
            })?;

        serde_json::from_str(&body).map_err(|source| GeoFormError::Decode {
            endpoint: path.to_string(),
            source,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.get_once(path).await {
                Ok(items) => {
                    debug!(endpoint = path, count = items.len(), "catalog fetch ok");
                    return Ok(items);
                }
                Err(err) if err.is_transient() && attempt <= self.retries => {
                    warn!(endpoint = path, attempt, error = %err, "retrying catalog fetch");
                    tokio::time::sleep(Duration::from_millis(100 * u64::from(attempt))).await;
                }
                Err(err) => {
                    warn!(endpoint = path, error = %err, "catalog fetch failed");
                    return Err(err);
                }
            }
        }
    }
}

impl CatalogSource for CscClient {
    async fn countries(&self) -> Result<Vec<Country>> {
        self.get_json(COUNTRIES_PATH).await
    }

    async fn states(&self) -> Result<Vec<State>> {
        self.get_json(STATES_PATH).await
    }

    async fn states_of(&self, country_iso2: &str) -> Result<Vec<State>> {
        self.get_json(&states_of_path(country_iso2)).await
    }

    async fn cities_of(&self, country_iso2: &str) -> Result<Vec<City>> {
        self.get_json(&cities_of_path(country_iso2)).await
    }

    async fn cities_of_state(&self, country_iso2: &str, state_code: &str) -> Result<Vec<City>> {
        self.get_json(&cities_of_state_path(country_iso2, state_code))
            .await
    }
}
