// crates/geoform-core/src/error.rs
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GeoFormError>;

/// Error taxonomy for catalog access.
///
/// Transport failures and non-success API responses are kept distinct: a
/// `Transport` error usually means a flaky network, while an `ApiStatus` of
/// 401/403 means the configured credential is wrong. A name that fails to
/// resolve against a loaded catalog is *not* an error anywhere in this crate;
/// resolution misses are ordinary `Option`/branch outcomes.
#[derive(Debug, Error)]
pub enum GeoFormError {
    /// The HTTP request never produced a response (DNS, TLS, connect,
    /// timeout).
    #[error("transport failure for {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered, but with a non-success status.
    #[error("api returned {status} for {endpoint}")]
    ApiStatus {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    /// The response body did not decode into the expected catalog shape.
    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("failed to construct http client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// No API key was provided and `CSC_API_KEY` is not set.
    #[error("no api key configured (set CSC_API_KEY)")]
    MissingApiKey,
}

impl GeoFormError {
    /// True if this failure likely indicates a misconfigured credential.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            GeoFormError::ApiStatus { status, .. }
                if *status == reqwest::StatusCode::UNAUTHORIZED
                    || *status == reqwest::StatusCode::FORBIDDEN
        )
    }

    /// True if retrying the same request could plausibly succeed.
    ///
    /// Transport failures and server-side (5xx) statuses are transient;
    /// client-side statuses and decode failures are terminal.
    pub fn is_transient(&self) -> bool {
        match self {
            GeoFormError::Transport { .. } => true,
            GeoFormError::ApiStatus { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}
