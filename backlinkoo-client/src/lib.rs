//! Backlinkoo HTTP Client
//!
//! A type-safe client for the Supabase PostgREST tables and Netlify
//! serverless functions behind the Backlinkoo content pipeline.
//!
//! All Supabase traffic flows through the request guard: a default timeout
//! on every request plus a fail-fast latch that short-circuits calls for a
//! window after a connection-level failure. See [`guard`] for the knobs.
//!
//! # Example
//!
//! ```no_run
//! use backlinkoo_client::SupabaseClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = SupabaseClient::from_env()?;
//!
//!     // First page of posts, all domains
//!     let posts = client.list_posts(0, 25, None).await?;
//!     println!("fetched {} posts", posts.len());
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod functions;
pub mod guard;

mod domains;
mod posts;

// Re-export commonly used types
pub use classify::ErrorKind;
pub use config::SupabaseConfig;
pub use domains::canonical_domain;
pub use error::{ClientError, Result};
pub use functions::{DEFAULT_FUNCTIONS_BASE, FunctionsClient};

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

/// Client for the Supabase PostgREST API
///
/// Carries the project base URL and API key; every request sends the
/// `apikey` and `Authorization: Bearer` headers PostgREST expects.
/// Operations live in per-table impl blocks:
/// - automation_posts (list, patch)
/// - domains (resolve by name)
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    /// Project base URL (e.g., "https://abc.supabase.co")
    base_url: String,
    /// Service-role or anon API key
    api_key: String,
    /// HTTP client instance
    client: Client,
}

impl SupabaseClient {
    /// Creates a client from environment variables
    ///
    /// Reads the `SUPABASE_URL` / `SUPABASE_SERVICE_ROLE_KEY` chains (see
    /// [`config`]) and builds the guarded HTTP client.
    pub fn from_env() -> Result<Self> {
        Self::from_config(&SupabaseConfig::from_env()?)
    }

    /// Creates a client from resolved configuration
    pub fn from_config(config: &SupabaseConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.service_key.clone(),
            client: guard::http_client()?,
        })
    }

    /// Creates a client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc. The
    /// caller's client is used as-is; the guard's default timeout is not
    /// applied.
    ///
    /// # Arguments
    /// * `base_url` - The Supabase project base URL
    /// * `api_key` - The API key sent with every request
    /// * `client` - A configured reqwest Client
    pub fn with_client(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Get the project base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a PostgREST table endpoint
    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub(crate) fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&self.api_key).map_err(|_| {
            ClientError::InvalidConfig(
                "API key contains characters not valid in an HTTP header".to_string(),
            )
        })?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(|_| {
            ClientError::InvalidConfig(
                "API key contains characters not valid in an HTTP header".to_string(),
            )
        })?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }

    /// Sends a Supabase request through the outage latch
    ///
    /// Fails fast while the latch is open, marks the latch on
    /// connection-level failures, and clears it once a request makes it
    /// through to the server.
    pub(crate) async fn send_guarded(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response> {
        guard::ensure_supabase_available()?;

        match request.headers(self.auth_headers()?).send().await {
            Ok(response) => {
                guard::clear_supabase_failure();
                Ok(response)
            }
            Err(e) => {
                if e.is_connect() || e.is_timeout() {
                    guard::mark_supabase_failure();
                }
                Err(ClientError::Request(e))
            }
        }
    }
}

// =============================================================================
// Response Handlers
// =============================================================================

/// Handle an API response and deserialize JSON
///
/// Checks the status code and returns an appropriate error if the request
/// failed, or deserializes the response body if successful.
pub(crate) async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api(status.as_u16(), error_text));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::Parse(format!("Failed to parse JSON response: {}", e)))
}

/// Handle an API response that returns no content (e.g., PATCH with
/// `Prefer: return=minimal`)
pub(crate) async fn expect_success(response: reqwest::Response) -> Result<()> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api(status.as_u16(), error_text));
    }

    Ok(())
}
