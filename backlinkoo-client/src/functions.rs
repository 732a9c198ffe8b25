//! Netlify functions client
//!
//! The serverless endpoints are consumed as black boxes: rank checking,
//! API status, and the AI-provider probe. Transport-level failures get
//! exactly one immediate re-attempt; there is no backoff loop.

use crate::error::{ClientError, Result};
use crate::guard;
use backlinkoo_core::dto::rank::{RankRequest, RankResult, RankSource};
use backlinkoo_core::dto::status::{AiProviderStatus, ApiStatusResponse};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Production base URL for the deployed functions
pub const DEFAULT_FUNCTIONS_BASE: &str = "https://backlinkoo.com";

/// Client for the Netlify serverless functions
#[derive(Debug, Clone)]
pub struct FunctionsClient {
    /// Site base URL; functions live under `/.netlify/functions/`
    base_url: String,
    /// HTTP client instance
    client: Client,
}

/// Wire response of the rank-checker function
#[derive(Debug, Deserialize)]
struct RankCheckerResponse {
    #[serde(default)]
    position: Option<u32>,
    #[serde(default)]
    url: Option<String>,
}

impl FunctionsClient {
    /// Creates a client for the functions deployed at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: guard::http_client()?,
        })
    }

    /// Creates a client with a custom HTTP client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the site base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn function_url(&self, name: &str) -> String {
        format!("{}/.netlify/functions/{}", self.base_url, name)
    }

    /// Checks a keyword's ranking position for a domain
    ///
    /// Falls back to a deterministic local estimate when the function is
    /// unreachable or answers with an error; the result is then marked
    /// [`RankSource::Simulated`].
    ///
    /// # Example
    /// ```no_run
    /// # use backlinkoo_client::FunctionsClient;
    /// # use backlinkoo_core::dto::rank::RankRequest;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = FunctionsClient::new("https://backlinkoo.com")?;
    /// let result = client.check_rank(&RankRequest {
    ///     keyword: "link building".to_string(),
    ///     domain: "example.com".to_string(),
    ///     country: "us".to_string(),
    /// }).await;
    /// println!("position: {:?}", result.position);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn check_rank(&self, request: &RankRequest) -> RankResult {
        match self.live_rank(request).await {
            Ok(result) => result,
            Err(error) => {
                tracing::warn!(error = %error, "rank-checker unavailable, using simulated estimate");
                simulated_rank(request)
            }
        }
    }

    async fn live_rank(&self, request: &RankRequest) -> Result<RankResult> {
        let url = self.function_url("rank-checker");
        let response = self.post_with_retry(&url, request).await?;
        let payload: RankCheckerResponse = crate::decode_response(response).await?;

        Ok(RankResult {
            keyword: request.keyword.clone(),
            domain: request.domain.clone(),
            position: payload.position,
            url: payload.url,
            source: RankSource::Live,
        })
    }

    /// Probes the api-status function
    pub async fn api_status(&self) -> Result<ApiStatusResponse> {
        let url = self.function_url("api-status");
        let response = self.get_with_retry(&url).await?;
        crate::decode_response(response).await
    }

    /// Probes the check-ai-provider function
    pub async fn ai_provider_status(&self) -> Result<AiProviderStatus> {
        let url = self.function_url("check-ai-provider");
        let response = self.get_with_retry(&url).await?;
        crate::decode_response(response).await
    }

    /// Sends a POST, re-attempting once on a transport-level failure
    async fn post_with_retry<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        match self.client.post(url).json(body).send().await {
            Ok(response) => Ok(response),
            Err(first) if first.is_connect() || first.is_timeout() => {
                tracing::debug!(error = %first, "retrying once after transport failure");
                self.client
                    .post(url)
                    .json(body)
                    .send()
                    .await
                    .map_err(ClientError::from)
            }
            Err(error) => Err(ClientError::from(error)),
        }
    }

    /// Sends a GET, re-attempting once on a transport-level failure
    async fn get_with_retry(&self, url: &str) -> Result<reqwest::Response> {
        match self.client.get(url).send().await {
            Ok(response) => Ok(response),
            Err(first) if first.is_connect() || first.is_timeout() => {
                tracing::debug!(error = %first, "retrying once after transport failure");
                self.client.get(url).send().await.map_err(ClientError::from)
            }
            Err(error) => Err(ClientError::from(error)),
        }
    }
}

/// Deterministic estimate used when the rank-checker is unreachable
///
/// Hashes keyword and domain so repeated checks for the same pair agree
/// with each other; roughly a third of pairs land outside the tracked
/// window and report no position.
pub fn simulated_rank(request: &RankRequest) -> RankResult {
    use std::hash::{DefaultHasher, Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    request.keyword.to_lowercase().hash(&mut hasher);
    request.domain.to_lowercase().hash(&mut hasher);
    let roll = hasher.finish() % 150;

    let position = (roll < 100).then_some(roll as u32 + 1);
    let url = position.map(|_| format!("https://{}/", request.domain));

    RankResult {
        keyword: request.keyword.clone(),
        domain: request.domain.clone(),
        position,
        url,
        source: RankSource::Simulated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(keyword: &str, domain: &str) -> RankRequest {
        RankRequest {
            keyword: keyword.to_string(),
            domain: domain.to_string(),
            country: "us".to_string(),
        }
    }

    #[test]
    fn function_urls_are_rooted_under_netlify() {
        let client = FunctionsClient::with_client("https://backlinkoo.com/", Client::new());
        assert_eq!(
            client.function_url("rank-checker"),
            "https://backlinkoo.com/.netlify/functions/rank-checker"
        );
    }

    #[test]
    fn simulated_rank_is_deterministic() {
        let a = simulated_rank(&request("link building", "example.com"));
        let b = simulated_rank(&request("link building", "example.com"));

        assert_eq!(a.position, b.position);
        assert_eq!(a.url, b.url);
    }

    #[test]
    fn simulated_rank_ignores_case() {
        let a = simulated_rank(&request("Link Building", "Example.com"));
        let b = simulated_rank(&request("link building", "example.com"));
        assert_eq!(a.position, b.position);
    }

    #[test]
    fn simulated_rank_is_marked_simulated() {
        let result = simulated_rank(&request("link building", "example.com"));
        assert_eq!(result.source, RankSource::Simulated);
        if let Some(position) = result.position {
            assert!((1..=100).contains(&position));
            assert_eq!(result.url.as_deref(), Some("https://example.com/"));
        } else {
            assert!(result.url.is_none());
        }
    }
}
