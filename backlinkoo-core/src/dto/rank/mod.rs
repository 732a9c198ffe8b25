//! Rank check DTOs for the rank-checker endpoint

use serde::{Deserialize, Serialize};

/// Request body for a rank check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankRequest {
    pub keyword: String,
    pub domain: String,
    /// Two-letter country code, lowercase (e.g. "us")
    pub country: String,
}

/// Where a rank result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankSource {
    /// Returned by the live rank-checker function
    Live,
    /// Estimated locally because the function was unreachable
    Simulated,
}

/// Outcome of a rank check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResult {
    pub keyword: String,
    pub domain: String,
    /// 1-based position in the results, None when outside the tracked range
    pub position: Option<u32>,
    /// The ranking URL, when one was found
    pub url: Option<String>,
    pub source: RankSource,
}
