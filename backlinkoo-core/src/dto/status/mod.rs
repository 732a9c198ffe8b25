//! Service status DTOs for the health-probe endpoints

use serde::{Deserialize, Serialize};

/// Health summary for one probed service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub name: String,
    pub healthy: bool,
    pub latency_ms: Option<u64>,
    pub detail: Option<String>,
}

/// Response shape of the api-status function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiStatusResponse {
    pub status: String,
    #[serde(default)]
    pub providers: Vec<ProviderStatus>,
}

/// One provider entry inside an api-status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderStatus {
    pub name: String,
    pub configured: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response shape of the check-ai-provider function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiProviderStatus {
    pub provider: String,
    pub available: bool,
    #[serde(default)]
    pub message: Option<String>,
}
