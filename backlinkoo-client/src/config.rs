//! Supabase configuration
//!
//! Resolves credentials from the environment with the same fallback chains
//! the web app's build tooling uses, so a `.env` written for the Vite
//! frontend works for the CLI unchanged.

use crate::error::{ClientError, Result};

/// Variables consulted for the project URL, first match wins
pub const URL_VARS: [&str; 2] = ["SUPABASE_URL", "VITE_SUPABASE_URL"];

/// Variables consulted for the API key, first match wins
///
/// The service-role key is preferred; anon keys work for read-mostly runs
/// but PATCH calls will fail row-level security without the service role.
pub const KEY_VARS: [&str; 4] = [
    "SUPABASE_SERVICE_ROLE_KEY",
    "VITE_SUPABASE_SERVICE_ROLE_KEY",
    "SUPABASE_ANON_KEY",
    "VITE_SUPABASE_ANON_KEY",
];

/// Resolved Supabase connection settings
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project base URL (e.g., "https://abc.supabase.co")
    pub url: String,
    /// Service-role or anon API key
    pub service_key: String,
}

impl SupabaseConfig {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - SUPABASE_URL (fallback: VITE_SUPABASE_URL)
    /// - SUPABASE_SERVICE_ROLE_KEY (fallbacks: VITE_SUPABASE_SERVICE_ROLE_KEY,
    ///   SUPABASE_ANON_KEY, VITE_SUPABASE_ANON_KEY)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through `lookup` instead of the process
    /// environment
    ///
    /// Empty values fall through to the next variable in the chain, matching
    /// how the frontend's `||` fallbacks treat empty strings.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = first_set(&URL_VARS, &lookup).ok_or_else(|| {
            ClientError::MissingCredentials("SUPABASE_URL is not set".to_string())
        })?;
        let service_key = first_set(&KEY_VARS, &lookup).ok_or_else(|| {
            ClientError::MissingCredentials(
                "SUPABASE_SERVICE_ROLE_KEY is not set (anon key fallbacks are also empty)"
                    .to_string(),
            )
        })?;

        let config = Self { url, service_key };
        config.validate()?;
        Ok(config)
    }

    /// Validates the resolved settings
    pub fn validate(&self) -> Result<()> {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ClientError::InvalidConfig(format!(
                "SUPABASE_URL must start with http:// or https://, got {:?}",
                self.url
            )));
        }
        if self.service_key.trim().is_empty() {
            return Err(ClientError::MissingCredentials(
                "Supabase API key is empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn first_set(names: &[&str], lookup: &impl Fn(&str) -> Option<String>) -> Option<String> {
    names
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
}
