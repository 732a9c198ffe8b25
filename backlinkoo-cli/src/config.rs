//! Configuration module
//!
//! Handles CLI configuration shared across commands.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the deployed Netlify functions
    pub functions_url: String,
}
