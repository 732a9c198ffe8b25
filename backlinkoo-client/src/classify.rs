//! Failure classification
//!
//! Buckets a failed request into one of four remediation categories so the
//! CLI can print a useful next step instead of a bare error chain. The
//! instrumentation-interference bucket is matched only through explicit
//! substrings in the error text; nothing is inferred from error types.

use crate::error::ClientError;

/// Substrings that identify third-party instrumentation in an error chain
const INTERFERENCE_MARKERS: [&str; 3] = ["fullstory", "fs.js", "analytics"];

/// Remediation category for a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Response body was already consumed or failed mid-decode
    BodyConsumed,
    /// Third-party instrumentation intercepted the request
    Interference,
    /// Connection, DNS, or timeout failure
    Network,
    /// Anything else
    Other,
}

impl ErrorKind {
    /// Classifies a client error into its remediation bucket
    pub fn classify(error: &ClientError) -> Self {
        let chain = error_chain_text(error);

        if INTERFERENCE_MARKERS
            .iter()
            .any(|marker| chain.contains(marker))
        {
            return Self::Interference;
        }
        if chain.contains("body") {
            return Self::BodyConsumed;
        }

        match error {
            ClientError::Request(e) if e.is_connect() || e.is_timeout() => Self::Network,
            ClientError::SupabaseOutage { .. } => Self::Network,
            _ if chain.contains("connection refused")
                || chain.contains("timed out")
                || chain.contains("dns error") =>
            {
                Self::Network
            }
            _ => Self::Other,
        }
    }

    /// One-line operator guidance for this bucket
    pub fn remediation(self) -> &'static str {
        match self {
            Self::BodyConsumed => "Re-run the request; the response stream was already consumed.",
            Self::Interference => {
                "Disable analytics or instrumentation layers (FullStory and similar) and retry."
            }
            Self::Network => "Check connectivity and the Supabase status page, then retry.",
            Self::Other => "Retry once; if it persists, clear local state and re-run.",
        }
    }
}

/// Flattens an error and its sources into one lowercase string
fn error_chain_text(error: &ClientError) -> String {
    let mut text = error.to_string().to_lowercase();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        text.push(' ');
        text.push_str(&cause.to_string().to_lowercase());
        source = cause.source();
    }
    text
}
