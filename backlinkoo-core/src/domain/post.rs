//! Automation post domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the hosted `automation_posts` table
///
/// Only the columns the tooling reads are modeled. The table itself lives
/// in the hosted Postgres instance; this repository never owns its schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationPost {
    pub id: Uuid,
    pub title: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub url: Option<String>,
    pub domain_id: Option<Uuid>,
}

/// One row of the `domains` table
///
/// Used to resolve a domain name given on the command line to the id the
/// `automation_posts.domain_id` column references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainRecord {
    pub id: Uuid,
    pub domain: String,
}

/// Partial update written back to `automation_posts`
///
/// Only fields that actually changed are serialized; `updated_at` is always
/// present so the row records when it was last touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl PostPatch {
    /// Creates a patch carrying the given field changes, stamped now
    pub fn new(title: Option<String>, content: Option<String>) -> Self {
        Self {
            title,
            content,
            updated_at: chrono::Utc::now(),
        }
    }

    /// True when the patch carries no field changes
    ///
    /// An empty patch must never reach the wire; it would only bump
    /// `updated_at` without fixing anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}
