//! Per-row repair decision
//!
//! Everything here is pure: the engine computes a [`RowPlan`] before any
//! HTTP write, and a plan that carries no fields means the row needs no
//! request at all.

use backlinkoo_content::{derive_title, is_broken_title, normalize_content};
use backlinkoo_core::domain::post::{AutomationPost, PostPatch};

/// What a single row needs rewritten
#[derive(Debug, Clone)]
pub struct RowPlan {
    /// Replacement title, when the stored one is broken and derivable
    pub title: Option<String>,
    /// Renormalized content, when it differs from the stored bytes
    pub content: Option<String>,
}

impl RowPlan {
    /// True when the row needs no write
    pub fn is_noop(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    /// Converts the plan into a wire patch, stamping `updated_at`
    pub fn into_patch(self) -> PostPatch {
        PostPatch::new(self.title, self.content)
    }
}

/// Decides what, if anything, to rewrite for one row
///
/// A title is replaced only when the stored one is broken and a usable
/// replacement can be derived from the content. Content is replaced when
/// normalization changes a single byte; since normalization is stable,
/// already-clean rows plan as no-ops.
pub fn plan_row(post: &AutomationPost) -> RowPlan {
    let stored_title = post.title.as_deref().unwrap_or("");
    let stored_content = post.content.as_deref().unwrap_or("");

    let title = if is_broken_title(stored_title) {
        derive_title(stored_content).filter(|t| t.as_str() != stored_title)
    } else {
        None
    };

    let effective_title = title.as_deref().or(post.title.as_deref());
    let normalized = normalize_content(effective_title, stored_content);
    let content = (normalized != stored_content).then_some(normalized);

    RowPlan { title, content }
}
