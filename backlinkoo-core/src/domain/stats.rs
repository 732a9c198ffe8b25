//! Run accounting types

use serde::{Deserialize, Serialize};

/// How a single post row was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// Nothing to fix; no request was issued
    Unchanged,
    /// A patch was written (or would have been, in a dry run)
    Updated {
        title_fixed: bool,
        content_fixed: bool,
    },
    /// The write-back failed; the row keeps its old values
    Failed,
}

/// Counters accumulated over a reformat run
///
/// Workers keep a local copy and the engine merges them per page, so no
/// lock sits on the hot path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub scanned: usize,
    pub updated: usize,
    pub titles_fixed: usize,
    pub contents_fixed: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl RunStats {
    /// Folds one row outcome into the counters
    pub fn record(&mut self, outcome: RowOutcome) {
        self.scanned += 1;
        match outcome {
            RowOutcome::Unchanged => self.unchanged += 1,
            RowOutcome::Updated {
                title_fixed,
                content_fixed,
            } => {
                self.updated += 1;
                if title_fixed {
                    self.titles_fixed += 1;
                }
                if content_fixed {
                    self.contents_fixed += 1;
                }
            }
            RowOutcome::Failed => self.failed += 1,
        }
    }

    /// Sums another set of counters into this one
    pub fn merge(&mut self, other: RunStats) {
        self.scanned += other.scanned;
        self.updated += other.updated;
        self.titles_fixed += other.titles_fixed;
        self.contents_fixed += other.contents_fixed;
        self.unchanged += other.unchanged;
        self.failed += other.failed;
    }
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "scanned {}, updated {} (titles {}, content {}), unchanged {}, failed {}",
            self.scanned,
            self.updated,
            self.titles_fixed,
            self.contents_fixed,
            self.unchanged,
            self.failed
        )
    }
}
