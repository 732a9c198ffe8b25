//! Reformat run options

use crate::error::{ReformatError, Result};

/// Rows fetched per page unless overridden
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Row workers per page
pub const DEFAULT_WORKERS: usize = 5;

/// Options for a single reformat run
#[derive(Debug, Clone)]
pub struct ReformatOptions {
    /// Detect and count changes without issuing any writes
    pub dry_run: bool,
    /// Stop after scanning this many rows
    pub limit: Option<usize>,
    /// Skip this many rows before the first page
    pub offset: usize,
    /// Restrict the run to one domain (bare name, URL, or www form)
    pub domain: Option<String>,
    /// Rows per page
    pub page_size: usize,
    /// Concurrent row workers inside a page
    pub workers: usize,
}

impl Default for ReformatOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            limit: None,
            offset: 0,
            domain: None,
            page_size: DEFAULT_PAGE_SIZE,
            workers: DEFAULT_WORKERS,
        }
    }
}

impl ReformatOptions {
    /// Validates the options before a run
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(ReformatError::InvalidOptions(
                "page size must be at least 1".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(ReformatError::InvalidOptions(
                "worker count must be at least 1".to_string(),
            ));
        }
        if self.limit == Some(0) {
            return Err(ReformatError::InvalidOptions(
                "limit must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let options = ReformatOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(options.workers, DEFAULT_WORKERS);
        assert!(!options.dry_run);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let options = ReformatOptions {
            page_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ReformatError::InvalidOptions(_))
        ));
    }

    #[test]
    fn zero_limit_is_rejected() {
        let options = ReformatOptions {
            limit: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ReformatError::InvalidOptions(_))
        ));
    }

    #[test]
    fn zero_workers_are_rejected() {
        let options = ReformatOptions {
            workers: 0,
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ReformatError::InvalidOptions(_))
        ));
    }
}
