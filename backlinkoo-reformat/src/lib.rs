//! Backlinkoo Reformat Engine
//!
//! Batch repair for stored blog posts: pages through `automation_posts`,
//! derives titles for broken rows, renormalizes content, and writes back
//! only the fields that changed. Pages are fetched sequentially; rows
//! inside a page are handled by a small fixed pool of workers.

pub mod engine;
pub mod error;
pub mod options;
pub mod plan;

// Re-export commonly used types
pub use engine::ReformatEngine;
pub use error::{ReformatError, Result};
pub use options::ReformatOptions;
