//! Backlinkoo Content Engine
//!
//! Pure string transforms that repair stored blog content: generated posts
//! arrive with markdown remnants, duplicated titles, raw tags leaked into
//! title columns, unsafe markup, and missing presentation classes. This
//! crate detects and fixes all of that without touching the network.
//!
//! The entry point for whole documents is [`normalize_content`]; the title
//! helpers ([`is_broken_title`], [`derive_title`], [`title_case`]) are also
//! used on their own by the batch reformatter.
//!
//! All transforms are idempotent: running [`normalize_content`] on its own
//! output returns it unchanged. The batch job relies on this to decide
//! whether a row needs a write at all.

pub mod blocks;
pub mod classes;
pub mod inline;
pub mod normalize;
pub mod sanitize;
pub mod titles;

pub use normalize::normalize_content;
pub use titles::{derive_title, is_broken_title, title_case};
