//! Core domain types
//!
//! This module contains the domain structures used across the Backlinkoo
//! tooling. They model rows of the hosted Supabase tables this repository
//! reads and conditionally rewrites, plus the counters a batch run reports.

pub mod post;
pub mod stats;
