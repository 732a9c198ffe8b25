//! Backlinkoo Core
//!
//! Core types shared across the Backlinkoo content tooling.
//!
//! This crate contains:
//! - Domain types: rows of the hosted content tables and run accounting
//! - DTOs: payloads exchanged with the site's serverless functions

pub mod domain;
pub mod dto;
