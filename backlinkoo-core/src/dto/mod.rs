//! Data Transfer Objects for the serverless function endpoints
//!
//! This module contains the payload shapes exchanged with the site's
//! Netlify functions. The functions are consumed as black boxes; these
//! types only model the fields the tooling reads.

pub mod rank;
pub mod status;
