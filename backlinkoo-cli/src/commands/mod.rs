//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod env;
mod rank;
mod reformat;
mod status;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Repair stored posts: fix broken titles and renormalize content
    Reformat {
        /// Detect and count changes without writing anything
        #[arg(long)]
        dry: bool,

        /// Stop after scanning this many rows
        #[arg(long)]
        limit: Option<usize>,

        /// Skip this many rows before the first page
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Restrict the run to one domain (bare name or URL)
        #[arg(long)]
        domain: Option<String>,

        /// Rows fetched per page
        #[arg(long, default_value_t = backlinkoo_reformat::options::DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
    /// Check a keyword's search position for a domain
    Rank {
        /// Keyword to check
        #[arg(long)]
        keyword: String,

        /// Domain the keyword should rank for
        #[arg(long)]
        domain: String,

        /// Two-letter country code
        #[arg(long, default_value = "us")]
        country: String,
    },
    /// Probe the deployed service health endpoints
    Status,
    /// Show which Backlinkoo environment variables are set
    Env,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
///
/// # Returns
/// Result indicating success or failure
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Reformat {
            dry,
            limit,
            offset,
            domain,
            page_size,
        } => reformat::handle_reformat(dry, limit, offset, domain, page_size).await,
        Commands::Rank {
            keyword,
            domain,
            country,
        } => rank::handle_rank(config, keyword, domain, country).await,
        Commands::Status => status::handle_status(config).await,
        Commands::Env => env::handle_env(),
    }
}
