//! Rank command handler

use anyhow::Result;
use backlinkoo_client::FunctionsClient;
use backlinkoo_core::dto::rank::{RankRequest, RankSource};
use colored::*;

use crate::config::Config;

/// Check one keyword/domain pair against the rank-checker function
pub async fn handle_rank(
    config: &Config,
    keyword: String,
    domain: String,
    country: String,
) -> Result<()> {
    let client = FunctionsClient::new(&config.functions_url)?;
    let request = RankRequest {
        keyword,
        domain,
        country,
    };

    let result = client.check_rank(&request).await;

    match result.position {
        Some(position) => {
            println!(
                "{} {} ranks at position {} for {:?}",
                "✓".green().bold(),
                result.domain.bold(),
                position.to_string().green().bold(),
                result.keyword
            );
            if let Some(url) = &result.url {
                println!("  {}", url.dimmed());
            }
        }
        None => {
            println!(
                "{} {} is outside the top 100 for {:?}",
                "✗".red(),
                result.domain.bold(),
                result.keyword
            );
        }
    }

    if result.source == RankSource::Simulated {
        println!(
            "{}",
            "(simulated estimate: the live rank checker was unreachable)".yellow()
        );
    }

    Ok(())
}
