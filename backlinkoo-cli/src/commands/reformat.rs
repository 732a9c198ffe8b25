//! Reformat command handler
//!
//! Drives the batch engine and prints the run summary.

use anyhow::Result;
use backlinkoo_client::SupabaseClient;
use backlinkoo_core::domain::stats::RunStats;
use backlinkoo_reformat::{ReformatEngine, ReformatOptions};
use colored::*;

/// Run the reformat batch job
pub async fn handle_reformat(
    dry: bool,
    limit: Option<usize>,
    offset: usize,
    domain: Option<String>,
    page_size: usize,
) -> Result<()> {
    let options = build_options(dry, limit, offset, domain, page_size);
    let client = SupabaseClient::from_env()?;
    let engine = ReformatEngine::new(client, options);

    if dry {
        println!("{}", "Dry run: no writes will be issued.".yellow().bold());
        println!();
    }

    let stats = engine.run().await?;
    print_summary(&stats, dry);
    Ok(())
}

fn build_options(
    dry: bool,
    limit: Option<usize>,
    offset: usize,
    domain: Option<String>,
    page_size: usize,
) -> ReformatOptions {
    ReformatOptions {
        dry_run: dry,
        limit,
        offset,
        domain,
        page_size,
        ..Default::default()
    }
}

/// Print the run summary
fn print_summary(stats: &RunStats, dry_run: bool) {
    println!();
    if dry_run {
        println!("{}", "✓ Reformat dry run complete".green().bold());
        println!("  scanned:       {}", stats.scanned);
        println!(
            "  would update:  {}",
            stats.updated.to_string().green().bold()
        );
    } else {
        println!("{}", "✓ Reformat complete".green().bold());
        println!("  scanned:       {}", stats.scanned);
        println!("  updated:       {}", stats.updated.to_string().green().bold());
    }
    println!("  titles fixed:  {}", stats.titles_fixed);
    println!("  content fixed: {}", stats.contents_fixed);
    println!("  unchanged:     {}", stats.unchanged.to_string().dimmed());
    if stats.failed > 0 {
        println!("  failed:        {}", stats.failed.to_string().red().bold());
    } else {
        println!("  failed:        0");
    }
}
