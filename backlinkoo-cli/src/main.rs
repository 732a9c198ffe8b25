//! Backlinkoo CLI
//!
//! Command-line interface for Backlinkoo content operations: batch post
//! reformatting, keyword rank checks, and service health probes.

mod commands;
mod config;

use backlinkoo_client::{ClientError, ErrorKind};
use backlinkoo_reformat::ReformatError;
use clap::Parser;
use colored::*;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "backlinkoo")]
#[command(about = "Backlinkoo content operations CLI", long_about = None)]
struct Cli {
    /// Base URL of the deployed Netlify functions
    #[arg(
        long,
        env = "BACKLINKOO_FUNCTIONS_URL",
        default_value = backlinkoo_client::DEFAULT_FUNCTIONS_BASE
    )]
    functions_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "backlinkoo_cli=info,backlinkoo_reformat=info,backlinkoo_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config {
        functions_url: cli.functions_url,
    };
    tracing::debug!(functions_url = %config.functions_url, "configuration resolved");

    if let Err(error) = handle_command(cli.command, &config).await {
        eprintln!("{} {}", "Error:".red().bold(), error);
        if let Some(hint) = classification_hint(&error) {
            eprintln!("{} {}", "Hint:".yellow().bold(), hint);
        }
        std::process::exit(exit_code_for(&error));
    }
}

/// Maps a run failure to the process exit code
///
/// 2 marks a `--domain` value that resolved to nothing; everything else,
/// including missing credentials, exits 1.
fn exit_code_for(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<ReformatError>() {
        Some(ReformatError::DomainNotFound(_)) => 2,
        _ => 1,
    }
}

/// Remediation line for failures the client layer can classify
fn classification_hint(error: &anyhow::Error) -> Option<&'static str> {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<ClientError>())
        .map(|client_error| ErrorKind::classify(client_error).remediation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_not_found_exits_two() {
        let err = anyhow::Error::new(ReformatError::DomainNotFound("missing.example".to_string()));
        assert_eq!(exit_code_for(&err), 2);
    }

    #[test]
    fn other_failures_exit_one() {
        let err = anyhow::Error::new(ClientError::MissingCredentials(
            "SUPABASE_URL is not set".to_string(),
        ));
        assert_eq!(exit_code_for(&err), 1);

        let err = anyhow::anyhow!("unhandled failure");
        assert_eq!(exit_code_for(&err), 1);
    }

    #[test]
    fn client_failures_carry_a_hint() {
        let err = anyhow::Error::new(ReformatError::Client(ClientError::SupabaseOutage {
            seconds_left: 10,
        }));
        let hint = classification_hint(&err).unwrap();
        assert!(hint.contains("connectivity"));

        let err = anyhow::anyhow!("no client involved");
        assert!(classification_hint(&err).is_none());
    }
}
