//! Status command handler
//!
//! Probes the deployed functions and reports per-service health.

use anyhow::Result;
use backlinkoo_client::FunctionsClient;
use backlinkoo_core::dto::status::ServiceStatus;
use colored::*;
use std::time::Instant;

use crate::config::Config;

/// Probe api-status and check-ai-provider
pub async fn handle_status(config: &Config) -> Result<()> {
    let client = FunctionsClient::new(&config.functions_url)?;
    println!("{}", format!("Probing {}", client.base_url()).bold());
    println!();

    let started = Instant::now();
    match client.api_status().await {
        Ok(status) => {
            print_service(&ServiceStatus {
                name: "api-status".to_string(),
                healthy: status.status == "ok",
                latency_ms: Some(started.elapsed().as_millis() as u64),
                detail: None,
            });
            for provider in &status.providers {
                let mark = if provider.configured {
                    "configured".green()
                } else {
                    "not configured".yellow()
                };
                match &provider.message {
                    Some(message) => println!("    {} {} ({})", provider.name, mark, message),
                    None => println!("    {} {}", provider.name, mark),
                }
            }
        }
        Err(error) => print_service(&ServiceStatus {
            name: "api-status".to_string(),
            healthy: false,
            latency_ms: None,
            detail: Some(error.to_string()),
        }),
    }

    let started = Instant::now();
    match client.ai_provider_status().await {
        Ok(status) => print_service(&ServiceStatus {
            name: format!("check-ai-provider ({})", status.provider),
            healthy: status.available,
            latency_ms: Some(started.elapsed().as_millis() as u64),
            detail: status.message,
        }),
        Err(error) => print_service(&ServiceStatus {
            name: "check-ai-provider".to_string(),
            healthy: false,
            latency_ms: None,
            detail: Some(error.to_string()),
        }),
    }

    Ok(())
}

fn print_service(service: &ServiceStatus) {
    let mark = if service.healthy {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    let mut line = format!("{} {}", mark, service.name.bold());
    if let Some(ms) = service.latency_ms {
        line.push_str(&format!(" ({ms} ms)"));
    }
    if let Some(detail) = &service.detail {
        line.push_str(&format!(": {detail}"));
    }
    println!("{line}");
}
