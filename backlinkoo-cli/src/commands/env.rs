//! Environment diagnostics
//!
//! Shows which Backlinkoo variables are set without leaking their values.

use anyhow::Result;
use backlinkoo_client::config::{KEY_VARS, URL_VARS};
use backlinkoo_client::guard::DISABLE_VAR;
use colored::*;

/// Print the environment variable table
pub fn handle_env() -> Result<()> {
    println!("{}", "Supabase project URL (first set wins)".bold());
    for name in URL_VARS {
        print_var(name);
    }

    println!();
    println!("{}", "Supabase API key (first set wins)".bold());
    for name in KEY_VARS {
        print_var(name);
    }

    println!();
    println!("{}", "Optional".bold());
    for name in ["BACKLINKOO_FUNCTIONS_URL", DISABLE_VAR, "RUST_LOG"] {
        print_var(name);
    }

    Ok(())
}

fn print_var(name: &str) {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => {
            println!("  {} {} = {}", "✓".green(), name, mask(&value));
        }
        _ => println!("  {} {}", "✗".dimmed(), name.dimmed()),
    }
}

/// Masks a secret, keeping just enough to recognize it
fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail} ({} chars)", chars.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_secrets_are_fully_masked() {
        assert_eq!(mask("abc"), "***");
        assert_eq!(mask("12345678"), "********");
    }

    #[test]
    fn long_secrets_keep_recognizable_edges() {
        let masked = mask("eyJhbGciOiJIUzI1NiJ9.payload.signature");

        assert!(masked.starts_with("eyJh"));
        assert!(masked.ends_with("(38 chars)"));
        assert!(!masked.contains("payload"));
    }
}
