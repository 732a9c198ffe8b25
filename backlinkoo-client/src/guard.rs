//! Request guard
//!
//! Port of the web app's fetch guard to the CLI's HTTP layer: every
//! outbound request gets a default timeout unless it sets its own, and a
//! connection-level Supabase failure opens a short fail-fast window so a
//! batch run surfaces an outage once instead of timing out row by row.
//!
//! The guard is process-global and initializes itself on first use;
//! installing it again is a no-op. Setting `BACKLINKOO_NO_GUARD=1`
//! disables both the default timeout and the fail-fast latch.

use crate::error::{ClientError, Result};
use reqwest::Client;
use std::sync::{Mutex, OnceLock};
use std::time::{Duration, Instant};

/// Timeout applied to requests that do not configure their own
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// How long Supabase requests fail fast after a connection-level failure
pub const OUTAGE_WINDOW: Duration = Duration::from_secs(30);

/// Environment variable that disables the guard entirely
pub const DISABLE_VAR: &str = "BACKLINKOO_NO_GUARD";

static GUARD_ENABLED: OnceLock<bool> = OnceLock::new();
static LAST_FAILURE: Mutex<Option<Instant>> = Mutex::new(None);

/// Whether the guard is active for this process
///
/// Reads [`DISABLE_VAR`] once; later changes to the environment have no
/// effect on an already-initialized guard.
pub fn enabled() -> bool {
    *GUARD_ENABLED
        .get_or_init(|| !guard_disabled(std::env::var(DISABLE_VAR).ok().as_deref()))
}

fn guard_disabled(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("true"))
}

/// Builds the shared HTTP client, applying the default timeout when the
/// guard is active
///
/// reqwest applies a client-level timeout only to requests that do not
/// override it per-request, which is exactly the guard's
/// default-unless-explicit rule.
pub fn http_client() -> Result<Client> {
    let builder = if enabled() {
        Client::builder().timeout(DEFAULT_TIMEOUT)
    } else {
        Client::builder()
    };
    builder.build().map_err(ClientError::from)
}

/// Records a connection-level Supabase failure, opening the fail-fast
/// window
pub fn mark_supabase_failure() {
    if !enabled() {
        return;
    }
    *LAST_FAILURE.lock().unwrap() = Some(Instant::now());
}

/// Clears the latch after a successful Supabase round trip
pub fn clear_supabase_failure() {
    *LAST_FAILURE.lock().unwrap() = None;
}

/// Fails fast while the window opened by the last connection failure is
/// still open
///
/// The latch clears itself lazily once [`OUTAGE_WINDOW`] has elapsed.
pub fn ensure_supabase_available() -> Result<()> {
    if !enabled() {
        return Ok(());
    }
    let mut last = LAST_FAILURE.lock().unwrap();
    match check_window(*last, Instant::now()) {
        WindowState::Open { seconds_left } => Err(ClientError::SupabaseOutage { seconds_left }),
        WindowState::Expired => {
            *last = None;
            Ok(())
        }
        WindowState::Clear => Ok(()),
    }
}

enum WindowState {
    Clear,
    Expired,
    Open { seconds_left: u64 },
}

fn check_window(last: Option<Instant>, now: Instant) -> WindowState {
    match last {
        None => WindowState::Clear,
        Some(at) => {
            let elapsed = now.saturating_duration_since(at);
            if elapsed >= OUTAGE_WINDOW {
                WindowState::Expired
            } else {
                WindowState::Open {
                    seconds_left: (OUTAGE_WINDOW - elapsed).as_secs().max(1),
                }
            }
        }
    }
}
