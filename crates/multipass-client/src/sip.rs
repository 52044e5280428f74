//! System Integrity Protection probe (macOS).
//!
//! With SIP enabled `/etc/hosts` cannot be updated, so the caller falls
//! back to printing the new text. Other platforms never block.

use std::time::Duration;

use tracing::debug;

use crate::cli::{find_in_path, run_command};
use crate::{MultipassError, Result};

const CSRUTIL: &str = "csrutil";

/// Whether `csrutil status` output says protection is on.
pub fn status_reports_enabled(stdout: &str) -> bool {
    stdout.contains("enabled")
}

/// Returns `Ok(false)` without running anything off macOS.
pub async fn integrity_protection_enabled(timeout: Duration) -> Result<bool> {
    if !cfg!(target_os = "macos") {
        return Ok(false);
    }

    let csrutil = find_in_path(CSRUTIL).ok_or_else(|| MultipassError::NotInstalled {
        binary: CSRUTIL.to_string(),
    })?;
    let stdout = run_command(&csrutil, &["status"], timeout).await?;
    let enabled = status_reports_enabled(&String::from_utf8_lossy(&stdout));
    debug!(enabled, "csrutil status");
    Ok(enabled)
}
