//! Per-domain capability providers and output parsing.
//!
//! Each submodule wraps one provider — the sysinfo system APIs for the
//! server domain, the `pm2` and `docker` executables for the other two —
//! and normalizes its output into typed observations. Parsing is kept in
//! pure functions over `&str` so provider output can be exercised in tests
//! without the external command installed.

pub mod docker;
pub mod pm2;
pub mod server;

use std::process::Command;

use crate::error::{CollectError, Result};

/// Run an external listing command and return its stdout as UTF-8 (lossy).
///
/// A binary that cannot be spawned (typically: not on `PATH`) or that exits
/// nonzero maps to [`CollectError::ProviderUnavailable`] — fatal for the
/// invocation per the error policy.
pub(crate) fn run_provider(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| CollectError::ProviderUnavailable(format!("{program}: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CollectError::ProviderUnavailable(format!(
            "{program} exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
