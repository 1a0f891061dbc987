//! PM2 process listing via `pm2 jlist`.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::run_provider;
use crate::error::{CollectError, Result};
use crate::fmt;

/// One process entry extracted from the PM2 process table.
#[derive(Clone, Debug)]
pub struct Pm2Process {
    pub name: String,
    pub pm_id: i64,
    pub instance: i64,
    pub memory_mb: f64,
    pub cpu_percent: f64,
    pub status: String,
    pub restart_count: u64,
    pub uptime_seconds: u64,
}

// `pm2 jlist` entries vary by PM2 version and process state; every field is
// optional and resolved to a sentinel here, at the parser boundary.
#[derive(Debug, Deserialize)]
struct RawProcess {
    name: Option<String>,
    pm_id: Option<i64>,
    #[serde(default)]
    pm2_env: RawEnv,
    #[serde(default)]
    monit: RawMonit,
}

#[derive(Debug, Default, Deserialize)]
struct RawEnv {
    instance_id: Option<i64>,
    status: Option<String>,
    restart_time: Option<u64>,
    // Start-of-process stamp in epoch milliseconds, not a duration.
    pm_uptime: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMonit {
    memory: Option<u64>, // bytes
    cpu: Option<f64>,
}

impl RawProcess {
    fn normalize(self, now: DateTime<Utc>) -> Pm2Process {
        Pm2Process {
            name: self.name.unwrap_or_else(|| "unknown".into()),
            pm_id: self.pm_id.unwrap_or(-1),
            instance: self.pm2_env.instance_id.unwrap_or(0),
            memory_mb: fmt::round1(self.monit.memory.unwrap_or(0) as f64 / (1024.0 * 1024.0)),
            cpu_percent: fmt::round1(self.monit.cpu.unwrap_or(0.0)),
            status: self.pm2_env.status.unwrap_or_else(|| "unknown".into()),
            restart_count: self.pm2_env.restart_time.unwrap_or(0),
            uptime_seconds: self
                .pm2_env
                .pm_uptime
                .map(|ms| fmt::elapsed_secs_since_ms(ms, now))
                .unwrap_or(0),
        }
    }
}

/// List all PM2-managed processes. An empty process table yields an empty
/// vector, not an error.
pub fn list() -> Result<Vec<Pm2Process>> {
    let stdout = run_provider("pm2", &["jlist"])?;
    parse_jlist(&stdout, Utc::now())
}

/// Parse `pm2 jlist` output: a JSON array with one object per process.
///
/// A malformed element is logged and skipped so the rest of the batch still
/// gets recorded; output that is not a JSON array at all is a total parse
/// failure.
pub fn parse_jlist(json: &str, now: DateTime<Utc>) -> Result<Vec<Pm2Process>> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(json.trim())
        .map_err(|e| CollectError::Parse(format!("pm2 jlist: {e}")))?;

    let mut processes = Vec::new();
    for entry in entries {
        match serde_json::from_value::<RawProcess>(entry) {
            Ok(raw) => processes.push(raw.normalize(now)),
            Err(e) => tracing::warn!(error = %e, "skipping malformed pm2 entry"),
        }
    }
    Ok(processes)
}
