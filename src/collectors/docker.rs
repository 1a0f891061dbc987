//! Docker container listing via `docker stats` and `docker inspect`.
//!
//! `docker stats --format json --no-stream` emits one JSON object per line
//! with the live usage figures; `docker inspect` supplies the slower-moving
//! details (image, state, start time, port bindings). An inspect failure for
//! one container degrades that row to sentinel values instead of aborting
//! the batch.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::run_provider;
use crate::error::{CollectError, Result};
use crate::fmt;

/// One running container with usage figures and inspect details merged.
#[derive(Clone, Debug)]
pub struct ContainerStats {
    pub name: String,
    pub id: String, // short ID (first 12 chars)
    pub image: String,
    pub memory_mb: f64,
    pub cpu_percent: f64,
    pub status: String,
    pub uptime: String,
    pub ports: String,
}

#[derive(Debug, Deserialize)]
struct RawStatsLine {
    #[serde(rename = "Container", default)]
    container: String,
    #[serde(rename = "Name", default)]
    name: String,
    /// "512MiB / 7.775GiB" — used memory, then the limit.
    #[serde(rename = "MemUsage", default)]
    mem_usage: String,
    /// "0.50%"
    #[serde(rename = "CPUPerc", default)]
    cpu_perc: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawInspect {
    #[serde(rename = "Config", default)]
    config: RawConfig,
    #[serde(rename = "State", default)]
    state: RawState,
    #[serde(rename = "NetworkSettings", default)]
    network_settings: RawNetworkSettings,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(rename = "Image")]
    image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawState {
    #[serde(rename = "Status")]
    status: Option<String>,
    #[serde(rename = "StartedAt")]
    started_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawNetworkSettings {
    // BTreeMap keeps the serialized port list in a stable order.
    #[serde(rename = "Ports", default)]
    ports: BTreeMap<String, Option<Vec<RawPortBinding>>>,
}

#[derive(Debug, Deserialize)]
struct RawPortBinding {
    #[serde(rename = "HostPort", default)]
    host_port: String,
}

/// Inspect-derived details, with the sentinels used when inspect fails.
#[derive(Clone, Debug)]
struct ContainerDetails {
    image: String,
    status: String,
    uptime: String,
    ports: String,
}

impl Default for ContainerDetails {
    fn default() -> Self {
        Self {
            image: "unknown".into(),
            status: "unknown".into(),
            uptime: "unknown".into(),
            ports: "none".into(),
        }
    }
}

/// List all running containers. No running containers yields an empty
/// vector, not an error.
pub fn list() -> Result<Vec<ContainerStats>> {
    let stdout = run_provider("docker", &["stats", "--format", "json", "--no-stream"])?;
    let now = Utc::now();

    let mut containers = Vec::new();
    let mut malformed = 0usize;
    for line in stdout.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match serde_json::from_str::<RawStatsLine>(line) {
            Ok(raw) => {
                let details = inspect_details(&raw.container, now);
                containers.push(assemble(raw, details));
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed docker stats line");
                malformed += 1;
            }
        }
    }

    if containers.is_empty() && malformed > 0 {
        return Err(CollectError::Parse(
            "docker stats: no parseable lines in output".into(),
        ));
    }
    Ok(containers)
}

fn inspect_details(container_id: &str, now: DateTime<Utc>) -> ContainerDetails {
    if container_id.is_empty() {
        return ContainerDetails::default();
    }
    match run_provider("docker", &["inspect", container_id]) {
        Ok(stdout) => parse_inspect(&stdout, now).unwrap_or_default(),
        Err(e) => {
            tracing::warn!(container = container_id, error = %e, "docker inspect failed");
            ContainerDetails::default()
        }
    }
}

fn assemble(raw: RawStatsLine, details: ContainerDetails) -> ContainerStats {
    ContainerStats {
        name: non_empty_or(raw.name, "unknown"),
        id: non_empty_or(raw.container.chars().take(12).collect(), "unknown"),
        image: details.image,
        memory_mb: memory_mb_from_usage(&raw.mem_usage),
        cpu_percent: cpu_from_perc(&raw.cpu_perc),
        status: details.status,
        uptime: details.uptime,
        ports: details.ports,
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.into()
    } else {
        value
    }
}

/// Extract the used-memory half of a "used / limit" stats string and convert
/// it to megabytes. An unrecognized value is recorded as 0.0 with a warning
/// rather than failing the batch.
fn memory_mb_from_usage(mem_usage: &str) -> f64 {
    let used = mem_usage.split(" / ").next().unwrap_or("").trim();
    match fmt::parse_mem_to_mb(used) {
        Ok(mb) => mb,
        Err(e) => {
            tracing::warn!(value = mem_usage, error = %e, "unparseable memory usage");
            0.0
        }
    }
}

fn cpu_from_perc(cpu_perc: &str) -> f64 {
    match cpu_perc.trim().trim_end_matches('%').parse::<f64>() {
        Ok(v) => fmt::round1(v),
        Err(_) => {
            tracing::warn!(value = cpu_perc, "unparseable CPU percentage");
            0.0
        }
    }
}

/// Parse `docker inspect` output (a one-element JSON array). `None` when the
/// output is not inspect JSON at all.
fn parse_inspect(json: &str, now: DateTime<Utc>) -> Option<ContainerDetails> {
    let inspected: Vec<RawInspect> = serde_json::from_str(json.trim()).ok()?;
    let first = inspected.into_iter().next()?;

    let uptime = first
        .state
        .started_at
        .as_deref()
        .and_then(|stamp| fmt::elapsed_secs_since_rfc3339(stamp, now))
        .map(fmt::format_uptime)
        .unwrap_or_else(|| "unknown".into());

    Some(ContainerDetails {
        image: first
            .config
            .image
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "unknown".into()),
        status: first
            .state
            .status
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "unknown".into()),
        uptime,
        ports: format_ports(&first.network_settings.ports),
    })
}

/// Join published ports as "host:container" pairs in stable key order, e.g.
/// "8080:80/tcp,8443:443/tcp". Unpublished ports are omitted; no published
/// ports at all serializes as "none".
fn format_ports(ports: &BTreeMap<String, Option<Vec<RawPortBinding>>>) -> String {
    let mut parts = Vec::new();
    for (container_port, bindings) in ports {
        let Some(bindings) = bindings else { continue };
        for binding in bindings {
            if !binding.host_port.is_empty() {
                parts.push(format!("{}:{}", binding.host_port, container_port));
            }
        }
    }
    if parts.is_empty() {
        "none".into()
    } else {
        parts.join(",")
    }
}
