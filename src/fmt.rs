//! Shared parsing and formatting helpers.
//!
//! All pure functions (no provider calls, no file I/O) live here: timestamp
//! formatting, memory-unit parsing, uptime derivation, and the rounding the
//! CSV schemas expect.

use chrono::{DateTime, Utc};

use crate::error::{CollectError, Result};

/// Timestamp layout used in every CSV row and status line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a UTC instant with [`TIMESTAMP_FORMAT`].
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Round to one decimal place (percentages, megabytes).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places (load averages).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Memory units
// ---------------------------------------------------------------------------

/// Parse a memory string like `"512MiB"`, `"1.2GiB"`, `"456KB"`, or `"789B"`
/// into megabytes, rounded to one decimal.
///
/// Explicit decimal units (`KB`, `GB`) convert with 1000-based factors and
/// explicit binary units (`KiB`, `MiB`, `GiB`) with 1024-based factors.
/// Ambiguous forms (`K`, `M`, `G`, bare numbers, bare `B`) are treated as
/// binary — the convention of the Docker CLI these strings come from.
/// `MB` and `MiB` both pass the value through unchanged since megabytes are
/// the output unit.
///
/// # Errors
///
/// Returns [`CollectError::UnitParse`] when the numeric part is missing or
/// the unit suffix is unrecognized. Callers recording a batch should default
/// the field to 0.0 and log a warning instead of aborting the run.
pub fn parse_mem_to_mb(input: &str) -> Result<f64> {
    let s = input.trim();
    let split = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    let (number, unit) = s.split_at(split);

    let value: f64 = number
        .parse()
        .map_err(|_| CollectError::UnitParse(input.to_string()))?;

    let mb = match unit.trim().to_ascii_uppercase().as_str() {
        "" | "B" => value / (1024.0 * 1024.0),
        "K" | "KI" | "KIB" => value / 1024.0,
        "KB" => value / 1000.0,
        "M" | "MI" | "MIB" | "MB" => value,
        "G" | "GI" | "GIB" => value * 1024.0,
        "GB" => value * 1000.0,
        _ => return Err(CollectError::UnitParse(input.to_string())),
    };
    Ok(round1(mb))
}

// ---------------------------------------------------------------------------
// Uptime
// ---------------------------------------------------------------------------

/// Seconds elapsed since an epoch-millisecond start stamp (PM2's
/// `pm_uptime`). Clock skew that would yield a negative duration clamps
/// to 0.
pub fn elapsed_secs_since_ms(start_ms: i64, now: DateTime<Utc>) -> u64 {
    (now.timestamp() - start_ms / 1000).max(0) as u64
}

/// Seconds elapsed since an RFC 3339 start stamp (Docker's `StartedAt`),
/// clamped at 0. `None` when the stamp does not parse.
pub fn elapsed_secs_since_rfc3339(started_at: &str, now: DateTime<Utc>) -> Option<u64> {
    let started = DateTime::parse_from_rfc3339(started_at).ok()?;
    Some((now.timestamp() - started.timestamp()).max(0) as u64)
}

/// Render an uptime in seconds as a short human string:
/// `"45s"`, `"12m"`, `"3h 15m"`, `"2d 5h"`.
pub fn format_uptime(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn mem_binary_units() {
        assert_eq!(parse_mem_to_mb("512MiB").unwrap(), 512.0);
        assert_eq!(parse_mem_to_mb("1.2GiB").unwrap(), 1228.8);
        assert_eq!(parse_mem_to_mb("2048KiB").unwrap(), 2.0);
        assert_eq!(parse_mem_to_mb("1048576B").unwrap(), 1.0);
    }

    #[test]
    fn mem_decimal_units() {
        assert_eq!(parse_mem_to_mb("1024MB").unwrap(), 1024.0);
        assert_eq!(parse_mem_to_mb("500KB").unwrap(), 0.5);
        assert_eq!(parse_mem_to_mb("2GB").unwrap(), 2000.0);
        assert_eq!(parse_mem_to_mb("1.5GB").unwrap(), 1500.0);
    }

    #[test]
    fn mem_ambiguous_is_binary() {
        assert_eq!(parse_mem_to_mb("1G").unwrap(), 1024.0);
        assert_eq!(parse_mem_to_mb("512K").unwrap(), 0.5);
        assert_eq!(parse_mem_to_mb("3M").unwrap(), 3.0);
    }

    #[test]
    fn mem_whitespace_and_case() {
        assert_eq!(parse_mem_to_mb(" 512 MiB ").unwrap(), 512.0);
        assert_eq!(parse_mem_to_mb("512mib").unwrap(), 512.0);
    }

    #[test]
    fn mem_rejects_garbage() {
        assert!(parse_mem_to_mb("lots").is_err());
        assert!(parse_mem_to_mb("12XB").is_err());
        assert!(parse_mem_to_mb("").is_err());
    }

    #[test]
    fn uptime_from_epoch_ms() {
        let now = Utc.with_ymd_and_hms(2025, 7, 20, 12, 0, 0).unwrap();
        let one_hour_ago = (now.timestamp() - 3600) * 1000;
        assert_eq!(elapsed_secs_since_ms(one_hour_ago, now), 3600);
    }

    #[test]
    fn uptime_clamps_future_start() {
        let now = Utc.with_ymd_and_hms(2025, 7, 20, 12, 0, 0).unwrap();
        let in_the_future = (now.timestamp() + 600) * 1000;
        assert_eq!(elapsed_secs_since_ms(in_the_future, now), 0);
    }

    #[test]
    fn uptime_from_rfc3339() {
        let now = Utc.with_ymd_and_hms(2025, 7, 20, 12, 0, 0).unwrap();
        let secs = elapsed_secs_since_rfc3339("2025-07-20T10:00:00Z", now);
        assert_eq!(secs, Some(7200));
        assert_eq!(elapsed_secs_since_rfc3339("not a stamp", now), None);
    }

    #[test]
    fn uptime_rendering() {
        assert_eq!(format_uptime(45), "45s");
        assert_eq!(format_uptime(720), "12m");
        assert_eq!(format_uptime(3 * 3600 + 15 * 60), "3h 15m");
        assert_eq!(format_uptime(2 * 86400 + 5 * 3600), "2d 5h");
    }

    #[test]
    fn rounding() {
        assert_eq!(round1(12.34), 12.3);
        assert_eq!(round1(12.35), 12.4);
        assert_eq!(round2(0.754), 0.75);
    }
}
