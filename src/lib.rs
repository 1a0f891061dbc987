//! Sentinel — scheduler-driven monitoring collectors.
//!
//! Three independent collectors (server hardware, PM2 processes, Docker
//! containers) each run one synchronous pass per invocation and append
//! normalized rows to date-partitioned CSV files. This library exposes the
//! shared modules for use by the three binaries and by tests.

pub mod batch;
pub mod collectors;
pub mod error;
pub mod fmt;
pub mod model;
pub mod runner;
pub mod storage;

use tracing_subscriber::EnvFilter;

/// Initialize stderr logging for a collector binary.
///
/// Diagnostics go to stderr; stdout carries only the status lines.
/// `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sentinel=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
