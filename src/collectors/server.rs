//! Host hardware metrics via the sysinfo system APIs.

use std::path::Path;
use std::thread;
use std::time::Duration;

use sysinfo::{Disks, System};

use crate::error::{CollectError, Result};
use crate::fmt;

/// Gap between the two CPU refreshes that produce a usage figure.
const CPU_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// One raw sample of host-level metrics, before timestamping.
#[derive(Clone, Copy, Debug)]
pub struct ServerSample {
    pub cpu_percent: f64,
    pub ram_used_mb: f64,
    pub ram_percent: f64,
    pub disk_percent: f64,
    pub load_1min: f64,
}

/// Sample CPU, memory, root-disk usage, and the 1-minute load average.
///
/// # Errors
///
/// Returns [`CollectError::ProviderUnavailable`] when the system reports
/// zero total memory or no disks at all.
pub fn sample() -> Result<ServerSample> {
    let mut sys = System::new();
    sys.refresh_cpu_all();
    thread::sleep(CPU_SAMPLE_INTERVAL);
    sys.refresh_cpu_all();
    sys.refresh_memory();

    let total_mem = sys.total_memory();
    if total_mem == 0 {
        return Err(CollectError::ProviderUnavailable(
            "system reports zero total memory".into(),
        ));
    }
    let used_mem = sys.used_memory();

    let disks = Disks::new_with_refreshed_list();
    let disk_percent = root_disk_percent(&disks).ok_or_else(|| {
        CollectError::ProviderUnavailable("system reports no disks".into())
    })?;

    Ok(ServerSample {
        cpu_percent: fmt::round1(sys.global_cpu_usage() as f64),
        ram_used_mb: fmt::round1(used_mem as f64 / (1024.0 * 1024.0)),
        ram_percent: fmt::round1(used_mem as f64 / total_mem as f64 * 100.0),
        disk_percent,
        load_1min: fmt::round2(System::load_average().one),
    })
}

/// Usage percentage of the root partition, falling back to the first
/// reported disk when nothing is mounted at `/` (e.g. some containers).
fn root_disk_percent(disks: &Disks) -> Option<f64> {
    let disk = disks
        .iter()
        .find(|d| d.mount_point() == Path::new("/"))
        .or_else(|| disks.iter().next())?;

    let total = disk.total_space() as f64;
    if total <= 0.0 {
        return None;
    }
    let used = total - disk.available_space() as f64;
    Some(fmt::round1(used / total * 100.0))
}
