use super::CsvRecord;

/// One PM2-managed process captured during a collection pass.
///
/// All records written by one invocation share the same `batch` value so
/// that simultaneously captured processes can be correlated later.
#[derive(Clone, Debug)]
pub struct ProcessRecord {
    pub batch: u64,
    pub timestamp: String,
    pub process_name: String,
    pub pm_id: i64,           // -1 when the provider omits it
    pub instance: i64,
    pub memory_mb: f64,
    pub cpu_percent: f64,
    pub status: String,       // "online", "stopped", "errored", ...
    pub restart_count: u64,
    pub uptime_seconds: u64,
}

impl CsvRecord for ProcessRecord {
    const HEADER: &'static [&'static str] = &[
        "batch",
        "timestamp",
        "process_name",
        "pm_id",
        "instance",
        "memory_mb",
        "cpu_percent",
        "status",
        "restart_count",
        "uptime_seconds",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.batch.to_string(),
            self.timestamp.clone(),
            self.process_name.clone(),
            self.pm_id.to_string(),
            self.instance.to_string(),
            self.memory_mb.to_string(),
            self.cpu_percent.to_string(),
            self.status.clone(),
            self.restart_count.to_string(),
            self.uptime_seconds.to_string(),
        ]
    }
}
