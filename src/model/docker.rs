use super::CsvRecord;

/// One running Docker container captured during a collection pass.
#[derive(Clone, Debug)]
pub struct ContainerRecord {
    pub batch: u64,
    pub timestamp: String,
    pub container_name: String,
    pub container_id: String, // short ID (first 12 chars)
    pub image: String,
    pub memory_mb: f64,       // parsed from the stats "used / limit" string
    pub cpu_percent: f64,
    pub status: String,       // "running", "paused", etc.
    pub uptime: String,       // human-readable (e.g. "2h 34m")
    pub ports: String,        // "8080:80/tcp,8443:443/tcp" or "none"
}

impl CsvRecord for ContainerRecord {
    const HEADER: &'static [&'static str] = &[
        "batch",
        "timestamp",
        "container_name",
        "container_id",
        "image",
        "memory_mb",
        "cpu_percent",
        "status",
        "uptime",
        "ports",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.batch.to_string(),
            self.timestamp.clone(),
            self.container_name.clone(),
            self.container_id.clone(),
            self.image.clone(),
            self.memory_mb.to_string(),
            self.cpu_percent.to_string(),
            self.status.clone(),
            self.uptime.clone(),
            self.ports.clone(),
        ]
    }
}
