use super::CsvRecord;

/// One snapshot of host-level hardware metrics.
#[derive(Clone, Debug)]
pub struct ServerMetrics {
    pub timestamp: String,   // UTC, "%Y-%m-%d %H:%M:%S"
    pub cpu_percent: f64,    // global CPU usage, 0–100
    pub ram_used_mb: f64,
    pub ram_percent: f64,
    pub disk_percent: f64,   // root partition usage
    pub load_1min: f64,
}

impl CsvRecord for ServerMetrics {
    const HEADER: &'static [&'static str] = &[
        "timestamp",
        "cpu_percent",
        "ram_used_mb",
        "ram_percent",
        "disk_percent",
        "load_1min",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.cpu_percent.to_string(),
            self.ram_used_mb.to_string(),
            self.ram_percent.to_string(),
            self.disk_percent.to_string(),
            self.load_1min.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_matches_header_order() {
        let record = ServerMetrics {
            timestamp: "2025-07-20 12:00:00".into(),
            cpu_percent: 12.5,
            ram_used_mb: 2048.0,
            ram_percent: 25.4,
            disk_percent: 60.1,
            load_1min: 0.75,
        };
        let row = record.row();
        assert_eq!(row.len(), ServerMetrics::HEADER.len());
        assert_eq!(row[0], "2025-07-20 12:00:00");
        assert_eq!(row[1], "12.5");
        assert_eq!(row[2], "2048");
        assert_eq!(row[5], "0.75");
    }
}
