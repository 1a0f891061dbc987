//! Cross-module collection scenarios: parse → batch → append, exercised
//! against a temporary data root the way a scheduler invocation would.

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use sentinel::batch::BatchCounter;
use sentinel::collectors::pm2::parse_jlist;
use sentinel::fmt;
use sentinel::model::{CsvRecord, ProcessRecord, ServerMetrics};
use sentinel::storage::{Domain, DomainStore};

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 20, 12, 0, 0).unwrap()
}

#[test]
fn server_snapshot_lands_in_dated_partition() {
    let tmp = TempDir::new().unwrap();
    let store = DomainStore::new(tmp.path(), Domain::Server);

    let record = ServerMetrics {
        timestamp: fmt::timestamp(now()),
        cpu_percent: 12.5,
        ram_used_mb: 2048.0,
        ram_percent: 25.4,
        disk_percent: 60.1,
        load_1min: 0.75,
    };
    let written = store.append(now().date_naive(), &[record]).unwrap();
    assert_eq!(written, 1);

    let path = tmp.path().join("server/data/2025/07/2025-07-20.csv");
    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "timestamp,cpu_percent,ram_used_mb,ram_percent,disk_percent,load_1min"
    );
    assert_eq!(lines[1], "2025-07-20 12:00:00,12.5,2048,25.4,60.1,0.75");
}

#[test]
fn pm2_batches_increment_across_invocations() {
    let tmp = TempDir::new().unwrap();
    let store = DomainStore::new(tmp.path(), Domain::Pm2);
    let counter = BatchCounter::new(tmp.path(), Domain::Pm2);

    let jlist = r#"[
        {"name": "api", "pm_id": 0, "pm2_env": {"status": "online"}, "monit": {"memory": 104857600, "cpu": 1.5}},
        {"name": "worker", "pm_id": 1, "pm2_env": {"status": "online"}, "monit": {"memory": 52428800, "cpu": 0.3}}
    ]"#;

    // Two scheduler ticks over the same process table.
    for expected_batch in 1..=2u64 {
        let processes = parse_jlist(jlist, now()).unwrap();
        let batch = counter.next().unwrap();
        assert_eq!(batch, expected_batch);

        let timestamp = fmt::timestamp(now());
        let records: Vec<ProcessRecord> = processes
            .into_iter()
            .map(|p| ProcessRecord {
                batch,
                timestamp: timestamp.clone(),
                process_name: p.name,
                pm_id: p.pm_id,
                instance: p.instance,
                memory_mb: p.memory_mb,
                cpu_percent: p.cpu_percent,
                status: p.status,
                restart_count: p.restart_count,
                uptime_seconds: p.uptime_seconds,
            })
            .collect();
        store.append(now().date_naive(), &records).unwrap();
    }

    let content =
        std::fs::read_to_string(tmp.path().join("pm2/data/2025/07/2025-07-20.csv")).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    // One header plus two rows per invocation.
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], ProcessRecord::HEADER.join(","));
    assert!(lines[1].starts_with("1,"));
    assert!(lines[2].starts_with("1,"));
    assert!(lines[3].starts_with("2,"));
    assert!(lines[4].starts_with("2,"));
    assert!(lines[1].contains(",api,"));
    assert!(lines[1].contains(",100,")); // 104857600 bytes
}

#[test]
fn malformed_entry_skipped_but_batch_recorded() {
    let tmp = TempDir::new().unwrap();
    let store = DomainStore::new(tmp.path(), Domain::Pm2);
    let counter = BatchCounter::new(tmp.path(), Domain::Pm2);

    let jlist = r#"[
        {"name": "healthy", "pm_id": 4},
        42,
        {"name": "also-healthy", "pm_id": 5}
    ]"#;

    let processes = parse_jlist(jlist, now()).unwrap();
    assert_eq!(processes.len(), 2);

    let batch = counter.next().unwrap();
    let timestamp = fmt::timestamp(now());
    let records: Vec<ProcessRecord> = processes
        .into_iter()
        .map(|p| ProcessRecord {
            batch,
            timestamp: timestamp.clone(),
            process_name: p.name,
            pm_id: p.pm_id,
            instance: p.instance,
            memory_mb: p.memory_mb,
            cpu_percent: p.cpu_percent,
            status: p.status,
            restart_count: p.restart_count,
            uptime_seconds: p.uptime_seconds,
        })
        .collect();
    let written = store.append(now().date_naive(), &records).unwrap();

    assert_eq!(written, 2);
    let content =
        std::fs::read_to_string(store.partition_path(now().date_naive())).unwrap();
    assert_eq!(content.lines().count(), 3); // header + the two healthy rows
}

#[test]
fn empty_listing_consumes_no_batch_and_creates_no_file() {
    let tmp = TempDir::new().unwrap();
    let store = DomainStore::new(tmp.path(), Domain::Docker);

    let processes = parse_jlist("[]", now()).unwrap();
    assert!(processes.is_empty());

    // The runner returns before sequencing or appending; nothing on disk.
    let written = store
        .append(now().date_naive(), &[] as &[ProcessRecord])
        .unwrap();
    assert_eq!(written, 0);
    assert!(!tmp.path().join("docker").exists());

    // The next real batch still starts at 1.
    assert_eq!(BatchCounter::new(tmp.path(), Domain::Docker).next().unwrap(), 1);
}
