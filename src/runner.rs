//! Single-pass execution wrappers.
//!
//! One function per domain, each performing the whole cycle: collect via the
//! capability provider, draw a batch number where the schema calls for one,
//! stamp records, append to today's partition, and print the status lines
//! the scheduler log captures. Fatal errors propagate to the binary, which
//! maps them to exit code 1; an empty process/container listing is a normal
//! run that writes nothing.

use std::path::Path;

use chrono::Utc;

use crate::batch::BatchCounter;
use crate::collectors;
use crate::error::Result;
use crate::fmt;
use crate::model::{ContainerRecord, ProcessRecord, ServerMetrics};
use crate::storage::{Domain, DomainStore};

/// Collect one host hardware snapshot and append it.
pub fn run_server(root: &Path) -> Result<()> {
    let now = Utc::now();
    println!("Starting server monitoring at {} UTC", fmt::timestamp(now));

    let sample = collectors::server::sample()?;
    let record = ServerMetrics {
        timestamp: fmt::timestamp(now),
        cpu_percent: sample.cpu_percent,
        ram_used_mb: sample.ram_used_mb,
        ram_percent: sample.ram_percent,
        disk_percent: sample.disk_percent,
        load_1min: sample.load_1min,
    };

    DomainStore::new(root, Domain::Server).append(now.date_naive(), &[record.clone()])?;

    println!(
        "Successfully logged metrics: CPU={}%, RAM={}%, Disk={}%",
        record.cpu_percent, record.ram_percent, record.disk_percent
    );
    Ok(())
}

/// Collect all PM2-managed processes and append them under one batch.
pub fn run_pm2(root: &Path) -> Result<()> {
    let now = Utc::now();
    println!("Starting PM2 monitoring at {} UTC", fmt::timestamp(now));

    let processes = collectors::pm2::list()?;
    if processes.is_empty() {
        println!("No PM2 processes running");
        return Ok(());
    }

    let batch = BatchCounter::new(root, Domain::Pm2).next()?;
    let timestamp = fmt::timestamp(now);
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

    let written = DomainStore::new(root, Domain::Pm2).append(now.date_naive(), &records)?;

    println!("Successfully logged batch {batch} with {written} processes");
    for r in &records {
        println!(
            "  {} (ID:{}): {}MB, {}% CPU, {}",
            r.process_name, r.pm_id, r.memory_mb, r.cpu_percent, r.status
        );
    }
    Ok(())
}

/// Collect all running Docker containers and append them under one batch.
pub fn run_docker(root: &Path) -> Result<()> {
    let now = Utc::now();
    println!("Starting Docker monitoring at {} UTC", fmt::timestamp(now));

    let containers = collectors::docker::list()?;
    if containers.is_empty() {
        println!("No Docker containers running");
        return Ok(());
    }

    let batch = BatchCounter::new(root, Domain::Docker).next()?;
    let timestamp = fmt::timestamp(now);
    let records: Vec<ContainerRecord> = containers
        .into_iter()
        .map(|c| ContainerRecord {
            batch,
            timestamp: timestamp.clone(),
            container_name: c.name,
            container_id: c.id,
            image: c.image,
            memory_mb: c.memory_mb,
            cpu_percent: c.cpu_percent,
            status: c.status,
            uptime: c.uptime,
            ports: c.ports,
        })
        .collect();

    let written = DomainStore::new(root, Domain::Docker).append(now.date_naive(), &records)?;

    println!("Successfully logged batch {batch} with {written} containers");
    for r in &records {
        println!(
            "  {}: {}MB, {}% CPU, {}",
            r.container_name, r.memory_mb, r.cpu_percent, r.status
        );
    }
    Ok(())
}
