//! Date-partitioned CSV storage.
//!
//! Each domain owns a directory tree `{root}/{domain}/data/{YYYY}/{MM}/`
//! holding one partition file per calendar day. Partition files are created
//! lazily on first write, get their header exactly once, and are append-only
//! afterwards. The deployment model is a single scheduler-driven writer per
//! domain, so no file locking is taken.

use std::borrow::Cow;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::Result;
use crate::model::CsvRecord;

/// A monitored subsystem with its own schema and storage tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Domain {
    Server,
    Pm2,
    Docker,
}

impl Domain {
    /// Directory name under the data root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Domain::Server => "server",
            Domain::Pm2 => "pm2",
            Domain::Docker => "docker",
        }
    }
}

/// Resolves partition paths and appends rows for one domain.
pub struct DomainStore {
    domain: Domain,
    data_dir: PathBuf,
}

impl DomainStore {
    pub fn new(root: &Path, domain: Domain) -> Self {
        Self {
            domain,
            data_dir: root.join(domain.dir_name()).join("data"),
        }
    }

    /// Path of the partition file for `date`:
    /// `{root}/{domain}/data/{YYYY}/{MM}/{YYYY-MM-DD}.csv`.
    pub fn partition_path(&self, date: NaiveDate) -> PathBuf {
        self.data_dir
            .join(date.format("%Y").to_string())
            .join(date.format("%m").to_string())
            .join(format!("{}.csv", date.format("%Y-%m-%d")))
    }

    /// Append `records` to the partition file for `date`, creating missing
    /// directories and writing the header row iff the file is new or empty.
    /// Rows are written in slice order. Returns the number of rows written.
    ///
    /// An empty slice writes nothing and does not create the file.
    pub fn append<R: CsvRecord>(&self, date: NaiveDate, records: &[R]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let path = self.partition_path(date);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let needs_header = match fs::metadata(&path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        if needs_header {
            writeln!(file, "{}", R::HEADER.join(","))?;
            tracing::info!(
                domain = self.domain.dir_name(),
                path = %path.display(),
                "Created new partition file"
            );
        }
        for record in records {
            writeln!(file, "{}", encode_row(&record.row()))?;
        }

        Ok(records.len())
    }
}

fn encode_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// RFC 4180 quoting: a field containing a comma, double quote, CR, or LF is
/// wrapped in double quotes with embedded quotes doubled.
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains(|c| c == ',' || c == '"' || c == '\r' || c == '\n') {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
