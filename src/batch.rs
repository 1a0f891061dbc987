//! Persistent batch numbering for the PM2 and Docker domains.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{CollectError, Result};
use crate::storage::Domain;

/// File name of the counter, kept next to the domain's partition tree.
const COUNTER_FILE: &str = "batch.seq";

/// Monotonically increasing per-domain batch counter, persisted as a small
/// text file.
///
/// Each batched invocation performs one read-increment-write cycle against
/// the file; every record it produces carries the returned value. The
/// deployment model assumes non-overlapping invocations per domain, so the
/// cycle is not locked.
pub struct BatchCounter {
    path: PathBuf,
}

impl BatchCounter {
    pub fn new(root: &Path, domain: Domain) -> Self {
        Self {
            path: root
                .join(domain.dir_name())
                .join("data")
                .join(COUNTER_FILE),
        }
    }

    /// Issue the next batch number: last persisted value plus one, starting
    /// from 1 when no counter file exists yet.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Counter`] when the file exists but cannot be
    /// read or does not hold an integer, or when the new value cannot be
    /// persisted. A corrupt counter must fail loudly rather than silently
    /// restart numbering.
    pub fn next(&self) -> Result<u64> {
        let last = match fs::read_to_string(&self.path) {
            Ok(text) => {
                let text = text.trim();
                text.parse::<u64>().map_err(|_| {
                    CollectError::Counter(format!(
                        "corrupt counter file {}: {:?}",
                        self.path.display(),
                        text
                    ))
                })?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => 0,
            Err(e) => {
                return Err(CollectError::Counter(format!(
                    "cannot read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let next = last + 1;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CollectError::Counter(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }
        fs::write(&self.path, format!("{next}\n")).map_err(|e| {
            CollectError::Counter(format!("cannot write {}: {}", self.path.display(), e))
        })?;

        Ok(next)
    }
}
