//! Date-keyed, append-only audit trail.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::debug;

use floorcraft_core::dates;
use floorcraft_core::error::{DomainError, DomainResult};

use crate::paths::StorePaths;

/// Collaborator interface: append one line to the audit file for a date.
pub trait AuditLog: std::fmt::Debug {
    fn append(&self, message: &str, date: NaiveDate) -> DomainResult<()>;
}

/// File-backed audit log, one `Audit_<MMDDYYYY>.txt` per date, created on
/// first append.
#[derive(Debug, Clone)]
pub struct FileAuditLog {
    audits_dir: PathBuf,
}

impl FileAuditLog {
    pub fn new(paths: &StorePaths) -> Self {
        Self {
            audits_dir: paths.audits_dir(),
        }
    }

    fn audit_file(&self, date: NaiveDate) -> PathBuf {
        self.audits_dir
            .join(format!("Audit_{}.txt", dates::file_token(date)))
    }
}

impl AuditLog for FileAuditLog {
    fn append(&self, message: &str, date: NaiveDate) -> DomainResult<()> {
        fs::create_dir_all(&self.audits_dir)?;
        let path = self.audit_file(date);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                DomainError::persistence(format!(
                    "could not open audit file {}: {e}",
                    path.display()
                ))
            })?;
        writeln!(file, "{message}")?;
        debug!(%date, "audit line appended");
        Ok(())
    }
}
