//! On-disk layout of the store.
//!
//! Everything hangs off one root directory so tests and alternate
//! installs can relocate the whole tree at once. The defaults mirror the
//! legacy layout: `data/` for reference tables, `orders/` for ledgers,
//! `backup/` for the export, `audits/` for the audit trail.

use std::path::{Path, PathBuf};

/// Resolved locations of every file the store touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    root: PathBuf,
}

impl StorePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The state tax table.
    pub fn taxes_file(&self) -> PathBuf {
        self.root.join("data").join("Taxes.txt")
    }

    /// The product catalog.
    pub fn products_file(&self) -> PathBuf {
        self.root.join("data").join("Products.txt")
    }

    /// Directory holding one ledger file per date.
    pub fn orders_dir(&self) -> PathBuf {
        self.root.join("orders")
    }

    /// The single export target, overwritten on every export.
    pub fn export_file(&self) -> PathBuf {
        self.root.join("backup").join("DataExport.txt")
    }

    /// Directory holding one append-only audit file per date.
    pub fn audits_dir(&self) -> PathBuf {
        self.root.join("audits")
    }
}

impl Default for StorePaths {
    fn default() -> Self {
        Self::new(".")
    }
}
