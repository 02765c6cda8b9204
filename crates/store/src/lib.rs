//! `floorcraft-store` — persistence for per-date order ledgers.
//!
//! One calendar date maps to one flat, line-delimited ledger file. The
//! [`ledger::LedgerStore`] routes a date + intended action to that file,
//! keeps the in-memory mirror of the routed ledger consistent with disk,
//! and rewrites the whole file on every mutation. [`export`] folds every
//! ledger into a single annotated export file, and [`audit`] records an
//! append-only trail per date. [`service::OrderService`] ties the pieces
//! together behind the interface the terminal layer drives.

pub mod audit;
pub mod export;
pub mod ledger;
pub mod paths;
pub mod reference;
pub mod service;

pub use audit::{AuditLog, FileAuditLog};
pub use ledger::{LedgerAction, LedgerStore};
pub use paths::StorePaths;
pub use reference::ReferenceStore;
pub use service::OrderService;
