//! Domain error model.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// `Persistence` is fatal to the running session; every other variant is
/// recoverable and reported back to the caller, who re-prompts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Any I/O failure: missing/unreadable/unwritable file, malformed record.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// Routing to a non-add ledger whose backing file does not exist.
    #[error("there are no orders for {0}")]
    NoOrdersOnDate(NaiveDate),

    /// An order number lookup within the routed ledger found nothing.
    #[error("no order number {0} exists for the selected date")]
    NoSuchOrder(u32),

    /// A state abbreviation not present in the loaded tax table.
    #[error("state {0} is not on the list of available states")]
    InvalidState(String),

    /// A product type not present in the loaded catalog.
    #[error("no product called {0} is on the list of available products")]
    NoSuchProduct(String),

    /// New orders cannot be placed on past dates.
    #[error("invalid date {0}: new orders cannot be added to past dates")]
    InvalidDate(NaiveDate),

    /// A ledger operation was attempted before any ledger was routed.
    #[error("no ledger is routed")]
    NoRoutedLedger,

    /// A value failed validation (e.g. malformed customer name).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// True for errors that end the session rather than the current prompt.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}
