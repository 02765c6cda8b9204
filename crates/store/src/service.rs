//! The order service: one facade over reference data, the routed ledger,
//! pricing, and the audit trail.
//!
//! This is the surface the terminal layer drives. It owns all three
//! collaborators; nothing else mutates the resident ledger.

use chrono::{Local, NaiveDate};
use tracing::info;

use floorcraft_core::error::{DomainError, DomainResult};
use floorcraft_core::{Order, Product, State};
use floorcraft_pricing::calculate_prices;

use crate::audit::{AuditLog, FileAuditLog};
use crate::export;
use crate::ledger::{LedgerAction, LedgerStore};
use crate::paths::StorePaths;
use crate::reference::ReferenceStore;

/// New orders may be placed today or later; strictly past dates are
/// rejected.
pub fn validate_future_date(date: NaiveDate, today: NaiveDate) -> DomainResult<()> {
    if date < today {
        return Err(DomainError::InvalidDate(date));
    }
    Ok(())
}

#[derive(Debug)]
pub struct OrderService {
    reference: ReferenceStore,
    ledger: LedgerStore,
    audit: Box<dyn AuditLog>,
    paths: StorePaths,
}

impl OrderService {
    /// Load the reference tables and wire up the file-backed audit log.
    /// A reference-table failure here is fatal: the session cannot start.
    pub fn bootstrap(paths: StorePaths) -> DomainResult<Self> {
        let audit = Box::new(FileAuditLog::new(&paths));
        Self::with_audit(paths, audit)
    }

    /// As [`Self::bootstrap`], with a caller-supplied audit collaborator.
    pub fn with_audit(paths: StorePaths, audit: Box<dyn AuditLog>) -> DomainResult<Self> {
        let reference = ReferenceStore::load(&paths)?;
        let ledger = LedgerStore::new(&paths);
        Ok(Self {
            reference,
            ledger,
            audit,
            paths,
        })
    }

    /// Route the ledger for `date` per the action's create/reject policy.
    pub fn route(&mut self, date: NaiveDate, action: LedgerAction) -> DomainResult<()> {
        self.ledger.route(date, action)
    }

    /// Check an entry date against today's calendar date.
    pub fn validate_order_date(&self, date: NaiveDate) -> DomainResult<()> {
        validate_future_date(date, Local::now().date_naive())
    }

    pub fn validate_state(&self, abbreviation: &str) -> DomainResult<()> {
        self.reference.validate_state(abbreviation)
    }

    pub fn validate_product(&self, product_type: &str) -> DomainResult<()> {
        self.reference.validate_product(product_type)
    }

    pub fn states(&self) -> &[State] {
        self.reference.states()
    }

    pub fn products(&self) -> &[Product] {
        self.reference.products()
    }

    pub fn state(&self, abbreviation: &str) -> Option<&State> {
        self.reference.state(abbreviation)
    }

    pub fn product(&self, product_type: &str) -> Option<&Product> {
        self.reference.product(product_type)
    }

    /// Fill the computed monetary fields from the loaded tax table.
    pub fn price(&self, order: Order) -> Order {
        calculate_prices(order, self.reference.states())
    }

    pub fn next_order_number(&self) -> DomainResult<u32> {
        self.ledger.next_order_number()
    }

    /// The routed ledger's orders. A resident-but-empty ledger is only a
    /// valid answer while adding; every other intent treats it the same
    /// as a date with no orders at all.
    pub fn orders_for(&self, action: LedgerAction) -> DomainResult<&[Order]> {
        let orders = self.ledger.orders()?;
        if orders.is_empty() && action != LedgerAction::Add {
            let date = self.ledger.routed_date().ok_or(DomainError::NoRoutedLedger)?;
            return Err(DomainError::NoOrdersOnDate(date));
        }
        Ok(orders)
    }

    pub fn order(&self, order_number: u32) -> DomainResult<&Order> {
        self.ledger.order(order_number)
    }

    /// Mutable handle for the edit flow; finish with
    /// [`Self::store_edited_order`].
    pub fn order_mut(&mut self, order_number: u32) -> DomainResult<&mut Order> {
        self.ledger.order_mut(order_number)
    }

    /// Persist a confirmed new order and write its audit line.
    pub fn place_order(&mut self, order: Order, date: NaiveDate) -> DomainResult<()> {
        let number = order.order_number;
        self.ledger.add(order)?;
        info!(%date, order = number, "order placed");
        self.audit_line(date, &format!("placed order number {number}"))
    }

    /// Flush an in-place edit and write its audit line.
    pub fn store_edited_order(&mut self, order_number: u32, date: NaiveDate) -> DomainResult<()> {
        self.ledger.edit()?;
        info!(%date, order = order_number, "order edited");
        self.audit_line(date, &format!("edited order number {order_number}"))
    }

    /// Remove by order number (the default removal) and write its audit
    /// line.
    pub fn remove_order(&mut self, order_number: u32, date: NaiveDate) -> DomainResult<Order> {
        let removed = self.ledger.remove_by_number(order_number)?;
        info!(%date, order = order_number, "order removed");
        self.audit_line(date, &format!("removed order number {order_number}"))?;
        Ok(removed)
    }

    /// Legacy removal requiring a full field match; see
    /// [`LedgerStore::remove_matching`].
    pub fn remove_order_matching(&mut self, order: &Order, date: NaiveDate) -> DomainResult<()> {
        self.ledger.remove_matching(order)?;
        self.audit_line(date, &format!("removed order number {}", order.order_number))
    }

    /// Delete the routed ledger's file when its last order is gone (or its
    /// first was never confirmed). Returns whether a delete happened.
    pub fn delete_ledger_if_empty(&mut self) -> DomainResult<bool> {
        if self.ledger.orders()?.is_empty() {
            self.ledger.delete_current_file()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Fold every ledger into the export file; see [`export::export_all`].
    pub fn export_all(&mut self) -> DomainResult<usize> {
        export::export_all(&mut self.ledger, &self.paths)
    }

    fn audit_line(&self, date: NaiveDate, what: &str) -> DomainResult<()> {
        let stamp = Local::now().format("%Y-%m-%dT%H:%M:%S");
        self.audit.append(&format!("{stamp} -- {what}"), date)
    }
}
