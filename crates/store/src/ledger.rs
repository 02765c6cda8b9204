//! The per-date ledger: routing, loading, and whole-file rewrites.
//!
//! At most one ledger is resident at a time. Routing a date + intended
//! action resolves the backing file, applies the create/reject policy for
//! that action, and replaces the in-memory order collection with the file's
//! contents. Every mutation re-serializes the whole collection to a sibling
//! temporary file and renames it over the target, so a crash mid-write
//! never truncates the ledger.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use floorcraft_core::dates;
use floorcraft_core::error::{DomainError, DomainResult};
use floorcraft_core::order::{LEDGER_HEADER, Order};

use crate::paths::StorePaths;

const LEDGER_PREFIX: &str = "Orders_";
const LEDGER_SUFFIX: &str = ".txt";

/// The caller's intent when routing to a date.
///
/// `Add` is the only action allowed to create a missing ledger file; the
/// rest reject a missing file as "no orders on that date".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerAction {
    Add,
    Display,
    Edit,
    Remove,
}

impl LedgerAction {
    fn creates_missing_file(self) -> bool {
        matches!(self, Self::Add)
    }
}

/// The single resident ledger: its date, backing file, and order mirror.
#[derive(Debug)]
struct ActiveLedger {
    date: NaiveDate,
    path: PathBuf,
    orders: Vec<Order>,
}

/// Owner of the currently routed ledger.
///
/// Freshly constructed stores have no resident ledger; every operation
/// other than [`LedgerStore::route`] fails with `NoRoutedLedger` until a
/// route succeeds. Routing to a new date discards the previous mirror
/// (mutations have already been flushed by their own rewrites).
#[derive(Debug)]
pub struct LedgerStore {
    orders_dir: PathBuf,
    current: Option<ActiveLedger>,
}

impl LedgerStore {
    pub fn new(paths: &StorePaths) -> Self {
        Self {
            orders_dir: paths.orders_dir(),
            current: None,
        }
    }

    /// File name for a date's ledger, e.g. `Orders_06012025.txt`.
    pub fn ledger_file_name(date: NaiveDate) -> String {
        format!("{LEDGER_PREFIX}{}{LEDGER_SUFFIX}", dates::file_token(date))
    }

    /// Reverse of [`Self::ledger_file_name`]; `None` for anything that is
    /// not a well-formed ledger file name.
    pub fn parse_ledger_file_name(name: &str) -> Option<NaiveDate> {
        let token = name.strip_prefix(LEDGER_PREFIX)?.strip_suffix(LEDGER_SUFFIX)?;
        dates::parse_file_token(token)
    }

    /// Resolve `date` to its ledger file per the action's policy, then load
    /// the file into memory, replacing any previously resident ledger.
    pub fn route(&mut self, date: NaiveDate, action: LedgerAction) -> DomainResult<()> {
        let path = self.orders_dir.join(Self::ledger_file_name(date));

        if !path.exists() {
            if action.creates_missing_file() {
                create_empty_ledger(&path)?;
                info!(%date, "created new ledger file");
            } else {
                return Err(DomainError::NoOrdersOnDate(date));
            }
        }

        let orders = load_orders(&path)?;
        debug!(%date, orders = orders.len(), "ledger routed");
        self.current = Some(ActiveLedger { date, path, orders });
        Ok(())
    }

    /// Date of the resident ledger, if any.
    pub fn routed_date(&self) -> Option<NaiveDate> {
        self.current.as_ref().map(|ledger| ledger.date)
    }

    fn active(&self) -> DomainResult<&ActiveLedger> {
        self.current.as_ref().ok_or(DomainError::NoRoutedLedger)
    }

    fn active_mut(&mut self) -> DomainResult<&mut ActiveLedger> {
        self.current.as_mut().ok_or(DomainError::NoRoutedLedger)
    }

    /// The resident ledger's orders.
    pub fn orders(&self) -> DomainResult<&[Order]> {
        Ok(&self.active()?.orders)
    }

    pub fn order(&self, order_number: u32) -> DomainResult<&Order> {
        self.active()?
            .orders
            .iter()
            .find(|o| o.order_number == order_number)
            .ok_or(DomainError::NoSuchOrder(order_number))
    }

    /// Mutable access for the edit flow: callers change the returned order
    /// in place, then call [`Self::edit`] to flush the ledger.
    pub fn order_mut(&mut self, order_number: u32) -> DomainResult<&mut Order> {
        self.active_mut()?
            .orders
            .iter_mut()
            .find(|o| o.order_number == order_number)
            .ok_or(DomainError::NoSuchOrder(order_number))
    }

    /// 1 for an empty ledger, else one past the highest existing number.
    /// Numbers are unique per ledger, not globally.
    pub fn next_order_number(&self) -> DomainResult<u32> {
        let ledger = self.active()?;
        let max = ledger.orders.iter().map(|o| o.order_number).max();
        Ok(max.map_or(1, |n| n + 1))
    }

    /// Append an order (its number already assigned) and rewrite the file.
    pub fn add(&mut self, order: Order) -> DomainResult<()> {
        let ledger = self.active_mut()?;
        debug!(date = %ledger.date, order = order.order_number, "adding order");
        ledger.orders.push(order);
        self.rewrite()
    }

    /// Flush in-place edits of the resident collection to disk.
    pub fn edit(&mut self) -> DomainResult<()> {
        self.rewrite()
    }

    /// Remove by order number and rewrite. This is the default removal.
    pub fn remove_by_number(&mut self, order_number: u32) -> DomainResult<Order> {
        let ledger = self.active_mut()?;
        let index = ledger
            .orders
            .iter()
            .position(|o| o.order_number == order_number)
            .ok_or(DomainError::NoSuchOrder(order_number))?;
        let removed = ledger.orders.remove(index);
        self.rewrite()?;
        Ok(removed)
    }

    /// Legacy removal: the entry must match `order` on every field, not
    /// just the order number. A stale copy of the order removes nothing.
    pub fn remove_matching(&mut self, order: &Order) -> DomainResult<()> {
        let ledger = self.active_mut()?;
        let index = ledger
            .orders
            .iter()
            .position(|o| o == order)
            .ok_or(DomainError::NoSuchOrder(order.order_number))?;
        ledger.orders.remove(index);
        self.rewrite()
    }

    /// Delete the resident ledger's backing file. Callers invoke this only
    /// once the collection is empty; deleting an already-missing file is a
    /// no-op.
    pub fn delete_current_file(&mut self) -> DomainResult<()> {
        let ledger = self.active()?;
        match fs::remove_file(&ledger.path) {
            Ok(()) => {
                info!(date = %ledger.date, "deleted empty ledger file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::persistence(format!(
                "could not delete ledger file {}: {e}",
                ledger.path.display()
            ))),
        }
    }

    fn rewrite(&self) -> DomainResult<()> {
        let ledger = self.active()?;
        write_orders(&ledger.path, &ledger.orders)
    }
}

/// Create a valid, header-only ledger file (and the orders directory on
/// first use).
fn create_empty_ledger(path: &Path) -> DomainResult<()> {
    write_orders(path, &[])
}

fn load_orders(path: &Path) -> DomainResult<Vec<Order>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| {
            DomainError::persistence(format!("could not open ledger {}: {e}", path.display()))
        })?;

    let mut orders = Vec::new();
    for record in reader.deserialize() {
        // No partial loads: one malformed record fails the whole call.
        let order: Order = record.map_err(|e| {
            DomainError::persistence(format!(
                "malformed record in ledger {}: {e}",
                path.display()
            ))
        })?;
        orders.push(order);
    }
    Ok(orders)
}

/// Serialize header + records to a sibling temp file, then atomically
/// rename it over the target.
fn write_orders(path: &Path, orders: &[Order]) -> DomainResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("txt.tmp");

    let result = (|| -> DomainResult<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)
            .map_err(|e| {
                DomainError::persistence(format!(
                    "could not write ledger {}: {e}",
                    path.display()
                ))
            })?;
        writer
            .write_record(LEDGER_HEADER)
            .map_err(|e| DomainError::persistence(e.to_string()))?;
        for order in orders {
            // Decimal fields keep their stored scale; nothing is re-rounded
            // at write time.
            writer
                .serialize(order)
                .map_err(|e| DomainError::persistence(e.to_string()))?;
        }
        writer.flush()?;
        Ok(())
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        DomainError::persistence(format!(
            "could not replace ledger {}: {e}",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn store() -> (TempDir, LedgerStore) {
        let dir = TempDir::new().unwrap();
        let paths = StorePaths::new(dir.path());
        (dir, LedgerStore::new(&paths))
    }

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn sample_order(number: u32) -> Order {
        let mut order = Order::new(number);
        order.customer_name = "Ada Lovelace".into();
        order.state = "TX".into();
        order.tax_rate = dec!(4.45);
        order.product_type = "Tile".into();
        order.area = dec!(249.00);
        order.cost_per_square_foot = dec!(3.50);
        order.labor_cost_per_square_foot = dec!(4.15);
        order.material_cost = dec!(871.50);
        order.labor_cost = dec!(1033.35);
        order.tax = dec!(84.77);
        order.total = dec!(1989.62);
        order
    }

    #[test]
    fn file_name_round_trips_through_its_date() {
        let name = LedgerStore::ledger_file_name(june(1));
        assert_eq!(name, "Orders_06012025.txt");
        assert_eq!(LedgerStore::parse_ledger_file_name(&name), Some(june(1)));
        assert_eq!(LedgerStore::parse_ledger_file_name("DataExport.txt"), None);
        assert_eq!(LedgerStore::parse_ledger_file_name("Orders_06012025.txt.tmp"), None);
    }

    #[test]
    fn routing_add_creates_a_header_only_file() {
        let (dir, mut store) = store();
        store.route(june(1), LedgerAction::Add).unwrap();

        let path = dir.path().join("orders").join("Orders_06012025.txt");
        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(
            contents,
            "OrderNumber,CustomerName,State,TaxRate,ProductType,Area,CostPerSquareFoot,\
             LaborCostPerSquareFoot,MaterialCost,LaborCost,Tax,Total\n"
        );
        assert!(store.orders().unwrap().is_empty());
    }

    #[test]
    fn routing_display_to_a_missing_date_fails() {
        let (_dir, mut store) = store();
        assert_eq!(
            store.route(june(1), LedgerAction::Display),
            Err(DomainError::NoOrdersOnDate(june(1)))
        );
        for action in [LedgerAction::Edit, LedgerAction::Remove] {
            assert_eq!(
                store.route(june(1), action),
                Err(DomainError::NoOrdersOnDate(june(1)))
            );
        }
        // The failed routes must not have created anything.
        assert_eq!(store.routed_date(), None);
    }

    #[test]
    fn operations_before_any_route_are_rejected() {
        let (_dir, mut store) = store();
        assert_eq!(store.orders().unwrap_err(), DomainError::NoRoutedLedger);
        assert_eq!(store.next_order_number().unwrap_err(), DomainError::NoRoutedLedger);
        assert_eq!(store.add(sample_order(1)).unwrap_err(), DomainError::NoRoutedLedger);
        assert_eq!(store.delete_current_file().unwrap_err(), DomainError::NoRoutedLedger);
    }

    #[test]
    fn written_ledger_reloads_field_by_field() {
        let (_dir, mut store) = store();
        store.route(june(1), LedgerAction::Add).unwrap();

        let first = sample_order(1);
        let mut second = sample_order(2);
        second.customer_name = "Grace Hopper".into();
        second.area = dec!(100);
        store.add(first.clone()).unwrap();
        store.add(second.clone()).unwrap();

        // Route away and back to force a reload from disk.
        store.route(june(2), LedgerAction::Add).unwrap();
        store.route(june(1), LedgerAction::Display).unwrap();

        assert_eq!(store.orders().unwrap(), &[first, second]);
    }

    #[test]
    fn next_order_number_is_one_past_the_maximum() {
        let (_dir, mut store) = store();
        store.route(june(1), LedgerAction::Add).unwrap();
        assert_eq!(store.next_order_number().unwrap(), 1);

        store.add(sample_order(1)).unwrap();
        store.add(sample_order(3)).unwrap();
        // A gap (say, order 2 was removed by hand) does not get refilled.
        assert_eq!(store.next_order_number().unwrap(), 4);
    }

    #[test]
    fn add_remove_then_delete_leaves_no_file() {
        let (dir, mut store) = store();
        store.route(june(1), LedgerAction::Add).unwrap();
        store.add(sample_order(1)).unwrap();
        store.remove_by_number(1).unwrap();

        assert!(store.orders().unwrap().is_empty());
        store.delete_current_file().unwrap();

        let path = dir.path().join("orders").join("Orders_06012025.txt");
        assert!(!path.exists());
        // Deleting again is a no-op.
        store.delete_current_file().unwrap();
    }

    #[test]
    fn remove_matching_requires_every_field_to_match() {
        let (_dir, mut store) = store();
        store.route(june(1), LedgerAction::Add).unwrap();
        store.add(sample_order(1)).unwrap();

        // A stale copy differing in one field matches nothing.
        let mut stale = sample_order(1);
        stale.customer_name = "Someone Else".into();
        assert_eq!(
            store.remove_matching(&stale),
            Err(DomainError::NoSuchOrder(1))
        );
        assert_eq!(store.orders().unwrap().len(), 1);

        store.remove_matching(&sample_order(1)).unwrap();
        assert!(store.orders().unwrap().is_empty());
    }

    #[test]
    fn remove_by_number_returns_the_removed_order() {
        let (_dir, mut store) = store();
        store.route(june(1), LedgerAction::Add).unwrap();
        store.add(sample_order(1)).unwrap();
        store.add(sample_order(2)).unwrap();

        let removed = store.remove_by_number(1).unwrap();
        assert_eq!(removed.order_number, 1);
        assert_eq!(store.orders().unwrap().len(), 1);
        assert_eq!(
            store.remove_by_number(9).unwrap_err(),
            DomainError::NoSuchOrder(9)
        );
    }

    #[test]
    fn edit_flushes_in_place_changes() {
        let (_dir, mut store) = store();
        store.route(june(1), LedgerAction::Add).unwrap();
        store.add(sample_order(1)).unwrap();

        store.order_mut(1).unwrap().customer_name = "Edited Name".into();
        store.edit().unwrap();

        store.route(june(1), LedgerAction::Display).unwrap();
        assert_eq!(store.order(1).unwrap().customer_name, "Edited Name");
    }

    #[test]
    fn malformed_ledger_fails_the_whole_load() {
        let (dir, mut store) = store();
        let orders_dir = dir.path().join("orders");
        fs::create_dir_all(&orders_dir).unwrap();
        fs::write(
            orders_dir.join("Orders_06012025.txt"),
            "OrderNumber,CustomerName,State,TaxRate,ProductType,Area,CostPerSquareFoot,\
             LaborCostPerSquareFoot,MaterialCost,LaborCost,Tax,Total\n\
             1,Ada,TX,not-a-number,Tile,249,3.50,4.15,871.50,1033.35,84.77,1989.62\n",
        )
        .unwrap();

        let err = store.route(june(1), LedgerAction::Display).unwrap_err();
        assert!(err.is_fatal());
        // No partial load: the store still has no resident ledger.
        assert_eq!(store.routed_date(), None);
    }

    #[test]
    fn rewrites_leave_no_temporary_files_behind() {
        let (dir, mut store) = store();
        store.route(june(1), LedgerAction::Add).unwrap();
        store.add(sample_order(1)).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path().join("orders"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["Orders_06012025.txt"]);
    }

    #[test]
    fn decimal_fields_keep_their_stored_scale_on_disk() {
        let (dir, mut store) = store();
        store.route(june(1), LedgerAction::Add).unwrap();
        store.add(sample_order(1)).unwrap();

        let contents =
            fs::read_to_string(dir.path().join("orders").join("Orders_06012025.txt")).unwrap();
        let data_line = contents.lines().nth(1).unwrap();
        assert_eq!(
            data_line,
            "1,Ada Lovelace,TX,4.45,Tile,249.00,3.50,4.15,871.50,1033.35,84.77,1989.62"
        );
    }

    #[test]
    fn routing_to_a_new_date_discards_the_previous_mirror() {
        let (_dir, mut store) = store();
        store.route(june(1), LedgerAction::Add).unwrap();
        store.add(sample_order(1)).unwrap();

        store.route(june(2), LedgerAction::Add).unwrap();
        assert_eq!(store.routed_date(), Some(june(2)));
        assert!(store.orders().unwrap().is_empty());
    }
}
