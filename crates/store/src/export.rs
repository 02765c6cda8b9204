//! Whole-store export: every ledger folded into one annotated file.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use floorcraft_core::dates;
use floorcraft_core::error::{DomainError, DomainResult};
use floorcraft_core::order::Order;

use crate::ledger::{LedgerAction, LedgerStore};
use crate::paths::StorePaths;

/// Export column order: the twelve ledger columns plus the source date.
const EXPORT_HEADER: [&str; 13] = [
    "OrderNumber",
    "CustomerName",
    "State",
    "TaxRate",
    "ProductType",
    "Area",
    "CostPerSquareFoot",
    "LaborCostPerSquareFoot",
    "MaterialCost",
    "LaborCost",
    "Tax",
    "Total",
    "Date",
];

/// One export row: an order plus the display form of its ledger's date.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ExportRecord {
    order_number: u32,
    customer_name: String,
    state: String,
    #[serde(with = "rust_decimal::serde::str")]
    tax_rate: Decimal,
    product_type: String,
    #[serde(with = "rust_decimal::serde::str")]
    area: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    cost_per_square_foot: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    labor_cost_per_square_foot: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    material_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    labor_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    tax: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    total: Decimal,
    date: String,
}

impl ExportRecord {
    fn new(order: &Order, date: NaiveDate) -> Self {
        Self {
            order_number: order.order_number,
            customer_name: order.customer_name.clone(),
            state: order.state.clone(),
            tax_rate: order.tax_rate,
            product_type: order.product_type.clone(),
            area: order.area,
            cost_per_square_foot: order.cost_per_square_foot,
            labor_cost_per_square_foot: order.labor_cost_per_square_foot,
            material_cost: order.material_cost,
            labor_cost: order.labor_cost,
            tax: order.tax,
            total: order.total,
            date: dates::display_date(date),
        }
    }
}

/// Concatenate every ledger into the export file, overwriting any previous
/// export. Each ledger is re-routed through the store with Display
/// semantics, so a missing file is never created along the way. Any read
/// failure aborts the export and leaves no partial file behind. Returns
/// the number of exported rows.
pub fn export_all(store: &mut LedgerStore, paths: &StorePaths) -> DomainResult<usize> {
    let export_path = paths.export_file();
    if let Some(parent) = export_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = export_path.with_extension("txt.tmp");

    let result = write_export(store, paths, &tmp);
    match result {
        Ok(rows) => {
            fs::rename(&tmp, &export_path).map_err(|e| {
                let _ = fs::remove_file(&tmp);
                DomainError::persistence(format!(
                    "could not replace export file {}: {e}",
                    export_path.display()
                ))
            })?;
            info!(rows, path = %export_path.display(), "export complete");
            Ok(rows)
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}

fn write_export(store: &mut LedgerStore, paths: &StorePaths, tmp: &Path) -> DomainResult<usize> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(tmp)
        .map_err(|e| {
            DomainError::persistence(format!("could not write export file: {e}"))
        })?;
    writer
        .write_record(EXPORT_HEADER)
        .map_err(|e| DomainError::persistence(e.to_string()))?;

    let mut rows = 0;
    for date in ledger_dates(&paths.orders_dir())? {
        store.route(date, LedgerAction::Display)?;
        for order in store.orders()? {
            writer
                .serialize(ExportRecord::new(order, date))
                .map_err(|e| DomainError::persistence(e.to_string()))?;
            rows += 1;
        }
    }

    writer.flush()?;
    Ok(rows)
}

/// Dates of every ledger file in the orders directory, in file-system
/// enumeration order. Files that do not carry a well-formed ledger name
/// are not ledgers and are skipped. A missing directory means no ledgers
/// have ever been created.
fn ledger_dates(orders_dir: &Path) -> DomainResult<Vec<NaiveDate>> {
    let entries = match fs::read_dir(orders_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(DomainError::persistence(format!(
                "could not list orders directory {}: {e}",
                orders_dir.display()
            )));
        }
    };

    let mut dates = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        match LedgerStore::parse_ledger_file_name(&name.to_string_lossy()) {
            Some(date) => dates.push(date),
            None => warn!(file = %name.to_string_lossy(), "skipping non-ledger file in orders directory"),
        }
    }
    Ok(dates)
}
