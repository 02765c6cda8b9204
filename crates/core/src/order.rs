//! The order record and its entry-time validation rules.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Smallest floor area an order may cover, in square feet.
pub const MIN_AREA: Decimal = dec!(100);
/// Upper bound on area accepted at entry time.
pub const MAX_AREA: Decimal = dec!(10_000_000);

/// One line-item in a per-date ledger.
///
/// The first eight fields identify the order; the last four are computed by
/// the price calculator before persistence and never entered by hand.
/// Serialized field names reproduce the legacy ledger header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Order {
    /// Positive, unique within its ledger; uniqueness is not global.
    pub order_number: u32,
    pub customer_name: String,
    /// State abbreviation, must exist in the loaded tax table.
    pub state: String,
    /// Copied from the matched state at entry time; later edits to the tax
    /// table do not retroactively alter existing orders.
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_rate: Decimal,
    pub product_type: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub area: Decimal,
    /// Copied from the matched product at entry time.
    #[serde(with = "rust_decimal::serde::str")]
    pub cost_per_square_foot: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub labor_cost_per_square_foot: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub material_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub labor_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
}

/// Column order of a ledger file, one header line then one line per order.
pub const LEDGER_HEADER: [&str; 12] = [
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
];

impl Order {
    /// A new order carrying only its assigned number; identifying fields are
    /// filled in by the caller and monetary fields by the calculator.
    pub fn new(order_number: u32) -> Self {
        Self {
            order_number,
            customer_name: String::new(),
            state: String::new(),
            tax_rate: Decimal::ZERO,
            product_type: String::new(),
            area: Decimal::ZERO,
            cost_per_square_foot: Decimal::ZERO,
            labor_cost_per_square_foot: Decimal::ZERO,
            material_cost: Decimal::ZERO,
            labor_cost: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

/// Customer names are restricted to letters, digits, spaces and periods.
///
/// The charset keeps the comma delimiter out of every written record, so
/// ledger lines never need quoting.
pub fn validate_customer_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("customer name cannot be empty"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '.')
    {
        return Err(DomainError::validation(
            "customer name cannot contain special characters",
        ));
    }
    Ok(())
}

/// Area must fall within the entry bounds.
pub fn validate_area(area: Decimal) -> DomainResult<()> {
    if area < MIN_AREA || area > MAX_AREA {
        return Err(DomainError::validation(format!(
            "area must be between {MIN_AREA} and {MAX_AREA} square feet"
        )));
    }
    Ok(())
}
