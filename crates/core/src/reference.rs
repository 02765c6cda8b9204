//! Reference records: the state tax table and the product catalog.
//!
//! Both are loaded once at startup and read-only thereafter. Serialized
//! field names reproduce the legacy table headers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the state tax table (`Taxes.txt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct State {
    /// Business key, e.g. `TX`. Legacy column name is `State`.
    #[serde(rename = "State")]
    pub abbreviation: String,
    pub state_name: String,
    /// Percentage units, e.g. `6.25` for 6.25%.
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_rate: Decimal,
}

/// One row of the product catalog (`Products.txt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    /// Business key, e.g. `Tile`.
    pub product_type: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub cost_per_square_foot: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub labor_cost_per_square_foot: Decimal,
}
