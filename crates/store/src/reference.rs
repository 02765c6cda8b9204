//! Load-once reference data: the state tax table and the product catalog.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use floorcraft_core::error::{DomainError, DomainResult};
use floorcraft_core::{Product, State};

use crate::paths::StorePaths;

/// Immutable snapshot of both reference tables, in source order.
///
/// A failure to read either table is fatal at startup; there is no partial
/// or lazy loading, and no mutation after [`ReferenceStore::load`].
#[derive(Debug, Clone)]
pub struct ReferenceStore {
    states: Vec<State>,
    products: Vec<Product>,
}

impl ReferenceStore {
    /// Read both tables from disk.
    pub fn load(paths: &StorePaths) -> DomainResult<Self> {
        let states: Vec<State> = read_table(&paths.taxes_file(), "state tax table")?;
        let products: Vec<Product> = read_table(&paths.products_file(), "product catalog")?;
        info!(
            states = states.len(),
            products = products.len(),
            "reference tables loaded"
        );
        Ok(Self { states, products })
    }

    /// All states, in the order the table listed them.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// All products, in the order the catalog listed them.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn state(&self, abbreviation: &str) -> Option<&State> {
        self.states.iter().find(|s| s.abbreviation == abbreviation)
    }

    pub fn product(&self, product_type: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.product_type == product_type)
    }

    /// Defensive check that a chosen abbreviation is on the loaded table.
    pub fn validate_state(&self, abbreviation: &str) -> DomainResult<()> {
        match self.state(abbreviation) {
            Some(_) => Ok(()),
            None => Err(DomainError::InvalidState(abbreviation.to_string())),
        }
    }

    /// Defensive check that a chosen product type is in the loaded catalog.
    pub fn validate_product(&self, product_type: &str) -> DomainResult<()> {
        match self.product(product_type) {
            Some(_) => Ok(()),
            None => Err(DomainError::NoSuchProduct(product_type.to_string())),
        }
    }
}

fn read_table<T: DeserializeOwned>(path: &Path, what: &str) -> DomainResult<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| {
            DomainError::persistence(format!(
                "could not load the {what} from {}: {e}",
                path.display()
            ))
        })?;

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: T = record.map_err(|e| {
            DomainError::persistence(format!(
                "malformed record in the {what} at {}: {e}",
                path.display()
            ))
        })?;
        rows.push(row);
    }
    Ok(rows)
}
