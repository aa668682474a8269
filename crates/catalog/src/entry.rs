//! Catalog records.

use common::Money;
use serde::{Deserialize, Serialize};

/// Descriptive fields of a CD, supplied when stocking a title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CdDescriptor {
    /// Title of the CD. Unique within a ledger.
    pub title: String,

    /// Artist credited on the CD.
    pub creator: String,

    /// List price per copy.
    pub unit_price: Money,
}

impl CdDescriptor {
    /// Creates a new descriptor.
    pub fn new(title: impl Into<String>, creator: impl Into<String>, unit_price: Money) -> Self {
        Self {
            title: title.into(),
            creator: creator.into(),
            unit_price,
        }
    }
}

/// A title held by the ledger, with its current stock.
///
/// Values of this type handed out by the ledger are snapshots. Changing
/// stock is only possible through `Ledger`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    pub creator: String,
    pub unit_price: Money,
    stock: u32,
}

impl CatalogEntry {
    pub(crate) fn new(descriptor: CdDescriptor, stock: u32) -> Self {
        Self {
            title: descriptor.title,
            creator: descriptor.creator,
            unit_price: descriptor.unit_price,
            stock,
        }
    }

    /// Returns the number of copies in stock.
    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Returns true if at least `quantity` copies are in stock.
    pub fn has_stock(&self, quantity: u32) -> bool {
        self.stock >= quantity
    }

    /// Returns true if the descriptor carries the same creator and price.
    pub(crate) fn describes_same(&self, descriptor: &CdDescriptor) -> bool {
        self.creator == descriptor.creator && self.unit_price == descriptor.unit_price
    }

    /// Adds `quantity` copies. Returns false and leaves the stock untouched
    /// if the result would not fit.
    pub(crate) fn restock(&mut self, quantity: u32) -> bool {
        match self.stock.checked_add(quantity) {
            Some(total) => {
                self.stock = total;
                true
            }
            None => false,
        }
    }

    /// Subtracts `quantity` if enough copies are held. Returns false and
    /// leaves the stock untouched otherwise.
    pub(crate) fn take(&mut self, quantity: u32) -> bool {
        match self.stock.checked_sub(quantity) {
            Some(remaining) => {
                self.stock = remaining;
                true
            }
            None => false,
        }
    }
}
