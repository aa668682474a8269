//! Sale error types.

use catalog::CatalogError;
use common::Money;
use thiserror::Error;

/// Errors that can abort a sale.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaleError {
    /// The title is not in the catalog.
    #[error("CD not found: {0}")]
    CdNotFound(String),

    /// Not enough copies, either at the stock check or at commit.
    #[error("Insufficient stock for '{title}': requested {requested}, available {available}")]
    OutOfStock {
        title: String,
        requested: u32,
        available: u32,
    },

    /// The payment processor declined or errored.
    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    /// Quantity must be at least one, and must fit alongside existing stock.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// The sale total does not fit in a money amount.
    #[error("Total for {quantity} x '{title}' at {unit_price} is out of range")]
    InvalidAmount {
        title: String,
        unit_price: Money,
        quantity: u32,
    },
}

impl SaleError {
    /// Short label for the error kind, used in metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            SaleError::CdNotFound(_) => "cd_not_found",
            SaleError::OutOfStock { .. } => "out_of_stock",
            SaleError::PaymentFailed(_) => "payment_failed",
            SaleError::InvalidQuantity(_) => "invalid_quantity",
            SaleError::InvalidAmount { .. } => "invalid_amount",
        }
    }
}

impl From<CatalogError> for SaleError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(title) => SaleError::CdNotFound(title),
            CatalogError::CreatorNotFound(creator) => SaleError::CdNotFound(creator),
            CatalogError::OutOfStock {
                title,
                requested,
                available,
            } => SaleError::OutOfStock {
                title,
                requested,
                available,
            },
            CatalogError::InvalidQuantity(quantity) => SaleError::InvalidQuantity(quantity),
            CatalogError::StockOverflow { added, .. } => SaleError::InvalidQuantity(added),
        }
    }
}

/// Convenience type alias for sale results.
pub type Result<T> = std::result::Result<T, SaleError>;
