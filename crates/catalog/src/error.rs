//! Catalog error types.

use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No entry exists for the title.
    #[error("CD not found: {0}")]
    NotFound(String),

    /// No entries exist for the creator.
    #[error("No CDs found for artist: {0}")]
    CreatorNotFound(String),

    /// The entry does not hold enough copies.
    #[error("Insufficient stock for '{title}': requested {requested}, available {available}")]
    OutOfStock {
        title: String,
        requested: u32,
        available: u32,
    },

    /// Quantity must be at least one.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Adding the copies would exceed the largest representable stock.
    #[error("Cannot add {added} copies of '{title}': stock of {stock} would overflow")]
    StockOverflow {
        title: String,
        stock: u32,
        added: u32,
    },
}

/// Convenience type alias for catalog results.
pub type Result<T> = std::result::Result<T, CatalogError>;
