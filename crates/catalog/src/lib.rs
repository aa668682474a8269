//! Inventory ledger for the CD shop.
//!
//! This crate provides:
//! - `CdDescriptor` and `CatalogEntry`, the per-title catalog record
//! - `Ledger`, the shared, lock-guarded owner of all stock
//!
//! Entries never leave the ledger by reference. Every read hands back a
//! copy, and every stock change goes through a `Ledger` method.

pub mod entry;
pub mod error;
pub mod ledger;

pub use entry::{CatalogEntry, CdDescriptor};
pub use error::{CatalogError, Result};
pub use ledger::Ledger;
