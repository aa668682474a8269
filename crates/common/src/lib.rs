//! Shared value types used across the CD shop crates.

pub mod money;
pub mod types;

pub use money::Money;
pub use types::SaleId;
