//! The record handed back for a completed sale.

use chrono::{DateTime, Utc};
use common::{Money, SaleId};
use serde::{Deserialize, Serialize};

/// A completed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleReceipt {
    pub sale_id: SaleId,
    pub title: String,
    pub creator: String,
    pub quantity: u32,
    /// Offer price charged per copy.
    pub unit_price: Money,
    pub total: Money,
    /// ID the payment processor assigned to the charge.
    pub payment_id: String,
    pub sold_at: DateTime<Utc>,
}
