//! Steps of the sale pipeline.

use serde::{Deserialize, Serialize};

/// A step of a sale, in execution order.
///
/// ```text
/// Resolve ──► StockCheck ──► Price ──► CollectPayment ──► Commit ──► Notify
/// ```
///
/// Every step up to and including `Commit` can abort the sale. `Notify`
/// cannot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum SaleStep {
    /// Look up the title in the ledger.
    Resolve,

    /// Preliminary stock check against the resolved snapshot.
    StockCheck,

    /// Compute the offer price.
    Price,

    /// Charge the payer.
    CollectPayment,

    /// Atomically remove the copies from the ledger.
    Commit,

    /// Report the sale to the charts.
    Notify,
}

impl SaleStep {
    /// Returns true if the payer has been charged by the time this step runs.
    pub fn payment_collected(&self) -> bool {
        matches!(self, SaleStep::Commit | SaleStep::Notify)
    }

    /// Returns the step name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleStep::Resolve => "resolve",
            SaleStep::StockCheck => "stock_check",
            SaleStep::Price => "price",
            SaleStep::CollectPayment => "collect_payment",
            SaleStep::Commit => "commit",
            SaleStep::Notify => "notify",
        }
    }
}

impl std::fmt::Display for SaleStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
