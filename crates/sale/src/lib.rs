//! Sale pipeline for the CD shop.
//!
//! A sale runs these steps, in order, exactly once:
//! 1. Resolve the title in the ledger
//! 2. Check there is enough stock
//! 3. Price the sale (rank, then competitor price when the title ranks high)
//! 4. Collect payment
//! 5. Commit the stock removal
//! 6. Notify the charts
//!
//! Any failure before step 5 leaves the ledger untouched. If the commit
//! fails after payment was collected, the payment is refunded.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod pricing;
pub mod receipt;
pub mod services;
pub mod step;

pub use config::PricingConfig;
pub use coordinator::SaleCoordinator;
pub use error::{Result, SaleError};
pub use pricing::PricingPolicy;
pub use receipt::SaleReceipt;
pub use services::{
    ChartEntry, Charts, CompetitorPrices, CreditCard, InMemoryCharts, InMemoryCompetitorPrices,
    InMemoryPaymentProcessor, InMemoryRankSource, PaymentProcessor, PaymentReceipt, RankSource,
};
pub use step::SaleStep;
