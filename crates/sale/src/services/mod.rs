//! External capabilities a sale depends on, with in-memory implementations.

pub mod charts;
pub mod competitor;
pub mod payment;
pub mod rank;

pub use charts::{ChartEntry, Charts, InMemoryCharts};
pub use competitor::{CompetitorPrices, InMemoryCompetitorPrices};
pub use payment::{CreditCard, InMemoryPaymentProcessor, PaymentProcessor, PaymentReceipt};
pub use rank::{InMemoryRankSource, RankSource};
