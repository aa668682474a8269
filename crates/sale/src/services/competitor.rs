//! Competitor price source trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::Money;
use tokio::sync::RwLock;

/// Trait for looking up what a competitor charges for a title.
#[async_trait]
pub trait CompetitorPrices: Send + Sync {
    /// Returns the competitor's price for a title.
    async fn price(&self, title: &str) -> Money;
}

#[derive(Debug)]
struct InMemoryCompetitorState {
    prices: HashMap<String, Money>,
    default_price: Money,
    lookups: usize,
}

/// In-memory competitor prices for testing.
///
/// Counts lookups so tests can check the competitor was never asked.
#[derive(Debug, Clone)]
pub struct InMemoryCompetitorPrices {
    state: Arc<RwLock<InMemoryCompetitorState>>,
}

impl InMemoryCompetitorPrices {
    /// Creates a source that quotes `default_price` for every title.
    pub fn new(default_price: Money) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryCompetitorState {
                prices: HashMap::new(),
                default_price,
                lookups: 0,
            })),
        }
    }

    /// Sets the competitor's price for a title.
    pub async fn set_price(&self, title: impl Into<String>, price: Money) {
        self.state.write().await.prices.insert(title.into(), price);
    }

    /// Returns how many times a price was looked up.
    pub async fn lookup_count(&self) -> usize {
        self.state.read().await.lookups
    }
}

#[async_trait]
impl CompetitorPrices for InMemoryCompetitorPrices {
    async fn price(&self, title: &str) -> Money {
        let mut state = self.state.write().await;
        state.lookups += 1;
        state
            .prices
            .get(title)
            .copied()
            .unwrap_or(state.default_price)
    }
}
