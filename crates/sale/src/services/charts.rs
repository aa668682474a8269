//! Sales charts trait and implementations.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Trait for reporting completed sales to the charts.
#[async_trait]
pub trait Charts: Send + Sync {
    /// Records that `copies` of a title were sold.
    async fn record_sale(&self, title: &str, creator: &str, copies: u32);
}

/// A sale as reported to the charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartEntry {
    pub title: String,
    pub creator: String,
    pub copies: u32,
}

impl ChartEntry {
    /// Creates a chart entry.
    pub fn new(title: impl Into<String>, creator: impl Into<String>, copies: u32) -> Self {
        Self {
            title: title.into(),
            creator: creator.into(),
            copies,
        }
    }
}

/// In-memory charts for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCharts {
    sales: Arc<RwLock<Vec<ChartEntry>>>,
}

impl InMemoryCharts {
    /// Creates new empty charts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every reported sale, oldest first.
    pub async fn sales(&self) -> Vec<ChartEntry> {
        self.sales.read().await.clone()
    }

    /// Returns the total copies reported for a title.
    pub async fn copies_sold(&self, title: &str) -> u64 {
        self.sales
            .read()
            .await
            .iter()
            .filter(|entry| entry.title == title)
            .map(|entry| u64::from(entry.copies))
            .sum()
    }
}

#[async_trait]
impl Charts for InMemoryCharts {
    async fn record_sale(&self, title: &str, creator: &str, copies: u32) {
        self.sales
            .write()
            .await
            .push(ChartEntry::new(title, creator, copies));
    }
}
