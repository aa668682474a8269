//! Rank source trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Trait for looking up how popular a title is. Lower is more popular.
#[async_trait]
pub trait RankSource: Send + Sync {
    /// Returns the rank of a title.
    async fn rank(&self, title: &str) -> u32;
}

#[derive(Debug)]
struct InMemoryRankState {
    ranks: HashMap<String, u32>,
    default_rank: u32,
    lookups: usize,
}

/// In-memory rank source for testing.
///
/// Titles without an explicit rank get the default rank.
#[derive(Debug, Clone)]
pub struct InMemoryRankSource {
    state: Arc<RwLock<InMemoryRankState>>,
}

impl InMemoryRankSource {
    /// Creates a rank source that ranks every title at `default_rank`.
    pub fn new(default_rank: u32) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryRankState {
                ranks: HashMap::new(),
                default_rank,
                lookups: 0,
            })),
        }
    }

    /// Creates a rank source where nothing is ranked.
    pub fn unranked() -> Self {
        Self::new(u32::MAX)
    }

    /// Sets the rank of a title.
    pub async fn set_rank(&self, title: impl Into<String>, rank: u32) {
        self.state.write().await.ranks.insert(title.into(), rank);
    }

    /// Returns how many times a rank was looked up.
    pub async fn lookup_count(&self) -> usize {
        self.state.read().await.lookups
    }
}

impl Default for InMemoryRankSource {
    fn default() -> Self {
        Self::unranked()
    }
}

#[async_trait]
impl RankSource for InMemoryRankSource {
    async fn rank(&self, title: &str) -> u32 {
        let mut state = self.state.write().await;
        state.lookups += 1;
        state
            .ranks
            .get(title)
            .copied()
            .unwrap_or(state.default_rank)
    }
}
