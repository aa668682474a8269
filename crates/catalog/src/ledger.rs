//! The inventory ledger: every title in the shop and its stock.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::entry::{CatalogEntry, CdDescriptor};
use crate::error::{CatalogError, Result};

/// Internal state for the ledger.
///
/// `by_creator` is an index over `entries`; both are only ever updated
/// under the same write guard.
#[derive(Debug, Default)]
struct LedgerState {
    entries: HashMap<String, CatalogEntry>,
    by_creator: HashMap<String, BTreeSet<String>>,
}

/// Concurrency-safe store of catalog entries.
///
/// Cloning a `Ledger` yields another handle to the same stock, so one
/// ledger can be shared between concurrent sales.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    state: Arc<RwLock<LedgerState>>,
}

impl Ledger {
    /// Creates a new empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` copies of a CD.
    ///
    /// An unseen title is created with `quantity` in stock. For a known
    /// title only the stock grows; the creator and price recorded on first
    /// add are kept. Returns the entry as it stands after the add.
    ///
    /// Fails with `StockOverflow`, leaving the entry untouched, if the
    /// stock would exceed `u32::MAX`.
    #[tracing::instrument(skip(self, descriptor), fields(title = %descriptor.title))]
    pub async fn add(&self, descriptor: CdDescriptor, quantity: u32) -> Result<CatalogEntry> {
        let mut state = self.state.write().await;
        let LedgerState {
            entries,
            by_creator,
        } = &mut *state;

        let entry = match entries.get_mut(&descriptor.title) {
            Some(existing) => {
                if !existing.describes_same(&descriptor) {
                    tracing::warn!(
                        recorded_creator = %existing.creator,
                        recorded_price = %existing.unit_price,
                        offered_creator = %descriptor.creator,
                        offered_price = %descriptor.unit_price,
                        "restock with different details, keeping recorded ones"
                    );
                }
                if !existing.restock(quantity) {
                    return Err(CatalogError::StockOverflow {
                        title: descriptor.title,
                        stock: existing.stock(),
                        added: quantity,
                    });
                }
                existing.clone()
            }
            None => {
                by_creator
                    .entry(descriptor.creator.clone())
                    .or_default()
                    .insert(descriptor.title.clone());
                let entry = CatalogEntry::new(descriptor, quantity);
                entries.insert(entry.title.clone(), entry.clone());
                entry
            }
        };

        metrics::counter!("ledger_copies_added_total").increment(u64::from(quantity));
        tracing::debug!(stock = entry.stock(), "copies added");
        Ok(entry)
    }

    /// Looks up a title.
    pub async fn find_by_title(&self, title: &str) -> Result<CatalogEntry> {
        self.state
            .read()
            .await
            .entries
            .get(title)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(title.to_string()))
    }

    /// Returns every entry credited to `creator`, ordered by title.
    pub async fn find_by_creator(&self, creator: &str) -> Result<Vec<CatalogEntry>> {
        let state = self.state.read().await;
        let entries: Vec<CatalogEntry> = state
            .by_creator
            .get(creator)
            .into_iter()
            .flatten()
            .filter_map(|title| state.entries.get(title).cloned())
            .collect();

        if entries.is_empty() {
            return Err(CatalogError::CreatorNotFound(creator.to_string()));
        }
        Ok(entries)
    }

    /// Returns the current stock of a title.
    pub async fn stock_of(&self, title: &str) -> Result<u32> {
        self.find_by_title(title).await.map(|entry| entry.stock())
    }

    /// Removes `quantity` copies of a title.
    ///
    /// The stock check and the subtraction happen under one write guard,
    /// so concurrent removals can never take the stock below zero. On
    /// failure the entry is left untouched. Returns the entry as it stands
    /// after the removal.
    #[tracing::instrument(skip(self))]
    pub async fn remove_copies(&self, title: &str, quantity: u32) -> Result<CatalogEntry> {
        if quantity == 0 {
            return Err(CatalogError::InvalidQuantity(quantity));
        }

        let mut state = self.state.write().await;
        let entry = state
            .entries
            .get_mut(title)
            .ok_or_else(|| CatalogError::NotFound(title.to_string()))?;

        if !entry.take(quantity) {
            tracing::debug!(available = entry.stock(), "not enough copies");
            return Err(CatalogError::OutOfStock {
                title: title.to_string(),
                requested: quantity,
                available: entry.stock(),
            });
        }

        metrics::counter!("ledger_copies_removed_total").increment(u64::from(quantity));
        tracing::debug!(stock = entry.stock(), "copies removed");
        Ok(entry.clone())
    }

    /// Returns all titles, sorted.
    pub async fn titles(&self) -> Vec<String> {
        let state = self.state.read().await;
        let mut titles: Vec<String> = state.entries.keys().cloned().collect();
        titles.sort();
        titles
    }

    /// Returns the number of distinct titles.
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    /// Returns true if no title has ever been added.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.entries.is_empty()
    }
}
