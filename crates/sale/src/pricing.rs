//! Offer pricing.

use common::Money;

use crate::config::PricingConfig;

/// Decides the unit price charged for a sale.
///
/// Titles ranked below `rank_threshold` are priced against the competitor:
/// if the competitor sells cheaper, the offer is the competitor's price
/// minus `undercut`, floored at zero. Everything else sells at list price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    rank_threshold: u32,
    undercut: Money,
}

impl PricingPolicy {
    /// Creates a policy.
    pub fn new(rank_threshold: u32, undercut: Money) -> Self {
        Self {
            rank_threshold,
            undercut,
        }
    }

    /// Returns the rank threshold.
    pub fn rank_threshold(&self) -> u32 {
        self.rank_threshold
    }

    /// Returns the undercut applied against a cheaper competitor.
    pub fn undercut(&self) -> Money {
        self.undercut
    }

    /// Returns true if a title with this rank is priced against the
    /// competitor. Only then should a competitor price be looked up.
    pub fn is_competitive(&self, rank: u32) -> bool {
        rank < self.rank_threshold
    }

    /// Computes the offer price.
    ///
    /// `competitor_price` is ignored unless `rank` is competitive.
    pub fn offer_price(
        &self,
        list_price: Money,
        rank: u32,
        competitor_price: Option<Money>,
    ) -> Money {
        if !self.is_competitive(rank) {
            return list_price;
        }

        match competitor_price {
            Some(competitor) if competitor < list_price => {
                competitor.saturating_sub(self.undercut).clamp_non_negative()
            }
            _ => list_price,
        }
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingConfig::default().into()
    }
}
