//! Pricing configuration loaded from environment variables.

use common::Money;

use crate::pricing::PricingPolicy;

/// Pricing configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `CD_SHOP_RANK_THRESHOLD` — ranks below this get competitive pricing (default: `100`)
/// - `CD_SHOP_UNDERCUT_CENTS` — how far under a cheaper competitor to go (default: `100`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    pub rank_threshold: u32,
    pub undercut_cents: i64,
}

impl PricingConfig {
    pub const DEFAULT_RANK_THRESHOLD: u32 = 100;
    pub const DEFAULT_UNDERCUT_CENTS: i64 = 100;

    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            rank_threshold: lookup("CD_SHOP_RANK_THRESHOLD")
                .and_then(|v| v.parse().ok())
                .unwrap_or(Self::DEFAULT_RANK_THRESHOLD),
            undercut_cents: lookup("CD_SHOP_UNDERCUT_CENTS")
                .and_then(|v| v.parse().ok())
                .filter(|cents: &i64| *cents >= 0)
                .unwrap_or(Self::DEFAULT_UNDERCUT_CENTS),
        }
    }

    /// Returns the undercut as money.
    pub fn undercut(&self) -> Money {
        Money::from_cents(self.undercut_cents)
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            rank_threshold: Self::DEFAULT_RANK_THRESHOLD,
            undercut_cents: Self::DEFAULT_UNDERCUT_CENTS,
        }
    }
}

impl From<PricingConfig> for PricingPolicy {
    fn from(config: PricingConfig) -> Self {
        PricingPolicy::new(config.rank_threshold, config.undercut())
    }
}
