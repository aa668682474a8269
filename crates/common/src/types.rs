use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a completed sale.
///
/// Sales are not persisted, so the ID only needs to be unique within a run
/// of the shop. It ties a receipt to the log lines of the sale that
/// produced it. Displayed as `SALE-` followed by the compact UUID, in the
/// same style as payment IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(Uuid);

impl SaleId {
    /// Issues a fresh sale ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SaleId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SaleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SALE-{}", self.0.simple())
    }
}
