//! Payment processor trait and implementations.

use std::sync::Arc;

use async_trait::async_trait;
use common::Money;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::SaleError;

/// Result of a successful charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    /// The payment ID assigned by the processor.
    pub payment_id: String,
    /// The amount charged.
    pub amount: Money,
}

/// Trait for collecting payment for a sale.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Charges `amount`. An error means nothing was charged.
    async fn pay(&self, amount: Money) -> Result<PaymentReceipt, SaleError>;

    /// Refunds a previous charge. Only used when a paid sale cannot be
    /// committed.
    ///
    /// Processors that cannot refund keep the default, which fails.
    async fn refund(&self, _receipt: &PaymentReceipt) -> Result<(), SaleError> {
        Err(SaleError::PaymentFailed("refunds not supported".into()))
    }
}

/// A card that always approves.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreditCard;

#[async_trait]
impl PaymentProcessor for CreditCard {
    async fn pay(&self, amount: Money) -> Result<PaymentReceipt, SaleError> {
        Ok(PaymentReceipt {
            payment_id: format!("CARD-{}", Uuid::new_v4()),
            amount,
        })
    }
}

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    charges: Vec<PaymentReceipt>,
    refunds: Vec<PaymentReceipt>,
    attempts: Vec<Money>,
    next_id: u32,
    fail_on_pay: bool,
    fail_on_refund: bool,
}

/// In-memory payment processor for testing.
///
/// Records every attempted amount, every successful charge and every
/// refund. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentProcessor {
    state: Arc<RwLock<InMemoryPaymentState>>,
}

impl InMemoryPaymentProcessor {
    /// Creates a new in-memory payment processor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the processor to decline charges.
    pub async fn set_fail_on_pay(&self, fail: bool) {
        self.state.write().await.fail_on_pay = fail;
    }

    /// Configures the processor to fail refunds.
    pub async fn set_fail_on_refund(&self, fail: bool) {
        self.state.write().await.fail_on_refund = fail;
    }

    /// Returns every amount `pay` was called with, declined or not.
    pub async fn attempts(&self) -> Vec<Money> {
        self.state.read().await.attempts.clone()
    }

    /// Returns the successful charges.
    pub async fn charges(&self) -> Vec<PaymentReceipt> {
        self.state.read().await.charges.clone()
    }

    /// Returns the refunded charges.
    pub async fn refunds(&self) -> Vec<PaymentReceipt> {
        self.state.read().await.refunds.clone()
    }

    /// Returns the sum of charges net of refunds.
    pub async fn net_collected(&self) -> Money {
        let state = self.state.read().await;
        let mut total = Money::zero();
        for charge in &state.charges {
            total += charge.amount;
        }
        for refund in &state.refunds {
            total = total - refund.amount;
        }
        total
    }
}

#[async_trait]
impl PaymentProcessor for InMemoryPaymentProcessor {
    async fn pay(&self, amount: Money) -> Result<PaymentReceipt, SaleError> {
        let mut state = self.state.write().await;
        state.attempts.push(amount);

        if state.fail_on_pay {
            return Err(SaleError::PaymentFailed("Payment declined".to_string()));
        }

        state.next_id += 1;
        let receipt = PaymentReceipt {
            payment_id: format!("PAY-{:04}", state.next_id),
            amount,
        };
        state.charges.push(receipt.clone());

        Ok(receipt)
    }

    async fn refund(&self, receipt: &PaymentReceipt) -> Result<(), SaleError> {
        let mut state = self.state.write().await;

        if state.fail_on_refund {
            return Err(SaleError::PaymentFailed("Refund rejected".to_string()));
        }

        state.refunds.push(receipt.clone());
        Ok(())
    }
}
