//! Sale coordinator: runs a sale from title lookup to chart notification.

use catalog::{CatalogEntry, Ledger};
use chrono::Utc;
use common::{Money, SaleId};

use crate::error::SaleError;
use crate::pricing::PricingPolicy;
use crate::receipt::SaleReceipt;
use crate::services::charts::Charts;
use crate::services::competitor::CompetitorPrices;
use crate::services::payment::{PaymentProcessor, PaymentReceipt};
use crate::services::rank::RankSource;
use crate::step::SaleStep;

/// Orchestrates sales against a shared ledger.
///
/// The rank source, competitor prices and charts are fixed at construction.
/// The payer is supplied with each sale.
pub struct SaleCoordinator<R, C, N>
where
    R: RankSource,
    C: CompetitorPrices,
    N: Charts,
{
    ledger: Ledger,
    pricing: PricingPolicy,
    ranks: R,
    competitors: C,
    charts: N,
}

impl<R, C, N> SaleCoordinator<R, C, N>
where
    R: RankSource,
    C: CompetitorPrices,
    N: Charts,
{
    /// Creates a new sale coordinator.
    pub fn new(
        ledger: Ledger,
        pricing: PricingPolicy,
        ranks: R,
        competitors: C,
        charts: N,
    ) -> Self {
        Self {
            ledger,
            pricing,
            ranks,
            competitors,
            charts,
        }
    }

    /// Returns the ledger sales are made against.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Sells `quantity` copies of `title`, charging `payer`.
    ///
    /// Every failure before the commit leaves the ledger untouched. If the
    /// commit finds the stock gone (another sale got there first), the
    /// payment is refunded and `OutOfStock` is returned.
    #[tracing::instrument(skip(self, payer))]
    pub async fn sell<P>(
        &self,
        payer: &P,
        title: &str,
        quantity: u32,
    ) -> Result<SaleReceipt, SaleError>
    where
        P: PaymentProcessor + ?Sized,
    {
        metrics::counter!("sales_total").increment(1);
        let sale_start = std::time::Instant::now();

        let result = self.run(payer, title, quantity).await;

        let duration = sale_start.elapsed().as_secs_f64();
        metrics::histogram!("sale_duration_seconds").record(duration);
        match result {
            Ok(receipt) => {
                metrics::counter!("sales_completed").increment(1);
                tracing::info!(
                    sale_id = %receipt.sale_id,
                    total = %receipt.total,
                    duration,
                    "sale completed"
                );
                Ok(receipt)
            }
            Err((step, e)) => {
                metrics::counter!("sales_failed", "reason" => e.reason()).increment(1);
                tracing::warn!(
                    %step,
                    payment_collected = step.payment_collected(),
                    error = %e,
                    "sale aborted"
                );
                Err(e)
            }
        }
    }

    /// Runs the sale steps. On failure, also returns the step that aborted.
    async fn run<P>(
        &self,
        payer: &P,
        title: &str,
        quantity: u32,
    ) -> Result<SaleReceipt, (SaleStep, SaleError)>
    where
        P: PaymentProcessor + ?Sized,
    {
        if quantity == 0 {
            return Err((SaleStep::Resolve, SaleError::InvalidQuantity(quantity)));
        }

        // 1. Resolve
        tracing::debug!(step = %SaleStep::Resolve, "sale step started");
        let entry = self
            .ledger
            .find_by_title(title)
            .await
            .map_err(|e| (SaleStep::Resolve, SaleError::from(e)))?;

        // 2. Preliminary stock check; the commit checks again under the lock
        tracing::debug!(step = %SaleStep::StockCheck, "sale step started");
        if !entry.has_stock(quantity) {
            return Err((
                SaleStep::StockCheck,
                SaleError::OutOfStock {
                    requested: quantity,
                    available: entry.stock(),
                    title: entry.title,
                },
            ));
        }

        // 3. Price
        tracing::debug!(step = %SaleStep::Price, "sale step started");
        let unit_price = self.quote(&entry).await;
        let total = unit_price.checked_multiply(quantity).ok_or_else(|| {
            (
                SaleStep::Price,
                SaleError::InvalidAmount {
                    title: entry.title.clone(),
                    unit_price,
                    quantity,
                },
            )
        })?;

        // 4. Collect payment
        tracing::debug!(step = %SaleStep::CollectPayment, %total, "sale step started");
        let payment = payer.pay(total).await.map_err(|e| {
            let e = match e {
                SaleError::PaymentFailed(_) => e,
                other => SaleError::PaymentFailed(other.to_string()),
            };
            (SaleStep::CollectPayment, e)
        })?;

        // 5. Commit
        tracing::debug!(
            step = %SaleStep::Commit,
            payment_id = %payment.payment_id,
            "sale step started"
        );
        let committed = match self.ledger.remove_copies(title, quantity).await {
            Ok(committed) => committed,
            Err(e) => {
                self.compensate(payer, &payment).await;
                return Err((SaleStep::Commit, SaleError::from(e)));
            }
        };

        // 6. Notify
        tracing::debug!(step = %SaleStep::Notify, "sale step started");
        self.charts
            .record_sale(&committed.title, &committed.creator, quantity)
            .await;

        Ok(SaleReceipt {
            sale_id: SaleId::new(),
            title: committed.title,
            creator: committed.creator,
            quantity,
            unit_price,
            total,
            payment_id: payment.payment_id,
            sold_at: Utc::now(),
        })
    }

    /// Computes the offer price for an entry. The competitor is only asked
    /// when the rank makes the title competitive.
    async fn quote(&self, entry: &CatalogEntry) -> Money {
        let rank = self.ranks.rank(&entry.title).await;
        let competitor_price = if self.pricing.is_competitive(rank) {
            Some(self.competitors.price(&entry.title).await)
        } else {
            None
        };

        let offer = self
            .pricing
            .offer_price(entry.unit_price, rank, competitor_price);
        tracing::debug!(
            rank,
            list_price = %entry.unit_price,
            competitor_price = ?competitor_price,
            offer = %offer,
            "sale priced"
        );
        offer
    }

    /// Refunds a payment whose sale could not be committed.
    async fn compensate<P>(&self, payer: &P, payment: &PaymentReceipt)
    where
        P: PaymentProcessor + ?Sized,
    {
        metrics::counter!("sale_refunds_total").increment(1);
        match payer.refund(payment).await {
            Ok(()) => {
                tracing::info!(
                    payment_id = %payment.payment_id,
                    amount = %payment.amount,
                    "payment refunded"
                );
            }
            Err(e) => {
                metrics::counter!("sale_refunds_failed").increment(1);
                tracing::error!(
                    payment_id = %payment.payment_id,
                    amount = %payment.amount,
                    error = %e,
                    "refund failed after commit was rejected"
                );
            }
        }
    }
}
