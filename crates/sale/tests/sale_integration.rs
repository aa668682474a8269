//! Integration tests for the sale pipeline.

use async_trait::async_trait;
use catalog::{CatalogError, CdDescriptor, Ledger};
use common::Money;
use sale::{
    ChartEntry, CreditCard, InMemoryCharts, InMemoryCompetitorPrices, InMemoryPaymentProcessor,
    InMemoryRankSource, PaymentProcessor, PaymentReceipt, PricingConfig, SaleCoordinator,
    SaleError,
};

const DARK_SIDE: &str = "The Dark Side of the Moon";

type TestCoordinator =
    SaleCoordinator<InMemoryRankSource, InMemoryCompetitorPrices, InMemoryCharts>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct TestHarness {
    coordinator: TestCoordinator,
    ledger: Ledger,
    ranks: InMemoryRankSource,
    competitors: InMemoryCompetitorPrices,
    charts: InMemoryCharts,
}

impl TestHarness {
    fn new() -> Self {
        init_tracing();

        let ledger = Ledger::new();
        let ranks = InMemoryRankSource::unranked();
        let competitors = InMemoryCompetitorPrices::new(Money::from_dollars(20));
        let charts = InMemoryCharts::new();

        let coordinator = SaleCoordinator::new(
            ledger.clone(),
            PricingConfig::from_env().into(),
            ranks.clone(),
            competitors.clone(),
            charts.clone(),
        );

        Self {
            coordinator,
            ledger,
            ranks,
            competitors,
            charts,
        }
    }

    async fn stock_dark_side(&self, copies: u32) {
        self.ledger
            .add(
                CdDescriptor::new(DARK_SIDE, "Pink Floyd", Money::from_dollars(30)),
                copies,
            )
            .await
            .unwrap();
    }

    async fn stock(&self, title: &str) -> u32 {
        self.ledger.stock_of(title).await.unwrap()
    }
}

/// Pays, but lets a rival sale drain the stock while the charge is in flight.
struct RacedPayer {
    ledger: Ledger,
    inner: InMemoryPaymentProcessor,
}

#[async_trait]
impl PaymentProcessor for RacedPayer {
    async fn pay(&self, amount: Money) -> Result<PaymentReceipt, SaleError> {
        let available = self.ledger.stock_of(DARK_SIDE).await?;
        self.ledger.remove_copies(DARK_SIDE, available).await?;
        self.inner.pay(amount).await
    }

    async fn refund(&self, receipt: &PaymentReceipt) -> Result<(), SaleError> {
        self.inner.refund(receipt).await
    }
}

#[tokio::test]
async fn test_lookup_on_empty_ledger() {
    let ledger = Ledger::new();
    assert_eq!(
        ledger.find_by_title("X").await,
        Err(CatalogError::NotFound("X".into()))
    );
}

#[tokio::test]
async fn test_add_then_lookup() {
    let ledger = Ledger::new();
    ledger
        .add(
            CdDescriptor::new("Breathe", "Pink Floyd", Money::from_dollars(25)),
            30,
        )
        .await
        .unwrap();

    let entry = ledger.find_by_title("Breathe").await.unwrap();
    assert_eq!(entry.stock(), 30);
    assert_eq!(entry.creator, "Pink Floyd");
}

#[tokio::test]
async fn test_sell_whole_stock_at_list_price() {
    let h = TestHarness::new();
    h.stock_dark_side(10).await;
    let payer = InMemoryPaymentProcessor::new();

    h.coordinator.sell(&payer, DARK_SIDE, 10).await.unwrap();

    assert_eq!(payer.attempts().await, vec![Money::from_dollars(300)]);
    assert_eq!(h.stock(DARK_SIDE).await, 0);
    assert_eq!(
        h.charts.sales().await,
        vec![ChartEntry::new(DARK_SIDE, "Pink Floyd", 10)]
    );
    assert_eq!(h.ranks.lookup_count().await, 1);
    assert_eq!(h.competitors.lookup_count().await, 0);
}

#[tokio::test]
async fn test_sell_ranked_title_undercuts_competitor() {
    let h = TestHarness::new();
    h.stock_dark_side(10).await;
    h.ranks.set_rank(DARK_SIDE, 5).await;
    let payer = InMemoryPaymentProcessor::new();

    let receipt = h.coordinator.sell(&payer, DARK_SIDE, 2).await.unwrap();

    assert_eq!(receipt.unit_price, Money::from_dollars(19));
    assert_eq!(receipt.total, Money::from_dollars(38));
    assert_eq!(payer.attempts().await, vec![Money::from_dollars(38)]);
    assert_eq!(h.stock(DARK_SIDE).await, 8);
    assert_eq!(h.ranks.lookup_count().await, 1);
    assert_eq!(h.competitors.lookup_count().await, 1);
}

#[tokio::test]
async fn test_ranked_title_cheaper_than_competitor_keeps_list_price() {
    let h = TestHarness::new();
    h.stock_dark_side(10).await;
    h.ranks.set_rank(DARK_SIDE, 5).await;
    h.competitors
        .set_price(DARK_SIDE, Money::from_dollars(45))
        .await;

    let receipt = h.coordinator.sell(&CreditCard, DARK_SIDE, 1).await.unwrap();

    assert_eq!(receipt.unit_price, Money::from_dollars(30));
    assert_eq!(h.competitors.lookup_count().await, 1);
}

#[tokio::test]
async fn test_sell_more_than_stock() {
    let h = TestHarness::new();
    h.stock_dark_side(10).await;
    let payer = InMemoryPaymentProcessor::new();

    let result = h.coordinator.sell(&payer, DARK_SIDE, 100).await;

    assert_eq!(
        result,
        Err(SaleError::OutOfStock {
            title: DARK_SIDE.into(),
            requested: 100,
            available: 10,
        })
    );
    assert!(payer.attempts().await.is_empty());
    assert_eq!(h.stock(DARK_SIDE).await, 10);
}

#[tokio::test]
async fn test_payment_failure_leaves_stock_and_charts() {
    let h = TestHarness::new();
    h.stock_dark_side(10).await;
    let payer = InMemoryPaymentProcessor::new();
    payer.set_fail_on_pay(true).await;

    let result = h.coordinator.sell(&payer, DARK_SIDE, 10).await;

    assert!(matches!(result, Err(SaleError::PaymentFailed(_))));
    assert_eq!(payer.attempts().await, vec![Money::from_dollars(300)]);
    assert_eq!(h.stock(DARK_SIDE).await, 10);
    assert!(h.charts.sales().await.is_empty());
}

#[tokio::test]
async fn test_sell_unknown_title() {
    let h = TestHarness::new();
    h.stock_dark_side(10).await;

    let result = h.coordinator.sell(&CreditCard, "Closer", 10).await;

    assert_eq!(result, Err(SaleError::CdNotFound("Closer".into())));
    assert_eq!(h.ranks.lookup_count().await, 0);
    assert_eq!(h.stock(DARK_SIDE).await, 10);
}

#[tokio::test]
async fn test_stock_drained_during_payment_is_refunded() {
    let h = TestHarness::new();
    h.stock_dark_side(10).await;
    let payer = RacedPayer {
        ledger: h.ledger.clone(),
        inner: InMemoryPaymentProcessor::new(),
    };

    let result = h.coordinator.sell(&payer, DARK_SIDE, 3).await;

    assert_eq!(
        result,
        Err(SaleError::OutOfStock {
            title: DARK_SIDE.into(),
            requested: 3,
            available: 0,
        })
    );
    assert_eq!(payer.inner.charges().await.len(), 1);
    assert_eq!(payer.inner.refunds().await.len(), 1);
    assert_eq!(payer.inner.net_collected().await, Money::zero());
    assert!(h.charts.sales().await.is_empty());
}

#[tokio::test]
async fn test_failed_refund_still_reports_out_of_stock() {
    let h = TestHarness::new();
    h.stock_dark_side(10).await;
    let payer = RacedPayer {
        ledger: h.ledger.clone(),
        inner: InMemoryPaymentProcessor::new(),
    };
    payer.inner.set_fail_on_refund(true).await;

    let result = h.coordinator.sell(&payer, DARK_SIDE, 3).await;

    assert!(matches!(result, Err(SaleError::OutOfStock { .. })));
    assert!(payer.inner.refunds().await.is_empty());
}

#[tokio::test]
async fn test_failed_sales_never_change_stock() {
    let h = TestHarness::new();
    h.stock_dark_side(10).await;
    let declining = InMemoryPaymentProcessor::new();
    declining.set_fail_on_pay(true).await;

    let _ = h.coordinator.sell(&CreditCard, DARK_SIDE, 0).await;
    let _ = h.coordinator.sell(&CreditCard, DARK_SIDE, 11).await;
    let _ = h.coordinator.sell(&CreditCard, "Closer", 1).await;
    let _ = h.coordinator.sell(&declining, DARK_SIDE, 1).await;

    assert_eq!(h.stock(DARK_SIDE).await, 10);
    assert!(h.charts.sales().await.is_empty());
}

#[tokio::test]
async fn test_restock_after_selling_out() {
    let h = TestHarness::new();
    h.stock_dark_side(2).await;

    h.coordinator.sell(&CreditCard, DARK_SIDE, 2).await.unwrap();
    assert!(h.coordinator.sell(&CreditCard, DARK_SIDE, 1).await.is_err());

    h.stock_dark_side(5).await;
    h.coordinator.sell(&CreditCard, DARK_SIDE, 1).await.unwrap();

    assert_eq!(h.stock(DARK_SIDE).await, 4);
    assert_eq!(h.charts.copies_sold(DARK_SIDE).await, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sales_never_oversell() {
    let h = TestHarness::new();
    h.stock_dark_side(10).await;
    let coordinator = std::sync::Arc::new(h.coordinator);
    let payer = InMemoryPaymentProcessor::new();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let coordinator = coordinator.clone();
        let payer = payer.clone();
        handles.push(tokio::spawn(async move {
            coordinator.sell(&payer, DARK_SIDE, 3).await
        }));
    }

    let mut sold = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(receipt) => sold += receipt.quantity,
            Err(e) => assert!(matches!(e, SaleError::OutOfStock { .. })),
        }
    }

    let remaining = h.ledger.stock_of(DARK_SIDE).await.unwrap();
    assert_eq!(sold, 9);
    assert_eq!(remaining, 1);
    assert_eq!(h.charts.copies_sold(DARK_SIDE).await, 9);
    assert_eq!(payer.net_collected().await, Money::from_dollars(270));
}
