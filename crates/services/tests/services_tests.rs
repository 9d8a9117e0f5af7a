//! End-to-end service behaviour over real and failing backends

use async_trait::async_trait;
use fincalc_cache::{Cache, CacheConfig, CacheError, CacheFacade, CacheResult, CacheStats};
use fincalc_core::types::{ConsumptionUnit, Recommendation, ViabilityTier};
use fincalc_core::{CoreError, CoreResult, FinCalcConfig};
use fincalc_services::{
    CalculatorService, Calculators, DebtService, LoanService, PercentageService, Rounded,
};
use mockall::mock;
use std::sync::Arc;
use std::time::Duration;

mock! {
    Backend {}

    #[async_trait]
    impl Cache for Backend {
        async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;
        async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> CacheResult<()>;
        async fn delete(&self, key: &str) -> CacheResult<bool>;
        async fn exists(&self, key: &str) -> CacheResult<bool>;
        async fn clear(&self) -> CacheResult<()>;
        async fn stats(&self) -> CacheResult<CacheStats>;
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn failing_facade() -> Arc<CacheFacade> {
    let mut backend = MockBackend::new();
    backend
        .expect_get()
        .returning(|_| Err(CacheError::unavailable("get", "connection reset")));
    backend
        .expect_set()
        .returning(|_, _, _| Err(CacheError::unavailable("set", "connection reset")));
    backend
        .expect_delete()
        .returning(|_| Err(CacheError::unavailable("delete", "connection reset")));
    backend
        .expect_clear()
        .returning(|| Err(CacheError::unavailable("clear", "connection reset")));
    backend
        .expect_stats()
        .returning(|| Err(CacheError::unavailable("stats", "connection reset")));
    Arc::new(CacheFacade::new(Arc::new(backend), &CacheConfig::test()))
}

#[tokio::test]
async fn reference_scenarios() -> CoreResult<()> {
    init_tracing();
    let calc = Calculators::from_config(&FinCalcConfig::test()).await?;

    let payment = calc.loan.monthly_payment(10_000.0, 12.0, 2).await?;
    assert!((payment.rounded() - 470.73).abs() < 1e-9);

    let interest = calc.loan.total_interest(10_000.0, 12.0, 2).await?;
    assert!((interest - 1_297.61).abs() < 0.05);

    let fv = calc.investment.future_value(10_000.0, 500.0, 8.5, 10.0).await?;
    assert!(fv > 102_000.0 && fv < 108_000.0, "fv = {fv}");

    let consumption = calc
        .fuel
        .average_consumption(350.0, 30.0, ConsumptionUnit::DistancePerVolume)
        .await?;
    assert!((consumption.rounded() - 11.67).abs() < 1e-9);

    let share = calc.percentage.value_is_percentage_of(250.0, 1_000.0).await?;
    assert!((share - 25.0).abs() < 1e-9);

    let change = calc.percentage.percentage_change(100.0, 120.0).await?;
    assert!((change - 20.0).abs() < 1e-9);

    let raised = calc.percentage.apply_percentage(100.0, 15.0, true).await?;
    assert!((raised - 115.0).abs() < 1e-9);

    let short = calc.debt.payoff_months(10_000.0, 24.0, 150.0).await;
    assert!(matches!(short, Err(CoreError::InvalidArgument { .. })));
    Ok(())
}

#[tokio::test]
async fn amortization_schedule_closes_at_zero() -> CoreResult<()> {
    let calc = Calculators::from_config(&FinCalcConfig::test()).await?;
    let schedule = calc.loan.amortization_schedule(25_000.0, 7.5, 5).await?;

    assert_eq!(schedule.len(), 60);
    let last = schedule.last().map(|entry| entry.balance);
    assert_eq!(last, Some(0.0));

    let principal: f64 = schedule.iter().map(|entry| entry.principal).sum();
    assert!((principal - 25_000.0).abs() <= 0.01 * 60.0);

    // served from cache the second time
    let again = calc.loan.amortization_schedule(25_000.0, 7.5, 5).await?;
    assert_eq!(again.len(), schedule.len());
    assert_eq!(calc.stats().await.hits, 1);
    Ok(())
}

#[tokio::test]
async fn services_answer_when_the_backend_is_down() -> CoreResult<()> {
    init_tracing();
    let facade = failing_facade();
    let loan = LoanService::new(Arc::clone(&facade));
    let percentage = PercentageService::new(Arc::clone(&facade));

    let interest = loan.total_interest(10_000.0, 12.0, 2).await?;
    assert!((interest - 1_297.61).abs() < 0.05);

    let discounted = percentage.discount(200.0, 10.0).await?;
    assert!((discounted.final_price - 180.0).abs() < 1e-9);

    let stats = facade.stats().await;
    assert!(stats.backend.is_none());
    assert!(stats.fallbacks >= 4);
    Ok(())
}

#[tokio::test]
async fn maintenance_surfaces_cache_unavailable() {
    let debt = DebtService::new(failing_facade());

    let cleared = debt.clear_cache().await;
    assert!(matches!(cleared, Err(CoreError::CacheUnavailable { .. })));

    let invalidated = debt.invalidate("debt:payoff_months").await;
    assert!(invalidated.is_err_and(|e| e.is_retryable()));
}

#[tokio::test]
async fn invalidate_forces_recomputation() -> CoreResult<()> {
    let calc = Calculators::from_config(&FinCalcConfig::test()).await?;
    let key = "investment:roi:1000.0:1250.0";

    let first = calc.investment.roi(1_000.0, 1_250.0).await?;
    assert!((first.roi_percentage - 25.0).abs() < 1e-9);
    assert!(calc.investment.invalidate(key).await?);

    calc.investment.roi(1_000.0, 1_250.0).await?;
    let stats = calc.stats().await;
    assert_eq!(stats.computations, 2);
    assert_eq!(stats.hits, 0);
    Ok(())
}

#[tokio::test]
async fn concurrent_callers_share_results() -> Result<(), Box<dyn std::error::Error>> {
    let calc = Arc::new(Calculators::from_config(&FinCalcConfig::test()).await?);

    // warm the entry so every concurrent caller hits
    calc.percentage.percentage_of(480.0, 12.5).await?;

    let calls = (0..16).map(|_| {
        let calc = Arc::clone(&calc);
        tokio::spawn(async move { calc.percentage.percentage_of(480.0, 12.5).await })
    });
    let results = futures::future::join_all(calls).await;

    for result in results {
        let value = result??;
        assert!((value - 60.0).abs() < 1e-9);
    }
    assert_eq!(calc.stats().await.hits, 16);
    Ok(())
}

#[tokio::test]
async fn earnings_projection_flags_unprofitable_driving() -> CoreResult<()> {
    let calc = Calculators::from_config(&FinCalcConfig::test()).await?;

    // fuel at 0.75 per distance against 0.70 earned
    let projection = calc
        .fuel
        .earnings_projection(0.70, 200.0, 9.0, 12.0, 5, Some(300.0))
        .await?;

    assert_eq!(projection.viability, ViabilityTier::NonViable);
    assert_eq!(
        projection.recommendations.first(),
        Some(&Recommendation::CostsExceedEarnings)
    );
    assert!(projection.monthly_net_earnings < 0.0);
    Ok(())
}

#[tokio::test]
async fn driver_projection_reaches_target() -> CoreResult<()> {
    let calc = Calculators::from_config(&FinCalcConfig::test()).await?;
    let projection = calc
        .fuel
        .driver_projection(2.5, 6_000.0, 6.0, 12.0, 6)
        .await?
        .rounded();

    assert!((projection.cost_per_distance - 0.5).abs() < 1e-9);
    assert!((projection.net_earnings - 6_000.0).abs() < 1e-9);
    assert!((projection.total_distance_per_month - 3_000.0).abs() < 1e-9);

    let losing = calc.fuel.driver_projection(0.4, 6_000.0, 6.0, 12.0, 6).await;
    assert!(losing.is_err_and(|e| e.is_invalid_argument()));
    Ok(())
}
