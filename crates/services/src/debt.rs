//! Debt payoff service

use fincalc_cache::{fingerprint, CacheFacade};
use fincalc_core::formulas::debt;
use fincalc_core::CoreResult;
use std::sync::Arc;
use tracing::instrument;

use crate::service::CalculatorService;

/// Payment needed to clear a debt, or time needed at a given payment
#[derive(Debug, Clone)]
pub struct DebtService {
    facade: Arc<CacheFacade>,
}

impl DebtService {
    /// Create a debt service over a shared facade
    #[must_use]
    pub const fn new(facade: Arc<CacheFacade>) -> Self {
        Self { facade }
    }

    /// Payment that clears `total_debt` in `months`
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` when debt <= 0, rate < 0 or months = 0.
    #[instrument(skip(self))]
    pub async fn monthly_payment(
        &self,
        total_debt: f64,
        annual_rate: f64,
        months: u32,
    ) -> CoreResult<f64> {
        let key = fingerprint!(Self::DOMAIN, "monthly_payment", total_debt, annual_rate, months);
        self.facade
            .get_or_compute(&key, None, || {
                debt::monthly_payment(total_debt, annual_rate, months)
            })
            .await
    }

    /// Fractional months until the debt is cleared at `monthly_payment`
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` when the payment does not cover the
    /// monthly interest, or an amount is out of range.
    #[instrument(skip(self))]
    pub async fn payoff_months(
        &self,
        total_debt: f64,
        annual_rate: f64,
        monthly_payment: f64,
    ) -> CoreResult<f64> {
        let key = fingerprint!(
            Self::DOMAIN,
            "payoff_months",
            total_debt,
            annual_rate,
            monthly_payment
        );
        self.facade
            .get_or_compute(&key, None, || {
                debt::payoff_months(total_debt, annual_rate, monthly_payment)
            })
            .await
    }
}

impl CalculatorService for DebtService {
    const DOMAIN: &'static str = "debt";

    fn facade(&self) -> &CacheFacade {
        &self.facade
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_facade;

    #[tokio::test]
    async fn test_payment_and_payoff_agree() -> CoreResult<()> {
        let service = DebtService::new(memory_facade()?);

        let payment = service.monthly_payment(8_000.0, 18.0, 36).await?;
        let months = service.payoff_months(8_000.0, 18.0, payment).await?;
        assert!((months - 36.0).abs() < 1e-6, "months = {months}");
        Ok(())
    }

    #[tokio::test]
    async fn test_insufficient_payment_is_not_cached() -> CoreResult<()> {
        let service = DebtService::new(memory_facade()?);

        for _ in 0..2 {
            let result = service.payoff_months(10_000.0, 24.0, 150.0).await;
            assert!(result.is_err_and(|e| e.is_invalid_argument()));
        }

        let stats = service.cache_stats().await;
        assert_eq!(stats.computations, 2);
        assert_eq!(stats.hits, 0);
        Ok(())
    }
}
