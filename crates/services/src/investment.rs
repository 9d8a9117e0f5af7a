//! Investment growth service

use fincalc_cache::{fingerprint, CacheFacade};
use fincalc_core::formulas::investment::{self, DEFAULT_COMPOUNDING_FREQUENCY};
use fincalc_core::types::InvestmentReturn;
use fincalc_core::CoreResult;
use std::sync::Arc;
use tracing::instrument;

use crate::service::CalculatorService;

/// Future and present values, interest and return on investment
#[derive(Debug, Clone)]
pub struct InvestmentService {
    facade: Arc<CacheFacade>,
}

impl InvestmentService {
    /// Create an investment service over a shared facade
    #[must_use]
    pub const fn new(facade: Arc<CacheFacade>) -> Self {
        Self { facade }
    }

    /// Balance after `years` of monthly deposits and monthly compounding
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` for negative amounts or horizon.
    #[instrument(skip(self))]
    pub async fn future_value(
        &self,
        initial_investment: f64,
        monthly_deposit: f64,
        annual_rate: f64,
        years: f64,
    ) -> CoreResult<f64> {
        let key = fingerprint!(
            Self::DOMAIN,
            "future_value",
            initial_investment,
            monthly_deposit,
            annual_rate,
            years
        );
        self.facade
            .get_or_compute(&key, None, || {
                investment::future_value(initial_investment, monthly_deposit, annual_rate, years)
            })
            .await
    }

    /// Compounded balance; `frequency` defaults to monthly
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` for a negative principal or horizon, or
    /// a zero frequency.
    #[instrument(skip(self))]
    pub async fn compound_interest(
        &self,
        principal: f64,
        annual_rate: f64,
        years: f64,
        frequency: Option<u32>,
    ) -> CoreResult<f64> {
        let frequency = frequency.unwrap_or(DEFAULT_COMPOUNDING_FREQUENCY);
        let key = fingerprint!(
            Self::DOMAIN,
            "compound_interest",
            principal,
            annual_rate,
            years,
            frequency
        );
        self.facade
            .get_or_compute(&key, None, || {
                investment::compound_interest(principal, annual_rate, years, frequency)
            })
            .await
    }

    /// Balance under simple interest
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` for a negative principal or horizon.
    #[instrument(skip(self))]
    pub async fn simple_interest(
        &self,
        principal: f64,
        annual_rate: f64,
        years: f64,
    ) -> CoreResult<f64> {
        let key = fingerprint!(Self::DOMAIN, "simple_interest", principal, annual_rate, years);
        self.facade
            .get_or_compute(&key, None, || {
                investment::simple_interest(principal, annual_rate, years)
            })
            .await
    }

    /// Absolute and percentage return
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` when the initial investment is zero.
    #[instrument(skip(self))]
    pub async fn roi(
        &self,
        initial_investment: f64,
        final_value: f64,
    ) -> CoreResult<InvestmentReturn> {
        let key = fingerprint!(Self::DOMAIN, "roi", initial_investment, final_value);
        self.facade
            .get_or_compute(&key, None, || investment::roi(initial_investment, final_value))
            .await
    }

    /// Discounted value of a future amount; `frequency` defaults to monthly
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` for a negative horizon or a zero
    /// frequency.
    #[instrument(skip(self))]
    pub async fn present_value(
        &self,
        future_value: f64,
        annual_rate: f64,
        years: f64,
        frequency: Option<u32>,
    ) -> CoreResult<f64> {
        let frequency = frequency.unwrap_or(DEFAULT_COMPOUNDING_FREQUENCY);
        let key = fingerprint!(
            Self::DOMAIN,
            "present_value",
            future_value,
            annual_rate,
            years,
            frequency
        );
        self.facade
            .get_or_compute(&key, None, || {
                investment::present_value(future_value, annual_rate, years, frequency)
            })
            .await
    }
}

impl CalculatorService for InvestmentService {
    const DOMAIN: &'static str = "investment";

    fn facade(&self) -> &CacheFacade {
        &self.facade
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_facade;

    #[tokio::test]
    async fn test_present_value_inverts_compounding() -> CoreResult<()> {
        let service = InvestmentService::new(memory_facade()?);

        let grown = service.compound_interest(1_000.0, 6.0, 5.0, None).await?;
        let back = service.present_value(grown, 6.0, 5.0, None).await?;
        assert!((back - 1_000.0).abs() < 1e-6);
        Ok(())
    }

    #[tokio::test]
    async fn test_default_frequency_shares_cache_entry() -> CoreResult<()> {
        let service = InvestmentService::new(memory_facade()?);

        service.compound_interest(500.0, 4.0, 3.0, None).await?;
        service
            .compound_interest(500.0, 4.0, 3.0, Some(DEFAULT_COMPOUNDING_FREQUENCY))
            .await?;
        assert_eq!(service.cache_stats().await.hits, 1);

        service.compound_interest(500.0, 4.0, 3.0, Some(4)).await?;
        assert_eq!(service.cache_stats().await.computations, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_roi_rejects_zero_initial() -> CoreResult<()> {
        let service = InvestmentService::new(memory_facade()?);
        let result = service.roi(0.0, 100.0).await;
        assert!(result.is_err_and(|e| e.is_invalid_argument()));
        Ok(())
    }

    #[tokio::test]
    async fn test_overflowing_future_value_is_rejected_and_uncached() -> CoreResult<()> {
        let service = InvestmentService::new(memory_facade()?);

        for _ in 0..2 {
            let result = service.future_value(10_000.0, 500.0, 8.5, 100_000.0).await;
            assert!(result.is_err_and(|e| e.is_invalid_argument()));
        }

        let stats = service.cache_stats().await;
        assert_eq!(stats.decode_failures, 0);
        assert_eq!(stats.backend.map(|b| b.entries), Some(0));
        Ok(())
    }
}
