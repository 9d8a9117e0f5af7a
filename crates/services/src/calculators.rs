//! Calculator hub
//!
//! Wires configuration into a backend, one shared facade and the five services.

use fincalc_cache::{facade_from_config, CacheConfig, CacheFacade, CacheStats, FacadeStats};
use fincalc_core::{CoreResult, FinCalcConfig};
use std::sync::Arc;
use tracing::instrument;

use crate::debt::DebtService;
use crate::fuel::FuelService;
use crate::investment::InvestmentService;
use crate::loan::LoanService;
use crate::percentage::PercentageService;

/// Every calculator service over one shared cache
#[derive(Debug, Clone)]
pub struct Calculators {
    facade: Arc<CacheFacade>,
    /// Loan payments, interest, schedules and capacity
    pub loan: LoanService,
    /// Debt payment and payoff time
    pub debt: DebtService,
    /// Investment growth and returns
    pub investment: InvestmentService,
    /// Trip cost and driver earnings
    pub fuel: FuelService,
    /// Percentage arithmetic
    pub percentage: PercentageService,
}

impl Calculators {
    /// Build the configured backend and every service
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Configuration` for an invalid configuration, or
    /// `CoreError::CacheUnavailable` if a Redis backend cannot be reached.
    #[instrument(skip(config))]
    pub async fn from_config(config: &FinCalcConfig) -> CoreResult<Self> {
        config.validate().inspect_err(|e| {
            tracing::error!("FinCalc configuration validation failed: {}", e);
        })?;

        let cache_config = CacheConfig::from_settings(&config.cache)?;
        let facade = Arc::new(facade_from_config(&cache_config).await?);
        tracing::debug!("Cache backend {:?} ready", cache_config.backend);

        let calculators = Self::with_facade(facade, config);
        tracing::info!(
            "FinCalc calculators initialized (viability preset: {})",
            calculators.fuel.preset().as_str()
        );
        Ok(calculators)
    }

    /// Build every service over an existing facade
    #[must_use]
    pub fn with_facade(facade: Arc<CacheFacade>, config: &FinCalcConfig) -> Self {
        Self {
            loan: LoanService::new(Arc::clone(&facade)),
            debt: DebtService::new(Arc::clone(&facade)),
            investment: InvestmentService::new(Arc::clone(&facade)),
            fuel: FuelService::with_preset(Arc::clone(&facade), config.fuel.viability_preset),
            percentage: PercentageService::new(Arc::clone(&facade)),
            facade,
        }
    }

    /// Shared facade
    #[must_use]
    pub fn facade(&self) -> &Arc<CacheFacade> {
        &self.facade
    }

    /// Drop every cached result of every service
    ///
    /// # Errors
    ///
    /// Returns `CoreError::CacheUnavailable` if the backend cannot be reached.
    pub async fn clear_all(&self) -> CoreResult<()> {
        Ok(self.facade.clear_all().await?)
    }

    /// Facade and backend statistics
    pub async fn stats(&self) -> FacadeStats {
        self.facade.stats().await
    }

    /// Backend statistics alone, when available
    pub async fn backend_stats(&self) -> Option<CacheStats> {
        self.stats().await.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fincalc_core::config::{CacheBackendKind, ViabilityPreset};

    #[tokio::test]
    async fn test_from_test_config() -> CoreResult<()> {
        let calculators = Calculators::from_config(&FinCalcConfig::test()).await?;

        calculators.loan.monthly_payment(10_000.0, 12.0, 2).await?;
        calculators.percentage.percentage_of(200.0, 15.0).await?;
        assert_eq!(calculators.backend_stats().await.map(|s| s.entries), Some(2));

        calculators.clear_all().await?;
        assert_eq!(calculators.backend_stats().await.map(|s| s.entries), Some(0));
        Ok(())
    }

    #[tokio::test]
    async fn test_preset_flows_into_fuel_service() -> CoreResult<()> {
        let mut config = FinCalcConfig::test();
        config.fuel.viability_preset = ViabilityPreset::Legacy;

        let calculators = Calculators::from_config(&config).await?;
        assert_eq!(calculators.fuel.preset(), ViabilityPreset::Legacy);
        Ok(())
    }

    #[tokio::test]
    async fn test_redis_without_url_is_rejected() {
        let mut config = FinCalcConfig::test();
        config.cache.backend = CacheBackendKind::Redis;
        config.cache.redis_url = None;

        let result = Calculators::from_config(&config).await;
        assert!(matches!(
            result,
            Err(fincalc_core::CoreError::Configuration { .. })
        ));
    }
}
