//! Percentage arithmetic service

use fincalc_cache::{fingerprint, CacheFacade};
use fincalc_core::formulas::percentage as formula;
use fincalc_core::types::{PriceAdjustment, ProfitMargin};
use fincalc_core::CoreResult;
use std::sync::Arc;
use tracing::instrument;

use crate::service::CalculatorService;

/// Percentages of values, changes between values and price adjustments
#[derive(Debug, Clone)]
pub struct PercentageService {
    facade: Arc<CacheFacade>,
}

impl PercentageService {
    /// Create a percentage service over a shared facade
    #[must_use]
    pub const fn new(facade: Arc<CacheFacade>) -> Self {
        Self { facade }
    }

    /// `percentage` percent of `value`
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` for non-finite input.
    #[instrument(skip(self))]
    pub async fn percentage_of(&self, value: f64, percentage: f64) -> CoreResult<f64> {
        let key = fingerprint!(Self::DOMAIN, "percentage_of", value, percentage);
        self.facade
            .get_or_compute(&key, None, || formula::percentage_of(value, percentage))
            .await
    }

    /// What percent `part` is of `total`
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` when `total` is zero.
    #[instrument(skip(self))]
    pub async fn value_is_percentage_of(&self, part: f64, total: f64) -> CoreResult<f64> {
        let key = fingerprint!(Self::DOMAIN, "value_is_percentage_of", part, total);
        self.facade
            .get_or_compute(&key, None, || formula::value_is_percentage_of(part, total))
            .await
    }

    /// Relative change from `old_value` to `new_value`, in percent
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` when `old_value` is zero.
    #[instrument(skip(self))]
    pub async fn percentage_change(&self, old_value: f64, new_value: f64) -> CoreResult<f64> {
        let key = fingerprint!(Self::DOMAIN, "percentage_change", old_value, new_value);
        self.facade
            .get_or_compute(&key, None, || formula::percentage_change(old_value, new_value))
            .await
    }

    /// Whole value of which `percentage_value` is `percentage` percent
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` when `percentage` is zero.
    #[instrument(skip(self))]
    pub async fn value_from_percentage(
        &self,
        percentage: f64,
        percentage_value: f64,
    ) -> CoreResult<f64> {
        let key = fingerprint!(
            Self::DOMAIN,
            "value_from_percentage",
            percentage,
            percentage_value
        );
        self.facade
            .get_or_compute(&key, None, || {
                formula::value_from_percentage(percentage, percentage_value)
            })
            .await
    }

    /// `value` raised or lowered by `percentage` percent
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` for non-finite input.
    #[instrument(skip(self))]
    pub async fn apply_percentage(
        &self,
        value: f64,
        percentage: f64,
        is_increase: bool,
    ) -> CoreResult<f64> {
        let key = fingerprint!(Self::DOMAIN, "apply_percentage", value, percentage, is_increase);
        self.facade
            .get_or_compute(&key, None, || {
                formula::apply_percentage(value, percentage, is_increase)
            })
            .await
    }

    /// Absolute difference relative to the smaller value, in percent
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` when the smaller value is zero.
    #[instrument(skip(self))]
    pub async fn percentage_difference(&self, first: f64, second: f64) -> CoreResult<f64> {
        let key = fingerprint!(Self::DOMAIN, "percentage_difference", first, second);
        self.facade
            .get_or_compute(&key, None, || formula::percentage_difference(first, second))
            .await
    }

    /// Price after taking `percentage` percent off
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` for non-finite input.
    #[instrument(skip(self))]
    pub async fn discount(&self, price: f64, percentage: f64) -> CoreResult<PriceAdjustment> {
        let key = fingerprint!(Self::DOMAIN, "discount", price, percentage);
        self.facade
            .get_or_compute_with(&key, None, move || async move {
                let amount = self.percentage_of(price, percentage).await?;
                Ok(PriceAdjustment {
                    amount,
                    final_price: price - amount,
                })
            })
            .await
    }

    /// Price after adding `percentage` percent
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` for non-finite input.
    #[instrument(skip(self))]
    pub async fn markup(&self, price: f64, percentage: f64) -> CoreResult<PriceAdjustment> {
        let key = fingerprint!(Self::DOMAIN, "markup", price, percentage);
        self.facade
            .get_or_compute_with(&key, None, move || async move {
                let amount = self.percentage_of(price, percentage).await?;
                Ok(PriceAdjustment {
                    amount,
                    final_price: price + amount,
                })
            })
            .await
    }

    /// Profit and margin on revenue
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` when revenue is zero.
    #[instrument(skip(self))]
    pub async fn profit_margin(&self, revenue: f64, cost: f64) -> CoreResult<ProfitMargin> {
        let key = fingerprint!(Self::DOMAIN, "profit_margin", revenue, cost);
        self.facade
            .get_or_compute(&key, None, || formula::profit_margin(revenue, cost))
            .await
    }
}

impl CalculatorService for PercentageService {
    const DOMAIN: &'static str = "percentage";

    fn facade(&self) -> &CacheFacade {
        &self.facade
    }
}
