//! Investment types

use serde::{Deserialize, Serialize};

use super::{monthly_rate, MONTHS_PER_YEAR};
use crate::error::{ensure_finite, ensure_non_negative, CoreResult};

/// Savings plan with an initial lump sum and fixed monthly deposits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentPlan {
    /// Amount invested up front
    pub initial_amount: f64,
    /// Deposit added at the end of every month
    pub monthly_deposit: f64,
    /// Annual interest rate in percent
    pub annual_rate: f64,
    /// Investment horizon in years
    pub years: f64,
}

impl InvestmentPlan {
    /// Create an investment plan
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` when an amount or the horizon is negative
    /// or any input is not finite.
    pub fn new(
        initial_amount: f64,
        monthly_deposit: f64,
        annual_rate: f64,
        years: f64,
    ) -> CoreResult<Self> {
        ensure_non_negative("initial_investment", initial_amount)?;
        ensure_non_negative("monthly_deposit", monthly_deposit)?;
        ensure_finite("annual_rate", annual_rate)?;
        ensure_non_negative("years", years)?;

        Ok(Self {
            initial_amount,
            monthly_deposit,
            annual_rate,
            years,
        })
    }

    /// Monthly decimal interest rate
    #[inline]
    #[must_use]
    pub fn monthly_rate(&self) -> f64 {
        monthly_rate(self.annual_rate)
    }

    /// Number of compounding months
    #[inline]
    #[must_use]
    pub fn months(&self) -> f64 {
        self.years * f64::from(MONTHS_PER_YEAR)
    }
}

/// Return on an investment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentReturn {
    /// Absolute gain (final minus initial)
    pub roi: f64,
    /// Gain relative to the initial investment, in percent
    pub roi_percentage: f64,
}
