//! Loan calculator service

use fincalc_cache::{fingerprint, CacheFacade};
use fincalc_core::formulas::loan;
use fincalc_core::types::{AmortizationEntry, LoanCapacity, LoanSummary, LoanTerms};
use fincalc_core::CoreResult;
use std::sync::Arc;
use tracing::instrument;

use crate::service::CalculatorService;

/// Loan payments, interest, schedules and borrowing capacity
#[derive(Debug, Clone)]
pub struct LoanService {
    facade: Arc<CacheFacade>,
}

impl LoanService {
    /// Create a loan service over a shared facade
    #[must_use]
    pub const fn new(facade: Arc<CacheFacade>) -> Self {
        Self { facade }
    }

    /// Fixed monthly payment for an amortizing loan
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` when principal <= 0, rate < 0 or term = 0.
    #[instrument(skip(self))]
    pub async fn monthly_payment(
        &self,
        principal: f64,
        annual_rate: f64,
        term_years: u32,
    ) -> CoreResult<f64> {
        let key = fingerprint!(Self::DOMAIN, "monthly_payment", principal, annual_rate, term_years);
        self.facade
            .get_or_compute(&key, None, || {
                loan::monthly_payment(principal, annual_rate, term_years)
            })
            .await
    }

    /// Interest paid over the life of the loan
    ///
    /// Built on the cached monthly payment, so a warm payment entry is reused.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` when principal <= 0, rate < 0 or term = 0.
    #[instrument(skip(self))]
    pub async fn total_interest(
        &self,
        principal: f64,
        annual_rate: f64,
        term_years: u32,
    ) -> CoreResult<f64> {
        let terms = LoanTerms::from_years(principal, annual_rate, term_years)?;
        let key = fingerprint!(Self::DOMAIN, "total_interest", principal, annual_rate, term_years);

        self.facade
            .get_or_compute_with(&key, None, move || async move {
                let payment = self.monthly_payment(principal, annual_rate, term_years).await?;
                Ok(loan::total_payment(payment, terms.term_months) - principal)
            })
            .await
    }

    /// Month-by-month schedule, rounded to cents, closing at a zero balance
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` when principal <= 0, rate < 0 or term = 0.
    #[instrument(skip(self))]
    pub async fn amortization_schedule(
        &self,
        principal: f64,
        annual_rate: f64,
        term_years: u32,
    ) -> CoreResult<Vec<AmortizationEntry>> {
        let key = fingerprint!(
            Self::DOMAIN,
            "amortization_schedule",
            principal,
            annual_rate,
            term_years
        );
        self.facade
            .get_or_compute(&key, None, || {
                loan::amortization_schedule(principal, annual_rate, term_years)
            })
            .await
    }

    /// Largest loan the household can carry
    ///
    /// `debt_to_income_ratio` defaults to 0.28.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` when income <= 0, expenses < 0, the ratio is
    /// outside (0, 1], rate < 0 or term = 0.
    #[instrument(skip(self))]
    pub async fn loan_capacity(
        &self,
        monthly_income: f64,
        monthly_expenses: f64,
        annual_rate: f64,
        term_years: u32,
        debt_to_income_ratio: Option<f64>,
    ) -> CoreResult<LoanCapacity> {
        let ratio = debt_to_income_ratio.unwrap_or(loan::DEFAULT_DEBT_TO_INCOME_RATIO);
        let key = fingerprint!(
            Self::DOMAIN,
            "loan_capacity",
            monthly_income,
            monthly_expenses,
            annual_rate,
            term_years,
            ratio
        );
        self.facade
            .get_or_compute(&key, None, || {
                loan::loan_capacity(monthly_income, monthly_expenses, annual_rate, term_years, ratio)
            })
            .await
    }

    /// Monthly payment, total paid and total interest in one result
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` when principal <= 0, rate < 0 or term = 0.
    #[instrument(skip(self))]
    pub async fn summary(
        &self,
        principal: f64,
        annual_rate: f64,
        term_years: u32,
    ) -> CoreResult<LoanSummary> {
        let key = fingerprint!(Self::DOMAIN, "summary", principal, annual_rate, term_years);
        self.facade
            .get_or_compute(&key, None, || loan::summary(principal, annual_rate, term_years))
            .await
    }
}

impl CalculatorService for LoanService {
    const DOMAIN: &'static str = "loan";

    fn facade(&self) -> &CacheFacade {
        &self.facade
    }
}
