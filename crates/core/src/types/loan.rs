//! Loan and debt types

use serde::{Deserialize, Serialize};

use super::{monthly_rate, MONTHS_PER_YEAR};
use crate::error::{ensure_non_negative, ensure_positive, CoreError, CoreResult};

/// Validated terms of a fixed-rate loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: f64,
    /// Annual interest rate in percent
    pub annual_rate: f64,
    /// Number of monthly payments
    pub term_months: u32,
}

impl LoanTerms {
    /// Create loan terms from a term in months
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` when principal <= 0, rate < 0 or term = 0.
    pub fn from_months(principal: f64, annual_rate: f64, term_months: u32) -> CoreResult<Self> {
        ensure_positive("principal", principal)?;
        ensure_non_negative("annual_rate", annual_rate)?;
        if term_months == 0 {
            return Err(CoreError::invalid_argument(
                "term",
                "must be greater than zero",
            ));
        }

        Ok(Self {
            principal,
            annual_rate,
            term_months,
        })
    }

    /// Create loan terms from a term in whole years
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` when principal <= 0, rate < 0 or term = 0.
    pub fn from_years(principal: f64, annual_rate: f64, term_years: u32) -> CoreResult<Self> {
        let term_months = term_years
            .checked_mul(MONTHS_PER_YEAR)
            .ok_or_else(|| CoreError::invalid_argument("term", "term in years is too large"))?;
        Self::from_months(principal, annual_rate, term_months)
    }

    /// Monthly decimal interest rate
    #[inline]
    #[must_use]
    pub fn monthly_rate(&self) -> f64 {
        monthly_rate(self.annual_rate)
    }

    /// Number of payments as a float, for exponentiation
    #[inline]
    #[must_use]
    pub fn payments(&self) -> f64 {
        f64::from(self.term_months)
    }
}

/// One row of an amortization schedule
///
/// Monetary fields are display values rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// 1-based month index
    pub month: u32,
    /// Total payment for the month
    pub payment: f64,
    /// Part of the payment that reduces the balance
    pub principal: f64,
    /// Part of the payment that covers interest
    pub interest: f64,
    /// Balance remaining after the payment
    pub balance: f64,
}

/// Borrowing capacity derived from income and expenses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanCapacity {
    /// Largest principal the payment can service
    pub max_loan_amount: f64,
    /// Largest affordable monthly payment
    pub max_monthly_payment: f64,
}

/// Payment, total paid and total interest for one loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    /// Fixed monthly payment
    pub monthly_payment: f64,
    /// Sum of all payments
    pub total_payment: f64,
    /// Total paid minus principal
    pub total_interest: f64,
}

/// What a debt calculation solves for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "solve_for", rename_all = "snake_case")]
pub enum RepaymentPlan {
    /// Known term; solve for the monthly payment
    Term {
        /// Number of monthly payments
        months: u32,
    },
    /// Known payment; solve for the payoff time
    Payment {
        /// Fixed monthly payment
        monthly_payment: f64,
    },
}

/// Outstanding debt and how it will be repaid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebtProfile {
    /// Outstanding balance
    pub total_debt: f64,
    /// Annual interest rate in percent
    pub annual_rate: f64,
    /// Term or payment
    pub plan: RepaymentPlan,
}

impl DebtProfile {
    /// Create a debt profile
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` when the debt is not positive, the rate is
    /// negative, or the plan carries a zero term / non-positive payment.
    pub fn new(total_debt: f64, annual_rate: f64, plan: RepaymentPlan) -> CoreResult<Self> {
        ensure_positive("total_debt", total_debt)?;
        ensure_non_negative("annual_rate", annual_rate)?;
        match plan {
            RepaymentPlan::Term { months } if months == 0 => {
                return Err(CoreError::invalid_argument(
                    "months",
                    "must be greater than zero",
                ));
            }
            RepaymentPlan::Payment { monthly_payment } => {
                ensure_positive("monthly_payment", monthly_payment)?;
            }
            RepaymentPlan::Term { .. } => {}
        }

        Ok(Self {
            total_debt,
            annual_rate,
            plan,
        })
    }

    /// Monthly decimal interest rate
    #[inline]
    #[must_use]
    pub fn monthly_rate(&self) -> f64 {
        monthly_rate(self.annual_rate)
    }
}

/// Answer to a [`DebtProfile`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtSolution {
    /// Payment needed to clear the debt in the given term
    MonthlyPayment(f64),
    /// Months needed to clear the debt at the given payment
    PayoffMonths(f64),
}
