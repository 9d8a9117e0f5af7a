//! Debt formulas: payment for a term, and payoff time for a payment.

use super::annuity_payment;
use crate::error::{CoreError, CoreResult};
use crate::types::{DebtProfile, DebtSolution, RepaymentPlan};

/// Monthly payment that clears a debt in `months`
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` when the debt is not positive, the rate is
/// negative or `months` is zero.
pub fn monthly_payment(total_debt: f64, annual_rate: f64, months: u32) -> CoreResult<f64> {
    let profile = DebtProfile::new(total_debt, annual_rate, RepaymentPlan::Term { months })?;
    Ok(annuity_payment(
        profile.total_debt,
        profile.monthly_rate(),
        f64::from(months),
    ))
}

/// Months needed to clear a debt at a fixed monthly payment
///
/// `n = -ln(1 - D·r/P) / ln(1+r)`; a zero rate degenerates to `D/P`. The result is
/// fractional: the last payment is partial.
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` when the payment does not exceed the first
/// month's interest (the debt would never be repaid), or when the debt or payment is
/// not positive or the rate is negative.
pub fn payoff_months(total_debt: f64, annual_rate: f64, monthly_payment: f64) -> CoreResult<f64> {
    let profile = DebtProfile::new(
        total_debt,
        annual_rate,
        RepaymentPlan::Payment { monthly_payment },
    )?;
    let rate = profile.monthly_rate();

    if rate == 0.0 {
        return Ok(total_debt / monthly_payment);
    }

    let monthly_interest = total_debt * rate;
    if monthly_payment <= monthly_interest {
        return Err(CoreError::invalid_argument(
            "monthly_payment",
            format!(
                "must exceed the monthly interest of {monthly_interest:.2}; the debt would never be repaid"
            ),
        ));
    }

    // ln_1p keeps precision when D·r/P or r is small
    let months = -(-monthly_interest / monthly_payment).ln_1p() / rate.ln_1p();
    if months.is_finite() {
        Ok(months)
    } else {
        Err(CoreError::invalid_argument(
            "monthly_payment",
            "payoff time is not representable for these inputs",
        ))
    }
}

/// Solve a debt profile for whichever quantity it leaves open
///
/// # Errors
///
/// Propagates the argument checks of [`monthly_payment`] and [`payoff_months`].
pub fn solve(profile: &DebtProfile) -> CoreResult<DebtSolution> {
    match profile.plan {
        RepaymentPlan::Term { months } => {
            monthly_payment(profile.total_debt, profile.annual_rate, months)
                .map(DebtSolution::MonthlyPayment)
        }
        RepaymentPlan::Payment { monthly_payment } => {
            payoff_months(profile.total_debt, profile.annual_rate, monthly_payment)
                .map(DebtSolution::PayoffMonths)
        }
    }
}
