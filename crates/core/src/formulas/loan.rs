//! Loan formulas: annuity payment, amortization, interest and borrowing capacity.

use super::{annuity_payment, annuity_present_value};
use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, CoreError, CoreResult};
use crate::rounding::round2;
use crate::types::{
    monthly_rate, AmortizationEntry, LoanCapacity, LoanSummary, LoanTerms, MONTHS_PER_YEAR,
};

/// Debt-to-income ceiling applied when the caller does not supply one
pub const DEFAULT_DEBT_TO_INCOME_RATIO: f64 = 0.28;

/// Fixed monthly payment for validated terms
#[inline]
#[must_use]
pub fn payment_for(terms: &LoanTerms) -> f64 {
    annuity_payment(terms.principal, terms.monthly_rate(), terms.payments())
}

/// Fixed monthly payment of a loan
///
/// `M = P·r / (1 - (1+r)^-n)` with `r = annual_rate/100/12` and `n = term_years·12`;
/// a zero rate degenerates to `P/n`.
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` when principal <= 0, rate < 0 or term = 0.
pub fn monthly_payment(principal: f64, annual_rate: f64, term_years: u32) -> CoreResult<f64> {
    let terms = LoanTerms::from_years(principal, annual_rate, term_years)?;
    Ok(payment_for(&terms))
}

/// Sum of all payments
#[inline]
#[must_use]
pub fn total_payment(monthly_payment: f64, months: u32) -> f64 {
    monthly_payment * f64::from(months)
}

/// Total interest paid over the life of a loan
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` when principal <= 0, rate < 0 or term = 0.
pub fn total_interest(principal: f64, annual_rate: f64, term_years: u32) -> CoreResult<f64> {
    Ok(summary(principal, annual_rate, term_years)?.total_interest)
}

/// Payment, total paid and total interest in one pass
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` when principal <= 0, rate < 0 or term = 0.
pub fn summary(principal: f64, annual_rate: f64, term_years: u32) -> CoreResult<LoanSummary> {
    let terms = LoanTerms::from_years(principal, annual_rate, term_years)?;
    let payment = payment_for(&terms);
    let total = total_payment(payment, terms.term_months);

    Ok(LoanSummary {
        monthly_payment: payment,
        total_payment: total,
        total_interest: total - terms.principal,
    })
}

/// Month-by-month amortization schedule
///
/// The balance is carried unrounded between months. The final month pays off
/// whatever balance remains, so its principal absorbs floating-point residue and
/// the schedule always closes at exactly zero.
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` when principal <= 0, rate < 0 or term = 0.
pub fn amortization_schedule(
    principal: f64,
    annual_rate: f64,
    term_years: u32,
) -> CoreResult<Vec<AmortizationEntry>> {
    let terms = LoanTerms::from_years(principal, annual_rate, term_years)?;
    Ok(schedule_for(&terms))
}

/// Amortization schedule for validated terms
#[must_use]
pub fn schedule_for(terms: &LoanTerms) -> Vec<AmortizationEntry> {
    let payment = payment_for(terms);
    let rate = terms.monthly_rate();
    let last_month = terms.term_months;

    let mut schedule = Vec::with_capacity(usize::try_from(last_month).unwrap_or(0));
    let mut balance = terms.principal;

    for month in 1..=last_month {
        let interest = balance * rate;
        let (principal_portion, month_payment) = if month == last_month {
            (balance, balance + interest)
        } else {
            (payment - interest, payment)
        };

        balance = if month == last_month {
            0.0
        } else {
            balance - principal_portion
        };

        schedule.push(AmortizationEntry {
            month,
            payment: round2(month_payment),
            principal: round2(principal_portion),
            interest: round2(interest),
            balance: round2(balance.max(0.0)),
        });
    }

    schedule
}

/// Largest loan a household can carry
///
/// The affordable payment is the smaller of disposable income and
/// `income × debt_to_income_ratio`; the annuity is inverted to find the principal
/// that payment services. No disposable income means zero capacity. Both figures
/// are returned rounded to cents.
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` when income <= 0, expenses < 0, the ratio is
/// outside (0, 1], rate < 0 or term = 0.
pub fn loan_capacity(
    monthly_income: f64,
    monthly_expenses: f64,
    annual_rate: f64,
    term_years: u32,
    debt_to_income_ratio: f64,
) -> CoreResult<LoanCapacity> {
    ensure_positive("monthly_income", monthly_income)?;
    ensure_non_negative("monthly_expenses", monthly_expenses)?;
    ensure_non_negative("annual_rate", annual_rate)?;
    let ratio = ensure_finite("debt_to_income_ratio", debt_to_income_ratio)?;
    if ratio <= 0.0 || ratio > 1.0 {
        return Err(CoreError::invalid_argument(
            "debt_to_income_ratio",
            "must be greater than 0 and at most 1",
        ));
    }
    if term_years == 0 {
        return Err(CoreError::invalid_argument(
            "term",
            "must be greater than zero",
        ));
    }

    let disposable = monthly_income - monthly_expenses;
    let max_payment = disposable.min(monthly_income * ratio);
    if max_payment <= 0.0 {
        return Ok(LoanCapacity {
            max_loan_amount: 0.0,
            max_monthly_payment: 0.0,
        });
    }

    let periods = f64::from(term_years) * f64::from(MONTHS_PER_YEAR);
    let max_principal = annuity_present_value(max_payment, monthly_rate(annual_rate), periods);

    Ok(LoanCapacity {
        max_loan_amount: round2(max_principal),
        max_monthly_payment: round2(max_payment),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_payment() -> CoreResult<()> {
        let payment = monthly_payment(10_000.0, 12.0, 2)?;
        assert!((round2(payment) - 470.73).abs() < f64::EPSILON);

        let interest = total_interest(10_000.0, 12.0, 2)?;
        assert!((interest - 1297.61).abs() < 0.05);
        Ok(())
    }

    #[test]
    fn test_zero_rate_is_linear() -> CoreResult<()> {
        let payment = monthly_payment(12_000.0, 0.0, 1)?;
        assert!((payment - 1000.0).abs() < f64::EPSILON);
        assert!(total_interest(12_000.0, 0.0, 1)?.abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_invalid_terms_rejected() {
        assert!(matches!(
            monthly_payment(-1.0, 5.0, 10),
            Err(CoreError::InvalidArgument { ref field, .. }) if field == "principal"
        ));
        assert!(matches!(
            monthly_payment(1.0, -5.0, 10),
            Err(CoreError::InvalidArgument { ref field, .. }) if field == "annual_rate"
        ));
        assert!(matches!(
            monthly_payment(1.0, 5.0, 0),
            Err(CoreError::InvalidArgument { ref field, .. }) if field == "term"
        ));
    }

    #[test]
    fn test_schedule_closes_at_zero() -> CoreResult<()> {
        let schedule = amortization_schedule(10_000.0, 12.0, 2)?;
        assert_eq!(schedule.len(), 24);
        assert_eq!(schedule.first().map(|e| e.month), Some(1));

        let last = schedule.last().copied();
        assert_eq!(last.map(|e| e.month), Some(24));
        assert!(last.is_some_and(|e| e.balance.abs() < f64::EPSILON));

        let principal_sum: f64 = schedule.iter().map(|e| e.principal).sum();
        assert!((principal_sum - 10_000.0).abs() <= 0.01 * 24.0);

        for pair in schedule.windows(2) {
            if let [prev, next] = pair {
                assert!(next.balance <= prev.balance);
            }
        }
        for entry in &schedule {
            assert!((entry.payment - (entry.principal + entry.interest)).abs() <= 0.011);
        }
        Ok(())
    }

    #[test]
    fn test_first_month_split() -> CoreResult<()> {
        let schedule = amortization_schedule(10_000.0, 12.0, 2)?;
        let first = schedule.first().copied();
        assert!(first.is_some_and(|e| (e.interest - 100.0).abs() < f64::EPSILON));
        assert!(first.is_some_and(|e| (e.principal - 370.73).abs() < 0.011));
        Ok(())
    }

    #[test]
    fn test_summary_consistency() -> CoreResult<()> {
        let summary = summary(25_000.0, 7.5, 5)?;
        assert!(
            (summary.total_payment - summary.monthly_payment * 60.0).abs() < 1e-6
        );
        assert!((summary.total_interest - (summary.total_payment - 25_000.0)).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_loan_capacity_uses_ratio_ceiling() -> CoreResult<()> {
        let capacity = loan_capacity(5_000.0, 2_000.0, 0.0, 10, DEFAULT_DEBT_TO_INCOME_RATIO)?;
        assert!((capacity.max_monthly_payment - 1_400.0).abs() < f64::EPSILON);
        assert!((capacity.max_loan_amount - 168_000.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn test_loan_capacity_uses_disposable_income() -> CoreResult<()> {
        let capacity = loan_capacity(5_000.0, 4_500.0, 12.0, 2, DEFAULT_DEBT_TO_INCOME_RATIO)?;
        assert!((capacity.max_monthly_payment - 500.0).abs() < f64::EPSILON);
        let payment_back = monthly_payment(capacity.max_loan_amount, 12.0, 2)?;
        assert!((payment_back - 500.0).abs() < 0.01);
        Ok(())
    }

    #[test]
    fn test_loan_capacity_without_disposable_income() -> CoreResult<()> {
        let capacity = loan_capacity(3_000.0, 3_500.0, 10.0, 5, DEFAULT_DEBT_TO_INCOME_RATIO)?;
        assert!(capacity.max_loan_amount.abs() < f64::EPSILON);
        assert!(capacity.max_monthly_payment.abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn test_loan_capacity_rejects_bad_ratio() {
        assert!(loan_capacity(3_000.0, 1_000.0, 10.0, 5, 0.0).is_err());
        assert!(loan_capacity(3_000.0, 1_000.0, 10.0, 5, 1.5).is_err());
    }
}
