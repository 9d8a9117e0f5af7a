//! Investment formulas. All rates are annual percentages.

use crate::error::{
    ensure_finite, ensure_finite_result, ensure_non_negative, ensure_non_zero, CoreError,
    CoreResult,
};
use crate::types::{InvestmentPlan, InvestmentReturn};

/// Compounding periods per year applied when the caller does not supply one
pub const DEFAULT_COMPOUNDING_FREQUENCY: u32 = 12;

/// Growth factor `(1 + rate/100/frequency)^(frequency·years)`
fn growth_factor(annual_rate: f64, years: f64, frequency: u32) -> CoreResult<f64> {
    ensure_finite("annual_rate", annual_rate)?;
    ensure_non_negative("years", years)?;
    if frequency == 0 {
        return Err(CoreError::invalid_argument(
            "frequency",
            "must be at least one compounding period per year",
        ));
    }

    let periods_per_year = f64::from(frequency);
    let periodic_rate = annual_rate / 100.0 / periods_per_year;
    if periodic_rate <= -1.0 {
        return Err(CoreError::invalid_argument(
            "annual_rate",
            "would lose more than the whole balance in one period",
        ));
    }

    ensure_finite_result(
        "years",
        (1.0 + periodic_rate).powf(periods_per_year * years),
    )
}

/// Future value of a lump sum plus end-of-month deposits
#[must_use]
pub fn future_value_of(plan: &InvestmentPlan) -> f64 {
    let rate = plan.monthly_rate();
    let months = plan.months();

    if rate == 0.0 {
        return plan.initial_amount + plan.monthly_deposit * months;
    }

    let growth = (1.0 + rate).powf(months);
    plan.initial_amount * growth + plan.monthly_deposit * ((growth - 1.0) / rate)
}

/// Future value of an initial investment plus monthly deposits
///
/// `FV = initial·(1+r)^m + deposit·((1+r)^m - 1)/r` with monthly `r` and `m = years·12`;
/// a zero rate degenerates the deposit term to `deposit·m`.
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` for negative amounts or horizon, a rate that
/// wipes out the balance in one month, non-finite input, or a horizon so long the
/// balance overflows.
pub fn future_value(
    initial_investment: f64,
    monthly_deposit: f64,
    annual_rate: f64,
    years: f64,
) -> CoreResult<f64> {
    let plan = InvestmentPlan::new(initial_investment, monthly_deposit, annual_rate, years)?;
    if plan.monthly_rate() <= -1.0 {
        return Err(CoreError::invalid_argument(
            "annual_rate",
            "would lose more than the whole balance in one month",
        ));
    }
    ensure_finite_result("years", future_value_of(&plan))
}

/// Balance after compounding `principal` for `years`
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` for a negative principal or horizon, zero
/// frequency, non-finite input, or an overflowing balance.
pub fn compound_interest(
    principal: f64,
    annual_rate: f64,
    years: f64,
    frequency: u32,
) -> CoreResult<f64> {
    ensure_non_negative("principal", principal)?;
    let growth = growth_factor(annual_rate, years, frequency)?;
    ensure_finite_result("principal", principal * growth)
}

/// Balance after simple (non-compounding) interest: `P·(1 + rate/100·years)`
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` for a negative principal or horizon, or
/// non-finite input.
pub fn simple_interest(principal: f64, annual_rate: f64, years: f64) -> CoreResult<f64> {
    ensure_non_negative("principal", principal)?;
    ensure_finite("annual_rate", annual_rate)?;
    ensure_non_negative("years", years)?;
    ensure_finite_result("principal", principal * (1.0 + annual_rate / 100.0 * years))
}

/// Return on investment
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` when the initial investment is zero.
pub fn roi(initial_investment: f64, final_value: f64) -> CoreResult<InvestmentReturn> {
    let initial = ensure_non_zero("initial_investment", initial_investment)?;
    let final_value = ensure_finite("final_value", final_value)?;
    let gain = final_value - initial;

    Ok(InvestmentReturn {
        roi: ensure_finite_result("final_value", gain)?,
        roi_percentage: ensure_finite_result("initial_investment", gain / initial * 100.0)?,
    })
}

/// Value today of an amount due after `years` of compounding
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` for a negative horizon, zero frequency,
/// non-finite input, or a growth factor that overflows.
pub fn present_value(
    future_value: f64,
    annual_rate: f64,
    years: f64,
    frequency: u32,
) -> CoreResult<f64> {
    ensure_finite("future_value", future_value)?;
    let growth = growth_factor(annual_rate, years, frequency)?;
    ensure_finite_result("future_value", future_value / growth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_future_value() -> CoreResult<()> {
        let fv = future_value(10_000.0, 500.0, 8.5, 10.0)?;
        assert!(fv > 102_000.0 && fv < 108_000.0, "fv = {fv}");
        Ok(())
    }

    #[test]
    fn test_zero_rate_future_value() -> CoreResult<()> {
        let fv = future_value(1_000.0, 100.0, 0.0, 2.0)?;
        assert!((fv - 3_400.0).abs() < f64::EPSILON);

        let near_zero = future_value(1_000.0, 100.0, 1e-9, 2.0)?;
        assert!((fv - near_zero).abs() < 1e-3);
        Ok(())
    }

    #[test]
    fn test_compound_and_present_value_are_inverse() -> CoreResult<()> {
        let grown = compound_interest(5_000.0, 6.0, 4.0, DEFAULT_COMPOUNDING_FREQUENCY)?;
        let back = present_value(grown, 6.0, 4.0, DEFAULT_COMPOUNDING_FREQUENCY)?;
        assert!((back - 5_000.0).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_annual_compounding() -> CoreResult<()> {
        let grown = compound_interest(1_000.0, 10.0, 2.0, 1)?;
        assert!((grown - 1_210.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_simple_interest() -> CoreResult<()> {
        let balance = simple_interest(1_000.0, 5.0, 3.0)?;
        assert!((balance - 1_150.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_roi() -> CoreResult<()> {
        let result = roi(2_000.0, 2_500.0)?;
        assert!((result.roi - 500.0).abs() < f64::EPSILON);
        assert!((result.roi_percentage - 25.0).abs() < f64::EPSILON);
        assert!(roi(0.0, 100.0).is_err());
        Ok(())
    }

    #[test]
    fn test_overflowing_horizon_rejected() {
        assert!(matches!(
            future_value(10_000.0, 500.0, 8.5, 100_000.0),
            Err(CoreError::InvalidArgument { ref field, .. }) if field == "years"
        ));
        assert!(compound_interest(1_000.0, 8.5, 100_000.0, 12).is_err_and(|e| e.is_invalid_argument()));
        assert!(present_value(1_000.0, 8.5, 100_000.0, 12).is_err_and(|e| e.is_invalid_argument()));
        assert!(simple_interest(f64::MAX, 100.0, 2.0).is_err());
    }

    #[test]
    fn test_zero_frequency_rejected() {
        assert!(compound_interest(1_000.0, 5.0, 1.0, 0).is_err());
        assert!(present_value(1_000.0, 5.0, 1.0, 0).is_err());
    }
}
