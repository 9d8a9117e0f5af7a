//! Percentage arithmetic

use crate::error::{ensure_finite, ensure_non_zero, CoreError, CoreResult};
use crate::types::{PriceAdjustment, ProfitMargin};

/// `pct` percent of `value`
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` for non-finite input.
pub fn percentage_of(value: f64, percentage: f64) -> CoreResult<f64> {
    ensure_finite("value", value)?;
    ensure_finite("percentage", percentage)?;
    Ok(value * percentage / 100.0)
}

/// What percentage `part` is of `total`
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` when `total` is zero.
pub fn value_is_percentage_of(part: f64, total: f64) -> CoreResult<f64> {
    ensure_finite("part", part)?;
    let total = ensure_non_zero("total", total)?;
    Ok(part / total * 100.0)
}

/// Relative change from `old_value` to `new_value`, in percent
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` when `old_value` is zero.
pub fn percentage_change(old_value: f64, new_value: f64) -> CoreResult<f64> {
    let old_value = ensure_non_zero("old_value", old_value)?;
    ensure_finite("new_value", new_value)?;
    Ok((new_value - old_value) / old_value * 100.0)
}

/// The whole of which `percentage_value` is `percentage` percent
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` when `percentage` is zero.
pub fn value_from_percentage(percentage: f64, percentage_value: f64) -> CoreResult<f64> {
    let percentage = ensure_non_zero("percentage", percentage)?;
    ensure_finite("percentage_value", percentage_value)?;
    Ok(percentage_value * 100.0 / percentage)
}

/// Raise or lower `value` by `percentage` percent
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` for non-finite input.
pub fn apply_percentage(value: f64, percentage: f64, is_increase: bool) -> CoreResult<f64> {
    ensure_finite("value", value)?;
    ensure_finite("percentage", percentage)?;
    let factor = percentage / 100.0;
    Ok(if is_increase {
        value * (1.0 + factor)
    } else {
        value * (1.0 - factor)
    })
}

/// Gap between two values relative to the smaller one, in percent
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` when the smaller value is zero.
pub fn percentage_difference(first: f64, second: f64) -> CoreResult<f64> {
    ensure_finite("first", first)?;
    ensure_finite("second", second)?;
    let smaller = first.min(second);
    if smaller == 0.0 {
        return Err(CoreError::invalid_argument(
            "values",
            "the smaller value must not be zero",
        ));
    }
    Ok((first - second).abs() / smaller * 100.0)
}

/// Price after taking `percentage` percent off
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` for non-finite input.
pub fn discount(price: f64, percentage: f64) -> CoreResult<PriceAdjustment> {
    let amount = percentage_of(price, percentage)?;
    Ok(PriceAdjustment {
        amount,
        final_price: price - amount,
    })
}

/// Price after adding `percentage` percent
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` for non-finite input.
pub fn markup(price: f64, percentage: f64) -> CoreResult<PriceAdjustment> {
    let amount = percentage_of(price, percentage)?;
    Ok(PriceAdjustment {
        amount,
        final_price: price + amount,
    })
}

/// Profit and margin on revenue
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` when revenue is zero.
pub fn profit_margin(revenue: f64, cost: f64) -> CoreResult<ProfitMargin> {
    let revenue = ensure_non_zero("revenue", revenue)?;
    ensure_finite("cost", cost)?;
    let profit = revenue - cost;
    Ok(ProfitMargin {
        profit,
        margin_percentage: profit / revenue * 100.0,
    })
}
