//! Formula Library
//!
//! Pure, synchronous implementations of the five calculator domains.
//! No I/O and no shared state: every function is safe to call from any thread.
//! Zero-rate annuities are handled as explicit branches, never as caught errors.

pub mod debt;
pub mod fuel;
pub mod investment;
pub mod loan;
pub mod percentage;

/// Level payment that amortizes `principal` over `periods` at `rate` per period
#[inline]
pub(crate) fn annuity_payment(principal: f64, rate: f64, periods: f64) -> f64 {
    if rate == 0.0 {
        principal / periods
    } else {
        principal * rate / (1.0 - (1.0 + rate).powf(-periods))
    }
}

/// Principal that a level `payment` can amortize over `periods` at `rate` per period
#[inline]
pub(crate) fn annuity_present_value(payment: f64, rate: f64, periods: f64) -> f64 {
    if rate == 0.0 {
        payment * periods
    } else {
        payment * (1.0 - (1.0 + rate).powf(-periods)) / rate
    }
}
