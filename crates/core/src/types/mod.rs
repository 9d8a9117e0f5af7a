//! `FinCalc` Core Types
//!
//! Value types consumed and produced by the formula library.
//! Everything here is plain data owned by the call stack; results are
//! `Serialize + Deserialize` so the cache layer can store them.

pub mod fuel;
pub mod investment;
pub mod loan;
pub mod percentage;

// Re-exports for convenience
pub use fuel::*;
pub use investment::*;
pub use loan::*;
pub use percentage::*;

/// Months per year used by every monthly-compounding formula
pub const MONTHS_PER_YEAR: u32 = 12;

/// Convert an annual percentage rate into a monthly decimal rate
#[inline]
#[must_use]
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / f64::from(MONTHS_PER_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_rate() {
        assert!((monthly_rate(12.0) - 0.01).abs() < 1e-12);
        assert!(monthly_rate(0.0).abs() < f64::EPSILON);
    }
}
