//! Display rounding
//!
//! Formulas accumulate in full precision; these helpers are applied only where a
//! value is defined as a display figure (amortization rows, loan capacity) or at
//! the presentation boundary.

/// Round to a fixed number of decimal places, halves away from zero
#[inline]
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    let rounded = (value * factor).round() / factor;
    // Collapse -0.0 so rounded figures print and fingerprint the same as 0.0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Round a monetary value to cents
#[inline]
#[must_use]
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert!((round2(470.734_711) - 470.73).abs() < f64::EPSILON);
        assert!((round2(11.666_666) - 11.67).abs() < f64::EPSILON);
        assert!((round2(-1.005_1) + 1.01).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_zero_collapses() {
        let value = round2(-0.001);
        assert!(value.is_sign_positive());
    }

    #[test]
    fn test_round_to_places() {
        assert!((round_to(0.123_456, 3) - 0.123).abs() < f64::EPSILON);
        assert!((round_to(1234.5, 0) - 1235.0).abs() < f64::EPSILON);
    }
}
