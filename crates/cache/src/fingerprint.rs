//! Cache key fingerprints
//!
//! A fingerprint is `<domain>:<operation>` followed by every argument in call
//! order, joined by `:`. Floats use the shortest text that parses back to the
//! same value, with `-0` folded into `0`, so equal inputs always produce equal
//! keys and distinct inputs never share one.

use fincalc_core::types::ConsumptionUnit;
use std::fmt::{self, Write as _};

/// Separator between fingerprint segments
pub const SEPARATOR: char = ':';

/// Deterministic cache key for one calculator call
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Start a fingerprint for `operation` in `domain`
    #[must_use]
    pub fn new(domain: &str, operation: &str) -> Self {
        let mut key = String::with_capacity(domain.len() + operation.len() + 48);
        key.push_str(domain);
        key.push(SEPARATOR);
        key.push_str(operation);
        Self(key)
    }

    /// Append the next argument
    #[must_use]
    pub fn arg(mut self, value: impl FingerprintArg) -> Self {
        self.0.push(SEPARATOR);
        value.write_arg(&mut self.0);
        self
    }

    /// Key as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the key string
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Fingerprint> for String {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.0
    }
}

/// Value that can appear as a fingerprint argument
pub trait FingerprintArg {
    /// Append the canonical text form of `self`
    fn write_arg(&self, out: &mut String);
}

impl FingerprintArg for f64 {
    fn write_arg(&self, out: &mut String) {
        let value = if *self == 0.0 { 0.0 } else { *self };
        // Writing to a String cannot fail
        let _ = write!(out, "{value:?}");
    }
}

macro_rules! display_arg {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FingerprintArg for $ty {
                fn write_arg(&self, out: &mut String) {
                    let _ = write!(out, "{self}");
                }
            }
        )*
    };
}

display_arg!(u8, u16, u32, u64, usize, i32, i64, bool);

impl FingerprintArg for &str {
    fn write_arg(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl FingerprintArg for ConsumptionUnit {
    fn write_arg(&self, out: &mut String) {
        out.push_str(match self {
            Self::DistancePerVolume => "distance_per_volume",
            Self::VolumePer100Distance => "volume_per_100_distance",
        });
    }
}

/// Build a [`Fingerprint`] from a domain, an operation and ordered arguments
///
/// ```rust
/// use fincalc_cache::fingerprint;
///
/// let key = fingerprint!("loan", "monthly_payment", 10_000.0, 12.0, 2_u32);
/// assert_eq!(
///     key.as_str(),
///     "loan:monthly_payment:10000.0:12.0:2"
/// );
/// ```
#[macro_export]
macro_rules! fingerprint {
    ($domain:expr, $operation:expr $(, $arg:expr)* $(,)?) => {
        $crate::Fingerprint::new($domain, $operation)$(.arg($arg))*
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, prop_assume, proptest};

    #[test]
    fn test_layout() {
        let key = Fingerprint::new("percentage", "apply")
            .arg(100.0)
            .arg(15.0)
            .arg(true);
        assert_eq!(key.as_str(), "percentage:apply:100.0:15.0:true");
    }

    #[test]
    fn test_negative_zero_folds() {
        let positive = Fingerprint::new("d", "op").arg(0.0);
        let negative = Fingerprint::new("d", "op").arg(-0.0);
        assert_eq!(positive, negative);
    }

    #[test]
    fn test_tiny_values_keep_their_digits() {
        let a = fingerprint!("percentage", "value_is_percentage_of", 1e-11, 1.0);
        let b = fingerprint!("percentage", "value_is_percentage_of", 2e-11, 1.0);
        assert_ne!(a, b);
        assert_eq!(a.as_str(), "percentage:value_is_percentage_of:1e-11:1.0");
    }

    #[test]
    fn test_units_are_distinct() {
        let a = Fingerprint::new("fuel", "total_cost").arg(ConsumptionUnit::DistancePerVolume);
        let b = Fingerprint::new("fuel", "total_cost").arg(ConsumptionUnit::VolumePer100Distance);
        assert_ne!(a, b);
    }

    #[test]
    fn test_macro_matches_builder() {
        let built = Fingerprint::new("debt", "payoff_months")
            .arg(8_000.0)
            .arg(18.0)
            .arg(300.0);
        assert_eq!(fingerprint!("debt", "payoff_months", 8_000.0, 18.0, 300.0), built);
        assert_eq!(fingerprint!("debt", "none").as_str(), "debt:none");
    }

    proptest! {
        #[test]
        fn prop_identical_inputs_identical_keys(a in -1e9_f64..1e9, b in 0_u32..1_000) {
            let first = fingerprint!("loan", "op", a, b);
            let second = fingerprint!("loan", "op", a, b);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_distinct_inputs_distinct_keys(a in -1e6_f64..1e6, b in -1e6_f64..1e6) {
            prop_assume!(a != b);
            let first = fingerprint!("loan", "op", a);
            let second = fingerprint!("loan", "op", b);
            prop_assert!(first != second);
        }

        #[test]
        fn prop_small_magnitudes_never_collide(a in 1e-300_f64..1e-9, b in 1e-300_f64..1e-9) {
            prop_assume!(a != b);
            let first = fingerprint!("percentage", "op", a, 1.0);
            let second = fingerprint!("percentage", "op", b, 1.0);
            prop_assert!(first != second);
        }

        #[test]
        fn prop_key_text_parses_back(a in proptest::num::f64::NORMAL | proptest::num::f64::SUBNORMAL) {
            let key = Fingerprint::new("d", "op").arg(a).into_string();
            let text = key.trim_start_matches("d:op:");
            prop_assert_eq!(text.parse::<f64>().ok(), Some(if a == 0.0 { 0.0 } else { a }));
        }
    }
}
