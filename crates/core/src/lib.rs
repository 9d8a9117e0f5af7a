//! `FinCalc` Core - Financial Formula Library
//!
//! Deterministic, synchronous implementations of the `FinCalc` calculators:
//! loans and amortization, debt payoff, investment growth, fuel cost and driver
//! earnings, and percentage arithmetic.
//!
//! # Features
//!
//! - **Zero-panic policy**: every fallible formula returns `CoreResult<T>`
//! - **Explicit degenerate cases**: zero-rate annuities are branches, not errors
//! - **Serializable results**: every value type round-trips through `serde`
//! - **Layered configuration**: defaults, TOML file and `FINCALC__*` environment
//!
//! # Architecture
//!
//! - [`formulas`] - pure functions, one module per calculator domain
//! - [`types`] - inputs and results of the formulas
//! - [`config`] - validated workspace configuration
//! - [`error`] - error taxonomy shared by every `FinCalc` crate
//! - [`rounding`] - display rounding for the presentation boundary
//!
//! # Example
//!
//! ```rust
//! use fincalc_core::formulas::loan;
//! use fincalc_core::rounding::round2;
//!
//! fn main() -> fincalc_core::CoreResult<()> {
//!     let payment = loan::monthly_payment(10_000.0, 12.0, 2)?;
//!     assert!((round2(payment) - 470.73).abs() < 1e-9);
//!     Ok(())
//! }
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::large_stack_arrays,
    clippy::indexing_slicing,
    missing_docs
)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::correctness,
    clippy::suspicious,
    clippy::perf,
    clippy::style,
    clippy::complexity,
    clippy::unreachable,
    clippy::redundant_pattern_matching,
    clippy::manual_let_else,
    clippy::unnecessary_wraps,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation
)]
// Exact zero is the documented switch for the degenerate annuity branches
#![allow(clippy::float_cmp)]
#![allow(clippy::multiple_crate_versions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod error;
pub mod formulas;
pub mod prelude;
pub mod rounding;
pub mod types;

// Re-exports for convenience
pub use config::{FinCalcConfig, ViabilityPreset};
pub use error::{CoreError, CoreResult};
pub use formulas::fuel::{NegotiateRule, ViabilityThresholds};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        #[allow(clippy::const_is_empty)]
        {
            assert!(!VERSION.is_empty());
        }
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_default_config_is_valid() -> CoreResult<()> {
        FinCalcConfig::default().validate()
    }
}
