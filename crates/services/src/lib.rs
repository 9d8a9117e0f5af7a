//! `FinCalc` Services - Cache-Wrapped Calculators
//!
//! One async service per calculator domain. Every public operation fingerprints
//! its arguments, asks the shared [`CacheFacade`](fincalc_cache::CacheFacade) and
//! falls back to the pure formula from `fincalc_core` on a miss.
//!
//! # Example
//!
//! ```rust
//! use fincalc_core::FinCalcConfig;
//! use fincalc_services::Calculators;
//!
//! # tokio_test::block_on(async {
//! let calculators = Calculators::from_config(&FinCalcConfig::test()).await?;
//! let change = calculators.percentage.percentage_change(100.0, 120.0).await?;
//! assert!((change - 20.0).abs() < 1e-9);
//! # Ok::<(), fincalc_core::CoreError>(())
//! # }).unwrap();
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
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
    clippy::missing_errors_doc
)]
// Service signatures mirror the formula arguments one to one
#![allow(clippy::too_many_arguments)]

pub mod calculators;
pub mod debt;
pub mod fuel;
pub mod investment;
pub mod loan;
pub mod percentage;
pub mod presentation;
pub mod service;

pub use calculators::Calculators;
pub use debt::DebtService;
pub use fuel::FuelService;
pub use investment::InvestmentService;
pub use loan::LoanService;
pub use percentage::PercentageService;
pub use presentation::Rounded;
pub use service::CalculatorService;
