//! `FinCalc` Cache - Result Cache Facade
//!
//! Memoizes calculator results under deterministic fingerprints with a bounded
//! lifetime. The facade is fail-open: a broken backend slows calculators down
//! but never changes their answers.
//!
//! # Backends
//!
//! - [`MemoryCache`] - in-process LRU with per-entry expiry (default)
//! - `RedisCache` - shared store behind the `redis` feature
//! - [`NoopCache`] - caching disabled, every call computes
//!
//! # Example
//!
//! ```rust
//! use fincalc_cache::{build_backend, fingerprint, CacheConfig, CacheFacade};
//!
//! # tokio_test::block_on(async {
//! let config = CacheConfig::test();
//! let facade = CacheFacade::new(build_backend(&config).await?, &config);
//!
//! let key = fingerprint!("percentage", "percentage_of", 200.0, 15.0);
//! let value: f64 = facade.get_or_compute(&key, None, || Ok(30.0)).await?;
//! assert!((value - 30.0).abs() < f64::EPSILON);
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
    clippy::redundant_pattern_matching,
    clippy::manual_let_else,
    clippy::missing_errors_doc
)]

pub mod backend;
pub mod config;
pub mod error;
pub mod facade;
pub mod fingerprint;

pub use backend::{build_backend, Cache, CacheStats, MemoryCache, NoopCache};
#[cfg(feature = "redis")]
pub use backend::RedisCache;
pub use config::CacheConfig;
pub use error::{CacheError, CacheResult};
pub use facade::{CacheFacade, FacadeStats};
pub use fingerprint::{Fingerprint, FingerprintArg};

/// Build the configured backend and wrap it in a facade
///
/// # Errors
///
/// Returns `CacheError::Configuration` for an invalid configuration, or the
/// backend's connection error.
pub async fn facade_from_config(config: &CacheConfig) -> CacheResult<CacheFacade> {
    let backend = build_backend(config).await?;
    Ok(CacheFacade::new(backend, config))
}
