//! `FinCalc` Configuration System
//!
//! Configuration with validation and environment support.
//! Values come from defaults, an optional TOML file and `FINCALC__*` environment variables.

use crate::error::{CoreError, CoreResult};
use crate::formulas::fuel::ViabilityThresholds;
use garde::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable prefix for layered configuration
pub const ENV_PREFIX: &str = "FINCALC";

/// Top-level configuration for the calculator stack
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct FinCalcConfig {
    /// Cache configuration
    #[garde(dive)]
    pub cache: CacheSettings,

    /// Fuel calculator configuration
    #[garde(dive)]
    pub fuel: FuelSettings,
}

/// Which cache backend the services run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackendKind {
    /// In-process LRU cache
    Memory,
    /// Networked Redis cache
    Redis,
    /// No caching; every call computes
    Disabled,
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CacheSettings {
    /// Backend selection
    #[garde(skip)]
    pub backend: CacheBackendKind,

    /// Default time-to-live for cached results (seconds)
    #[garde(range(min = 1, max = 604_800))]
    pub default_ttl_seconds: u64,

    /// Maximum number of entries held by the in-memory backend
    #[garde(range(min = 1, max = 10_000_000))]
    pub max_entries: usize,

    /// Redis connection URL
    #[garde(skip)]
    pub redis_url: Option<String>,

    /// Backend operation timeout (milliseconds)
    #[garde(range(min = 1, max = 60_000))]
    pub operation_timeout_ms: u64,
}

/// Named viability threshold and advice tables for the earnings projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViabilityPreset {
    /// 15/30% margin cut-offs, 350/500 distance-per-day ceilings
    Standard,
    /// 20/40% margin cut-offs, 400/600 distance-per-day ceilings
    Legacy,
}

impl ViabilityPreset {
    /// Threshold table for this preset
    #[must_use]
    pub const fn thresholds(self) -> ViabilityThresholds {
        match self {
            Self::Standard => ViabilityThresholds::standard(),
            Self::Legacy => ViabilityThresholds::legacy(),
        }
    }

    /// Stable name used in cache fingerprints
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Legacy => "legacy",
        }
    }
}

/// Fuel calculator configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FuelSettings {
    /// Active viability threshold table
    #[garde(skip)]
    pub viability_preset: ViabilityPreset,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: CacheBackendKind::Memory,
            default_ttl_seconds: 3600, // 1 hour
            max_entries: 1000,
            redis_url: None,
            operation_timeout_ms: 1000,
        }
    }
}

impl Default for FuelSettings {
    fn default() -> Self {
        Self {
            viability_preset: ViabilityPreset::Standard,
        }
    }
}

impl CacheSettings {
    /// Default TTL as a `Duration`
    #[must_use]
    pub const fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_seconds)
    }

    /// Backend operation timeout as a `Duration`
    #[must_use]
    pub const fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }
}

impl FinCalcConfig {
    /// Parse configuration from a TOML document
    ///
    /// # Errors
    ///
    /// Returns error if the document is malformed or fails validation.
    pub fn from_toml_str(document: &str) -> CoreResult<Self> {
        let config: Self = toml::from_str(document)
            .map_err(|e| CoreError::configuration(format!("Invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an optional file and `FINCALC__*` environment variables
    ///
    /// Environment variables use `__` as the nesting separator, for example
    /// `FINCALC__CACHE__DEFAULT_TTL_SECONDS=600`.
    ///
    /// # Errors
    ///
    /// Returns error if a source cannot be read or the merged result fails validation.
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .and_then(|merged| merged.try_deserialize::<Self>())
            .map_err(|e| CoreError::configuration(format!("Failed to load configuration: {e}")))?;

        config.validate()?;
        tracing::info!(
            backend = ?config.cache.backend,
            ttl_seconds = config.cache.default_ttl_seconds,
            max_entries = config.cache.max_entries,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Create test configuration: small in-memory cache, short TTL
    #[must_use]
    pub fn test() -> Self {
        Self {
            cache: CacheSettings {
                backend: CacheBackendKind::Memory,
                default_ttl_seconds: 60,
                max_entries: 128,
                redis_url: None,
                operation_timeout_ms: 100,
            },
            fuel: FuelSettings::default(),
        }
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if configuration validation fails.
    pub fn validate(&self) -> CoreResult<()> {
        garde::Validate::validate(self, &())
            .map_err(|e| CoreError::configuration(format!("Validation failed: {e}")))?;

        if self.cache.backend == CacheBackendKind::Redis {
            match self.cache.redis_url.as_deref() {
                Some(url) if url.starts_with("redis://") || url.starts_with("rediss://") => {}
                Some(_) => {
                    return Err(CoreError::configuration(
                        "cache.redis_url must use the redis:// or rediss:// scheme",
                    ))
                }
                None => {
                    return Err(CoreError::configuration(
                        "cache.redis_url is required when cache.backend = \"redis\"",
                    ))
                }
            }
        }

        Ok(())
    }
}
