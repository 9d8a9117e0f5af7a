//! `FinCalc` Core Prelude
//!
//! Common imports for `FinCalc` core functionality.
//! Import this module to get access to the most commonly used types and functions.

// Re-export core types
pub use crate::config::{
    CacheBackendKind, CacheSettings, FinCalcConfig, FuelSettings, ViabilityPreset,
};
pub use crate::error::{CoreError, CoreResult};
pub use crate::formulas::fuel::{NegotiateRule, ViabilityThresholds};
pub use crate::formulas::{debt, fuel, investment, loan, percentage};
pub use crate::rounding::{round2, round_to};
pub use crate::types::*;

// Re-export commonly used external types
pub use serde::{Deserialize, Serialize};
pub use tracing::{debug, info, instrument, warn};

// Re-export validation
pub use garde::Validate;

/// Common result type alias
pub type Result<T> = CoreResult<T>;
