//! Percentage result types

use serde::{Deserialize, Serialize};

/// Price after a percentage discount or markup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceAdjustment {
    /// Amount taken off (discount) or added (markup)
    pub amount: f64,
    /// Price after the adjustment
    pub final_price: f64,
}

/// Profit and margin for a revenue/cost pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitMargin {
    /// Revenue minus cost
    pub profit: f64,
    /// Profit as a percentage of revenue
    pub margin_percentage: f64,
}
