//! Display rounding for the presentation boundary
//!
//! Services return full-precision values; callers that render money round here.

pub use fincalc_core::rounding::{round2, round_to};

use fincalc_core::types::{
    DailyMetrics, DriverProjection, EarningsProjection, InvestmentReturn, LoanSummary,
    PriceAdjustment, ProfitMargin, TripCost,
};

/// Result that can be rounded to cents for display
pub trait Rounded {
    /// Copy of `self` with every monetary figure rounded to two decimals
    #[must_use]
    fn rounded(&self) -> Self;
}

impl Rounded for f64 {
    fn rounded(&self) -> Self {
        round2(*self)
    }
}

impl Rounded for LoanSummary {
    fn rounded(&self) -> Self {
        Self {
            monthly_payment: round2(self.monthly_payment),
            total_payment: round2(self.total_payment),
            total_interest: round2(self.total_interest),
        }
    }
}

impl Rounded for InvestmentReturn {
    fn rounded(&self) -> Self {
        Self {
            roi: round2(self.roi),
            roi_percentage: round2(self.roi_percentage),
        }
    }
}

impl Rounded for TripCost {
    fn rounded(&self) -> Self {
        Self {
            total_cost: round2(self.total_cost),
            fuel_needed: round2(self.fuel_needed),
        }
    }
}

impl Rounded for PriceAdjustment {
    fn rounded(&self) -> Self {
        Self {
            amount: round2(self.amount),
            final_price: round2(self.final_price),
        }
    }
}

impl Rounded for ProfitMargin {
    fn rounded(&self) -> Self {
        Self {
            profit: round2(self.profit),
            margin_percentage: round2(self.margin_percentage),
        }
    }
}

impl Rounded for DriverProjection {
    fn rounded(&self) -> Self {
        Self {
            total_distance_per_month: round2(self.total_distance_per_month),
            distance_per_day: round2(self.distance_per_day),
            working_days_per_month: round2(self.working_days_per_month),
            gross_earnings: round2(self.gross_earnings),
            total_fuel_cost: round2(self.total_fuel_cost),
            net_earnings: round2(self.net_earnings),
            cost_per_distance: round2(self.cost_per_distance),
            net_earnings_per_distance: round2(self.net_earnings_per_distance),
            fuel_volume_per_day: round2(self.fuel_volume_per_day),
            fuel_cost_per_day: round2(self.fuel_cost_per_day),
        }
    }
}

impl Rounded for DailyMetrics {
    fn rounded(&self) -> Self {
        Self {
            gross_earnings: round2(self.gross_earnings),
            fuel_cost: round2(self.fuel_cost),
            net_earnings: round2(self.net_earnings),
            fuel_volume: round2(self.fuel_volume),
        }
    }
}

impl Rounded for EarningsProjection {
    fn rounded(&self) -> Self {
        Self {
            monthly_gross_earnings: round2(self.monthly_gross_earnings),
            monthly_fuel_cost: round2(self.monthly_fuel_cost),
            monthly_additional_costs: round2(self.monthly_additional_costs),
            monthly_net_earnings: round2(self.monthly_net_earnings),
            total_distance_per_month: round2(self.total_distance_per_month),
            working_days_per_month: round2(self.working_days_per_month),
            cost_per_distance: round2(self.cost_per_distance),
            net_earnings_per_distance: round2(self.net_earnings_per_distance),
            profit_margin: round2(self.profit_margin),
            viability: self.viability,
            recommendations: self.recommendations.clone(),
            daily: self.daily.rounded(),
        }
    }
}
