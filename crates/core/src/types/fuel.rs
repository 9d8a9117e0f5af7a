//! Fuel and driver-economics types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ensure_non_negative, ensure_positive, CoreError, CoreResult};

/// How fuel consumption is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionUnit {
    /// Distance travelled per unit of fuel (km/l)
    DistancePerVolume,
    /// Fuel burned per 100 units of distance (l/100km)
    VolumePer100Distance,
}

impl ConsumptionUnit {
    /// Map the boolean "is distance per volume" flag used by request layers
    #[must_use]
    pub const fn from_distance_per_volume(flag: bool) -> Self {
        if flag {
            Self::DistancePerVolume
        } else {
            Self::VolumePer100Distance
        }
    }

    /// Whether this is the distance-per-volume mode
    #[must_use]
    pub const fn is_distance_per_volume(self) -> bool {
        matches!(self, Self::DistancePerVolume)
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DistancePerVolume => "km/l",
            Self::VolumePer100Distance => "l/100km",
        }
    }
}

impl fmt::Display for ConsumptionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inputs for a single trip cost estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelTripInputs {
    /// Trip distance
    pub distance: f64,
    /// Consumption rate in `unit`
    pub consumption: f64,
    /// Price per unit of fuel
    pub fuel_price: f64,
    /// Unit of `consumption`
    pub unit: ConsumptionUnit,
}

impl FuelTripInputs {
    /// Create trip inputs
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` if distance or consumption is not positive
    /// or the price is negative.
    pub fn new(
        distance: f64,
        consumption: f64,
        fuel_price: f64,
        unit: ConsumptionUnit,
    ) -> CoreResult<Self> {
        ensure_positive("distance", distance)?;
        ensure_positive("consumption", consumption)?;
        ensure_non_negative("fuel_price", fuel_price)?;

        Ok(Self {
            distance,
            consumption,
            fuel_price,
            unit,
        })
    }
}

/// Cost of a trip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripCost {
    /// Fuel price times fuel needed
    pub total_cost: f64,
    /// Fuel volume the trip burns
    pub fuel_needed: f64,
}

/// Per-distance economics shared by both driver projections
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriverEconomics {
    /// Gross earnings per unit of distance
    pub earnings_per_distance: f64,
    /// Price per unit of fuel
    pub fuel_price: f64,
    /// Distance per unit of fuel
    pub fuel_efficiency: f64,
    /// Working days per week (1..=7)
    pub working_days_per_week: u8,
}

impl DriverEconomics {
    /// Create driver economics
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` if earnings, price or efficiency is not
    /// positive, or the working days fall outside 1..=7.
    pub fn new(
        earnings_per_distance: f64,
        fuel_price: f64,
        fuel_efficiency: f64,
        working_days_per_week: u8,
    ) -> CoreResult<Self> {
        ensure_positive("earnings_per_distance", earnings_per_distance)?;
        ensure_positive("fuel_price", fuel_price)?;
        ensure_positive("fuel_efficiency", fuel_efficiency)?;
        if !(1..=7).contains(&working_days_per_week) {
            return Err(CoreError::invalid_argument(
                "working_days_per_week",
                "must be between 1 and 7",
            ));
        }

        Ok(Self {
            earnings_per_distance,
            fuel_price,
            fuel_efficiency,
            working_days_per_week,
        })
    }

    /// Fuel cost per unit of distance
    #[inline]
    #[must_use]
    pub fn cost_per_distance(&self) -> f64 {
        self.fuel_price / self.fuel_efficiency
    }

    /// Earnings left per unit of distance after fuel
    #[inline]
    #[must_use]
    pub fn net_earnings_per_distance(&self) -> f64 {
        self.earnings_per_distance - self.cost_per_distance()
    }

    /// Working days in a 30-day month
    #[inline]
    #[must_use]
    pub fn working_days_per_month(&self) -> f64 {
        f64::from(self.working_days_per_week) / 7.0 * 30.0
    }
}

/// Distance and fuel needed to reach a monthly net income target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriverProjection {
    /// Distance to drive per month
    pub total_distance_per_month: f64,
    /// Distance to drive per working day
    pub distance_per_day: f64,
    /// Working days in a 30-day month
    pub working_days_per_month: f64,
    /// Monthly gross earnings
    pub gross_earnings: f64,
    /// Monthly fuel cost
    pub total_fuel_cost: f64,
    /// Monthly net earnings (the target)
    pub net_earnings: f64,
    /// Fuel cost per unit of distance
    pub cost_per_distance: f64,
    /// Net earnings per unit of distance
    pub net_earnings_per_distance: f64,
    /// Fuel burned per working day
    pub fuel_volume_per_day: f64,
    /// Fuel cost per working day
    pub fuel_cost_per_day: f64,
}

/// Classification of an earnings projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViabilityTier {
    /// Healthy margin at a sustainable distance
    Viable,
    /// Low margin or strenuous distance
    Attention,
    /// Very low margin
    Risk,
    /// Loses money or demands an unrealistic distance
    #[serde(rename = "NONVIABLE")]
    NonViable,
}

impl fmt::Display for ViabilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Viable => "VIABLE",
            Self::Attention => "ATTENTION",
            Self::Risk => "RISK",
            Self::NonViable => "NONVIABLE",
        };
        f.write_str(label)
    }
}

/// Advice attached to an earnings projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    /// Net monthly earnings are zero or negative
    CostsExceedEarnings,
    /// Earnings per distance do not cover fuel
    EarningsBelowFuelCost,
    /// Margin under the risk threshold
    VeryLowMargin {
        /// Threshold in percent
        threshold: f64,
    },
    /// Margin under the attention threshold
    LowMargin {
        /// Threshold in percent
        threshold: f64,
    },
    /// Daily distance beyond what is sustainable
    UnrealisticDistance {
        /// Ceiling per day
        limit: f64,
    },
    /// Daily distance that is exhausting
    StrenuousDistance {
        /// Ceiling per day
        limit: f64,
    },
    /// Net earnings per distance are low; negotiate the rate
    NegotiateRate,
    /// Fuel cost per distance is high
    HighFuelCost,
    /// A vehicle at the reference efficiency would save this much per month
    MoreEfficientVehicle {
        /// Estimated monthly savings
        monthly_savings: f64,
    },
    /// Monthly net earnings are low
    LowMonthlyNet,
    /// Monthly net earnings are excellent
    ExcellentMonthlyNet,
    /// Margin is excellent
    ExcellentMargin,
    /// Margin is good
    GoodMargin,
    /// Daily net earnings are good
    GoodDailyNet,
    /// Additional costs take a large share of net earnings
    HighAdditionalCosts {
        /// Ratio threshold in percent
        threshold: f64,
    },
    /// Working more days would raise monthly earnings
    ExtraWorkdays {
        /// Days to add per week
        extra_days: u8,
        /// Estimated extra monthly earnings
        extra_earnings: f64,
    },
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CostsExceedEarnings => f.write_str("Earnings do not cover total costs"),
            Self::EarningsBelowFuelCost => {
                f.write_str("Earnings per km do not even cover fuel")
            }
            Self::VeryLowMargin { threshold } => {
                write!(f, "Profit margin is very low (<{threshold}%)")
            }
            Self::LowMargin { threshold } => write!(f, "Profit margin is low (<{threshold}%)"),
            Self::UnrealisticDistance { limit } => {
                write!(f, "More than {limit} km/day is unrealistic to sustain")
            }
            Self::StrenuousDistance { limit } => {
                write!(f, "More than {limit} km/day is very strenuous")
            }
            Self::NegotiateRate => f.write_str("Low net earnings per km - negotiate a better rate"),
            Self::HighFuelCost => {
                f.write_str("High fuel cost per km - consider a more economical vehicle")
            }
            Self::MoreEfficientVehicle { monthly_savings } => write!(
                f,
                "A more economical vehicle would save ~{monthly_savings:.0}/month"
            ),
            Self::LowMonthlyNet => f.write_str(
                "Low monthly earnings - consider more km per day or a better rate per km",
            ),
            Self::ExcellentMonthlyNet => f.write_str("Excellent monthly earnings"),
            Self::ExcellentMargin => f.write_str("Excellent profit margin"),
            Self::GoodMargin => f.write_str("Good profit margin"),
            Self::GoodDailyNet => f.write_str("Good daily profitability"),
            Self::HighAdditionalCosts { threshold } => {
                write!(f, "Additional costs are high (>{threshold}% of earnings)")
            }
            Self::ExtraWorkdays {
                extra_days,
                extra_earnings,
            } => write!(
                f,
                "Working {extra_days} more day(s) would add ~{extra_earnings:.0}/month"
            ),
        }
    }
}

/// Per-working-day figures of an earnings projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    /// Gross earnings per day
    pub gross_earnings: f64,
    /// Fuel cost per day
    pub fuel_cost: f64,
    /// Net earnings per day after fuel and a share of additional costs
    pub net_earnings: f64,
    /// Fuel burned per day
    pub fuel_volume: f64,
}

/// Monthly outcome of driving a fixed distance per day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsProjection {
    /// Monthly gross earnings
    pub monthly_gross_earnings: f64,
    /// Monthly fuel cost
    pub monthly_fuel_cost: f64,
    /// Monthly fixed costs besides fuel
    pub monthly_additional_costs: f64,
    /// Monthly net earnings
    pub monthly_net_earnings: f64,
    /// Distance driven per month
    pub total_distance_per_month: f64,
    /// Working days in a 30-day month
    pub working_days_per_month: f64,
    /// Fuel cost per unit of distance
    pub cost_per_distance: f64,
    /// Net earnings per unit of distance
    pub net_earnings_per_distance: f64,
    /// Net over gross, in percent (0 when gross is 0)
    pub profit_margin: f64,
    /// Viability classification
    pub viability: ViabilityTier,
    /// Advice in rule order
    pub recommendations: Vec<Recommendation>,
    /// Per-day figures
    pub daily: DailyMetrics,
}
