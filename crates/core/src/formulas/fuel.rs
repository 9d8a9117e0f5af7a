//! Fuel formulas: consumption, trip cost and driver earnings projections.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_positive, CoreError, CoreResult};
use crate::types::{
    ConsumptionUnit, DailyMetrics, DriverEconomics, DriverProjection, EarningsProjection,
    FuelTripInputs, Recommendation, TripCost, ViabilityTier,
};

/// Upper bound on the daily distance an earnings projection accepts
pub const MAX_DISTANCE_PER_DAY: f64 = 1000.0;
/// Net earnings per distance below which a better rate should be negotiated (standard table)
pub const LOW_NET_PER_DISTANCE: f64 = 0.80;
/// Fuel cost per distance above which fuel is considered expensive
pub const HIGH_COST_PER_DISTANCE: f64 = 0.50;
/// Efficiency of the reference vehicle used to estimate savings
pub const REFERENCE_EFFICIENCY: f64 = 12.0;
/// Monthly net earnings considered low
pub const LOW_MONTHLY_NET: f64 = 3000.0;
/// Monthly net earnings considered excellent
pub const EXCELLENT_MONTHLY_NET: f64 = 8000.0;
/// Margin (percent) considered excellent
pub const EXCELLENT_MARGIN: f64 = 60.0;
/// Margin (percent) considered good
pub const GOOD_MARGIN: f64 = 40.0;
/// Daily net earnings considered good
pub const GOOD_DAILY_NET: f64 = 200.0;
/// Share of monthly net earnings that additional costs should stay under (standard table)
pub const ADDITIONAL_COST_RATIO: f64 = 0.15;
/// Working days per week the extra-workday suggestion aims for
pub const TARGET_WORKDAYS_PER_WEEK: u8 = 6;
/// Monthly net earnings above which no extra workday is suggested (standard table)
pub const EXTRA_WORKDAY_NET_CEILING: f64 = 6000.0;
/// Average weeks per month
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// When a projection is told to negotiate a better rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "below", rename_all = "snake_case")]
pub enum NegotiateRule {
    /// Net earnings per distance under the value, while the month is still profitable
    NetPerDistance(f64),
    /// Profit margin (percent) under the value, unless the projection is non-viable
    Margin(f64),
}

/// Cut-offs for the viability tier and the advice that follows it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViabilityThresholds {
    /// Margin (percent) under which a projection is at risk
    pub risk_margin: f64,
    /// Margin (percent) under which a projection needs attention
    pub attention_margin: f64,
    /// Daily distance above which driving is strenuous
    pub strenuous_distance: f64,
    /// Daily distance above which driving is unrealistic
    pub unrealistic_distance: f64,
    /// Trigger for the negotiate-rate advice
    pub negotiate: NegotiateRule,
    /// Share of monthly net earnings that additional costs should stay under
    pub additional_cost_ratio: f64,
    /// Monthly net earnings above which no extra workday is suggested
    pub extra_workday_ceiling: f64,
    /// Only praise an excellent margin on a `Viable` projection
    pub excellent_margin_requires_viable: bool,
}

impl ViabilityThresholds {
    /// Current table: 15% / 30% margin, 350 / 500 per day
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            risk_margin: 15.0,
            attention_margin: 30.0,
            strenuous_distance: 350.0,
            unrealistic_distance: 500.0,
            negotiate: NegotiateRule::NetPerDistance(LOW_NET_PER_DISTANCE),
            additional_cost_ratio: ADDITIONAL_COST_RATIO,
            extra_workday_ceiling: EXTRA_WORKDAY_NET_CEILING,
            excellent_margin_requires_viable: false,
        }
    }

    /// Earlier, stricter table: 20% / 40% margin, 400 / 600 per day
    ///
    /// Its advice is stricter too: negotiate under a 60% margin, flag additional
    /// costs above 20% of net, suggest extra workdays below 5000 net, and praise
    /// the margin only when the projection is viable.
    #[must_use]
    pub const fn legacy() -> Self {
        Self {
            risk_margin: 20.0,
            attention_margin: 40.0,
            strenuous_distance: 400.0,
            unrealistic_distance: 600.0,
            negotiate: NegotiateRule::Margin(EXCELLENT_MARGIN),
            additional_cost_ratio: 0.20,
            extra_workday_ceiling: 5000.0,
            excellent_margin_requires_viable: true,
        }
    }
}

impl Default for ViabilityThresholds {
    fn default() -> Self {
        Self::standard()
    }
}

/// Average consumption from a distance and the fuel it used
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` if distance or fuel used is not positive.
pub fn average_consumption(distance: f64, fuel_used: f64, unit: ConsumptionUnit) -> CoreResult<f64> {
    ensure_positive("distance", distance)?;
    ensure_positive("fuel_used", fuel_used)?;

    Ok(match unit {
        ConsumptionUnit::DistancePerVolume => distance / fuel_used,
        ConsumptionUnit::VolumePer100Distance => fuel_used * 100.0 / distance,
    })
}

/// Fuel a trip burns at a given consumption
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` if distance or consumption is not positive.
pub fn fuel_needed(distance: f64, consumption: f64, unit: ConsumptionUnit) -> CoreResult<f64> {
    ensure_positive("distance", distance)?;
    ensure_positive("consumption", consumption)?;

    Ok(match unit {
        ConsumptionUnit::DistancePerVolume => distance / consumption,
        ConsumptionUnit::VolumePer100Distance => distance * consumption / 100.0,
    })
}

/// Fuel cost of a trip
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` if distance or consumption is not positive
/// or the price is negative.
pub fn total_cost(
    distance: f64,
    consumption: f64,
    fuel_price: f64,
    unit: ConsumptionUnit,
) -> CoreResult<f64> {
    let inputs = FuelTripInputs::new(distance, consumption, fuel_price, unit)?;
    Ok(trip_cost(&inputs)?.total_cost)
}

/// Fuel volume and cost of a trip
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` if distance or consumption is not positive.
pub fn trip_cost(inputs: &FuelTripInputs) -> CoreResult<TripCost> {
    let fuel = fuel_needed(inputs.distance, inputs.consumption, inputs.unit)?;
    Ok(TripCost {
        total_cost: fuel * inputs.fuel_price,
        fuel_needed: fuel,
    })
}

/// Distance a driver must cover to net `monthly_target` after fuel
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` if an input is out of range, or if fuel
/// costs at least as much per distance as the driver earns.
pub fn driver_projection(
    earnings_per_distance: f64,
    monthly_target: f64,
    fuel_price: f64,
    fuel_efficiency: f64,
    working_days_per_week: u8,
) -> CoreResult<DriverProjection> {
    let economics = DriverEconomics::new(
        earnings_per_distance,
        fuel_price,
        fuel_efficiency,
        working_days_per_week,
    )?;
    let target = ensure_positive("monthly_target", monthly_target)?;

    let cost_per_distance = economics.cost_per_distance();
    let net_per_distance = economics.net_earnings_per_distance();
    if net_per_distance <= 0.0 {
        return Err(CoreError::invalid_argument(
            "earnings_per_distance",
            format!("must exceed the fuel cost per distance of {cost_per_distance:.2}"),
        ));
    }

    let total_distance = target / net_per_distance;
    let working_days = economics.working_days_per_month();
    let distance_per_day = total_distance / working_days;
    let fuel_volume_per_day = distance_per_day / fuel_efficiency;

    Ok(DriverProjection {
        total_distance_per_month: total_distance,
        distance_per_day,
        working_days_per_month: working_days,
        gross_earnings: total_distance * earnings_per_distance,
        total_fuel_cost: total_distance * cost_per_distance,
        net_earnings: target,
        cost_per_distance,
        net_earnings_per_distance: net_per_distance,
        fuel_volume_per_day,
        fuel_cost_per_day: fuel_volume_per_day * fuel_price,
    })
}

/// Monthly outcome of driving `distance_per_day` on every working day
///
/// The viability tier starts at `Viable` and is lowered by the margin checks, then
/// by the distance checks. Recommendations follow in a fixed order: viability
/// notes, then rate, fuel cost, vehicle efficiency, monthly net, margin, daily net,
/// additional costs and extra workdays.
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` if an input is out of range.
pub fn earnings_projection(
    earnings_per_distance: f64,
    distance_per_day: f64,
    fuel_price: f64,
    fuel_efficiency: f64,
    working_days_per_week: u8,
    additional_costs: f64,
    thresholds: &ViabilityThresholds,
) -> CoreResult<EarningsProjection> {
    let economics = DriverEconomics::new(
        earnings_per_distance,
        fuel_price,
        fuel_efficiency,
        working_days_per_week,
    )?;
    let distance_per_day = ensure_positive("distance_per_day", distance_per_day)?;
    if distance_per_day > MAX_DISTANCE_PER_DAY {
        return Err(CoreError::invalid_argument(
            "distance_per_day",
            format!("must not exceed {MAX_DISTANCE_PER_DAY}"),
        ));
    }
    let additional_costs = ensure_non_negative("additional_costs", additional_costs)?;

    let working_days = economics.working_days_per_month();
    let total_distance = distance_per_day * working_days;
    let cost_per_distance = economics.cost_per_distance();
    let net_per_distance = economics.net_earnings_per_distance();

    let gross = total_distance * earnings_per_distance;
    let fuel_cost = total_distance * cost_per_distance;
    let net = gross - fuel_cost - additional_costs;
    let profit_margin = if gross > 0.0 { net / gross * 100.0 } else { 0.0 };

    let fuel_volume_per_day = distance_per_day / fuel_efficiency;
    let daily_gross = distance_per_day * earnings_per_distance;
    let daily_fuel_cost = fuel_volume_per_day * fuel_price;
    let daily = DailyMetrics {
        gross_earnings: daily_gross,
        fuel_cost: daily_fuel_cost,
        net_earnings: daily_gross - daily_fuel_cost - additional_costs / working_days,
        fuel_volume: fuel_volume_per_day,
    };

    let mut projection = EarningsProjection {
        monthly_gross_earnings: gross,
        monthly_fuel_cost: fuel_cost,
        monthly_additional_costs: additional_costs,
        monthly_net_earnings: net,
        total_distance_per_month: total_distance,
        working_days_per_month: working_days,
        cost_per_distance,
        net_earnings_per_distance: net_per_distance,
        profit_margin,
        viability: ViabilityTier::Viable,
        recommendations: Vec::new(),
        daily,
    };

    let (tier, mut recommendations) = assess_viability(&projection, distance_per_day, thresholds);
    recommendations.extend(advise(
        &projection,
        tier,
        fuel_efficiency,
        working_days_per_week,
        thresholds,
    ));
    projection.viability = tier;
    projection.recommendations = recommendations;

    Ok(projection)
}

/// Tier plus the notes explaining it
fn assess_viability(
    projection: &EarningsProjection,
    distance_per_day: f64,
    thresholds: &ViabilityThresholds,
) -> (ViabilityTier, Vec<Recommendation>) {
    let mut tier = ViabilityTier::Viable;
    let mut notes = Vec::new();

    if projection.monthly_net_earnings <= 0.0 {
        tier = ViabilityTier::NonViable;
        notes.push(Recommendation::CostsExceedEarnings);
    } else if projection.net_earnings_per_distance <= 0.0 {
        tier = ViabilityTier::NonViable;
        notes.push(Recommendation::EarningsBelowFuelCost);
    } else if projection.profit_margin < thresholds.risk_margin {
        tier = ViabilityTier::Risk;
        notes.push(Recommendation::VeryLowMargin {
            threshold: thresholds.risk_margin,
        });
    } else if projection.profit_margin < thresholds.attention_margin {
        tier = ViabilityTier::Attention;
        notes.push(Recommendation::LowMargin {
            threshold: thresholds.attention_margin,
        });
    }

    if distance_per_day > thresholds.unrealistic_distance {
        tier = ViabilityTier::NonViable;
        notes.push(Recommendation::UnrealisticDistance {
            limit: thresholds.unrealistic_distance,
        });
    } else if distance_per_day > thresholds.strenuous_distance {
        if tier == ViabilityTier::Viable {
            tier = ViabilityTier::Attention;
        }
        notes.push(Recommendation::StrenuousDistance {
            limit: thresholds.strenuous_distance,
        });
    }

    (tier, notes)
}

/// Independent advice rules, in presentation order
fn advise(
    projection: &EarningsProjection,
    tier: ViabilityTier,
    fuel_efficiency: f64,
    working_days_per_week: u8,
    thresholds: &ViabilityThresholds,
) -> Vec<Recommendation> {
    let mut advice = Vec::new();
    let net = projection.monthly_net_earnings;

    let negotiate = match thresholds.negotiate {
        NegotiateRule::NetPerDistance(below) => {
            projection.net_earnings_per_distance < below && net > 0.0
        }
        NegotiateRule::Margin(below) => {
            projection.profit_margin < below && tier != ViabilityTier::NonViable
        }
    };
    if negotiate {
        advice.push(Recommendation::NegotiateRate);
    }

    if projection.cost_per_distance > HIGH_COST_PER_DISTANCE {
        advice.push(Recommendation::HighFuelCost);
    }

    if fuel_efficiency < REFERENCE_EFFICIENCY {
        let improved_cost = projection.total_distance_per_month
            * (projection.cost_per_distance * fuel_efficiency / REFERENCE_EFFICIENCY);
        advice.push(Recommendation::MoreEfficientVehicle {
            monthly_savings: projection.monthly_fuel_cost - improved_cost,
        });
    }

    if net < LOW_MONTHLY_NET {
        advice.push(Recommendation::LowMonthlyNet);
    } else if net > EXCELLENT_MONTHLY_NET {
        advice.push(Recommendation::ExcellentMonthlyNet);
    }

    let margin_counts = !thresholds.excellent_margin_requires_viable || tier == ViabilityTier::Viable;
    if projection.profit_margin > EXCELLENT_MARGIN && margin_counts {
        advice.push(Recommendation::ExcellentMargin);
    } else if projection.profit_margin > GOOD_MARGIN {
        advice.push(Recommendation::GoodMargin);
    }

    if projection.daily.net_earnings > GOOD_DAILY_NET {
        advice.push(Recommendation::GoodDailyNet);
    }

    if projection.monthly_additional_costs > net * thresholds.additional_cost_ratio {
        advice.push(Recommendation::HighAdditionalCosts {
            threshold: thresholds.additional_cost_ratio * 100.0,
        });
    }

    if working_days_per_week < TARGET_WORKDAYS_PER_WEEK && net < thresholds.extra_workday_ceiling {
        let extra_days = TARGET_WORKDAYS_PER_WEEK - working_days_per_week;
        advice.push(Recommendation::ExtraWorkdays {
            extra_days,
            extra_earnings: f64::from(extra_days) * projection.daily.net_earnings * WEEKS_PER_MONTH,
        });
    }

    advice
}
