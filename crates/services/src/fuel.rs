//! Fuel cost and driver profitability service

use fincalc_cache::{fingerprint, CacheFacade};
use fincalc_core::config::ViabilityPreset;
use fincalc_core::formulas::fuel;
use fincalc_core::types::{
    ConsumptionUnit, DriverProjection, EarningsProjection, FuelTripInputs, TripCost,
};
use fincalc_core::CoreResult;
use std::sync::Arc;
use tracing::instrument;

use crate::service::CalculatorService;

/// Trip costs and driver earnings under the configured viability preset
#[derive(Debug, Clone)]
pub struct FuelService {
    facade: Arc<CacheFacade>,
    preset: ViabilityPreset,
}

impl FuelService {
    /// Create a fuel service using the standard viability thresholds
    #[must_use]
    pub const fn new(facade: Arc<CacheFacade>) -> Self {
        Self::with_preset(facade, ViabilityPreset::Standard)
    }

    /// Create a fuel service using `preset` for earnings projections
    #[must_use]
    pub const fn with_preset(facade: Arc<CacheFacade>, preset: ViabilityPreset) -> Self {
        Self { facade, preset }
    }

    /// Active viability preset
    #[must_use]
    pub const fn preset(&self) -> ViabilityPreset {
        self.preset
    }

    /// Consumption observed over a trip, in `unit`
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` if distance or fuel used is not positive.
    #[instrument(skip(self))]
    pub async fn average_consumption(
        &self,
        distance: f64,
        fuel_used: f64,
        unit: ConsumptionUnit,
    ) -> CoreResult<f64> {
        let key = fingerprint!(Self::DOMAIN, "average_consumption", distance, fuel_used, unit);
        self.facade
            .get_or_compute(&key, None, || fuel::average_consumption(distance, fuel_used, unit))
            .await
    }

    /// Fuel cost of a trip
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` if distance or consumption is not positive
    /// or the price is negative.
    #[instrument(skip(self))]
    pub async fn total_cost(
        &self,
        distance: f64,
        consumption: f64,
        fuel_price: f64,
        unit: ConsumptionUnit,
    ) -> CoreResult<f64> {
        let key = fingerprint!(
            Self::DOMAIN,
            "total_cost",
            distance,
            consumption,
            fuel_price,
            unit
        );
        self.facade
            .get_or_compute(&key, None, || {
                fuel::total_cost(distance, consumption, fuel_price, unit)
            })
            .await
    }

    /// Fuel volume and cost of a trip
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` if distance or consumption is not positive
    /// or the price is negative.
    #[instrument(skip(self))]
    pub async fn trip_cost(
        &self,
        distance: f64,
        consumption: f64,
        fuel_price: f64,
        unit: ConsumptionUnit,
    ) -> CoreResult<TripCost> {
        let inputs = FuelTripInputs::new(distance, consumption, fuel_price, unit)?;
        let key = fingerprint!(
            Self::DOMAIN,
            "trip_cost",
            distance,
            consumption,
            fuel_price,
            unit
        );
        self.facade
            .get_or_compute(&key, None, || fuel::trip_cost(&inputs))
            .await
    }

    /// Distance needed to net `monthly_target` after fuel
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` if an input is out of range or fuel costs
    /// at least as much per distance as the driver earns.
    #[instrument(skip(self))]
    pub async fn driver_projection(
        &self,
        earnings_per_distance: f64,
        monthly_target: f64,
        fuel_price: f64,
        fuel_efficiency: f64,
        working_days_per_week: u8,
    ) -> CoreResult<DriverProjection> {
        let key = fingerprint!(
            Self::DOMAIN,
            "driver_projection",
            earnings_per_distance,
            monthly_target,
            fuel_price,
            fuel_efficiency,
            working_days_per_week
        );
        self.facade
            .get_or_compute(&key, None, || {
                fuel::driver_projection(
                    earnings_per_distance,
                    monthly_target,
                    fuel_price,
                    fuel_efficiency,
                    working_days_per_week,
                )
            })
            .await
    }

    /// Monthly earnings, viability and advice for a fixed daily distance
    ///
    /// Cached per preset; `additional_costs` defaults to zero.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` if an input is out of range.
    #[instrument(skip(self), fields(preset = self.preset.as_str()))]
    pub async fn earnings_projection(
        &self,
        earnings_per_distance: f64,
        distance_per_day: f64,
        fuel_price: f64,
        fuel_efficiency: f64,
        working_days_per_week: u8,
        additional_costs: Option<f64>,
    ) -> CoreResult<EarningsProjection> {
        let additional_costs = additional_costs.unwrap_or(0.0);
        let thresholds = self.preset.thresholds();
        let key = fingerprint!(
            Self::DOMAIN,
            "earnings_projection",
            self.preset.as_str(),
            earnings_per_distance,
            distance_per_day,
            fuel_price,
            fuel_efficiency,
            working_days_per_week,
            additional_costs
        );
        self.facade
            .get_or_compute(&key, None, || {
                fuel::earnings_projection(
                    earnings_per_distance,
                    distance_per_day,
                    fuel_price,
                    fuel_efficiency,
                    working_days_per_week,
                    additional_costs,
                    &thresholds,
                )
            })
            .await
    }
}

impl CalculatorService for FuelService {
    const DOMAIN: &'static str = "fuel";

    fn facade(&self) -> &CacheFacade {
        &self.facade
    }
}
