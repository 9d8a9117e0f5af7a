//! Reference scenarios for the formula library.
//! Known inputs with published or hand-checked outputs.

use fincalc_core::formulas::{debt, fuel, investment, loan, percentage};
use fincalc_core::prelude::*;

/// Ten thousand over two years at 12%
#[test]
fn test_reference_loan() -> CoreResult<()> {
    let payment = loan::monthly_payment(10_000.0, 12.0, 2)?;
    assert!((round2(payment) - 470.73).abs() < 1e-9);

    let interest = loan::total_interest(10_000.0, 12.0, 2)?;
    assert!((interest - 1_297.61).abs() < 0.05);

    let schedule = loan::amortization_schedule(10_000.0, 12.0, 2)?;
    assert_eq!(schedule.len(), 24);
    assert_eq!(schedule.last().map(|e| e.balance), Some(0.0));
    Ok(())
}

/// Growth of a savings plan over a decade
#[test]
fn test_reference_investment() -> CoreResult<()> {
    let fv = investment::future_value(10_000.0, 500.0, 8.5, 10.0)?;
    assert!((102_000.0..=108_000.0).contains(&fv), "future value {fv}");
    Ok(())
}

/// Consumption from a full tank
#[test]
fn test_reference_consumption() -> CoreResult<()> {
    let consumption = fuel::average_consumption(350.0, 30.0, ConsumptionUnit::DistancePerVolume)?;
    assert!((round2(consumption) - 11.67).abs() < 1e-9);
    Ok(())
}

/// Percentage conventions
#[test]
fn test_reference_percentages() -> CoreResult<()> {
    assert!((percentage::value_is_percentage_of(250.0, 1_000.0)? - 25.0).abs() < 1e-12);
    assert!((percentage::percentage_change(100.0, 120.0)? - 20.0).abs() < 1e-12);
    assert!((percentage::apply_percentage(100.0, 15.0, true)? - 115.0).abs() < 1e-12);
    Ok(())
}

/// A payment that only covers interest never clears the debt
#[test]
fn test_insufficient_debt_payment() {
    let result = debt::payoff_months(20_000.0, 24.0, 400.0);
    assert!(result.as_ref().is_err_and(CoreError::is_invalid_argument));
}

/// Non-finite input is rejected everywhere
#[test]
fn test_non_finite_inputs_rejected() {
    assert!(loan::monthly_payment(f64::NAN, 5.0, 10).is_err());
    assert!(loan::monthly_payment(1_000.0, f64::INFINITY, 10).is_err());
    assert!(investment::future_value(1_000.0, f64::NAN, 5.0, 10.0).is_err());
    assert!(percentage::percentage_of(f64::NAN, 10.0).is_err());
    assert!(fuel::average_consumption(f64::INFINITY, 10.0, ConsumptionUnit::DistancePerVolume).is_err());
}

/// A full-time driver at a fair rate
#[test]
fn test_full_time_driver_projection() -> CoreResult<()> {
    let projection = fuel::earnings_projection(
        1.8,
        250.0,
        6.0,
        11.0,
        5,
        800.0,
        &ViabilityThresholds::standard(),
    )?;

    let recomputed = projection.monthly_gross_earnings
        - projection.monthly_fuel_cost
        - projection.monthly_additional_costs;
    assert!((projection.monthly_net_earnings - recomputed).abs() < 1e-9);
    assert_eq!(projection.viability, ViabilityTier::Viable);
    assert!(projection
        .recommendations
        .iter()
        .any(|r| matches!(r, Recommendation::MoreEfficientVehicle { .. })));
    Ok(())
}

/// Results survive a JSON round trip
#[test]
fn test_results_serialize() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let projection = fuel::earnings_projection(
        1.2,
        380.0,
        6.0,
        9.0,
        6,
        0.0,
        &ViabilityThresholds::legacy(),
    )?;
    let encoded = serde_json::to_vec(&projection)?;
    let decoded: EarningsProjection = serde_json::from_slice(&encoded)?;
    assert_eq!(decoded.viability, projection.viability);
    assert_eq!(decoded.recommendations.len(), projection.recommendations.len());
    assert!((decoded.monthly_net_earnings - projection.monthly_net_earnings).abs() < 1e-6);
    Ok(())
}
