//! Formula Benchmarks
//!
//! Latency of the pure formulas, with the amortization schedule measured
//! across loan terms since it is the only formula that scales with input.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fincalc_core::formulas::{debt, fuel, investment, loan, percentage};
use fincalc_core::ViabilityThresholds;

/// Benchmark closed-form formulas
fn bench_closed_form(c: &mut Criterion) {
    c.bench_function("loan_monthly_payment", |b| {
        b.iter(|| loan::monthly_payment(black_box(250_000.0), black_box(6.5), black_box(30)));
    });

    c.bench_function("debt_payoff_months", |b| {
        b.iter(|| debt::payoff_months(black_box(8_000.0), black_box(18.0), black_box(300.0)));
    });

    c.bench_function("investment_future_value", |b| {
        b.iter(|| {
            investment::future_value(
                black_box(10_000.0),
                black_box(500.0),
                black_box(8.5),
                black_box(10.0),
            )
        });
    });

    c.bench_function("percentage_change", |b| {
        b.iter(|| percentage::percentage_change(black_box(100.0), black_box(120.0)));
    });
}

/// Benchmark amortization schedules of increasing length
fn bench_amortization(c: &mut Criterion) {
    for years in [1_u32, 10, 30] {
        c.bench_with_input(
            BenchmarkId::new("amortization_schedule", years),
            &years,
            |b, &years| {
                b.iter(|| loan::amortization_schedule(black_box(250_000.0), black_box(6.5), years));
            },
        );
    }
}

/// Benchmark the earnings projection with its rule evaluation
fn bench_earnings_projection(c: &mut Criterion) {
    let thresholds = ViabilityThresholds::standard();
    c.bench_function("fuel_earnings_projection", |b| {
        b.iter(|| {
            fuel::earnings_projection(
                black_box(1.8),
                black_box(250.0),
                black_box(6.0),
                black_box(11.0),
                black_box(5),
                black_box(800.0),
                &thresholds,
            )
        });
    });
}

criterion_group!(
    formula_benches,
    bench_closed_form,
    bench_amortization,
    bench_earnings_projection
);
criterion_main!(formula_benches);
