//! Criterion benchmarks for the Monte Carlo simulation engine.
//!
//! Benchmarks cover:
//! - Full portfolio-loss simulation at varying trial and loan counts
//! - Marginal risk contribution computation
//! - The correlated default draw in isolation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chrono::NaiveDate;
use risk_core::assets::{AssetType, CollateralAsset};
use risk_core::prices::CurrentPrices;
use risk_core::rating::CreditRatingTier;
use risk_engine::default_sim::CorrelatedDefaultSimulator;
use risk_engine::mc::{MonteCarloEngine, SimulationConfig};
use risk_engine::rng::SimRng;
use risk_model::loan::{Loan, LoanId, LoanTerms};
use risk_model::{Portfolio, PortfolioBuilder};
use risk_scenario::ScenarioCatalog;

/// Builds a synthetic portfolio of `n` loans spread across the universe.
fn synthetic_portfolio(n: usize) -> Portfolio {
    let assets = [
        (AssetType::Btc, 12.0),
        (AssetType::Eth, 300.0),
        (AssetType::Sol, 6_000.0),
    ];
    let ratings = CreditRatingTier::ALL;

    let mut builder = PortfolioBuilder::new().risk_capital(50_000_000.0);
    for i in 0..n {
        let (asset, quantity) = assets[i % assets.len()];
        let terms = LoanTerms::new(
            500_000.0 + (i as f64) * 10_000.0,
            0.10 + (i % 5) as f64 * 0.01,
            90,
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        )
        .unwrap();
        let loan = Loan::new(
            LoanId::new(format!("L-{i:04}")),
            format!("Borrower {i}"),
            ratings[i % ratings.len()],
            terms,
            CollateralAsset::new(asset, quantity).unwrap(),
            1.0 + (i % 4) as f64,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        )
        .unwrap();
        builder = builder.add_loan(loan);
    }
    builder.build().unwrap()
}

fn snapshot() -> CurrentPrices {
    CurrentPrices::new([
        (AssetType::Btc, 100_000.0),
        (AssetType::Eth, 4_000.0),
        (AssetType::Sol, 200.0),
    ])
    .unwrap()
}

/// Benchmark the full simulation across trial counts.
fn bench_simulate_portfolio_loss(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate_portfolio_loss");

    let catalog = ScenarioCatalog::standard();
    let scenario = catalog.get("severe-bear").unwrap();
    let prices = snapshot();
    let portfolio = synthetic_portfolio(50);

    for n_trials in [1_000usize, 10_000] {
        let engine = MonteCarloEngine::new(
            SimulationConfig::builder()
                .n_trials(n_trials)
                .seed(42)
                .build()
                .unwrap(),
        )
        .unwrap();

        group.bench_with_input(
            BenchmarkId::new("trials", n_trials),
            &engine,
            |b, engine| {
                b.iter(|| {
                    engine
                        .simulate_portfolio_loss(
                            black_box(&portfolio),
                            black_box(&prices),
                            black_box(scenario),
                            30,
                        )
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

/// Benchmark simulation across portfolio sizes at 1,000 trials.
fn bench_portfolio_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("portfolio_sizes");

    let catalog = ScenarioCatalog::standard();
    let scenario = catalog.get("severe-bear").unwrap();
    let prices = snapshot();
    let engine = MonteCarloEngine::new(
        SimulationConfig::builder().n_trials(1_000).seed(42).build().unwrap(),
    )
    .unwrap();

    for n_loans in [10usize, 50, 100] {
        let portfolio = synthetic_portfolio(n_loans);
        group.bench_with_input(
            BenchmarkId::new("loans", n_loans),
            &portfolio,
            |b, portfolio| {
                b.iter(|| {
                    engine
                        .simulate_portfolio_loss(
                            black_box(portfolio),
                            black_box(&prices),
                            black_box(scenario),
                            30,
                        )
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

/// Benchmark marginal risk contributions (base-distribution reuse).
fn bench_risk_contributions(c: &mut Criterion) {
    let catalog = ScenarioCatalog::standard();
    let scenario = catalog.get("severe-bear").unwrap();
    let prices = snapshot();
    let portfolio = synthetic_portfolio(50);
    let engine = MonteCarloEngine::new(
        SimulationConfig::builder().n_trials(1_000).seed(42).build().unwrap(),
    )
    .unwrap();

    c.bench_function("risk_contributions_50_loans", |b| {
        b.iter(|| {
            engine
                .risk_contributions(
                    black_box(&portfolio),
                    black_box(&prices),
                    black_box(scenario),
                    30,
                )
                .unwrap()
        });
    });
}

/// Benchmark a single correlated default draw.
fn bench_default_draw(c: &mut Criterion) {
    let catalog = ScenarioCatalog::standard();
    let scenario = catalog.get("crypto-winter").unwrap();
    let portfolio = synthetic_portfolio(100);
    let sim = CorrelatedDefaultSimulator::new(&portfolio, scenario, 30);

    c.bench_function("default_draw_100_loans", |b| {
        let mut rng = SimRng::from_seed(7);
        b.iter(|| black_box(sim.draw(&mut rng)));
    });
}

criterion_group!(
    benches,
    bench_simulate_portfolio_loss,
    bench_portfolio_sizes,
    bench_risk_contributions,
    bench_default_draw
);
criterion_main!(benches);
