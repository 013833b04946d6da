//! The Monte Carlo engine.
//!
//! Each trial combines one correlated price draw and one correlated
//! default draw, both on the trial's own RNG sub-stream. Trials read only
//! immutable inputs and mutate nothing shared, so the loop is
//! embarrassingly parallel: rayon maps over trial indices and the
//! per-trial outcomes are concatenated before sorting.
//!
//! Determinism: sub-stream `i` is seeded `base_seed + i`, so a fixed
//! (portfolio, scenario, seed) triple reproduces results bit-for-bit
//! regardless of thread count.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use risk_core::assets::AssetType;
use risk_core::prices::CurrentPrices;
use risk_model::{LoanId, Portfolio};
use risk_scenario::ScenarioParameters;

use crate::default_sim::CorrelatedDefaultSimulator;
use crate::price_sim::CorrelatedPriceSimulator;
use crate::rng::SimRng;

use super::config::SimulationConfig;
use super::contribution::{contributions_from_matrix, RiskContribution};
use super::error::SimulationError;
use super::result::SimulationResult;

/// Outcome of one trial.
struct TrialOutcome {
    total_loss: f64,
    loan_losses: Vec<f64>,
    defaults: Vec<bool>,
}

/// Retained trial data for aggregation and contributions.
struct TrialMatrix {
    totals: Vec<f64>,
    loan_losses: Vec<Vec<f64>>,
    default_counts: Vec<usize>,
}

/// Portfolio-loss Monte Carlo engine.
///
/// The entry points are ordinary blocking calls; callers that need
/// asynchrony dispatch to their own executor.
///
/// # Examples
///
/// ```no_run
/// use risk_engine::mc::{MonteCarloEngine, SimulationConfig};
/// use risk_scenario::ScenarioCatalog;
/// # use risk_core::prices::CurrentPrices;
/// # use risk_core::assets::AssetType;
/// # use risk_model::PortfolioBuilder;
///
/// # let portfolio = PortfolioBuilder::new().risk_capital(1.0).build().unwrap();
/// # let prices = CurrentPrices::new([(AssetType::Btc, 100_000.0)]).unwrap();
/// let catalog = ScenarioCatalog::standard();
/// let scenario = catalog.get("severe-bear").unwrap();
///
/// let engine = MonteCarloEngine::new(SimulationConfig::default()).unwrap();
/// let result = engine
///     .simulate_portfolio_loss(&portfolio, &prices, scenario, 30)
///     .unwrap();
/// println!("VaR95: {}", result.var_95);
/// ```
pub struct MonteCarloEngine {
    config: SimulationConfig,
}

impl MonteCarloEngine {
    /// Creates an engine with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidTrialCount` for an invalid
    /// configuration.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The engine configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulates the portfolio loss distribution under a scenario.
    ///
    /// Per trial, every defaulted loan contributes
    /// `max(0, principal − collateral(sim_price) × (1 − slippage ×
    /// slippage_multiplier))`; the trial loss is the sum over defaulted
    /// loans.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidHorizon` for a zero-day horizon or
    /// `SimulationError::MissingPrice` if the snapshot lacks a price for a
    /// held asset. An empty portfolio yields the all-zero result.
    pub fn simulate_portfolio_loss(
        &self,
        portfolio: &Portfolio,
        prices: &CurrentPrices,
        scenario: &ScenarioParameters,
        horizon_days: u32,
    ) -> Result<SimulationResult, SimulationError> {
        let matrix =
            self.run_trials(portfolio, prices, scenario, horizon_days, None)?;
        Ok(self.aggregate(portfolio, scenario, matrix))
    }

    /// Like [`MonteCarloEngine::simulate_portfolio_loss`], checking the
    /// abort flag between trials.
    ///
    /// Intended for long-running configurations (10,000+ trials); the
    /// abort is cooperative and surfaces as `SimulationError::Aborted`.
    pub fn simulate_portfolio_loss_with_abort(
        &self,
        portfolio: &Portfolio,
        prices: &CurrentPrices,
        scenario: &ScenarioParameters,
        horizon_days: u32,
        abort: &AtomicBool,
    ) -> Result<SimulationResult, SimulationError> {
        let matrix =
            self.run_trials(portfolio, prices, scenario, horizon_days, Some(abort))?;
        Ok(self.aggregate(portfolio, scenario, matrix))
    }

    /// Computes per-loan marginal VaR95 contributions.
    ///
    /// Re-runs the same seeded trials as
    /// [`MonteCarloEngine::simulate_portfolio_loss`] and reuses the base
    /// distribution (independence approximation) rather than
    /// re-simulating per loan.
    pub fn risk_contributions(
        &self,
        portfolio: &Portfolio,
        prices: &CurrentPrices,
        scenario: &ScenarioParameters,
        horizon_days: u32,
    ) -> Result<Vec<RiskContribution>, SimulationError> {
        if portfolio.is_empty() {
            return Ok(Vec::new());
        }
        let matrix =
            self.run_trials(portfolio, prices, scenario, horizon_days, None)?;
        let loan_ids: Vec<LoanId> =
            portfolio.loans().iter().map(|l| l.id().clone()).collect();
        Ok(contributions_from_matrix(
            &loan_ids,
            &matrix.totals,
            &matrix.loan_losses,
        ))
    }

    /// Simulates independent single-asset GBM price paths for fan-chart
    /// display, seeded from the engine configuration.
    ///
    /// Daily steps, no cross-asset correlation; see
    /// [`crate::paths::simulate_price_paths`].
    pub fn simulate_price_paths(
        &self,
        asset: AssetType,
        current_price: f64,
        horizon_days: u32,
        n_paths: usize,
    ) -> Vec<Vec<f64>> {
        let mut rng = SimRng::from_seed(self.config.seed().unwrap_or(0));
        crate::paths::simulate_price_paths(asset, current_price, horizon_days, n_paths, &mut rng)
    }

    fn run_trials(
        &self,
        portfolio: &Portfolio,
        prices: &CurrentPrices,
        scenario: &ScenarioParameters,
        horizon_days: u32,
        abort: Option<&AtomicBool>,
    ) -> Result<TrialMatrix, SimulationError> {
        if horizon_days == 0 {
            return Err(SimulationError::InvalidHorizon);
        }

        let n_loans = portfolio.loans().len();
        if n_loans == 0 {
            return Ok(TrialMatrix {
                totals: Vec::new(),
                loan_losses: Vec::new(),
                default_counts: Vec::new(),
            });
        }

        let spots = spot_array(portfolio, prices)?;
        let price_sim = CorrelatedPriceSimulator::new(scenario, horizon_days);
        let default_sim = CorrelatedDefaultSimulator::new(portfolio, scenario, horizon_days);

        // Effective slippage per loan, after the scenario multiplier.
        let slippages: Vec<f64> = portfolio
            .loans()
            .iter()
            .map(|loan| {
                (loan.collateral().asset().risk_characteristics().liquidation_slippage
                    * scenario.slippage_multiplier())
                .min(1.0)
            })
            .collect();

        let base_seed = self.config.seed().unwrap_or(0);
        let n_trials = self.config.n_trials();
        let started = Instant::now();

        let outcomes: Vec<Option<TrialOutcome>> = (0..n_trials)
            .into_par_iter()
            .map(|trial| {
                if let Some(flag) = abort {
                    if flag.load(Ordering::Relaxed) {
                        return None;
                    }
                }

                let mut rng = SimRng::substream(base_seed, trial as u64);
                let sim_prices = price_sim.draw(&mut rng, spots);
                let defaults = default_sim.draw(&mut rng);

                let mut loan_losses = vec![0.0; n_loans];
                let mut total_loss = 0.0;
                for (j, loan) in portfolio.loans().iter().enumerate() {
                    if !defaults[j] {
                        continue;
                    }
                    let sim_price = sim_prices[loan.collateral().asset().index()];
                    let proceeds =
                        loan.collateral_value(sim_price) * (1.0 - slippages[j]);
                    let loss = (loan.principal() - proceeds).max(0.0);
                    loan_losses[j] = loss;
                    total_loss += loss;
                }

                Some(TrialOutcome {
                    total_loss,
                    loan_losses,
                    defaults,
                })
            })
            .collect();

        if outcomes.iter().any(Option::is_none) {
            debug!(scenario = scenario.id(), "simulation aborted between trials");
            return Err(SimulationError::Aborted);
        }

        let mut totals = Vec::with_capacity(n_trials);
        let mut loan_losses = Vec::with_capacity(n_trials);
        let mut default_counts = vec![0usize; n_loans];
        for outcome in outcomes.into_iter().flatten() {
            totals.push(outcome.total_loss);
            for (j, &defaulted) in outcome.defaults.iter().enumerate() {
                if defaulted {
                    default_counts[j] += 1;
                }
            }
            loan_losses.push(outcome.loan_losses);
        }

        info!(
            scenario = scenario.id(),
            n_trials,
            n_loans,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "monte carlo trials complete"
        );

        Ok(TrialMatrix {
            totals,
            loan_losses,
            default_counts,
        })
    }

    fn aggregate(
        &self,
        portfolio: &Portfolio,
        scenario: &ScenarioParameters,
        matrix: TrialMatrix,
    ) -> SimulationResult {
        if matrix.totals.is_empty() {
            return SimulationResult::empty(scenario.id());
        }
        let loan_ids: Vec<LoanId> =
            portfolio.loans().iter().map(|l| l.id().clone()).collect();
        SimulationResult::from_trials(
            scenario.id(),
            matrix.totals,
            loan_ids,
            matrix.default_counts,
        )
    }
}

/// Spot prices in canonical asset order.
///
/// Assets the portfolio holds must be priced; unheld assets fall back to a
/// unit price so the price simulator consumes an identical draw sequence
/// regardless of snapshot completeness.
fn spot_array(
    portfolio: &Portfolio,
    prices: &CurrentPrices,
) -> Result<[f64; 3], SimulationError> {
    let mut spots = [1.0; 3];
    for asset in AssetType::ALL {
        match prices.get(asset) {
            Some(price) => spots[asset.index()] = price,
            None => {
                let held = portfolio
                    .loans()
                    .iter()
                    .any(|l| l.collateral().asset() == asset);
                if held {
                    return Err(SimulationError::MissingPrice { asset });
                }
            }
        }
    }
    Ok(spots)
}
