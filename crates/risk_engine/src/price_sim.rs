//! Correlated terminal-price simulation.
//!
//! One draw produces a joint outcome of period-end prices for all three
//! collateral assets:
//!
//! 1. Draw independent standard normals `Z`.
//! 2. Apply the lower-triangular transform from the scenario's correlation
//!    triple, giving shocks `W` with the target pairwise structure.
//! 3. Evolve each spot under geometric Brownian motion with risk-neutral
//!    drift `−½σ²` over `T = days/365`, where `σ` is the asset's
//!    annualized volatility scaled by the scenario's volatility
//!    multiplier.
//! 4. Multiply by the scenario's deterministic per-asset shock factor.

use risk_core::assets::AssetType;
use risk_core::math::CholeskyFactor3;
use risk_scenario::ScenarioParameters;

use crate::rng::SimRng;

/// One-shot simulator of joint terminal prices under a scenario.
///
/// Construction precomputes the Cholesky factor and the scaled
/// volatilities; [`CorrelatedPriceSimulator::draw`] is then a cheap
/// per-trial operation.
#[derive(Clone, Debug)]
pub struct CorrelatedPriceSimulator {
    cholesky: CholeskyFactor3,
    /// Per-asset annualized volatility after all multipliers.
    sigmas: [f64; 3],
    /// Deterministic per-asset shock factors.
    shock_factors: [f64; 3],
    /// Horizon as a year fraction.
    horizon_years: f64,
}

impl CorrelatedPriceSimulator {
    /// Creates a simulator for the given scenario and horizon.
    pub fn new(scenario: &ScenarioParameters, horizon_days: u32) -> Self {
        let mut sigmas = [0.0; 3];
        let mut shock_factors = [1.0; 3];
        for asset in AssetType::ALL {
            let i = asset.index();
            let risk = asset.risk_characteristics();
            sigmas[i] = risk.annual_volatility(asset.base_volatility())
                * scenario.volatility_multiplier();
            shock_factors[i] = scenario.price_shock(asset);
        }

        Self {
            cholesky: scenario.correlations().cholesky(),
            sigmas,
            shock_factors,
            horizon_years: horizon_days as f64 / 365.0,
        }
    }

    /// Draws one joint outcome of terminal prices.
    ///
    /// `spots` is indexed in canonical asset order
    /// ([`AssetType::index`]); so is the returned array.
    pub fn draw(&self, rng: &mut SimRng, spots: [f64; 3]) -> [f64; 3] {
        let z = [rng.gen_normal(), rng.gen_normal(), rng.gen_normal()];
        let w = self.cholesky.transform(z);

        let t = self.horizon_years;
        let sqrt_t = t.sqrt();

        let mut terminal = [0.0; 3];
        for i in 0..3 {
            let sigma = self.sigmas[i];
            let drift = -0.5 * sigma * sigma * t;
            let diffusion = sigma * sqrt_t * w[i];
            terminal[i] = spots[i] * (drift + diffusion).exp() * self.shock_factors[i];
        }
        terminal
    }

    /// Per-asset annualized volatility after scenario scaling.
    #[inline]
    pub fn sigma(&self, asset: AssetType) -> f64 {
        self.sigmas[asset.index()]
    }
}
