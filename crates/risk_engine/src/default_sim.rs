//! Correlated borrower-default simulation via a t-copula.
//!
//! One draw produces a joint default/no-default outcome for every loan,
//! with defaults clustering more strongly than independent Bernoulli draws
//! would — and increasingly so in stress regimes:
//!
//! 1. Draw one common factor `Z` and a per-loan idiosyncratic shock `ε`,
//!    mixed as `X_i = sqrt(ρ)·Z + sqrt(1−ρ)·ε_i` with ρ the scenario's
//!    default correlation.
//! 2. Transform each `X_i` to a Student-t variate by dividing by
//!    `sqrt(χ²_ν / ν)`, the χ² drawn as a sum of ν squared standard
//!    normals shared across loans within the trial.
//! 3. Map to a uniform through the Student-t CDF and compare against the
//!    loan's horizon-scaled stressed PD; default if the uniform is below.
//! 4. A drawn default cures with the scenario's cure probability.
//!
//! Lower ν means fatter tails, which means a higher probability of many
//! simultaneous defaults at a fixed average default rate. That tail
//! dependence is the entire reason for a t-copula over independent draws,
//! and it lives in the CDF step — which uses a real incomplete-beta
//! implementation, not a placeholder.

use risk_core::math::student_t_cdf;
use risk_model::metrics::{horizon_pd, stressed_pd};
use risk_model::Portfolio;
use risk_scenario::ScenarioParameters;

use crate::rng::SimRng;

/// Guard against a (measure-zero) all-zero χ² draw.
const MIN_CHI2_SCALE: f64 = 1e-12;

/// One-shot simulator of joint borrower defaults under a scenario.
///
/// Construction precomputes each loan's horizon-scaled stressed PD;
/// [`CorrelatedDefaultSimulator::draw`] is then a cheap per-trial
/// operation.
#[derive(Clone, Debug)]
pub struct CorrelatedDefaultSimulator {
    /// Scenario default correlation ρ.
    rho: f64,
    /// Exact degrees of freedom used in the CDF.
    dof: f64,
    /// Integer ν used for the χ² sum (ν rounded, at least 1).
    chi2_terms: usize,
    /// Cure probability applied after a default draw.
    cure_probability: f64,
    /// Per-loan horizon PDs, in portfolio order.
    horizon_pds: Vec<f64>,
}

impl CorrelatedDefaultSimulator {
    /// Creates a simulator for the given portfolio, scenario, and horizon.
    ///
    /// Each loan's annual PD is wrong-way-stressed by the scenario
    /// drawdown and the loan's leverage, scaled by the scenario PD
    /// multiplier (clamped at 1), then converted to the horizon.
    pub fn new(portfolio: &Portfolio, scenario: &ScenarioParameters, horizon_days: u32) -> Self {
        let horizon_pds = portfolio
            .loans()
            .iter()
            .map(|loan| {
                let annual = stressed_pd(
                    loan.rating().base_annual_pd(),
                    scenario.market_drawdown(),
                    loan.leverage(),
                ) * scenario.pd_multiplier();
                horizon_pd(annual.min(1.0), horizon_days)
            })
            .collect();

        Self {
            rho: scenario.default_correlation(),
            dof: scenario.t_dof(),
            chi2_terms: (scenario.t_dof().round() as usize).max(1),
            cure_probability: scenario.cure_probability(),
            horizon_pds,
        }
    }

    /// Number of loans covered by one draw.
    #[inline]
    pub fn loan_count(&self) -> usize {
        self.horizon_pds.len()
    }

    /// Horizon-scaled stressed PD for a loan, in portfolio order.
    #[inline]
    pub fn horizon_pd(&self, index: usize) -> f64 {
        self.horizon_pds[index]
    }

    /// Draws one joint default outcome, in portfolio order.
    pub fn draw(&self, rng: &mut SimRng) -> Vec<bool> {
        // Trial-level draws first: the common factor, then the χ² scale
        // shared by every loan in the trial.
        let common = rng.gen_normal();
        let mut chi2 = 0.0;
        for _ in 0..self.chi2_terms {
            let n = rng.gen_normal();
            chi2 += n * n;
        }
        let scale = (chi2 / self.chi2_terms as f64).sqrt().max(MIN_CHI2_SCALE);

        let beta_common = self.rho.sqrt();
        let beta_idio = (1.0 - self.rho).sqrt();

        self.horizon_pds
            .iter()
            .map(|&pd| {
                let x = beta_common * common + beta_idio * rng.gen_normal();
                let t = x / scale;
                let uniform = student_t_cdf(t, self.dof);
                let mut defaulted = uniform < pd;
                if defaulted && self.cure_probability > 0.0 {
                    defaulted = rng.gen_uniform() >= self.cure_probability;
                }
                defaulted
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use risk_core::assets::{AssetType, CollateralAsset};
    use risk_core::rating::CreditRatingTier;
    use risk_model::loan::{Loan, LoanId, LoanTerms};
    use risk_model::PortfolioBuilder;

    fn uniform_portfolio(n_loans: usize, rating: CreditRatingTier, leverage: f64) -> Portfolio {
        let mut builder = PortfolioBuilder::new().risk_capital(10_000_000.0);
        for i in 0..n_loans {
            let terms = LoanTerms::new(
                100_000.0,
                0.12,
                90,
                NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            )
            .unwrap();
            let loan = Loan::new(
                LoanId::new(format!("L-{i}")),
                "Borrower",
                rating,
                terms,
                CollateralAsset::new(AssetType::Btc, 2.0).unwrap(),
                leverage,
                NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            )
            .unwrap();
            builder = builder.add_loan(loan);
        }
        builder.build().unwrap()
    }

    fn scenario(rho: f64, dof: f64, cure: f64) -> ScenarioParameters {
        ScenarioParameters::builder("t", "T")
            .default_correlation(rho)
            .t_dof(dof)
            .cure_probability(cure)
            .build()
            .unwrap()
    }

    fn default_rate(sim: &CorrelatedDefaultSimulator, trials: usize, seed: u64) -> f64 {
        let mut defaults = 0usize;
        let mut total = 0usize;
        for i in 0..trials {
            let mut rng = SimRng::substream(seed, i as u64);
            let outcome = sim.draw(&mut rng);
            defaults += outcome.iter().filter(|&&d| d).count();
            total += outcome.len();
        }
        defaults as f64 / total as f64
    }

    #[test]
    fn test_draw_length_matches_portfolio() {
        let portfolio = uniform_portfolio(7, CreditRatingTier::A, 2.0);
        let sim = CorrelatedDefaultSimulator::new(&portfolio, &scenario(0.2, 8.0, 0.0), 30);
        assert_eq!(sim.loan_count(), 7);
        assert_eq!(sim.draw(&mut SimRng::from_seed(1)).len(), 7);
    }

    #[test]
    fn test_deterministic_given_seed() {
        let portfolio = uniform_portfolio(10, CreditRatingTier::Bbb, 3.0);
        let sim = CorrelatedDefaultSimulator::new(&portfolio, &scenario(0.3, 5.0, 0.1), 30);
        assert_eq!(
            sim.draw(&mut SimRng::from_seed(42)),
            sim.draw(&mut SimRng::from_seed(42))
        );
    }

    #[test]
    fn test_independent_limit_matches_target_pd() {
        // ρ = 0 and high dof: defaults converge to independent Bernoulli
        // at the horizon PD.
        let portfolio = uniform_portfolio(20, CreditRatingTier::Bbb, 0.0);
        let s = scenario(0.0, 200.0, 0.0);
        let sim = CorrelatedDefaultSimulator::new(&portfolio, &s, 365);

        let target = sim.horizon_pd(0);
        assert!((target - 0.06).abs() < 1e-9);

        let rate = default_rate(&sim, 2_000, 7);
        // 40,000 Bernoulli(0.06) draws: 3 standard errors ≈ 0.0036
        assert!((rate - target).abs() < 0.004, "rate {} target {}", rate, target);
    }

    #[test]
    fn test_fat_tails_cluster_defaults() {
        // At fixed average PD, low dof concentrates defaults into joint
        // events: the variance of the per-trial default count rises.
        let portfolio = uniform_portfolio(50, CreditRatingTier::Bbb, 2.0);
        let thin = CorrelatedDefaultSimulator::new(&portfolio, &scenario(0.3, 50.0, 0.0), 365);
        let fat = CorrelatedDefaultSimulator::new(&portfolio, &scenario(0.3, 3.0, 0.0), 365);

        let count_variance = |sim: &CorrelatedDefaultSimulator, seed: u64| {
            let trials = 2_000;
            let counts: Vec<f64> = (0..trials)
                .map(|i| {
                    let mut rng = SimRng::substream(seed, i as u64);
                    sim.draw(&mut rng).iter().filter(|&&d| d).count() as f64
                })
                .collect();
            let mean = counts.iter().sum::<f64>() / trials as f64;
            counts.iter().map(|c| (c - mean) * (c - mean)).sum::<f64>() / trials as f64
        };

        let var_thin = count_variance(&thin, 101);
        let var_fat = count_variance(&fat, 101);
        assert!(
            var_fat > var_thin,
            "fat-tail variance {} should exceed thin-tail {}",
            var_fat,
            var_thin
        );
    }

    #[test]
    fn test_correlation_clusters_defaults() {
        // Same comparison along the ρ axis at fixed dof.
        let portfolio = uniform_portfolio(50, CreditRatingTier::Bbb, 2.0);
        let indep = CorrelatedDefaultSimulator::new(&portfolio, &scenario(0.0, 10.0, 0.0), 365);
        let coupled = CorrelatedDefaultSimulator::new(&portfolio, &scenario(0.7, 10.0, 0.0), 365);

        let max_count = |sim: &CorrelatedDefaultSimulator, seed: u64| {
            (0..1_000)
                .map(|i| {
                    let mut rng = SimRng::substream(seed, i as u64);
                    sim.draw(&mut rng).iter().filter(|&&d| d).count()
                })
                .max()
                .unwrap()
        };

        assert!(max_count(&coupled, 55) > max_count(&indep, 55));
    }

    #[test]
    fn test_cure_probability_lowers_default_rate() {
        let portfolio = uniform_portfolio(20, CreditRatingTier::Bbb, 2.0);
        let no_cure = CorrelatedDefaultSimulator::new(&portfolio, &scenario(0.2, 8.0, 0.0), 365);
        let half_cure = CorrelatedDefaultSimulator::new(&portfolio, &scenario(0.2, 8.0, 0.5), 365);

        let r_none = default_rate(&no_cure, 1_500, 13);
        let r_half = default_rate(&half_cure, 1_500, 13);

        assert!(r_half < r_none * 0.7, "half-cure {} vs none {}", r_half, r_none);
    }

    #[test]
    fn test_stress_raises_horizon_pd() {
        let portfolio = uniform_portfolio(1, CreditRatingTier::A, 3.0);
        let calm = ScenarioParameters::builder("calm", "Calm").build().unwrap();
        let stressed = ScenarioParameters::builder("stress", "Stress")
            .market_drawdown(0.5)
            .pd_multiplier(2.0)
            .build()
            .unwrap();

        let sim_calm = CorrelatedDefaultSimulator::new(&portfolio, &calm, 30);
        let sim_stress = CorrelatedDefaultSimulator::new(&portfolio, &stressed, 30);
        assert!(sim_stress.horizon_pd(0) > sim_calm.horizon_pd(0));
    }

    #[test]
    fn test_empty_portfolio_draw() {
        let portfolio = PortfolioBuilder::new().risk_capital(1.0).build().unwrap();
        let sim = CorrelatedDefaultSimulator::new(&portfolio, &scenario(0.2, 8.0, 0.0), 30);
        assert!(sim.draw(&mut SimRng::from_seed(1)).is_empty());
    }
}
