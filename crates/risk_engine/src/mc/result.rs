//! Simulation result: the empirical loss distribution and its statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use risk_model::LoanId;

/// Outcome of one portfolio-loss simulation.
///
/// Immutable once produced; holds the full sorted loss distribution so
/// consumers can derive further quantiles without re-simulating.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Identifier of the scenario that was simulated.
    pub scenario_id: String,
    /// Number of trials run.
    pub n_trials: usize,
    /// Per-trial portfolio losses, sorted ascending.
    pub losses: Vec<f64>,
    /// Mean loss.
    pub mean_loss: f64,
    /// Median loss.
    pub median_loss: f64,
    /// Value at Risk at 95%.
    pub var_95: f64,
    /// Value at Risk at 99%.
    pub var_99: f64,
    /// Conditional VaR (expected shortfall) at 95%.
    pub cvar_95: f64,
    /// Conditional VaR (expected shortfall) at 99%.
    pub cvar_99: f64,
    /// Largest simulated loss.
    pub max_loss: f64,
    /// Fraction of trials with any loss.
    pub probability_of_loss: f64,
    /// Empirical default frequency per loan (defaults / trials).
    pub default_frequencies: BTreeMap<LoanId, f64>,
}

impl SimulationResult {
    /// Builds a result from raw per-trial losses and default counts.
    ///
    /// `losses` need not be pre-sorted. `default_counts` pairs with
    /// `loan_ids` positionally.
    pub fn from_trials(
        scenario_id: impl Into<String>,
        mut losses: Vec<f64>,
        loan_ids: Vec<LoanId>,
        default_counts: Vec<usize>,
    ) -> Self {
        losses.sort_by(|a, b| a.total_cmp(b));
        let n = losses.len();

        if n == 0 {
            return Self::empty(scenario_id);
        }

        let mean_loss = losses.iter().sum::<f64>() / n as f64;
        let median_loss = if n % 2 == 1 {
            losses[n / 2]
        } else {
            0.5 * (losses[n / 2 - 1] + losses[n / 2])
        };
        let loss_trials = losses.iter().filter(|&&l| l > 0.0).count();

        let default_frequencies = loan_ids
            .into_iter()
            .zip(default_counts)
            .map(|(id, count)| (id, count as f64 / n as f64))
            .collect();

        Self {
            scenario_id: scenario_id.into(),
            n_trials: n,
            var_95: var_from_sorted(&losses, 0.95),
            var_99: var_from_sorted(&losses, 0.99),
            cvar_95: cvar_from_sorted(&losses, 0.95),
            cvar_99: cvar_from_sorted(&losses, 0.99),
            max_loss: losses[n - 1],
            probability_of_loss: loss_trials as f64 / n as f64,
            mean_loss,
            median_loss,
            losses,
            default_frequencies,
        }
    }

    /// The all-zero result for a portfolio with no loans.
    pub fn empty(scenario_id: impl Into<String>) -> Self {
        Self {
            scenario_id: scenario_id.into(),
            n_trials: 0,
            losses: Vec::new(),
            mean_loss: 0.0,
            median_loss: 0.0,
            var_95: 0.0,
            var_99: 0.0,
            cvar_95: 0.0,
            cvar_99: 0.0,
            max_loss: 0.0,
            probability_of_loss: 0.0,
            default_frequencies: BTreeMap::new(),
        }
    }

    /// VaR at an arbitrary percentile from the stored distribution.
    pub fn var(&self, percentile: f64) -> f64 {
        var_from_sorted(&self.losses, percentile)
    }

    /// CVaR at an arbitrary percentile from the stored distribution.
    pub fn cvar(&self, percentile: f64) -> f64 {
        cvar_from_sorted(&self.losses, percentile)
    }
}

/// VaR from an ascending-sorted loss array: the loss at index
/// `floor(n · p)`, clamped into range.
pub(crate) fn var_from_sorted(sorted_losses: &[f64], percentile: f64) -> f64 {
    if sorted_losses.is_empty() {
        return 0.0;
    }
    let idx = tail_index(sorted_losses.len(), percentile);
    sorted_losses[idx]
}

/// CVaR from an ascending-sorted loss array: the mean of all losses at or
/// above the VaR index (tail average, not the single quantile).
pub(crate) fn cvar_from_sorted(sorted_losses: &[f64], percentile: f64) -> f64 {
    if sorted_losses.is_empty() {
        return 0.0;
    }
    let idx = tail_index(sorted_losses.len(), percentile);
    let tail = &sorted_losses[idx..];
    tail.iter().sum::<f64>() / tail.len() as f64
}

#[inline]
fn tail_index(n: usize, percentile: f64) -> usize {
    ((n as f64 * percentile) as usize).min(n - 1)
}
