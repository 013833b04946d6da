//! Per-loan marginal risk contributions.
//!
//! Marginal VaR is computed by base-distribution reuse: the per-trial
//! per-loan loss matrix from the simulation run is retained, the loan's
//! losses are subtracted from each trial total, and the excluded-loan VaR
//! comes from re-sorting that adjusted distribution. This is the
//! documented independence approximation — no re-simulation per loan, so
//! the whole pass is O(loans × trials log trials) on the base draws.

use serde::{Deserialize, Serialize};

use risk_model::LoanId;

use super::result::var_from_sorted;

/// Marginal contribution of one loan to portfolio tail risk.
///
/// Recomputed on demand; not persisted anywhere.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskContribution {
    /// The loan.
    pub loan_id: LoanId,
    /// Portfolio VaR95 minus VaR95 with this loan excluded, in USD.
    pub marginal_var_95: f64,
    /// The marginal VaR as a percentage of total portfolio VaR95.
    pub share_of_var_pct: f64,
}

/// Computes marginal contributions from the retained trial matrix.
///
/// `loan_losses[t][j]` is loan `j`'s loss in trial `t`; `totals[t]` is the
/// trial's portfolio loss.
pub(crate) fn contributions_from_matrix(
    loan_ids: &[LoanId],
    totals: &[f64],
    loan_losses: &[Vec<f64>],
) -> Vec<RiskContribution> {
    let mut sorted_totals = totals.to_vec();
    sorted_totals.sort_by(|a, b| a.total_cmp(b));
    let full_var = var_from_sorted(&sorted_totals, 0.95);

    loan_ids
        .iter()
        .enumerate()
        .map(|(j, id)| {
            let mut excluded: Vec<f64> = totals
                .iter()
                .zip(loan_losses)
                .map(|(total, per_loan)| total - per_loan[j])
                .collect();
            excluded.sort_by(|a, b| a.total_cmp(b));

            let marginal = full_var - var_from_sorted(&excluded, 0.95);
            let share = if full_var > 0.0 {
                marginal / full_var * 100.0
            } else {
                0.0
            };

            RiskContribution {
                loan_id: id.clone(),
                marginal_var_95: marginal,
                share_of_var_pct: share,
            }
        })
        .collect()
}
