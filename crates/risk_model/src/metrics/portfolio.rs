//! Portfolio-level aggregation and concentration metrics.
//!
//! Totals are straight sums over the loans. Aggregate LTV is defined as
//! 0.0 when total collateral is zero: the loan-level +∞ sentinel is not
//! propagated upward, because an empty (or fully unwound) book reads as
//! "nothing at risk" on a dashboard, not "infinite leverage".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use risk_core::assets::AssetType;
use risk_core::prices::CurrentPrices;

use crate::error::ModelError;
use crate::metrics::expected_loss;
use crate::portfolio::Portfolio;

/// Floor on the volatility proxy so risk-adjusted ratios stay finite for
/// loss-free portfolios.
const MIN_VOLATILITY_PROXY: f64 = 1e-4;

/// Downside share of the volatility proxy assumed by the Sortino-style
/// ratio.
const DOWNSIDE_VARIANCE_SHARE: f64 = 0.5;

/// Aggregated portfolio metrics at current prices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    /// Sum of loan principals (total exposure) in USD.
    pub total_exposure: f64,
    /// Sum of collateral values in USD.
    pub total_collateral_value: f64,
    /// Total exposure / total collateral; 0.0 when collateral is zero.
    pub aggregate_ltv: f64,
    /// Sum of loan expected losses in USD.
    pub total_expected_loss: f64,
    /// Sum of daily interest revenue in USD.
    pub daily_revenue: f64,
    /// Share of total collateral value per asset, in [0, 1].
    pub asset_concentration: BTreeMap<AssetType, f64>,
    /// Herfindahl-Hirschman Index over principal shares (0–10,000 scale).
    pub hhi: f64,
}

/// Computes portfolio-level metrics at current prices.
///
/// # Errors
///
/// Returns `ModelError::MissingPrice` if the snapshot lacks a price for an
/// asset the portfolio holds. Degenerate portfolios (empty, zero
/// collateral) produce zeroed metrics, not errors.
pub fn compute_portfolio_metrics(
    portfolio: &Portfolio,
    prices: &CurrentPrices,
    market_drawdown: f64,
) -> Result<PortfolioMetrics, ModelError> {
    let mut total_exposure = 0.0;
    let mut total_collateral = 0.0;
    let mut total_el = 0.0;
    let mut daily_revenue = 0.0;
    let mut collateral_by_asset: BTreeMap<AssetType, f64> = BTreeMap::new();

    for loan in portfolio.loans() {
        let asset = loan.collateral().asset();
        let price = prices
            .get(asset)
            .ok_or(ModelError::MissingPrice { asset })?;
        let collateral_value = loan.collateral_value(price);

        total_exposure += loan.principal();
        total_collateral += collateral_value;
        total_el += expected_loss(loan, collateral_value, market_drawdown);
        daily_revenue += loan.daily_interest();
        *collateral_by_asset.entry(asset).or_insert(0.0) += collateral_value;
    }

    let aggregate_ltv = if total_collateral > 0.0 {
        total_exposure / total_collateral
    } else {
        0.0
    };

    let asset_concentration = if total_collateral > 0.0 {
        collateral_by_asset
            .into_iter()
            .map(|(a, v)| (a, v / total_collateral))
            .collect()
    } else {
        BTreeMap::new()
    };

    let principals: Vec<f64> = portfolio.loans().iter().map(|l| l.principal()).collect();

    Ok(PortfolioMetrics {
        total_exposure,
        total_collateral_value: total_collateral,
        aggregate_ltv,
        total_expected_loss: total_el,
        daily_revenue,
        asset_concentration,
        hhi: herfindahl_index(&principals),
    })
}

/// Herfindahl-Hirschman Index over the given amounts.
///
/// Shares are expressed on the 0–100 percent scale, so the index ranges
/// 0–10,000: four loans at 30/30/30/10 percent give exactly 2,800.
///
/// # Examples
///
/// ```
/// use risk_model::metrics::herfindahl_index;
///
/// let hhi = herfindahl_index(&[30.0, 30.0, 30.0, 10.0]);
/// assert!((hhi - 2_800.0).abs() < 1e-9);
/// ```
pub fn herfindahl_index(amounts: &[f64]) -> f64 {
    let total: f64 = amounts.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    amounts
        .iter()
        .map(|a| {
            let share_pct = a / total * 100.0;
            share_pct * share_pct
        })
        .sum()
}

/// Sharpe- and Sortino-style risk-adjusted return ratios.
///
/// The volatility proxy is a simplified function of expected loss over
/// risk capital, not a true return-series deviation; both ratios are
/// approximations for ranking, not performance attribution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskAdjustedReturn {
    /// `(expected_return − risk_free) / volatility_proxy`.
    pub sharpe: f64,
    /// Same numerator over the downside share of the proxy.
    pub sortino: f64,
}

/// Computes risk-adjusted return ratios.
///
/// # Arguments
///
/// * `expected_annual_return` - Expected annual portfolio return (e.g. the
///   principal-weighted average lending rate)
/// * `risk_free_rate` - Annual risk-free rate
/// * `total_expected_loss` - Portfolio expected loss in USD
/// * `risk_capital` - Risk-capital pool in USD (positive by construction)
pub fn risk_adjusted_return(
    expected_annual_return: f64,
    risk_free_rate: f64,
    total_expected_loss: f64,
    risk_capital: f64,
) -> RiskAdjustedReturn {
    let proxy = (total_expected_loss / risk_capital).max(MIN_VOLATILITY_PROXY);
    let excess = expected_annual_return - risk_free_rate;
    RiskAdjustedReturn {
        sharpe: excess / proxy,
        sortino: excess / (proxy * DOWNSIDE_VARIANCE_SHARE.sqrt()),
    }
}

impl Portfolio {
    /// Principal-weighted average lending rate; 0.0 for an empty book.
    pub fn weighted_average_rate(&self) -> f64 {
        let total = self.total_principal();
        if total <= 0.0 {
            return 0.0;
        }
        self.loans()
            .iter()
            .map(|l| l.principal() * l.terms().annual_rate)
            .sum::<f64>()
            / total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use risk_core::assets::CollateralAsset;
    use risk_core::rating::CreditRatingTier;

    use crate::loan::{Loan, LoanId, LoanTerms};
    use crate::portfolio::PortfolioBuilder;

    fn make_loan(id: &str, principal: f64, asset: AssetType, quantity: f64, rate: f64) -> Loan {
        let terms = LoanTerms::new(
            principal,
            rate,
            90,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        )
        .unwrap();
        Loan::new(
            LoanId::new(id),
            "Borrower",
            CreditRatingTier::A,
            terms,
            CollateralAsset::new(asset, quantity).unwrap(),
            2.0,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        )
        .unwrap()
    }

    fn snapshot() -> CurrentPrices {
        CurrentPrices::new([
            (AssetType::Btc, 100_000.0),
            (AssetType::Eth, 4_000.0),
            (AssetType::Sol, 200.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_hhi_spec_example() {
        // 30/30/30/10 percent shares → 900×3 + 100 = 2,800.
        assert_relative_eq!(
            herfindahl_index(&[30.0, 30.0, 30.0, 10.0]),
            2_800.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_hhi_single_loan_is_max() {
        assert_relative_eq!(herfindahl_index(&[1_000_000.0]), 10_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_hhi_empty_and_zero() {
        assert_eq!(herfindahl_index(&[]), 0.0);
        assert_eq!(herfindahl_index(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_hhi_scale_invariant() {
        let a = herfindahl_index(&[3.0, 3.0, 3.0, 1.0]);
        let b = herfindahl_index(&[300.0, 300.0, 300.0, 100.0]);
        assert_relative_eq!(a, b, epsilon = 1e-9);
    }

    #[test]
    fn test_portfolio_metrics_sums() {
        let portfolio = PortfolioBuilder::new()
            .risk_capital(5_000_000.0)
            .add_loan(make_loan("L-1", 1_000_000.0, AssetType::Btc, 20.0, 0.12))
            .add_loan(make_loan("L-2", 500_000.0, AssetType::Eth, 250.0, 0.10))
            .build()
            .unwrap();

        let m = compute_portfolio_metrics(&portfolio, &snapshot(), 0.0).unwrap();

        assert_relative_eq!(m.total_exposure, 1_500_000.0);
        // 20 BTC × 100k + 250 ETH × 4k = 2m + 1m = 3m
        assert_relative_eq!(m.total_collateral_value, 3_000_000.0);
        assert_relative_eq!(m.aggregate_ltv, 0.5);
        assert_relative_eq!(
            m.daily_revenue,
            1_000_000.0 * 0.12 / 365.0 + 500_000.0 * 0.10 / 365.0,
            epsilon = 1e-9
        );
        assert!(m.total_expected_loss > 0.0);
    }

    #[test]
    fn test_portfolio_metrics_concentration() {
        let portfolio = PortfolioBuilder::new()
            .risk_capital(5_000_000.0)
            .add_loan(make_loan("L-1", 1_000_000.0, AssetType::Btc, 20.0, 0.12))
            .add_loan(make_loan("L-2", 500_000.0, AssetType::Eth, 250.0, 0.10))
            .build()
            .unwrap();

        let m = compute_portfolio_metrics(&portfolio, &snapshot(), 0.0).unwrap();

        assert_relative_eq!(m.asset_concentration[&AssetType::Btc], 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(m.asset_concentration[&AssetType::Eth], 1.0 / 3.0, epsilon = 1e-12);
        assert!(!m.asset_concentration.contains_key(&AssetType::Sol));

        let shares: f64 = m.asset_concentration.values().sum();
        assert_relative_eq!(shares, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_portfolio_metrics_empty() {
        let portfolio = PortfolioBuilder::new()
            .risk_capital(1_000_000.0)
            .build()
            .unwrap();

        let m = compute_portfolio_metrics(&portfolio, &snapshot(), 0.5).unwrap();

        assert_eq!(m.total_exposure, 0.0);
        assert_eq!(m.total_collateral_value, 0.0);
        // Aggregate LTV convention: 0 on zero collateral, not +∞.
        assert_eq!(m.aggregate_ltv, 0.0);
        assert_eq!(m.hhi, 0.0);
        assert!(m.asset_concentration.is_empty());
    }

    #[test]
    fn test_portfolio_metrics_missing_price() {
        let portfolio = PortfolioBuilder::new()
            .risk_capital(1_000_000.0)
            .add_loan(make_loan("L-1", 100_000.0, AssetType::Sol, 1_000.0, 0.15))
            .build()
            .unwrap();

        let partial = CurrentPrices::new([(AssetType::Btc, 100_000.0)]).unwrap();
        let result = compute_portfolio_metrics(&portfolio, &partial, 0.0);
        assert!(matches!(
            result,
            Err(ModelError::MissingPrice {
                asset: AssetType::Sol
            })
        ));
    }

    #[test]
    fn test_risk_adjusted_return_ratios() {
        let r = risk_adjusted_return(0.12, 0.04, 100_000.0, 1_000_000.0);
        // proxy = 0.1, excess = 0.08 → sharpe 0.8
        assert_relative_eq!(r.sharpe, 0.8, epsilon = 1e-9);
        // sortino uses the downside share: 0.08 / (0.1 × sqrt(0.5))
        assert_relative_eq!(r.sortino, 0.08 / (0.1 * 0.5_f64.sqrt()), epsilon = 1e-9);
        assert!(r.sortino > r.sharpe);
    }

    #[test]
    fn test_risk_adjusted_return_loss_free_floor() {
        // Zero expected loss: the proxy floor keeps the ratio finite.
        let r = risk_adjusted_return(0.12, 0.04, 0.0, 1_000_000.0);
        assert!(r.sharpe.is_finite());
        assert_relative_eq!(r.sharpe, 0.08 / 1e-4, epsilon = 1e-6);
    }

    #[test]
    fn test_weighted_average_rate() {
        let portfolio = PortfolioBuilder::new()
            .risk_capital(5_000_000.0)
            .add_loan(make_loan("L-1", 1_000_000.0, AssetType::Btc, 20.0, 0.12))
            .add_loan(make_loan("L-2", 1_000_000.0, AssetType::Eth, 250.0, 0.08))
            .build()
            .unwrap();

        assert_relative_eq!(portfolio.weighted_average_rate(), 0.10, epsilon = 1e-12);

        let empty = PortfolioBuilder::new().risk_capital(1.0).build().unwrap();
        assert_eq!(empty.weighted_average_rate(), 0.0);
    }
}
