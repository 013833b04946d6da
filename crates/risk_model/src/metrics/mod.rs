//! Loan-level risk metrics.
//!
//! Every function here is pure and total: extreme market inputs produce
//! clamped or sentinel outputs, never failures. The only hard failures in
//! this crate happen at construction time (see [`crate::loan`]).
//!
//! ## Wrong-way risk
//!
//! Stressed PD couples the borrower's own leverage to the severity of the
//! collateral-market drawdown:
//!
//! ```text
//! PD_stressed = PD_base × (1 + drawdown × leverage × 2),  capped at 1
//! ```
//!
//! Default probability rises precisely when the collateral backing the
//! loan is losing value. The factor 2 is a calibrated constant.

pub mod portfolio;

pub use portfolio::{
    compute_portfolio_metrics, herfindahl_index, risk_adjusted_return, PortfolioMetrics,
    RiskAdjustedReturn,
};

use serde::{Deserialize, Serialize};

use risk_core::assets::MarginPolicy;
use risk_core::math::norm_cdf;

use crate::loan::Loan;

/// Wrong-way-risk coupling constant (calibrated, not derived).
const WRONG_WAY_FACTOR: f64 = 2.0;

/// Minimum loss severity even when collateral nominally covers the loan.
///
/// Represents operational and liquidity friction in a forced unwind.
pub const LGD_FLOOR: f64 = 0.30;

/// Margin status of a loan position, ordered from safe to critical.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum MarginStatus {
    /// LTV below the warning threshold.
    Healthy,
    /// LTV at or above the warning threshold.
    Warning,
    /// LTV at or above the margin-call threshold.
    Call,
    /// LTV at or above the liquidation threshold.
    Liquidation,
}

/// Which margin threshold a crossing probability refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarginEventKind {
    /// Crossing into the warning band.
    Warning,
    /// Crossing into margin call.
    Call,
    /// Crossing into forced liquidation.
    Liquidation,
}

impl MarginEventKind {
    /// The LTV threshold this event corresponds to under a policy.
    #[inline]
    pub fn threshold(&self, policy: &MarginPolicy) -> f64 {
        match self {
            MarginEventKind::Warning => policy.warn_ltv,
            MarginEventKind::Call => policy.call_ltv,
            MarginEventKind::Liquidation => policy.liquidation_ltv,
        }
    }
}

/// Loan-to-value ratio: principal / collateral value.
///
/// Returns `f64::INFINITY` when the collateral value is zero — total loss
/// of coverage is a sentinel the caller can distinguish, never a silent
/// division.
///
/// # Examples
///
/// ```
/// use risk_model::metrics::loan_to_value;
///
/// assert_eq!(loan_to_value(1_000_000.0, 2_000_000.0), 0.5);
/// assert!(loan_to_value(1_000_000.0, 0.0).is_infinite());
/// ```
#[inline]
pub fn loan_to_value(principal: f64, collateral_value_usd: f64) -> f64 {
    if collateral_value_usd <= 0.0 {
        f64::INFINITY
    } else {
        principal / collateral_value_usd
    }
}

/// Classifies an LTV against a margin policy.
///
/// A value exactly at a threshold belongs to the higher-risk bucket.
///
/// # Examples
///
/// ```
/// use risk_core::assets::AssetType;
/// use risk_model::metrics::{margin_status, MarginStatus};
///
/// let policy = AssetType::Btc.margin_policy(); // 0.70 / 0.80 / 0.90
/// assert_eq!(margin_status(0.69999, &policy), MarginStatus::Healthy);
/// assert_eq!(margin_status(0.70, &policy), MarginStatus::Warning);
/// assert_eq!(margin_status(0.80, &policy), MarginStatus::Call);
/// assert_eq!(margin_status(0.90, &policy), MarginStatus::Liquidation);
/// ```
pub fn margin_status(ltv: f64, policy: &MarginPolicy) -> MarginStatus {
    if ltv >= policy.liquidation_ltv {
        MarginStatus::Liquidation
    } else if ltv >= policy.call_ltv {
        MarginStatus::Call
    } else if ltv >= policy.warn_ltv {
        MarginStatus::Warning
    } else {
        MarginStatus::Healthy
    }
}

/// Stressed annual probability of default under wrong-way risk.
///
/// `base_annual_pd × (1 + drawdown × leverage × 2)`, capped at 1.0. At
/// zero drawdown this is exactly the base PD.
pub fn stressed_pd(base_annual_pd: f64, market_drawdown: f64, leverage: f64) -> f64 {
    let stressed = base_annual_pd * (1.0 + market_drawdown * leverage * WRONG_WAY_FACTOR);
    stressed.clamp(0.0, 1.0)
}

/// Loss given default as a fraction of principal.
///
/// `max(0, principal − collateral × (1 − slippage)) / principal`, floored
/// at [`LGD_FLOOR`] and capped at 1.0.
pub fn loss_given_default(
    collateral_value_usd: f64,
    principal: f64,
    liquidation_slippage: f64,
) -> f64 {
    let recovery = collateral_value_usd * (1.0 - liquidation_slippage);
    let raw = (principal - recovery).max(0.0) / principal;
    raw.clamp(LGD_FLOOR, 1.0)
}

/// Scales an annual PD to a day-count horizon via survival scaling.
///
/// `1 − (1 − p)^(days/365)`; consistent with a constant-hazard view of
/// the annual PD.
pub fn horizon_pd(annual_pd: f64, horizon_days: u32) -> f64 {
    let p = annual_pd.clamp(0.0, 1.0);
    if p >= 1.0 {
        return 1.0;
    }
    1.0 - (1.0 - p).powf(horizon_days as f64 / 365.0)
}

/// Expected loss for a loan: EAD × PD × LGD.
///
/// EAD is the principal, PD is the wrong-way-stressed annual PD, LGD uses
/// the collateral asset's own liquidation slippage.
pub fn expected_loss(loan: &Loan, collateral_value_usd: f64, market_drawdown: f64) -> f64 {
    let pd = stressed_pd(
        loan.rating().base_annual_pd(),
        market_drawdown,
        loan.leverage(),
    );
    let slippage = loan
        .collateral()
        .asset()
        .risk_characteristics()
        .liquidation_slippage;
    let lgd = loss_given_default(collateral_value_usd, loan.principal(), slippage);
    loan.principal() * pd * lgd
}

/// Probability that a log-normal price process pushes the LTV across a
/// threshold within the horizon.
///
/// The required fractional price drop is `1 − current/threshold`
/// (probability 1.0 if that is ≤ 0, i.e. the threshold is already
/// breached). The z-score is `ln(1/(1−drop))` over the horizon-scaled
/// volatility, and the result is the standard-normal left-tail probability
/// at `−z`.
pub fn margin_event_probability(
    current_ltv: f64,
    threshold_ltv: f64,
    annual_volatility: f64,
    horizon_days: u32,
) -> f64 {
    let required_drop = 1.0 - current_ltv / threshold_ltv;
    if required_drop <= 0.0 {
        return 1.0;
    }
    if required_drop >= 1.0 {
        // Needs the price to reach zero; a log-normal never gets there.
        return 0.0;
    }

    let scaled_vol = annual_volatility * (horizon_days as f64 / 365.0).sqrt();
    if scaled_vol <= 0.0 {
        return 0.0;
    }

    let z = (1.0 / (1.0 - required_drop)).ln() / scaled_vol;
    norm_cdf(-z)
}

/// Crossing probabilities for all three margin thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarginEventProbabilities {
    /// Probability of entering the warning band within the horizon.
    pub warning: f64,
    /// Probability of a margin call within the horizon.
    pub call: f64,
    /// Probability of forced liquidation within the horizon.
    pub liquidation: f64,
}

/// Evaluates [`margin_event_probability`] for every threshold of a policy.
pub fn margin_event_probabilities(
    current_ltv: f64,
    policy: &MarginPolicy,
    annual_volatility: f64,
    horizon_days: u32,
) -> MarginEventProbabilities {
    let prob = |kind: MarginEventKind| {
        margin_event_probability(
            current_ltv,
            kind.threshold(policy),
            annual_volatility,
            horizon_days,
        )
    };
    MarginEventProbabilities {
        warning: prob(MarginEventKind::Warning),
        call: prob(MarginEventKind::Call),
        liquidation: prob(MarginEventKind::Liquidation),
    }
}

/// Bundle of loan-level metrics for a single loan at current prices.
///
/// Produced synchronously for dashboard display; no simulation involved.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoanMetrics {
    /// Collateral value in USD at the supplied price.
    pub collateral_value: f64,
    /// Loan-to-value ratio (+∞ on zero collateral).
    pub ltv: f64,
    /// Margin status bucket.
    pub margin_status: MarginStatus,
    /// Wrong-way-stressed annual PD.
    pub stressed_pd: f64,
    /// Loss given default fraction.
    pub lgd: f64,
    /// Expected loss in USD (EAD × PD × LGD).
    pub expected_loss: f64,
    /// Daily interest revenue in USD.
    pub daily_interest: f64,
    /// Threshold-crossing probabilities over a 30-day horizon.
    pub margin_events_30d: MarginEventProbabilities,
}

/// Computes the full loan-level metric bundle at a given unit price.
pub fn compute_loan_metrics(loan: &Loan, price: f64, market_drawdown: f64) -> LoanMetrics {
    let asset = loan.collateral().asset();
    let collateral_value = loan.collateral_value(price);
    let ltv = loan_to_value(loan.principal(), collateral_value);
    let policy = asset.margin_policy();
    let risk = asset.risk_characteristics();
    let annual_vol = risk.annual_volatility(asset.base_volatility());

    LoanMetrics {
        collateral_value,
        ltv,
        margin_status: margin_status(ltv, &policy),
        stressed_pd: stressed_pd(
            loan.rating().base_annual_pd(),
            market_drawdown,
            loan.leverage(),
        ),
        lgd: loss_given_default(collateral_value, loan.principal(), risk.liquidation_slippage),
        expected_loss: expected_loss(loan, collateral_value, market_drawdown),
        daily_interest: loan.daily_interest(),
        margin_events_30d: margin_event_probabilities(ltv, &policy, annual_vol, 30),
    }
}
