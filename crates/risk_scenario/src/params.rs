//! Scenario parameter set with builder-time validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use risk_core::assets::AssetType;
use risk_core::error::CorrelationError;
use risk_core::math::CorrelationTriple;

/// Errors raised when building scenario parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// A parameter that must be strictly positive was not.
    #[error("{name} must be positive, got {got}")]
    NonPositive {
        /// Parameter name.
        name: &'static str,
        /// The offending value.
        got: f64,
    },

    /// A parameter constrained to [0, 1] fell outside it.
    #[error("{name} must be in [0, 1], got {got}")]
    OutOfUnitRange {
        /// Parameter name.
        name: &'static str,
        /// The offending value.
        got: f64,
    },

    /// A correlation override was out of range.
    #[error(transparent)]
    Correlation(#[from] CorrelationError),
}

/// Named, immutable stress configuration.
///
/// Built through [`ScenarioParameters::builder`]; every field is
/// range-checked at build time and never mutated afterwards.
///
/// # Examples
///
/// ```
/// use risk_scenario::ScenarioParameters;
///
/// let scenario = ScenarioParameters::builder("severe-bear", "Severe Bear")
///     .market_drawdown(0.45)
///     .volatility_multiplier(2.0)
///     .pd_multiplier(2.5)
///     .build()
///     .unwrap();
///
/// assert_eq!(scenario.id(), "severe-bear");
/// assert_eq!(scenario.market_drawdown(), 0.45);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParameters {
    id: String,
    name: String,
    description: String,
    market_drawdown: f64,
    volatility_multiplier: f64,
    price_shocks: BTreeMap<AssetType, f64>,
    correlations: CorrelationTriple,
    pd_multiplier: f64,
    lgd_multiplier: f64,
    t_dof: f64,
    default_correlation: f64,
    slippage_multiplier: f64,
    cure_probability: f64,
}

impl ScenarioParameters {
    /// Starts a builder with the given id and display name.
    pub fn builder(
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> ScenarioParametersBuilder {
        ScenarioParametersBuilder::new(id, name)
    }

    /// Scenario identifier (catalog key).
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line description.
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Market drawdown severity in [0, 1].
    #[inline]
    pub fn market_drawdown(&self) -> f64 {
        self.market_drawdown
    }

    /// Multiplier on every asset's annualized volatility (> 0).
    #[inline]
    pub fn volatility_multiplier(&self) -> f64 {
        self.volatility_multiplier
    }

    /// Deterministic price-shock factor for an asset (1.0 if unset).
    #[inline]
    pub fn price_shock(&self, asset: AssetType) -> f64 {
        self.price_shocks.get(&asset).copied().unwrap_or(1.0)
    }

    /// Correlation overrides for the asset pairs.
    #[inline]
    pub fn correlations(&self) -> CorrelationTriple {
        self.correlations
    }

    /// Multiplier on stressed PDs (> 0).
    #[inline]
    pub fn pd_multiplier(&self) -> f64 {
        self.pd_multiplier
    }

    /// Multiplier on LGDs (> 0).
    #[inline]
    pub fn lgd_multiplier(&self) -> f64 {
        self.lgd_multiplier
    }

    /// Degrees of freedom of the default copula (> 0; lower ⇒ fatter
    /// tails).
    #[inline]
    pub fn t_dof(&self) -> f64 {
        self.t_dof
    }

    /// Default correlation ρ in [0, 1] shared by all borrowers.
    #[inline]
    pub fn default_correlation(&self) -> f64 {
        self.default_correlation
    }

    /// Multiplier on liquidation slippage (> 0).
    #[inline]
    pub fn slippage_multiplier(&self) -> f64 {
        self.slippage_multiplier
    }

    /// Probability in [0, 1] that a drawn default cures before loss.
    #[inline]
    pub fn cure_probability(&self) -> f64 {
        self.cure_probability
    }
}

/// Builder for [`ScenarioParameters`] with range validation at build time.
///
/// Defaults describe the unstressed market: no drawdown, unit multipliers,
/// typical crypto cross-correlations, near-normal copula tails.
#[derive(Clone, Debug)]
pub struct ScenarioParametersBuilder {
    id: String,
    name: String,
    description: String,
    market_drawdown: f64,
    volatility_multiplier: f64,
    price_shocks: BTreeMap<AssetType, f64>,
    correlations: CorrelationTriple,
    pd_multiplier: f64,
    lgd_multiplier: f64,
    t_dof: f64,
    default_correlation: f64,
    slippage_multiplier: f64,
    cure_probability: f64,
}

impl ScenarioParametersBuilder {
    fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            market_drawdown: 0.0,
            volatility_multiplier: 1.0,
            price_shocks: BTreeMap::new(),
            correlations: CorrelationTriple {
                ab: 0.85,
                ac: 0.75,
                bc: 0.80,
            },
            pd_multiplier: 1.0,
            lgd_multiplier: 1.0,
            t_dof: 30.0,
            default_correlation: 0.15,
            slippage_multiplier: 1.0,
            cure_probability: 0.10,
        }
    }

    /// Sets the one-line description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the market drawdown in [0, 1].
    pub fn market_drawdown(mut self, value: f64) -> Self {
        self.market_drawdown = value;
        self
    }

    /// Sets the volatility multiplier (> 0).
    pub fn volatility_multiplier(mut self, value: f64) -> Self {
        self.volatility_multiplier = value;
        self
    }

    /// Sets a deterministic price-shock factor for one asset (> 0).
    pub fn price_shock(mut self, asset: AssetType, factor: f64) -> Self {
        self.price_shocks.insert(asset, factor);
        self
    }

    /// Overrides the pairwise correlations.
    pub fn correlations(mut self, correlations: CorrelationTriple) -> Self {
        self.correlations = correlations;
        self
    }

    /// Sets the PD multiplier (> 0).
    pub fn pd_multiplier(mut self, value: f64) -> Self {
        self.pd_multiplier = value;
        self
    }

    /// Sets the LGD multiplier (> 0).
    pub fn lgd_multiplier(mut self, value: f64) -> Self {
        self.lgd_multiplier = value;
        self
    }

    /// Sets the t-copula degrees of freedom (> 0).
    pub fn t_dof(mut self, value: f64) -> Self {
        self.t_dof = value;
        self
    }

    /// Sets the default correlation in [0, 1].
    pub fn default_correlation(mut self, value: f64) -> Self {
        self.default_correlation = value;
        self
    }

    /// Sets the liquidation-slippage multiplier (> 0).
    pub fn slippage_multiplier(mut self, value: f64) -> Self {
        self.slippage_multiplier = value;
        self
    }

    /// Sets the cure probability in [0, 1].
    pub fn cure_probability(mut self, value: f64) -> Self {
        self.cure_probability = value;
        self
    }

    /// Builds the scenario, validating every range.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError` on the first out-of-range field.
    pub fn build(self) -> Result<ScenarioParameters, ScenarioError> {
        for (name, value) in [
            ("market_drawdown", self.market_drawdown),
            ("default_correlation", self.default_correlation),
            ("cure_probability", self.cure_probability),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ScenarioError::OutOfUnitRange { name, got: value });
            }
        }

        for (name, value) in [
            ("volatility_multiplier", self.volatility_multiplier),
            ("pd_multiplier", self.pd_multiplier),
            ("lgd_multiplier", self.lgd_multiplier),
            ("t_dof", self.t_dof),
            ("slippage_multiplier", self.slippage_multiplier),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ScenarioError::NonPositive { name, got: value });
            }
        }

        for (&asset, &factor) in &self.price_shocks {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(ScenarioError::NonPositive {
                    name: match asset {
                        AssetType::Btc => "price_shock[BTC]",
                        AssetType::Eth => "price_shock[ETH]",
                        AssetType::Sol => "price_shock[SOL]",
                    },
                    got: factor,
                });
            }
        }

        // Re-validate the triple even when set directly as struct fields.
        let correlations = CorrelationTriple::new(
            self.correlations.ab,
            self.correlations.ac,
            self.correlations.bc,
        )?;

        Ok(ScenarioParameters {
            id: self.id,
            name: self.name,
            description: self.description,
            market_drawdown: self.market_drawdown,
            volatility_multiplier: self.volatility_multiplier,
            price_shocks: self.price_shocks,
            correlations,
            pd_multiplier: self.pd_multiplier,
            lgd_multiplier: self.lgd_multiplier,
            t_dof: self.t_dof,
            default_correlation: self.default_correlation,
            slippage_multiplier: self.slippage_multiplier,
            cure_probability: self.cure_probability,
        })
    }
}
