//! Named scenario catalog.
//!
//! The standard catalog is an ordinary value built once at startup and
//! passed to whoever needs it; custom scenarios are registered explicitly
//! on a catalog instance. There is deliberately no process-wide registry.
//!
//! Registration performs only the type/range validation the parameter
//! builder already applies; nothing checks that a custom scenario is
//! economically sensible. Known gap, accepted: the scenario editor is a
//! power-user surface.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use risk_core::assets::AssetType;
use risk_core::math::CorrelationTriple;

use crate::params::ScenarioParameters;

/// Registry of named stress scenarios.
///
/// # Examples
///
/// ```
/// use risk_scenario::ScenarioCatalog;
///
/// let catalog = ScenarioCatalog::standard();
/// assert!(catalog.get("severe-bear").is_some());
/// assert!(catalog.ids().count() >= 5);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScenarioCatalog {
    entries: BTreeMap<String, ScenarioParameters>,
}

impl ScenarioCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard catalog of named stress scenarios.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for scenario in standard_scenarios() {
            catalog.register(scenario);
        }
        catalog
    }

    /// Looks up a scenario by id.
    pub fn get(&self, id: &str) -> Option<&ScenarioParameters> {
        self.entries.get(id)
    }

    /// Iterates scenario ids in lexicographic order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered scenarios.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registers a scenario, overwriting any existing entry with the same
    /// id. Returns the previous entry if one was replaced.
    pub fn register(&mut self, scenario: ScenarioParameters) -> Option<ScenarioParameters> {
        self.entries.insert(scenario.id().to_string(), scenario)
    }

    /// Averages scalar stress fields across the selected scenarios.
    ///
    /// Ids not present in the catalog are skipped; returns `None` when no
    /// selected id resolves.
    pub fn compare(&self, ids: &[&str]) -> Option<ScenarioComparison> {
        let selected: Vec<&ScenarioParameters> =
            ids.iter().filter_map(|id| self.get(id)).collect();
        if selected.is_empty() {
            return None;
        }

        let n = selected.len() as f64;
        let avg = |f: fn(&ScenarioParameters) -> f64| {
            selected.iter().map(|s| f(s)).sum::<f64>() / n
        };

        Some(ScenarioComparison {
            scenario_count: selected.len(),
            avg_market_drawdown: avg(|s| s.market_drawdown()),
            avg_volatility_multiplier: avg(|s| s.volatility_multiplier()),
            avg_pd_multiplier: avg(|s| s.pd_multiplier()),
            avg_lgd_multiplier: avg(|s| s.lgd_multiplier()),
            avg_default_correlation: avg(|s| s.default_correlation()),
        })
    }
}

/// Scalar-field averages across a scenario selection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    /// Number of scenarios that contributed.
    pub scenario_count: usize,
    /// Average market drawdown.
    pub avg_market_drawdown: f64,
    /// Average volatility multiplier.
    pub avg_volatility_multiplier: f64,
    /// Average PD multiplier.
    pub avg_pd_multiplier: f64,
    /// Average LGD multiplier.
    pub avg_lgd_multiplier: f64,
    /// Average default correlation.
    pub avg_default_correlation: f64,
}

fn standard_scenarios() -> Vec<ScenarioParameters> {
    // Builders cannot fail here: every literal below is in range. The
    // expects document that contract rather than guard a runtime path.
    vec![
        ScenarioParameters::builder("baseline", "Baseline")
            .description("Current market conditions, no stress applied")
            .build()
            .expect("baseline literals in range"),
        ScenarioParameters::builder("moderate-correction", "Moderate Correction")
            .description("A 20% drawdown with elevated volatility and tighter coupling")
            .market_drawdown(0.20)
            .volatility_multiplier(1.5)
            .price_shock(AssetType::Btc, 0.85)
            .price_shock(AssetType::Eth, 0.80)
            .price_shock(AssetType::Sol, 0.75)
            .correlations(CorrelationTriple {
                ab: 0.90,
                ac: 0.85,
                bc: 0.88,
            })
            .pd_multiplier(1.5)
            .lgd_multiplier(1.10)
            .t_dof(10.0)
            .default_correlation(0.30)
            .slippage_multiplier(1.2)
            .cure_probability(0.08)
            .build()
            .expect("moderate-correction literals in range"),
        ScenarioParameters::builder("severe-bear", "Severe Bear Market")
            .description("A 45% drawdown, fat-tailed defaults, stressed liquidity")
            .market_drawdown(0.45)
            .volatility_multiplier(2.0)
            .price_shock(AssetType::Btc, 0.60)
            .price_shock(AssetType::Eth, 0.55)
            .price_shock(AssetType::Sol, 0.45)
            .correlations(CorrelationTriple {
                ab: 0.93,
                ac: 0.90,
                bc: 0.92,
            })
            .pd_multiplier(2.5)
            .lgd_multiplier(1.25)
            .t_dof(6.0)
            .default_correlation(0.45)
            .slippage_multiplier(1.5)
            .cure_probability(0.05)
            .build()
            .expect("severe-bear literals in range"),
        ScenarioParameters::builder("crypto-winter", "Crypto Winter")
            .description("A prolonged 70% drawdown with highly clustered defaults")
            .market_drawdown(0.70)
            .volatility_multiplier(2.5)
            .price_shock(AssetType::Btc, 0.35)
            .price_shock(AssetType::Eth, 0.30)
            .price_shock(AssetType::Sol, 0.20)
            .correlations(CorrelationTriple {
                ab: 0.95,
                ac: 0.93,
                bc: 0.94,
            })
            .pd_multiplier(4.0)
            .lgd_multiplier(1.40)
            .t_dof(4.0)
            .default_correlation(0.60)
            .slippage_multiplier(2.0)
            .cure_probability(0.02)
            .build()
            .expect("crypto-winter literals in range"),
        ScenarioParameters::builder("flash-crash", "Flash Crash")
            .description("A violent short-lived crash: extreme vol, near-comonotone assets")
            .market_drawdown(0.35)
            .volatility_multiplier(3.5)
            .price_shock(AssetType::Btc, 0.70)
            .price_shock(AssetType::Eth, 0.65)
            .price_shock(AssetType::Sol, 0.55)
            .correlations(CorrelationTriple {
                ab: 0.97,
                ac: 0.96,
                bc: 0.96,
            })
            .pd_multiplier(2.0)
            .lgd_multiplier(1.30)
            .t_dof(3.0)
            .default_correlation(0.55)
            .slippage_multiplier(2.5)
            .cure_probability(0.15)
            .build()
            .expect("flash-crash literals in range"),
        ScenarioParameters::builder("liquidity-crunch", "Liquidity Crunch")
            .description("Moderate drawdown but punishing exit costs on forced unwinds")
            .market_drawdown(0.30)
            .volatility_multiplier(2.2)
            .price_shock(AssetType::Btc, 0.75)
            .price_shock(AssetType::Eth, 0.70)
            .price_shock(AssetType::Sol, 0.60)
            .correlations(CorrelationTriple {
                ab: 0.90,
                ac: 0.88,
                bc: 0.89,
            })
            .pd_multiplier(1.8)
            .lgd_multiplier(1.50)
            .t_dof(5.0)
            .default_correlation(0.50)
            .slippage_multiplier(3.0)
            .cure_probability(0.05)
            .build()
            .expect("liquidity-crunch literals in range"),
    ]
}
