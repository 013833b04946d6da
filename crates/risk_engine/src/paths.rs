//! Single-asset price-path simulation for fan-chart visualization.
//!
//! Independent GBM paths with daily steps and no cross-asset correlation;
//! the single-asset use case does not need the correlated machinery.

use risk_core::assets::AssetType;

use crate::rng::SimRng;

/// Simulates independent daily GBM paths for one asset.
///
/// Each path has `horizon_days + 1` points, starting at `current_price`.
/// Volatility is the asset's unstressed annualized volatility; drift is
/// risk-neutral `−½σ²`.
///
/// # Examples
///
/// ```
/// use risk_core::assets::AssetType;
/// use risk_engine::paths::simulate_price_paths;
/// use risk_engine::rng::SimRng;
///
/// let mut rng = SimRng::from_seed(42);
/// let paths = simulate_price_paths(AssetType::Btc, 100_000.0, 30, 50, &mut rng);
/// assert_eq!(paths.len(), 50);
/// assert_eq!(paths[0].len(), 31);
/// assert_eq!(paths[0][0], 100_000.0);
/// ```
pub fn simulate_price_paths(
    asset: AssetType,
    current_price: f64,
    horizon_days: u32,
    n_paths: usize,
    rng: &mut SimRng,
) -> Vec<Vec<f64>> {
    let sigma = asset
        .risk_characteristics()
        .annual_volatility(asset.base_volatility());
    let dt = 1.0 / 365.0;
    let drift = -0.5 * sigma * sigma * dt;
    let vol_step = sigma * dt.sqrt();

    (0..n_paths)
        .map(|_| {
            let mut path = Vec::with_capacity(horizon_days as usize + 1);
            let mut price = current_price;
            path.push(price);
            for _ in 0..horizon_days {
                price *= (drift + vol_step * rng.gen_normal()).exp();
                path.push(price);
            }
            path
        })
        .collect()
}
