//! Pairwise correlation structure for the collateral universe.
//!
//! Given independent standard normals `Z = [Z1, Z2, Z3]`, correlated shocks
//! `W = L * Z` are produced with a lower-triangular factor `L` built from
//! the three pairwise correlations:
//!
//! ```text
//! L11 = 1
//! L21 = ρ_AB          L22 = sqrt(1 − ρ_AB²)
//! L31 = ρ_AC          L32 = (ρ_BC − ρ_AB·ρ_AC) / L22
//! L33 = sqrt(max(0, 1 − ρ_AC² − L32²))
//! ```
//!
//! The `max(0, ·)` guard on the last diagonal is a numerical-stability
//! clamp: a caller-supplied correlation triple need not be jointly
//! consistent (positive semi-definite), and an inconsistent triple would
//! otherwise force a negative radicand. Clamping degrades gracefully to
//! the nearest realizable structure instead of rejecting the scenario.

use num_traits::Float;

use crate::error::CorrelationError;

/// Correlations below this leave too little idiosyncratic variance in the
/// second column to divide by; the third column then collapses onto the
/// shared factor (comonotone limit).
const DEGENERATE_L22: f64 = 1e-12;

/// Validated pairwise correlations for a 3-asset universe.
///
/// Field order follows the asset order (A, B, C) = (BTC, ETH, SOL).
/// Each value must lie in [-1, 1]; practically the crypto pairs live in
/// [0, 1].
///
/// # Examples
///
/// ```
/// use risk_core::math::CorrelationTriple;
///
/// let corr = CorrelationTriple::new(0.85, 0.75, 0.80).unwrap();
/// let l = corr.cholesky();
/// let w = l.transform([1.0, 0.0, 0.0]);
/// assert!((w[1] - 0.85).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CorrelationTriple {
    /// Correlation between assets A and B (BTC–ETH).
    pub ab: f64,
    /// Correlation between assets A and C (BTC–SOL).
    pub ac: f64,
    /// Correlation between assets B and C (ETH–SOL).
    pub bc: f64,
}

impl CorrelationTriple {
    /// Creates a validated correlation triple.
    ///
    /// # Errors
    ///
    /// Returns `CorrelationError::OutOfRange` if any value is outside
    /// [-1, 1] or not finite. Joint consistency of the triple is NOT
    /// checked here; see [`CorrelationTriple::cholesky`].
    pub fn new(ab: f64, ac: f64, bc: f64) -> Result<Self, CorrelationError> {
        for (name, value) in [("ab", ab), ("ac", ac), ("bc", bc)] {
            if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
                return Err(CorrelationError::OutOfRange { name, got: value });
            }
        }
        Ok(Self { ab, ac, bc })
    }

    /// The identity triple: fully independent shocks.
    pub fn independent() -> Self {
        Self {
            ab: 0.0,
            ac: 0.0,
            bc: 0.0,
        }
    }

    /// Builds the lower-triangular shock transform.
    ///
    /// Inconsistent triples are stability-clamped, never rejected: the
    /// `max(0, ·)` guard zeroes the third diagonal when the radicand goes
    /// negative, and a degenerate second diagonal (|ρ_AB| = 1) collapses
    /// the third column onto the shared factor.
    pub fn cholesky(&self) -> CholeskyFactor3 {
        let l21 = self.ab;
        let l22 = (1.0 - self.ab * self.ab).max(0.0).sqrt();
        let l31 = self.ac;
        let l32 = if l22 > DEGENERATE_L22 {
            (self.bc - self.ab * self.ac) / l22
        } else {
            // Comonotone limit: B is a copy of A, so the BC correlation is
            // already carried entirely by the shared factor.
            0.0
        };
        // Stability clamp for inconsistent correlation triples.
        let l33 = (1.0 - self.ac * self.ac - l32 * l32).max(0.0).sqrt();

        CholeskyFactor3 {
            rows: [[1.0, 0.0, 0.0], [l21, l22, 0.0], [l31, l32, l33]],
        }
    }
}

/// Lower-triangular factor produced by [`CorrelationTriple::cholesky`].
///
/// Transforms independent standard normals into shocks carrying the target
/// pairwise correlation structure (up to the stability clamp).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CholeskyFactor3 {
    rows: [[f64; 3]; 3],
}

impl CholeskyFactor3 {
    /// Element at (i, j); zero above the diagonal.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.rows[i][j]
    }

    /// Transforms independent standard normals into correlated shocks.
    ///
    /// Computes `W = L * Z`.
    #[inline]
    pub fn transform(&self, z: [f64; 3]) -> [f64; 3] {
        [
            self.rows[0][0] * z[0],
            self.rows[1][0] * z[0] + self.rows[1][1] * z[1],
            self.rows[2][0] * z[0] + self.rows[2][1] * z[1] + self.rows[2][2] * z[2],
        ]
    }

    /// Generic slice transform for callers with more than three factors
    /// per draw buffered contiguously.
    ///
    /// # Panics
    ///
    /// Panics if `z.len() < 3` (contract violation, not a market
    /// condition).
    pub fn transform_slice<T: Float>(&self, z: &[T]) -> [T; 3] {
        assert!(z.len() >= 3, "need at least 3 independent normals");
        let get = |i: usize, j: usize| T::from(self.rows[i][j]).unwrap();
        [
            get(0, 0) * z[0],
            get(1, 0) * z[0] + get(1, 1) * z[1],
            get(2, 0) * z[0] + get(2, 1) * z[1] + get(2, 2) * z[2],
        ]
    }
}
