//! Distribution functions.
//!
//! This module provides:
//! - `norm_cdf` / `norm_pdf`: standard normal CDF and PDF
//! - `ln_gamma`: natural log of the gamma function
//! - `regularized_incomplete_beta`: I_x(a, b) via continued fraction
//! - `student_t_cdf`: Student-t CDF built on the incomplete beta function
//!
//! The normal functions are generic over `T: Float` to support both `f64`
//! and `f32`. The Student-t machinery is `f64`: it backs the default
//! copula's uniform transform, where ~1e-6 accuracy matters and the tail
//! behaviour is the entire point of using a t-distribution at all.

use num_traits::Float;

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Complementary error function approximation using Horner's method.
///
/// Uses the Abramowitz and Stegun approximation (formula 7.1.26) which
/// provides maximum error of 1.5e-7 for all x.
#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let one = T::one();
    let zero = T::zero();

    // For negative x, use erfc(-x) = 2 - erfc(x)
    let abs_x = x.abs();

    // Abramowitz and Stegun constants (7.1.26)
    let a1 = T::from(0.254829592).unwrap();
    let a2 = T::from(-0.284496736).unwrap();
    let a3 = T::from(1.421413741).unwrap();
    let a4 = T::from(-1.453152027).unwrap();
    let a5 = T::from(1.061405429).unwrap();
    let p = T::from(0.3275911).unwrap();

    // t = 1 / (1 + p * |x|)
    let t = one / (one + p * abs_x);

    // Horner's method for polynomial evaluation
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));

    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    let two = T::from(2.0).unwrap();
    if x < zero {
        two - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1) using the complementary error
/// function: Φ(x) = (1/2) * erfc(-x / sqrt(2)).
///
/// # Accuracy
///
/// Accurate to at least 1e-7 for all finite x values.
///
/// # Examples
/// ```
/// use risk_core::math::norm_cdf;
///
/// let cdf_0 = norm_cdf(0.0_f64);
/// assert!((cdf_0 - 0.5).abs() < 1e-7);
///
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let sqrt_2 = T::from(SQRT_2).unwrap();
    let half = T::from(0.5).unwrap();

    let arg = -x / sqrt_2;

    half * erfc_approx(arg)
}

/// Standard normal probability density function.
///
/// Computes φ(x) = (1 / sqrt(2π)) * exp(-x² / 2).
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap();
    let half = T::from(0.5).unwrap();

    let exponent = -half * x * x;

    frac_1_sqrt_2pi * exponent.exp()
}

/// Natural log of the gamma function.
///
/// Lanczos approximation (g = 7, n = 9), accurate to ~1e-13 over the
/// positive reals. Valid for `x > 0`.
pub fn ln_gamma(x: f64) -> f64 {
    // Lanczos coefficients for g = 7
    const COEFFS: [f64; 9] = [
        0.999_999_999_999_809_93,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_13,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x < 0.5 {
        // Reflection formula: Γ(x)Γ(1-x) = π / sin(πx)
        let pi = std::f64::consts::PI;
        return pi.ln() - (pi * x).sin().ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let mut acc = COEFFS[0];
    for (i, &c) in COEFFS.iter().enumerate().skip(1) {
        acc += c / (x + i as f64);
    }

    let t = x + 7.5;
    let half_ln_2pi = 0.918_938_533_204_672_7; // 0.5 * ln(2π)
    half_ln_2pi + (x + 0.5) * t.ln() - t + acc.ln()
}

/// Maximum iterations for the incomplete-beta continued fraction.
const BETACF_MAX_ITER: usize = 200;

/// Convergence tolerance for the continued fraction.
const BETACF_EPS: f64 = 1e-14;

/// Smallest representable scale used to guard divisions in Lentz's method.
const BETACF_FPMIN: f64 = 1e-300;

/// Continued-fraction evaluation of the incomplete beta function.
///
/// Modified Lentz's method. Converges rapidly for
/// `x < (a + 1) / (a + b + 2)`; callers use the symmetry relation for the
/// other half of the domain.
fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < BETACF_FPMIN {
        d = BETACF_FPMIN;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=BETACF_MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        // Even step
        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < BETACF_FPMIN {
            d = BETACF_FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < BETACF_FPMIN {
            c = BETACF_FPMIN;
        }
        d = 1.0 / d;
        h *= d * c;

        // Odd step
        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < BETACF_FPMIN {
            d = BETACF_FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < BETACF_FPMIN {
            c = BETACF_FPMIN;
        }
        d = 1.0 / d;
        let del = d * c;
        h *= del;

        if (del - 1.0).abs() < BETACF_EPS {
            break;
        }
    }

    h
}

/// Regularized incomplete beta function I_x(a, b).
///
/// Computed via the continued-fraction expansion, using the symmetry
/// relation `I_x(a, b) = 1 - I_{1-x}(b, a)` to stay in the rapidly
/// converging half of the domain.
///
/// Inputs outside `(0, 1)` saturate to the distribution limits: `x <= 0`
/// returns 0, `x >= 1` returns 1. Requires `a > 0` and `b > 0`.
///
/// # Accuracy
///
/// Better than 1e-10 across the unit interval for moderate (a, b);
/// comfortably inside the ~1e-6 the default copula requires.
///
/// # Examples
/// ```
/// use risk_core::math::regularized_incomplete_beta;
///
/// // I_x(1, 1) is the identity
/// let v = regularized_incomplete_beta(1.0, 1.0, 0.3);
/// assert!((v - 0.3).abs() < 1e-12);
/// ```
pub fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // Prefactor: x^a * (1-x)^b / (a * B(a, b)), computed in log space
    let ln_bt = ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln();
    let bt = ln_bt.exp();

    if x < (a + 1.0) / (a + b + 2.0) {
        bt * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - bt * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

/// Student-t cumulative distribution function with `dof` degrees of freedom.
///
/// Uses the standard incomplete-beta identity: for t >= 0,
/// ```text
/// F(t) = 1 - (1/2) * I_x(ν/2, 1/2),   x = ν / (ν + t²)
/// ```
/// and symmetry `F(-t) = 1 - F(t)`.
///
/// `dof` may be fractional; it must be positive. Lower `dof` means fatter
/// tails: `student_t_cdf(-3.0, 3.0)` is an order of magnitude larger than
/// `norm_cdf(-3.0)`, which is exactly the clustering the default copula
/// relies on.
///
/// # Examples
/// ```
/// use risk_core::math::student_t_cdf;
///
/// // Symmetric around zero
/// assert!((student_t_cdf(0.0, 5.0) - 0.5).abs() < 1e-12);
///
/// // Fatter left tail than the normal at low dof
/// let t_tail = student_t_cdf(-3.0, 3.0);
/// assert!(t_tail > 0.02 && t_tail < 0.04);
/// ```
pub fn student_t_cdf(t: f64, dof: f64) -> f64 {
    debug_assert!(dof > 0.0, "degrees of freedom must be positive");

    if t.is_nan() {
        return f64::NAN;
    }
    if t == 0.0 {
        return 0.5;
    }

    let x = dof / (dof + t * t);
    let half_tail = 0.5 * regularized_incomplete_beta(0.5 * dof, 0.5, x);

    if t > 0.0 {
        1.0 - half_tail
    } else {
        half_tail
    }
}
