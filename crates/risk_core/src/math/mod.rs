//! Numerical routines shared by the risk model and the simulators.

pub mod correlation;
pub mod distributions;

pub use correlation::{CholeskyFactor3, CorrelationTriple};
pub use distributions::{ln_gamma, norm_cdf, norm_pdf, regularized_incomplete_beta, student_t_cdf};
