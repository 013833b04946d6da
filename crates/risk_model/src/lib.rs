//! # Risk Model (L2: Business Types)
//!
//! Loan portfolio data model and the pure risk-metric functions computed
//! over it.
//!
//! This crate provides:
//! - `Loan` and `Portfolio` value types with validating builders
//! - Loan-level metrics: LTV, margin status, wrong-way-risk stressed PD,
//!   LGD, expected loss, margin-event probabilities
//! - Portfolio-level aggregation: exposure/collateral/expected-loss sums,
//!   aggregate LTV, concentration (per-asset shares and HHI), and
//!   risk-adjusted return ratios
//!
//! ## Design Principles
//!
//! - **Immutable records**: a loan is replaced wholesale on edit, never
//!   partially mutated; the portfolio is the single owner of its loans
//! - **Pure functions**: every metric is deterministic in its inputs; no
//!   randomness, no clocks, no I/O
//! - **Clamps over throws**: extreme market inputs produce clamped or
//!   sentinel outputs (PD capped at 1, LTV = +∞ on zero collateral),
//!   never mid-calculation failures

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod loan;
pub mod metrics;
pub mod portfolio;

pub use error::{LoanError, ModelError, PortfolioError};
pub use loan::{Loan, LoanId, LoanTerms};
pub use metrics::{
    compute_loan_metrics, expected_loss, horizon_pd, loan_to_value, loss_given_default,
    margin_event_probabilities, margin_event_probability, margin_status, stressed_pd,
    LoanMetrics, MarginEventKind, MarginEventProbabilities, MarginStatus, LGD_FLOOR,
};
pub use portfolio::{Portfolio, PortfolioBuilder};
