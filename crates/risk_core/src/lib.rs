//! # Risk Core (L1: Foundation)
//!
//! Numerical foundations and the collateral universe for vaultrisk.
//!
//! This crate provides:
//! - Distribution functions (standard normal CDF/PDF, Student-t CDF via the
//!   regularized incomplete beta function)
//! - Pairwise correlation structure and its lower-triangular shock transform
//! - The closed collateral-asset universe with per-asset margin policies and
//!   risk characteristics
//! - Credit-rating tiers with base annual default probabilities
//! - Validated market-price snapshots
//!
//! ## Design Principles
//!
//! - **Closed enums** for the asset universe and rating tiers; per-asset
//!   policy data lives with the enum, not scattered across callers
//! - **Fail fast at construction** for contract violations (negative
//!   quantity, non-finite price, out-of-range correlation)
//! - **Sentinels and clamps, not panics**, for numerical degeneracies

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod assets;
pub mod error;
pub mod math;
pub mod prices;
pub mod rating;

pub use assets::{AssetType, CollateralAsset, MarginPolicy, RiskCharacteristics};
pub use error::{AssetError, CorrelationError, PriceError};
pub use prices::CurrentPrices;
pub use rating::CreditRatingTier;
