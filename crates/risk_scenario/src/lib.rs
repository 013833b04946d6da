//! # Risk Scenario (L2: Stress Parameterizations)
//!
//! Named stress configurations consumed by the simulation engine.
//!
//! This crate provides:
//! - `ScenarioParameters`: an immutable, validated stress configuration
//! - `ScenarioCatalog`: a fixed set of named scenarios plus runtime
//!   registration of custom ones
//! - `ScenarioComparison`: scalar-field averaging across selected
//!   scenarios for summary displays
//!
//! ## Design Principles
//!
//! - **No process-wide singleton**: the catalog is an ordinary value
//!   constructed at startup and passed explicitly, so tests run in
//!   isolation with independent catalogs
//! - **Pure data**: no randomness, no side effects beyond registry
//!   mutation through `register`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod catalog;
pub mod params;

pub use catalog::{ScenarioCatalog, ScenarioComparison};
pub use params::{ScenarioError, ScenarioParameters, ScenarioParametersBuilder};
