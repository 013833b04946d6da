//! Credit-rating tiers for borrowers.
//!
//! A deliberately small, closed set: the lending desk only originates
//! against three tiers. Each tier maps to a fixed base annual probability
//! of default; the invariant is that PD strictly decreases as credit
//! quality improves.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Borrower credit-rating tier, best quality first.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CreditRatingTier {
    /// High quality.
    Aa,
    /// Upper medium grade.
    A,
    /// Lower medium grade.
    Bbb,
}

impl CreditRatingTier {
    /// All tiers, best quality first.
    pub const ALL: [CreditRatingTier; 3] =
        [CreditRatingTier::Aa, CreditRatingTier::A, CreditRatingTier::Bbb];

    /// Base annual probability of default for the tier.
    ///
    /// Calibrated to crypto-lending scale rather than corporate-bond
    /// historical rates.
    pub fn base_annual_pd(&self) -> f64 {
        match self {
            CreditRatingTier::Aa => 0.01,
            CreditRatingTier::A => 0.03,
            CreditRatingTier::Bbb => 0.06,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            CreditRatingTier::Aa => "AA",
            CreditRatingTier::A => "A",
            CreditRatingTier::Bbb => "BBB",
        }
    }
}

impl fmt::Display for CreditRatingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pd_strictly_decreasing_with_quality() {
        // Ordering invariant: better tier, strictly lower PD.
        let pds: Vec<f64> = CreditRatingTier::ALL
            .iter()
            .map(|t| t.base_annual_pd())
            .collect();
        assert!(pds[0] < pds[1]);
        assert!(pds[1] < pds[2]);
    }

    #[test]
    fn test_pd_in_unit_interval() {
        for tier in CreditRatingTier::ALL {
            let pd = tier.base_annual_pd();
            assert!(pd > 0.0 && pd < 1.0);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(CreditRatingTier::Aa.label(), "AA");
        assert_eq!(CreditRatingTier::Bbb.to_string(), "BBB");
    }
}
