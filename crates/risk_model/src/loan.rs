//! Loan value type.
//!
//! A loan is an immutable record: edits replace the whole value, never a
//! field. The portfolio holding it is the single owner.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use risk_core::assets::CollateralAsset;
use risk_core::rating::CreditRatingTier;

use crate::error::LoanError;

/// Unique loan identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LoanId(String);

impl LoanId {
    /// Creates a loan identifier.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LoanId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for LoanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Economic terms of a loan.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Principal amount in USD.
    pub principal: f64,
    /// Annual lending rate (e.g. 0.12 for 12%).
    pub annual_rate: f64,
    /// Tenor in days.
    pub tenor_days: u32,
    /// Next roll date.
    pub roll_date: NaiveDate,
}

impl LoanTerms {
    /// Creates validated loan terms.
    ///
    /// # Errors
    ///
    /// Returns `LoanError` if the principal is not positive/finite, the
    /// rate is negative or non-finite, or the tenor is zero.
    pub fn new(
        principal: f64,
        annual_rate: f64,
        tenor_days: u32,
        roll_date: NaiveDate,
    ) -> Result<Self, LoanError> {
        if !principal.is_finite() || principal <= 0.0 {
            return Err(LoanError::InvalidPrincipal { got: principal });
        }
        if !annual_rate.is_finite() || annual_rate < 0.0 {
            return Err(LoanError::InvalidRate { got: annual_rate });
        }
        if tenor_days == 0 {
            return Err(LoanError::ZeroTenor);
        }
        Ok(Self {
            principal,
            annual_rate,
            tenor_days,
            roll_date,
        })
    }
}

/// A crypto-collateralized loan.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use risk_core::assets::{AssetType, CollateralAsset};
/// use risk_core::rating::CreditRatingTier;
/// use risk_model::loan::{Loan, LoanId, LoanTerms};
///
/// let terms = LoanTerms::new(
///     1_000_000.0,
///     0.12,
///     90,
///     NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
/// )
/// .unwrap();
/// let collateral = CollateralAsset::new(AssetType::Btc, 10.0).unwrap();
///
/// let loan = Loan::new(
///     LoanId::new("L-001"),
///     "Meridian Capital",
///     CreditRatingTier::A,
///     terms,
///     collateral,
///     2.0,
///     NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(loan.principal(), 1_000_000.0);
/// // principal × rate / 365
/// assert!((loan.daily_interest() - 1_000_000.0 * 0.12 / 365.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    id: LoanId,
    borrower: String,
    rating: CreditRatingTier,
    terms: LoanTerms,
    collateral: CollateralAsset,
    leverage: f64,
    origination_date: NaiveDate,
}

impl Loan {
    /// Creates a loan.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique loan identifier
    /// * `borrower` - Borrower display name
    /// * `rating` - Borrower credit-rating tier
    /// * `terms` - Economic terms (already validated)
    /// * `collateral` - Collateral position (already validated)
    /// * `leverage` - Counterparty leverage ratio (drives wrong-way risk)
    /// * `origination_date` - Origination date
    ///
    /// # Errors
    ///
    /// Returns `LoanError::InvalidLeverage` for negative or non-finite
    /// leverage.
    pub fn new(
        id: LoanId,
        borrower: impl Into<String>,
        rating: CreditRatingTier,
        terms: LoanTerms,
        collateral: CollateralAsset,
        leverage: f64,
        origination_date: NaiveDate,
    ) -> Result<Self, LoanError> {
        if !leverage.is_finite() || leverage < 0.0 {
            return Err(LoanError::InvalidLeverage { got: leverage });
        }
        Ok(Self {
            id,
            borrower: borrower.into(),
            rating,
            terms,
            collateral,
            leverage,
            origination_date,
        })
    }

    /// The loan identifier.
    #[inline]
    pub fn id(&self) -> &LoanId {
        &self.id
    }

    /// The borrower name.
    #[inline]
    pub fn borrower(&self) -> &str {
        &self.borrower
    }

    /// The borrower's credit-rating tier.
    #[inline]
    pub fn rating(&self) -> CreditRatingTier {
        self.rating
    }

    /// The loan terms.
    #[inline]
    pub fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    /// The principal amount in USD.
    #[inline]
    pub fn principal(&self) -> f64 {
        self.terms.principal
    }

    /// The collateral position.
    #[inline]
    pub fn collateral(&self) -> &CollateralAsset {
        &self.collateral
    }

    /// The counterparty leverage ratio.
    #[inline]
    pub fn leverage(&self) -> f64 {
        self.leverage
    }

    /// The origination date.
    #[inline]
    pub fn origination_date(&self) -> NaiveDate {
        self.origination_date
    }

    /// Daily interest revenue: principal × annual rate / 365.
    #[inline]
    pub fn daily_interest(&self) -> f64 {
        self.terms.principal * self.terms.annual_rate / 365.0
    }

    /// USD collateral value at the given unit price.
    #[inline]
    pub fn collateral_value(&self, price: f64) -> f64 {
        self.collateral.value_usd(price)
    }
}
