//! Portfolio aggregate root.
//!
//! A portfolio owns its loans exclusively and carries the single
//! risk-capital pool. All portfolio-level metrics derive from iterating
//! its loans; pricing data lives outside.

use serde::{Deserialize, Serialize};

use crate::error::PortfolioError;
use crate::loan::{Loan, LoanId};

/// Ordered collection of loans plus a risk-capital amount.
///
/// Loan identifiers are unique; construction through
/// [`PortfolioBuilder`] enforces this.
///
/// # Examples
///
/// ```
/// use risk_model::portfolio::PortfolioBuilder;
///
/// let portfolio = PortfolioBuilder::new()
///     .risk_capital(5_000_000.0)
///     .build()
///     .unwrap();
///
/// assert!(portfolio.is_empty());
/// assert_eq!(portfolio.risk_capital(), 5_000_000.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    loans: Vec<Loan>,
    risk_capital: f64,
}

impl Portfolio {
    /// The loans, in insertion order.
    #[inline]
    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    /// Looks up a loan by id.
    pub fn loan(&self, id: &LoanId) -> Option<&Loan> {
        self.loans.iter().find(|l| l.id() == id)
    }

    /// Number of loans.
    #[inline]
    pub fn len(&self) -> usize {
        self.loans.len()
    }

    /// Whether the portfolio holds no loans.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }

    /// The risk-capital pool in USD.
    #[inline]
    pub fn risk_capital(&self) -> f64 {
        self.risk_capital
    }

    /// Sum of loan principals.
    pub fn total_principal(&self) -> f64 {
        self.loans.iter().map(|l| l.principal()).sum()
    }

    /// Returns a copy with the given loan replaced wholesale.
    ///
    /// Loans are immutable values; an edit produces a new portfolio. If no
    /// loan carries the id, the portfolio is returned unchanged.
    pub fn with_replaced_loan(&self, loan: Loan) -> Self {
        let mut loans = self.loans.clone();
        if let Some(slot) = loans.iter_mut().find(|l| l.id() == loan.id()) {
            *slot = loan;
        }
        Self {
            loans,
            risk_capital: self.risk_capital,
        }
    }
}

/// Builder for [`Portfolio`] with uniqueness and capital validation.
#[derive(Debug, Default)]
pub struct PortfolioBuilder {
    loans: Vec<Loan>,
    risk_capital: Option<f64>,
}

impl PortfolioBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a loan.
    pub fn add_loan(mut self, loan: Loan) -> Self {
        self.loans.push(loan);
        self
    }

    /// Sets the risk-capital amount.
    pub fn risk_capital(mut self, amount: f64) -> Self {
        self.risk_capital = Some(amount);
        self
    }

    /// Builds the portfolio.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::DuplicateLoanId` if two loans share an id,
    /// or `PortfolioError::InvalidRiskCapital` if the capital amount is
    /// missing, non-finite, or not positive.
    pub fn build(self) -> Result<Portfolio, PortfolioError> {
        let risk_capital = self.risk_capital.unwrap_or(f64::NAN);
        if !risk_capital.is_finite() || risk_capital <= 0.0 {
            return Err(PortfolioError::InvalidRiskCapital { got: risk_capital });
        }

        for (i, loan) in self.loans.iter().enumerate() {
            if self.loans[..i].iter().any(|other| other.id() == loan.id()) {
                return Err(PortfolioError::DuplicateLoanId {
                    id: loan.id().as_str().to_string(),
                });
            }
        }

        Ok(Portfolio {
            loans: self.loans,
            risk_capital,
        })
    }
}
