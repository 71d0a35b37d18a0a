//! Error types for bond operations.

use bondcalc_math::MathError;
use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur while building or valuing a bond.
///
/// Every failure is reported through one of these variants; analytics never
/// fall back to `NaN`, infinity or zero to signal a problem.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// The static bond terms violate an invariant.
    #[error("Invalid bond terms: {reason}")]
    InvalidTerms {
        /// Description of what's invalid.
        reason: String,
    },

    /// A discount factor or normalising denominator is degenerate.
    #[error("Domain error: {reason}")]
    Domain {
        /// Description of the degenerate input.
        reason: String,
    },

    /// Yield-to-maturity root finding failed.
    #[error("Root finding failed: {reason}")]
    RootFind {
        /// Description of the failure.
        reason: String,
    },
}

impl BondError {
    /// Creates an invalid terms error.
    #[must_use]
    pub fn invalid_terms(reason: impl Into<String>) -> Self {
        Self::InvalidTerms {
            reason: reason.into(),
        }
    }

    /// Creates a domain error.
    #[must_use]
    pub fn domain(reason: impl Into<String>) -> Self {
        Self::Domain {
            reason: reason.into(),
        }
    }

    /// Creates a root finding error.
    #[must_use]
    pub fn root_find(reason: impl Into<String>) -> Self {
        Self::RootFind {
            reason: reason.into(),
        }
    }

    /// Returns true for [`BondError::Domain`].
    #[must_use]
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }

    /// Returns true for [`BondError::InvalidTerms`].
    #[must_use]
    pub fn is_invalid_terms(&self) -> bool {
        matches!(self, Self::InvalidTerms { .. })
    }

    /// Returns true for [`BondError::RootFind`].
    #[must_use]
    pub fn is_root_find(&self) -> bool {
        matches!(self, Self::RootFind { .. })
    }
}

impl From<MathError> for BondError {
    fn from(err: MathError) -> Self {
        Self::root_find(err.to_string())
    }
}
