//! # Error Types
//!
//! Domain-specific error types for glazing-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  glazing-core errors (this file)                                       │
//! │  ├── CoreError        - Pricing failures                               │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  glazing-quote errors (separate crate)                                 │
//! │  └── QuoteError       - Quote assembly, config, parity failures        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → QuoteError → caller               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! Negative effective dimensions and profile discounts larger than the
//! glass are clamped to zero by the calculators. They never surface here.

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Pricing errors.
///
/// A price calculation either fully succeeds or fails with one of these;
/// there is no partial result.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A monetary value could not be parsed as a decimal.
    ///
    /// ## When This Occurs
    /// - Catalog price stored as free text ("12,50", "abc")
    /// - NaN or infinite float handed over from a form field
    #[error("Invalid money value: {0}")]
    InvalidMoneyValue(String),

    /// Margin percentage outside `[0, 100)`.
    ///
    /// ## Why 100 Is Rejected
    /// ```text
    /// sales_price = cost / (1 - margin / 100)
    ///                      └── margin = 100 → division by zero
    /// ```
    #[error("Margin percentage must be in [0, 100), got {margin}")]
    MarginOutOfRange { margin: Decimal },

    /// A decimal division had a zero divisor.
    #[error("Division by zero while computing {context}")]
    DivisionByZero { context: String },

    /// A result left the decimal range (about ±7.9 × 10²⁸).
    ///
    /// ## When This Occurs
    /// - Placeholder catalog price such as `Decimal::MAX` times a real area
    /// - Margin a hair below 100 applied to an already large cost
    #[error("Arithmetic overflow while computing {context}")]
    Overflow { context: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any calculation runs, so a failing line item never
/// produces a half-computed breakdown.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: Decimal,
        max: Decimal,
    },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::MarginOutOfRange {
            margin: Decimal::from(100),
        };
        assert_eq!(
            err.to_string(),
            "Margin percentage must be in [0, 100), got 100"
        );

        let err = CoreError::InvalidMoneyValue("abc".to_string());
        assert_eq!(err.to_string(), "Invalid money value: abc");

        let err = CoreError::Overflow {
            context: "glass cost".to_string(),
        };
        assert_eq!(err.to_string(), "Arithmetic overflow while computing glass cost");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: Decimal::ONE,
            max: Decimal::from(999),
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");

        let err = ValidationError::MustBeNonNegative {
            field: "profile discount width".to_string(),
        };
        assert_eq!(err.to_string(), "profile discount width must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "glass type".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
