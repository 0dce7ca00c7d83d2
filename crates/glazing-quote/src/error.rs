//! # Quote Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Quote Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Quote state   │  │     Pricing             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  ItemNotFound   │  │  Pricing (CoreError)    │ │
//! │  │  ConfigLoad...  │  │  QuoteTooLarge  │  │  Validation             │ │
//! │  │  ConfigSave...  │  │  QuoteExpired   │  │  PriceMismatch          │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use glazing_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for quote operations.
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Errors raised while assembling a quote.
#[derive(Debug, Error)]
pub enum QuoteError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid quote configuration.
    #[error("Invalid quote configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Quote State Errors
    // =========================================================================
    /// No item with this id in the quote.
    #[error("Quote item not found: {0}")]
    ItemNotFound(String),

    /// The quote already holds the maximum number of items.
    #[error("Quote cannot have more than {max} items")]
    QuoteTooLarge { max: usize },

    /// The quote is past its validity date and can no longer change.
    #[error("Quote {quote_id} expired on {valid_until}")]
    QuoteExpired {
        quote_id: String,
        valid_until: String,
    },

    // =========================================================================
    // Pricing Errors
    // =========================================================================
    /// The pricing engine rejected the line.
    #[error("Pricing failed: {0}")]
    Pricing(#[from] CoreError),

    /// Input rejected before pricing (e.g. window outside the model range).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Browser preview and server disagree on a displayed figure.
    #[error("Price mismatch on {field}: preview {preview}, server {server}")]
    PriceMismatch {
        field: String,
        preview: String,
        server: String,
    },
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for QuoteError {
    fn from(err: std::io::Error) -> Self {
        QuoteError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for QuoteError {
    fn from(err: toml::de::Error) -> Self {
        QuoteError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for QuoteError {
    fn from(err: toml::ser::Error) -> Self {
        QuoteError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl QuoteError {
    /// Returns true if the caller should show the error next to a form
    /// field rather than as a system failure.
    pub fn is_user_input_error(&self) -> bool {
        matches!(
            self,
            QuoteError::Validation(_)
                | QuoteError::Pricing(CoreError::Validation(_))
                | QuoteError::Pricing(CoreError::MarginOutOfRange { .. })
                | QuoteError::Pricing(CoreError::InvalidMoneyValue(_))
                | QuoteError::QuoteTooLarge { .. }
        )
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            QuoteError::InvalidConfig(_)
                | QuoteError::ConfigLoadFailed(_)
                | QuoteError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QuoteError::PriceMismatch {
            field: "unit price".into(),
            preview: "407.65".into(),
            server: "407.64".into(),
        };
        assert_eq!(
            err.to_string(),
            "Price mismatch on unit price: preview 407.65, server 407.64"
        );
    }

    #[test]
    fn test_categories() {
        let validation: QuoteError = ValidationError::Required {
            field: "model".into(),
        }
        .into();
        assert!(validation.is_user_input_error());
        assert!(!validation.is_config_error());

        let config = QuoteError::InvalidConfig("currency decimals".into());
        assert!(config.is_config_error());
        assert!(!config.is_user_input_error());

        let division: QuoteError = CoreError::DivisionByZero {
            context: "1 / 0".into(),
        }
        .into();
        assert!(!division.is_user_input_error());
    }
}
