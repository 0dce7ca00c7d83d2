//! # Validation Module
//!
//! Input validation for the pricing engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser form                                                 │
//! │  ├── Min/max window size, required selections                          │
//! │  └── Live preview (mirror of this crate)                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: glazing-quote                                                │
//! │  └── validate_dimensions_within_model before an item enters a quote    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine (THIS MODULE)                                 │
//! │  ├── validate_line_item: quantity, percentages, non-negative prices    │
//! │  ├── Model minimums non-negative and not above the maximums            │
//! │  └── Raw dimensions only bounded in magnitude; negatives clamp to zero │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use glazing_core::validation::{validate_quantity, validate_surcharge_percentage};
//! use rust_decimal::Decimal;
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_surcharge_percentage(Decimal::from(150)).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing::{LineItemInput, ModelPricing};
use crate::{MAX_DIMENSION_MM, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: Decimal::ONE,
            max: Decimal::from(MAX_ITEM_QUANTITY),
        });
    }

    Ok(())
}

/// Validates a margin percentage.
///
/// ## Rules
/// - `0 <= margin < 100`
///
/// Reported as [`CoreError::MarginOutOfRange`], the same error the
/// margin calculator raises.
pub fn validate_margin_percentage(margin: Decimal) -> CoreResult<()> {
    if margin < Decimal::ZERO || margin >= Decimal::ONE_HUNDRED {
        return Err(CoreError::MarginOutOfRange { margin });
    }

    Ok(())
}

/// Validates a color surcharge percentage.
///
/// ## Rules
/// - Between 0 and 100 inclusive
pub fn validate_surcharge_percentage(percent: Decimal) -> ValidationResult<()> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "color surcharge".to_string(),
            min: Decimal::ZERO,
            max: Decimal::ONE_HUNDRED,
        });
    }

    Ok(())
}

/// Validates that a value is not negative.
pub fn validate_non_negative(field: &str, value: Decimal) -> ValidationResult<()> {
    if value < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a catalog measurement (discount, minimum, maximum).
///
/// ## Rules
/// - Not negative
/// - Not above MAX_DIMENSION_MM
pub fn validate_measurement(field: &str, value: Decimal) -> ValidationResult<()> {
    validate_non_negative(field, value)?;

    if value > MAX_DIMENSION_MM {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: Decimal::ZERO,
            max: MAX_DIMENSION_MM,
        });
    }

    Ok(())
}

/// Validates the magnitude of a raw window side.
///
/// Negative sides pass (they price as zero); only absurd magnitudes fail.
pub fn validate_raw_dimension(field: &str, value: Decimal) -> ValidationResult<()> {
    if value.abs() > MAX_DIMENSION_MM {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: -MAX_DIMENSION_MM,
            max: MAX_DIMENSION_MM,
        });
    }

    Ok(())
}

/// Validates that a catalog price is not negative. Zero is allowed.
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    validate_non_negative(field, price.amount())
}

// =============================================================================
// Reference Validators
// =============================================================================

/// Validates a catalog reference (model, glass type, color, service).
///
/// ## Rules
/// - Must not be empty
/// - Must be a valid UUID
///
/// ## Example
/// ```rust
/// use glazing_core::validation::validate_reference;
///
/// assert!(validate_reference("model", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_reference("model", "not-a-uuid").is_err());
/// ```
pub fn validate_reference(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates that a window fits the model's manufacturable size range.
///
/// Used by the quote layer before an item is accepted; the pricing
/// pipeline itself stays permissive.
pub fn validate_dimensions_within_model(
    width_mm: Decimal,
    height_mm: Decimal,
    model: &ModelPricing,
) -> ValidationResult<()> {
    if width_mm < model.min_width_mm || width_mm > model.max_width_mm {
        return Err(ValidationError::OutOfRange {
            field: "width (mm)".to_string(),
            min: model.min_width_mm,
            max: model.max_width_mm,
        });
    }

    if height_mm < model.min_height_mm || height_mm > model.max_height_mm {
        return Err(ValidationError::OutOfRange {
            field: "height (mm)".to_string(),
            min: model.min_height_mm,
            max: model.max_height_mm,
        });
    }

    Ok(())
}

/// Validates a model's size range and profile discount.
///
/// ## Rules
/// - Minimums, maximums and discounts are valid measurements
/// - Each minimum is at most the matching maximum
pub fn validate_model_size(model: &ModelPricing) -> ValidationResult<()> {
    validate_measurement("minimum width (mm)", model.min_width_mm)?;
    validate_measurement("maximum width (mm)", model.max_width_mm)?;
    validate_measurement("minimum height (mm)", model.min_height_mm)?;
    validate_measurement("maximum height (mm)", model.max_height_mm)?;

    if model.min_width_mm > model.max_width_mm {
        return Err(ValidationError::OutOfRange {
            field: "minimum width (mm)".to_string(),
            min: Decimal::ZERO,
            max: model.max_width_mm,
        });
    }

    if model.min_height_mm > model.max_height_mm {
        return Err(ValidationError::OutOfRange {
            field: "minimum height (mm)".to_string(),
            min: Decimal::ZERO,
            max: model.max_height_mm,
        });
    }

    validate_measurement("profile discount width", model.profile_discount.width_mm)?;
    validate_measurement("profile discount height", model.profile_discount.height_mm)?;

    Ok(())
}

/// Validates everything the pricing pipeline relies on.
///
/// ## Checks
/// - References are UUIDs
/// - Quantity within `1..=999`
/// - Margin within `[0, 100)`
/// - Color surcharge within `[0, 100]`
/// - Raw sides within ±MAX_DIMENSION_MM
/// - Model size range consistent ([`validate_model_size`])
/// - Prices and service rates not negative
pub fn validate_line_item(item: &LineItemInput) -> CoreResult<()> {
    validate_reference("model", &item.model.id)?;
    validate_reference("glass type", &item.glass.id)?;
    if let Some(color) = &item.color {
        validate_reference("color", &color.id)?;
        validate_surcharge_percentage(color.surcharge_percentage)?;
    }

    validate_quantity(item.quantity)?;
    validate_margin_percentage(item.model.margin_percentage)?;

    validate_raw_dimension("width (mm)", item.width_mm)?;
    validate_raw_dimension("height (mm)", item.height_mm)?;
    validate_model_size(&item.model)?;

    if item.model.profile.has_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "profile cost".to_string(),
        }
        .into());
    }
    validate_price("glass price per m²", item.glass.price_per_m2)?;

    for service in &item.services {
        validate_reference("service", &service.id)?;
        validate_price("service rate", service.rate)?;
        if let Some(minimum) = service.minimum_quantity {
            validate_non_negative("service minimum quantity", minimum)?;
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
