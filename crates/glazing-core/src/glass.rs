//! # Glass Calculator
//!
//! Billable glass area and glass cost.
//!
//! ## Area Formula
//! ```text
//! billable_width  = max(width_mm  - discount_width_mm,  0)
//! billable_height = max(height_mm - discount_height_mm, 0)
//! area_m2         = (billable_width / 1000) × (billable_height / 1000)
//! glass_cost      = price_per_m2 × area_m2
//! ```
//!
//! The area is never rounded here. The browser preview runs the same
//! formula and both results are compared after rounding to 2 places, so
//! an early rounding on either side breaks agreement.

use rust_decimal::Decimal;

use crate::dimensions::{Dimensions, ProfileDiscount};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::MM_PER_METER;

/// Input for [`GlassCalculator::glass_cost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlassCostInput {
    pub price_per_m2: Money,
    pub dimensions: Dimensions,
    pub profile_discount: ProfileDiscount,
}

/// Computes billable glass area and cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlassCalculator;

impl GlassCalculator {
    pub fn new() -> Self {
        GlassCalculator
    }

    /// Billable glass area in m².
    ///
    /// Starts from the RAW dimensions; the model minimums do not apply.
    /// A discount at or above the raw dimension yields zero area.
    ///
    /// ## Example
    /// ```rust
    /// use glazing_core::dimensions::{Dimensions, ProfileDiscount};
    /// use glazing_core::glass::GlassCalculator;
    /// use rust_decimal::Decimal;
    ///
    /// let dims = Dimensions::new(1000, 1200, 800, 800);
    /// let area = GlassCalculator::new().billable_area(&dims, &ProfileDiscount::new(40, 40));
    /// assert_eq!(area, Decimal::new(11136, 4)); // 1.1136 m²
    /// ```
    ///
    /// Saturates at `Decimal::MAX` for sides beyond any real window.
    pub fn billable_area(&self, dimensions: &Dimensions, discount: &ProfileDiscount) -> Decimal {
        Self::checked_area(dimensions, discount).unwrap_or(Decimal::MAX)
    }

    /// Glass cost: `price_per_m2 × billable_area`, unrounded.
    ///
    /// ## Errors
    /// [`CoreError::Overflow`] when the area or the cost leaves the
    /// decimal range.
    pub fn glass_cost(&self, input: &GlassCostInput) -> CoreResult<Money> {
        let area = Self::checked_area(&input.dimensions, &input.profile_discount).ok_or_else(
            || CoreError::Overflow {
                context: "billable glass area".to_string(),
            },
        )?;
        input.price_per_m2.checked_times(area)
    }

    fn checked_area(dimensions: &Dimensions, discount: &ProfileDiscount) -> Option<Decimal> {
        let billable_width = dimensions
            .width_mm()
            .saturating_sub(discount.width_mm)
            .max(Decimal::ZERO);
        let billable_height = dimensions
            .height_mm()
            .saturating_sub(discount.height_mm)
            .max(Decimal::ZERO);

        (billable_width / MM_PER_METER).checked_mul(billable_height / MM_PER_METER)
    }
}
