//! # Profile Cost
//!
//! Linear frame/profile cost of a window model:
//!
//! ```text
//! profile_cost = base_price
//!              + accessory_price
//!              + cost_per_mm_width  × effective_width
//!              + cost_per_mm_height × effective_height
//! ```
//!
//! The base price covers a window at the model's minimum size; every
//! millimeter above the minimum is charged at the per-mm rate.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::dimensions::Dimensions;
use crate::error::CoreResult;
use crate::money::Money;

/// Cost coefficients of a model's profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProfileCostInput {
    pub base_price: Money,
    #[serde(default)]
    pub accessory_price: Money,
    pub cost_per_mm_width: Money,
    pub cost_per_mm_height: Money,
}

impl ProfileCostInput {
    /// Profile cost for the given dimensions.
    ///
    /// ## Errors
    /// [`CoreError::Overflow`](crate::error::CoreError::Overflow) when a
    /// term or the total leaves the decimal range.
    ///
    /// ## Example
    /// ```rust
    /// use glazing_core::dimensions::Dimensions;
    /// use glazing_core::money::Money;
    /// use glazing_core::profile::ProfileCostInput;
    ///
    /// let profile = ProfileCostInput {
    ///     base_price: Money::from_major(100),
    ///     accessory_price: Money::from_major(20),
    ///     cost_per_mm_width: Money::parse("0.1").unwrap(),
    ///     cost_per_mm_height: Money::parse("0.05").unwrap(),
    /// };
    /// // 100 + 20 + 0.1 × 200 + 0.05 × 400 = 160
    /// let cost = profile.cost(&Dimensions::new(1000, 1200, 800, 800)).unwrap();
    /// assert_eq!(cost, Money::from_major(160));
    /// ```
    pub fn cost(&self, dimensions: &Dimensions) -> CoreResult<Money> {
        let width_part = self
            .cost_per_mm_width
            .checked_times(dimensions.effective_width())?;
        let height_part = self
            .cost_per_mm_height
            .checked_times(dimensions.effective_height())?;

        Money::checked_sum([self.base_price, self.accessory_price, width_part, height_part])
    }

    /// Whether any coefficient is negative.
    pub(crate) fn has_negative(&self) -> bool {
        [
            self.base_price,
            self.accessory_price,
            self.cost_per_mm_width,
            self.cost_per_mm_height,
        ]
        .iter()
        .any(Money::is_negative)
    }
}
