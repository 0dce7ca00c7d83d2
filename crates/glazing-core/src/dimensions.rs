//! # Dimensions
//!
//! Raw versus billable window dimensions.
//!
//! ## Two Independent Reductions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw width (user input, mm)                                             │
//! │     │                                                                   │
//! │     ├── − model minimum width  ──► effective width  (profile cost)      │
//! │     │                                                                   │
//! │     └── − profile discount     ──► billable width   (glass area)        │
//! │                                                                         │
//! │  The two never compose: the glass calculator starts from the RAW        │
//! │  dimension, not from the effective one.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Negative raw dimensions are accepted as-is. A form mid-edit can hand
//! over anything; every derived value clamps each side at zero BEFORE it
//! is combined, so two negative sides never multiply into a positive area.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::MM_PER_METER;

/// Window dimensions in millimeters plus the model's minimum billable size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Dimensions {
    #[ts(type = "string")]
    width_mm: Decimal,
    #[ts(type = "string")]
    height_mm: Decimal,
    #[ts(type = "string")]
    min_width_mm: Decimal,
    #[ts(type = "string")]
    min_height_mm: Decimal,
}

/// Raw dimensions converted to meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MetersDimensions {
    #[ts(type = "string")]
    pub width_m: Decimal,
    #[ts(type = "string")]
    pub height_m: Decimal,
}

impl Dimensions {
    /// Creates dimensions from raw input and the model minimums.
    ///
    /// ## Example
    /// ```rust
    /// use glazing_core::dimensions::Dimensions;
    /// use rust_decimal::Decimal;
    ///
    /// let dims = Dimensions::new(1000, 1200, 800, 800);
    /// assert_eq!(dims.effective_width(), Decimal::from(200));
    /// ```
    pub fn new(
        width_mm: impl Into<Decimal>,
        height_mm: impl Into<Decimal>,
        min_width_mm: impl Into<Decimal>,
        min_height_mm: impl Into<Decimal>,
    ) -> Self {
        Dimensions {
            width_mm: width_mm.into(),
            height_mm: height_mm.into(),
            min_width_mm: min_width_mm.into(),
            min_height_mm: min_height_mm.into(),
        }
    }

    /// Dimensions of a model without minimums (effective == raw, clamped).
    pub fn unconstrained(width_mm: impl Into<Decimal>, height_mm: impl Into<Decimal>) -> Self {
        Self::new(width_mm, height_mm, Decimal::ZERO, Decimal::ZERO)
    }

    #[inline]
    pub fn width_mm(&self) -> Decimal {
        self.width_mm
    }

    #[inline]
    pub fn height_mm(&self) -> Decimal {
        self.height_mm
    }

    #[inline]
    pub fn min_width_mm(&self) -> Decimal {
        self.min_width_mm
    }

    #[inline]
    pub fn min_height_mm(&self) -> Decimal {
        self.min_height_mm
    }

    /// `max(width - min_width, 0)`.
    pub fn effective_width(&self) -> Decimal {
        self.width_mm
            .saturating_sub(self.min_width_mm)
            .max(Decimal::ZERO)
    }

    /// `max(height - min_height, 0)`.
    pub fn effective_height(&self) -> Decimal {
        self.height_mm
            .saturating_sub(self.min_height_mm)
            .max(Decimal::ZERO)
    }

    /// Converts the RAW dimensions to meters.
    ///
    /// Callers wanting billable meters must go through
    /// [`GlassCalculator`](crate::glass::GlassCalculator) instead.
    pub fn to_meters(&self) -> MetersDimensions {
        MetersDimensions {
            width_m: self.width_mm / MM_PER_METER,
            height_m: self.height_mm / MM_PER_METER,
        }
    }

    /// Raw area in m², each side clamped at zero first.
    pub fn area_m2(&self) -> Decimal {
        match self.opening_m() {
            Some((width_m, height_m)) => width_m.saturating_mul(height_m),
            None => Decimal::ZERO,
        }
    }

    /// Raw perimeter in meters (`2 × (w + h)`).
    ///
    /// An opening with a side of zero or less has no frame to run along,
    /// so its perimeter is zero like its area.
    pub fn perimeter_m(&self) -> Decimal {
        match self.opening_m() {
            Some((width_m, height_m)) => {
                Decimal::TWO.saturating_mul(width_m.saturating_add(height_m))
            }
            None => Decimal::ZERO,
        }
    }

    /// Raw sides in meters, or `None` when either side is not positive.
    fn opening_m(&self) -> Option<(Decimal, Decimal)> {
        if self.width_mm <= Decimal::ZERO || self.height_mm <= Decimal::ZERO {
            return None;
        }
        Some((self.width_mm / MM_PER_METER, self.height_mm / MM_PER_METER))
    }
}

// =============================================================================
// Profile Discount
// =============================================================================

/// Millimeters of frame overlap removed from each raw dimension before the
/// glass area is computed.
///
/// Defaults to zero for models that define no discount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProfileDiscount {
    #[ts(type = "string")]
    pub width_mm: Decimal,
    #[ts(type = "string")]
    pub height_mm: Decimal,
}

impl ProfileDiscount {
    pub fn new(width_mm: impl Into<Decimal>, height_mm: impl Into<Decimal>) -> Self {
        ProfileDiscount {
            width_mm: width_mm.into(),
            height_mm: height_mm.into(),
        }
    }

    /// No discount.
    pub fn none() -> Self {
        Self::default()
    }
}
