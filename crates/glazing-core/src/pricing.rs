//! # Item Price Pipeline
//!
//! Composes dimensions, glass, profile, color, margin and services into a
//! line-item price with a full breakdown.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  width, height ──► Dimensions                                           │
//! │                       │                                                 │
//! │          ┌────────────┴─────────────┐                                   │
//! │          ▼                          ▼                                   │
//! │   GlassCalculator             ProfileCostInput                          │
//! │   (raw − discount)            (base + per-mm × effective)               │
//! │          │ glass_cost               │ profile_cost                      │
//! │          └────────────┬─────────────┘                                   │
//! │                       ▼                                                 │
//! │             base_model_cost × (1 + color surcharge %)                   │
//! │                       │ model_cost                                      │
//! │                       ▼                                                 │
//! │              MarginCalculator (cost / (1 − margin))                     │
//! │                       │ sales_price                                     │
//! │                       ▼                                                 │
//! │              + Σ service charges (never margin-adjusted)                │
//! │                       │ unit_price                                      │
//! │                       ▼                                                 │
//! │              × quantity ──► line_subtotal                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is rounded inside the pipeline. [`PriceBreakdown::to_display`]
//! is the single rounding boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::dimensions::{Dimensions, ProfileDiscount};
use crate::error::CoreResult;
use crate::glass::{GlassCalculator, GlassCostInput};
use crate::margin::{MarginCalculator, ModelSalesPriceInput};
use crate::money::Money;
use crate::profile::ProfileCostInput;
use crate::services::{ServiceCharge, ServicePricing};
use crate::validation::validate_line_item;
use crate::{AREA_DECIMALS, CURRENCY_DECIMALS};

// =============================================================================
// Catalog Snapshots
// =============================================================================

/// Pricing-relevant configuration of a window model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ModelPricing {
    pub id: String,
    pub name: String,
    #[ts(type = "string")]
    pub min_width_mm: Decimal,
    #[ts(type = "string")]
    pub max_width_mm: Decimal,
    #[ts(type = "string")]
    pub min_height_mm: Decimal,
    #[ts(type = "string")]
    pub max_height_mm: Decimal,
    pub profile: ProfileCostInput,
    #[serde(default)]
    pub profile_discount: ProfileDiscount,
    /// Margin on sales price, in percent.
    #[ts(type = "string")]
    pub margin_percentage: Decimal,
}

/// A glass type from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GlassTypePricing {
    pub id: String,
    pub name: String,
    pub price_per_m2: Money,
}

/// A profile color and its surcharge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ColorPricing {
    pub id: String,
    pub name: String,
    #[ts(type = "string")]
    pub surcharge_percentage: Decimal,
}

/// Flattened view of a cart/quote line as the engine needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItemInput {
    #[ts(type = "string")]
    pub width_mm: Decimal,
    #[ts(type = "string")]
    pub height_mm: Decimal,
    pub quantity: u32,
    pub model: ModelPricing,
    pub glass: GlassTypePricing,
    #[serde(default)]
    pub color: Option<ColorPricing>,
    #[serde(default)]
    pub services: Vec<ServicePricing>,
}

impl LineItemInput {
    /// Dimensions of this line with the model minimums applied.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(
            self.width_mm,
            self.height_mm,
            self.model.min_width_mm,
            self.model.min_height_mm,
        )
    }

    /// Surcharge percentage of the selected color, zero without one.
    pub fn color_surcharge_percentage(&self) -> Decimal {
        self.color
            .as_ref()
            .map(|c| c.surcharge_percentage)
            .unwrap_or(Decimal::ZERO)
    }
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// Every intermediate value of a line price, at full precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceBreakdown {
    #[ts(type = "string")]
    pub width_mm: Decimal,
    #[ts(type = "string")]
    pub height_mm: Decimal,
    /// Glass area after the profile discount, m².
    #[ts(type = "string")]
    pub billable_area_m2: Decimal,
    pub glass_cost: Money,
    pub profile_cost: Money,
    /// Profile + glass, before the color surcharge.
    pub base_model_cost: Money,
    #[ts(type = "string")]
    pub color_surcharge_percentage: Decimal,
    pub color_surcharge: Money,
    /// Cost the margin is applied to.
    pub model_cost: Money,
    #[ts(type = "string")]
    pub margin_percentage: Decimal,
    pub margin_amount: Money,
    pub sales_price: Money,
    pub services: Vec<ServiceCharge>,
    pub services_total: Money,
    pub unit_price: Money,
    pub quantity: u32,
    pub line_subtotal: Money,
}

/// A breakdown rounded for display: 2 decimals for money and area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DisplayBreakdown {
    pub billable_area_m2: String,
    pub glass_cost: String,
    pub profile_cost: String,
    pub color_surcharge: String,
    pub model_cost: String,
    pub margin_amount: String,
    pub sales_price: String,
    pub services: Vec<DisplayServiceCharge>,
    pub services_total: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_subtotal: String,
}

/// A display-rounded service line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DisplayServiceCharge {
    pub name: String,
    pub quantity: String,
    pub amount: String,
}

/// Formats a plain decimal with exactly `dp` places, half away from zero.
pub fn format_decimal(value: Decimal, dp: u32) -> String {
    Money::new(value).to_fixed(dp)
}

impl PriceBreakdown {
    /// Rounds every figure for display. The only place rounding happens.
    pub fn to_display(&self) -> DisplayBreakdown {
        DisplayBreakdown {
            billable_area_m2: format_decimal(self.billable_area_m2, AREA_DECIMALS),
            glass_cost: self.glass_cost.to_fixed(CURRENCY_DECIMALS),
            profile_cost: self.profile_cost.to_fixed(CURRENCY_DECIMALS),
            color_surcharge: self.color_surcharge.to_fixed(CURRENCY_DECIMALS),
            model_cost: self.model_cost.to_fixed(CURRENCY_DECIMALS),
            margin_amount: self.margin_amount.to_fixed(CURRENCY_DECIMALS),
            sales_price: self.sales_price.to_fixed(CURRENCY_DECIMALS),
            services: self
                .services
                .iter()
                .map(|s| DisplayServiceCharge {
                    name: s.name.clone(),
                    quantity: format_decimal(s.quantity, AREA_DECIMALS),
                    amount: s.amount.to_fixed(CURRENCY_DECIMALS),
                })
                .collect(),
            services_total: self.services_total.to_fixed(CURRENCY_DECIMALS),
            unit_price: self.unit_price.to_fixed(CURRENCY_DECIMALS),
            quantity: self.quantity,
            line_subtotal: self.line_subtotal.to_fixed(CURRENCY_DECIMALS),
        }
    }

    /// Whether two breakdowns agree on area and prices to 2 decimals.
    ///
    /// This is the client/server parity rule: two independent runs of the
    /// pipeline may differ in their trailing digits, never in what is shown.
    pub fn agrees_with(&self, other: &PriceBreakdown) -> bool {
        let a = self.to_display();
        let b = other.to_display();

        a.billable_area_m2 == b.billable_area_m2
            && a.glass_cost == b.glass_cost
            && a.profile_cost == b.profile_cost
            && a.sales_price == b.sales_price
            && a.unit_price == b.unit_price
            && a.line_subtotal == b.line_subtotal
    }
}

// =============================================================================
// Item Price Calculator
// =============================================================================

/// Runs the full line-item pricing pipeline.
///
/// Stateless: one instance can price any number of lines from any number
/// of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemPriceCalculator {
    glass: GlassCalculator,
    margin: MarginCalculator,
}

impl ItemPriceCalculator {
    pub fn new() -> Self {
        ItemPriceCalculator {
            glass: GlassCalculator::new(),
            margin: MarginCalculator::new(),
        }
    }

    /// Prices one line item.
    ///
    /// ## Errors
    /// - Any validation failure from [`validate_line_item`]
    /// - [`CoreError::Overflow`](crate::error::CoreError::Overflow) when a
    ///   step leaves the decimal range
    ///
    /// The breakdown is either complete or not produced at all.
    pub fn calculate(&self, item: &LineItemInput) -> CoreResult<PriceBreakdown> {
        validate_line_item(item)?;

        // Step 1: dimensions
        let dimensions = item.dimensions();

        // Step 2: glass
        let glass_input = GlassCostInput {
            price_per_m2: item.glass.price_per_m2,
            dimensions,
            profile_discount: item.model.profile_discount,
        };
        let billable_area_m2 = self
            .glass
            .billable_area(&dimensions, &item.model.profile_discount);
        let glass_cost = self.glass.glass_cost(&glass_input)?;

        // Step 3: profile
        let profile_cost = item.model.profile.cost(&dimensions)?;

        // Step 4: model cost, color surcharge before margin
        let base_model_cost = profile_cost.checked_add(glass_cost)?;
        let color_surcharge_percentage = item.color_surcharge_percentage();
        let model_cost =
            base_model_cost.checked_increase_by_percentage(color_surcharge_percentage)?;
        let color_surcharge = model_cost - base_model_cost;

        // Step 5: margin
        let sales_price = self.margin.model_sales_price(&ModelSalesPriceInput {
            model_cost,
            margin_percentage: item.model.margin_percentage,
        })?;
        let margin_amount = sales_price - model_cost;

        // Step 6: services after margin
        let services = item
            .services
            .iter()
            .map(|service| service.charge(&dimensions))
            .collect::<CoreResult<Vec<ServiceCharge>>>()?;
        let services_total = Money::checked_sum(services.iter().map(|s| s.amount))?;
        let unit_price = sales_price.checked_add(services_total)?;

        // Step 7: quantity
        let line_subtotal = unit_price.checked_times(Decimal::from(item.quantity))?;

        Ok(PriceBreakdown {
            width_mm: item.width_mm,
            height_mm: item.height_mm,
            billable_area_m2,
            glass_cost,
            profile_cost,
            base_model_cost,
            color_surcharge_percentage,
            color_surcharge,
            model_cost,
            margin_percentage: item.model.margin_percentage,
            margin_amount,
            sales_price,
            services,
            services_total,
            unit_price,
            quantity: item.quantity,
            line_subtotal,
        })
    }
}

/// Prices one line item with a default calculator.
pub fn price_line_item(item: &LineItemInput) -> CoreResult<PriceBreakdown> {
    ItemPriceCalculator::new().calculate(item)
}
