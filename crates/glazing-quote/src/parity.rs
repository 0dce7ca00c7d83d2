//! # Preview Parity
//!
//! The browser shows a live price while the customer edits a window. When
//! the window is submitted, the figures it showed are checked against the
//! server's breakdown.
//!
//! ```text
//! ┌──────────────────────┐   PreviewPrice    ┌──────────────────────────┐
//! │ browser preview      │ ────────────────► │ reconcile()              │
//! │ (area, glass, unit,  │                   │   round both to 2 dp     │
//! │  line)               │                   │                          │
//! └──────────────────────┘                   │   |Δ| ≤ tolerance ?      │
//!                                            │   no ─► PriceMismatch    │
//!                                            └──────────────────────────┘
//! ```
//!
//! The server figure is always the one stored; the preview is never
//! trusted.

use glazing_core::pricing::format_decimal;
use glazing_core::{PriceBreakdown, AREA_DECIMALS, CURRENCY_DECIMALS};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::error::{QuoteError, QuoteResult};

/// Figures the client preview displayed for one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PreviewPrice {
    #[ts(type = "string")]
    pub billable_area_m2: Decimal,
    #[ts(type = "string")]
    pub glass_cost: Decimal,
    #[ts(type = "string")]
    pub unit_price: Decimal,
    #[ts(type = "string")]
    pub line_subtotal: Decimal,
}

impl From<&PriceBreakdown> for PreviewPrice {
    fn from(breakdown: &PriceBreakdown) -> Self {
        PreviewPrice {
            billable_area_m2: breakdown.billable_area_m2,
            glass_cost: breakdown.glass_cost.amount(),
            unit_price: breakdown.unit_price.amount(),
            line_subtotal: breakdown.line_subtotal.amount(),
        }
    }
}

fn rounded(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Checks a preview against the authoritative breakdown.
///
/// Each figure is rounded to its display precision first; the two sides
/// must then differ by no more than `tolerance`. The first disagreeing
/// field is reported.
pub fn reconcile(
    preview: &PreviewPrice,
    breakdown: &PriceBreakdown,
    tolerance: Decimal,
) -> QuoteResult<()> {
    let checks = [
        (
            "billable area",
            preview.billable_area_m2,
            breakdown.billable_area_m2,
            AREA_DECIMALS,
        ),
        (
            "glass cost",
            preview.glass_cost,
            breakdown.glass_cost.amount(),
            CURRENCY_DECIMALS,
        ),
        (
            "unit price",
            preview.unit_price,
            breakdown.unit_price.amount(),
            CURRENCY_DECIMALS,
        ),
        (
            "line subtotal",
            preview.line_subtotal,
            breakdown.line_subtotal.amount(),
            CURRENCY_DECIMALS,
        ),
    ];

    for (field, shown, server, dp) in checks {
        let diff = (rounded(shown, dp) - rounded(server, dp)).abs();
        if diff > tolerance {
            let preview = format_decimal(shown, dp);
            let server = format_decimal(server, dp);
            warn!(field, %preview, %server, "Preview price disagrees with server");
            return Err(QuoteError::PriceMismatch {
                field: field.to_string(),
                preview,
                server,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glazing_core::{
        price_line_item, GlassTypePricing, LineItemInput, ModelPricing, Money, ProfileCostInput,
        ProfileDiscount,
    };
    use rust_decimal_macros::dec;

    fn breakdown() -> PriceBreakdown {
        price_line_item(&LineItemInput {
            width_mm: dec!(1000),
            height_mm: dec!(1200),
            quantity: 3,
            model: ModelPricing {
                id: "e1d2c3b4-a596-4788-99aa-bbccddeeff00".to_string(),
                name: "Tilt & Turn".to_string(),
                min_width_mm: dec!(500),
                max_width_mm: dec!(2000),
                min_height_mm: dec!(500),
                max_height_mm: dec!(2000),
                profile: ProfileCostInput {
                    base_price: Money::from_major(100),
                    ..Default::default()
                },
                profile_discount: ProfileDiscount::new(40, 40),
                margin_percentage: dec!(5),
            },
            glass: GlassTypePricing {
                id: "0f1e2d3c-4b5a-4697-8877-665544332211".to_string(),
                name: "Float 4mm".to_string(),
                price_per_m2: Money::from_major(50),
            },
            color: None,
            services: vec![],
        })
        .unwrap()
    }

    #[test]
    fn test_identical_figures_agree() {
        let server = breakdown();
        assert!(reconcile(&PreviewPrice::from(&server), &server, Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_float_noise_below_display_precision() {
        let server = breakdown();
        // 155.68 / 0.95 = 163.873684...
        let preview = PreviewPrice {
            billable_area_m2: dec!(1.1136000000000001),
            glass_cost: dec!(55.68000000000001),
            unit_price: dec!(163.87368421052633),
            line_subtotal: dec!(491.621052631579),
        };
        assert!(reconcile(&preview, &server, Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_one_cent_off_is_reported() {
        let server = breakdown();
        let mut preview = PreviewPrice::from(&server);
        preview.unit_price = dec!(163.88);

        match reconcile(&preview, &server, Decimal::ZERO) {
            Err(QuoteError::PriceMismatch {
                field,
                preview,
                server,
            }) => {
                assert_eq!(field, "unit price");
                assert_eq!(preview, "163.88");
                assert_eq!(server, "163.87");
            }
            other => panic!("expected mismatch, got {:?}", other),
        }

        assert!(reconcile(&preview, &server, dec!(0.01)).is_ok());
    }

    #[test]
    fn test_glass_cost_disagreement_is_reported() {
        // Same area and totals, but the preview priced the glass differently
        let server = breakdown();
        let mut preview = PreviewPrice::from(&server);
        preview.glass_cost = dec!(60);

        match reconcile(&preview, &server, Decimal::ZERO) {
            Err(QuoteError::PriceMismatch {
                field,
                preview,
                server,
            }) => {
                assert_eq!(field, "glass cost");
                assert_eq!(preview, "60.00");
                assert_eq!(server, "55.68");
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_preview_serializes_glass_cost() {
        let preview = PreviewPrice::from(&breakdown());
        let json = serde_json::to_value(&preview).unwrap();
        let glass: Decimal = json["glassCost"].as_str().unwrap().parse().unwrap();
        assert_eq!(glass, dec!(55.68));
    }
}
