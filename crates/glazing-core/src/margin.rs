//! # Margin Calculator
//!
//! Turns a cost into a sales price under margin-on-sales-price semantics.
//!
//! ## Margin vs Markup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cost = 100, margin = 20%                                               │
//! │                                                                         │
//! │  Markup on cost (NOT what we do):  100 × 1.20       = 120               │
//! │                                    (120 - 100) / 120 = 16.7% margin     │
//! │                                                                         │
//! │  Margin on sales price:            100 / (1 - 0.20) = 125               │
//! │                                    (125 - 100) / 125 = 20% margin  ✅    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Margin applies to the model cost only (profile + glass + color
//! surcharge). Services are added after the margin and never marked up.

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Input for [`MarginCalculator::model_sales_price`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSalesPriceInput {
    /// Profile + glass cost, color surcharge included.
    pub model_cost: Money,
    /// Target margin in percent, `[0, 100)`.
    pub margin_percentage: Decimal,
}

/// Computes sales prices from costs and margin percentages.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarginCalculator;

impl MarginCalculator {
    pub fn new() -> Self {
        MarginCalculator
    }

    /// `cost / (1 - margin / 100)`.
    ///
    /// ## Errors
    /// [`CoreError::MarginOutOfRange`] unless `0 <= margin < 100`. The
    /// range is checked before dividing, so a margin of 100 never reaches
    /// the division.
    ///
    /// ## Example
    /// ```rust
    /// use glazing_core::margin::MarginCalculator;
    /// use glazing_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let price = MarginCalculator::new()
    ///     .sales_price(Money::from_major(100), Decimal::from(20))
    ///     .unwrap();
    /// assert_eq!(price, Money::from_major(125));
    /// ```
    pub fn sales_price(&self, cost: Money, margin_percentage: Decimal) -> CoreResult<Money> {
        Self::check_margin(margin_percentage)?;

        let keep_fraction = Decimal::ONE - margin_percentage / Decimal::ONE_HUNDRED;
        cost.divide(keep_fraction)
    }

    /// Sales price of the combined model cost.
    pub fn model_sales_price(&self, input: &ModelSalesPriceInput) -> CoreResult<Money> {
        self.sales_price(input.model_cost, input.margin_percentage)
    }

    /// Realized margin fraction `(sales - cost) / sales`.
    ///
    /// `None` when the sales price is zero.
    pub fn margin_of(&self, cost: Money, sales_price: Money) -> Option<Decimal> {
        sales_price
            .amount()
            .checked_sub(cost.amount())?
            .checked_div(sales_price.amount())
    }

    fn check_margin(margin_percentage: Decimal) -> CoreResult<()> {
        if margin_percentage < Decimal::ZERO || margin_percentage >= Decimal::ONE_HUNDRED {
            return Err(CoreError::MarginOutOfRange {
                margin: margin_percentage,
            });
        }
        Ok(())
    }
}
