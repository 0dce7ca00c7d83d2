//! # Quote Assembly
//!
//! A quote is a list of priced window lines for one customer, valid for a
//! limited number of days.
//!
//! ## Quote Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Quote Operations                                     │
//! │                                                                         │
//! │  Client Action            Quote Method            State Change          │
//! │  ─────────────            ────────────            ────────────          │
//! │                                                                         │
//! │  Add window ─────────────► add_item() ──────────► price + items.push   │
//! │                                                                         │
//! │  Change quantity ────────► update_quantity() ───► re-price item         │
//! │                                                                         │
//! │  Remove window ──────────► remove_item() ───────► items.remove(i)      │
//! │                                                                         │
//! │  View quote ─────────────► totals() ────────────► (read only)          │
//! │                                                                         │
//! │  NOTE: prices always come from the engine. A price sent by the client   │
//! │        is only ever compared (see parity), never stored.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use glazing_core::validation::{validate_dimensions_within_model, validate_quantity};
use glazing_core::{ItemPriceCalculator, LineItemInput, Money, PriceBreakdown};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use crate::config::{QuoteConfig, MAX_VALIDITY_DAYS};
use crate::error::{QuoteError, QuoteResult};

// =============================================================================
// Quote Item
// =============================================================================

/// A priced line of a quote.
///
/// `input` is a frozen snapshot of the catalog prices at the time the item
/// was added, so later catalog edits don't change an issued quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuoteItem {
    pub id: String,
    pub input: LineItemInput,
    pub breakdown: PriceBreakdown,
    #[ts(type = "string")]
    pub added_at: DateTime<Utc>,
}

impl QuoteItem {
    pub fn line_subtotal(&self) -> Money {
        self.breakdown.line_subtotal
    }
}

// =============================================================================
// Quote
// =============================================================================

/// A customer quote.
///
/// ## Invariants
/// - Every item's breakdown was produced by the engine from its `input`
/// - At most `max_items` items
/// - No changes after `valid_until`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub tenant_id: String,
    pub currency: String,
    pub items: Vec<QuoteItem>,
    pub created_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    max_items: usize,
    #[serde(skip)]
    calculator: ItemPriceCalculator,
}

impl Quote {
    /// Creates an empty quote that expires `validity_days` from now.
    pub fn new(config: &QuoteConfig) -> Self {
        Self::created_at(config, Utc::now())
    }

    /// Creates an empty quote as of `now`.
    pub fn created_at(config: &QuoteConfig, now: DateTime<Utc>) -> Self {
        Quote {
            id: Uuid::new_v4().to_string(),
            tenant_id: config.tenant.id.clone(),
            currency: config.currency.code.clone(),
            items: Vec::new(),
            created_at: now,
            valid_until: now + validity(config),
            max_items: config.quote.max_items,
            calculator: ItemPriceCalculator::new(),
        }
    }

    /// Prices a window and appends it to the quote.
    ///
    /// ## Checks
    /// 1. The quote has not expired
    /// 2. The window fits the model's size range
    /// 3. The quote is not full
    /// 4. Everything the engine validates
    ///
    /// ## Returns
    /// The id of the new item.
    pub fn add_item(&mut self, input: LineItemInput) -> QuoteResult<String> {
        self.add_item_at(input, Utc::now())
    }

    pub fn add_item_at(&mut self, input: LineItemInput, now: DateTime<Utc>) -> QuoteResult<String> {
        self.ensure_open(now)?;
        validate_dimensions_within_model(input.width_mm, input.height_mm, &input.model)?;

        if self.items.len() >= self.max_items {
            return Err(QuoteError::QuoteTooLarge {
                max: self.max_items,
            });
        }

        let breakdown = self.calculator.calculate(&input)?;
        self.ensure_subtotal_fits(None, breakdown.line_subtotal)?;
        let item = QuoteItem {
            id: Uuid::new_v4().to_string(),
            input,
            breakdown,
            added_at: now,
        };

        info!(
            quote_id = %self.id,
            item_id = %item.id,
            model = %item.input.model.name,
            unit_price = %item.breakdown.unit_price,
            "Item added to quote"
        );

        let id = item.id.clone();
        self.items.push(item);
        Ok(id)
    }

    /// Changes an item's quantity and re-prices it.
    ///
    /// A quantity of 0 removes the item.
    pub fn update_quantity(&mut self, item_id: &str, quantity: u32) -> QuoteResult<()> {
        self.update_quantity_at(item_id, quantity, Utc::now())
    }

    pub fn update_quantity_at(
        &mut self,
        item_id: &str,
        quantity: u32,
        now: DateTime<Utc>,
    ) -> QuoteResult<()> {
        self.ensure_open(now)?;

        if quantity == 0 {
            return self.remove_item_at(item_id, now);
        }
        validate_quantity(quantity)?;

        let mut input = self
            .item(item_id)
            .ok_or_else(|| QuoteError::ItemNotFound(item_id.to_string()))?
            .input
            .clone();
        input.quantity = quantity;
        let breakdown = self.calculator.calculate(&input)?;
        self.ensure_subtotal_fits(Some(item_id), breakdown.line_subtotal)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.id == item_id) {
            item.input = input;
            item.breakdown = breakdown;
        }

        debug!(quote_id = %self.id, item_id, quantity, "Item quantity updated");
        Ok(())
    }

    /// Removes an item by id.
    pub fn remove_item(&mut self, item_id: &str) -> QuoteResult<()> {
        self.remove_item_at(item_id, Utc::now())
    }

    pub fn remove_item_at(&mut self, item_id: &str, now: DateTime<Utc>) -> QuoteResult<()> {
        self.ensure_open(now)?;

        let initial_len = self.items.len();
        self.items.retain(|i| i.id != item_id);

        if self.items.len() == initial_len {
            return Err(QuoteError::ItemNotFound(item_id.to_string()));
        }

        info!(quote_id = %self.id, item_id, "Item removed from quote");
        Ok(())
    }

    pub fn item(&self, item_id: &str) -> Option<&QuoteItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total number of windows across all items.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.breakdown.quantity).sum()
    }

    /// Sum of line subtotals, at full precision.
    ///
    /// Every add and update checks this sum first, so it cannot overflow.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(QuoteItem::line_subtotal).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the quote is past its validity date at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.valid_until
    }

    pub fn totals(&self) -> QuoteTotals {
        QuoteTotals::from(self)
    }

    /// Checks that the subtotal with `line` in place of `replacing` stays
    /// inside the decimal range.
    fn ensure_subtotal_fits(&self, replacing: Option<&str>, line: Money) -> QuoteResult<()> {
        let others = self
            .items
            .iter()
            .filter(|i| Some(i.id.as_str()) != replacing)
            .map(QuoteItem::line_subtotal);
        Money::checked_sum(others.chain(std::iter::once(line)))?;
        Ok(())
    }

    fn ensure_open(&self, now: DateTime<Utc>) -> QuoteResult<()> {
        if self.is_expired(now) {
            return Err(QuoteError::QuoteExpired {
                quote_id: self.id.clone(),
                valid_until: self.valid_until.to_rfc3339(),
            });
        }
        Ok(())
    }
}

fn validity(config: &QuoteConfig) -> Duration {
    Duration::days(i64::from(config.quote.validity_days.min(MAX_VALIDITY_DAYS)))
}

/// Quote totals summary for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuoteTotals {
    pub item_count: usize,
    pub total_quantity: u32,
    pub subtotal: Money,
}

impl From<&Quote> for QuoteTotals {
    fn from(quote: &Quote) -> Self {
        QuoteTotals {
            item_count: quote.item_count(),
            total_quantity: quote.total_quantity(),
            subtotal: quote.subtotal(),
        }
    }
}

// =============================================================================
// Shared Quote State
// =============================================================================

/// A quote shared between concurrent request handlers.
///
/// ## Thread Safety
/// `Arc<Mutex<Quote>>`: quote edits are short and almost all of them
/// write, so a `RwLock` would buy nothing. A poisoned lock still holds a
/// consistent quote (every mutation validates before it writes), so it is
/// recovered rather than propagated.
#[derive(Debug, Clone)]
pub struct QuoteState {
    quote: Arc<Mutex<Quote>>,
}

impl QuoteState {
    pub fn new(quote: Quote) -> Self {
        QuoteState {
            quote: Arc::new(Mutex::new(quote)),
        }
    }

    /// Executes a function with read access to the quote.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = quote_state.with_quote(QuoteTotals::from);
    /// ```
    pub fn with_quote<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Quote) -> R,
    {
        let quote = self.quote.lock().unwrap_or_else(|e| e.into_inner());
        f(&quote)
    }

    /// Executes a function with write access to the quote.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// quote_state.with_quote_mut(|quote| quote.add_item(input))?;
    /// ```
    pub fn with_quote_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Quote) -> R,
    {
        let mut quote = self.quote.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glazing_core::{
        CoreError, GlassTypePricing, ModelPricing, ProfileCostInput, ProfileDiscount,
    };
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn window(width: i64, height: i64) -> LineItemInput {
        LineItemInput {
            width_mm: Decimal::from(width),
            height_mm: Decimal::from(height),
            quantity: 1,
            model: ModelPricing {
                id: "3c1f7a52-9d4e-4b8a-a6c2-1e5f9b3d7a04".to_string(),
                name: "Fixed 45".to_string(),
                min_width_mm: dec!(300),
                max_width_mm: dec!(2000),
                min_height_mm: dec!(300),
                max_height_mm: dec!(2000),
                profile: ProfileCostInput {
                    base_price: Money::from_major(60),
                    ..Default::default()
                },
                profile_discount: ProfileDiscount::none(),
                margin_percentage: dec!(20),
            },
            glass: GlassTypePricing {
                id: "8b2e6d40-1c7f-4a93-b5e8-0d4c2a6f9e17".to_string(),
                name: "Float 4mm".to_string(),
                price_per_m2: Money::from_major(40),
            },
            color: None,
            services: vec![],
        }
    }

    fn config(max_items: usize) -> QuoteConfig {
        let mut config = QuoteConfig::default();
        config.quote.max_items = max_items;
        config
    }

    #[test]
    fn test_add_item_prices_line() {
        let mut quote = Quote::new(&config(10));
        let id = quote.add_item(window(1000, 1000)).unwrap();

        // (60 + 1 m² × 40) / 0.8
        let item = quote.item(&id).unwrap();
        assert_eq!(item.breakdown.unit_price, Money::from_major(125));
        assert_eq!(quote.subtotal(), Money::from_major(125));
    }

    #[test]
    fn test_add_item_outside_model_range() {
        let mut quote = Quote::new(&config(10));
        let err = quote.add_item(window(2500, 1000)).unwrap_err();
        assert!(matches!(err, QuoteError::Validation(_)));
        assert!(quote.is_empty());
    }

    #[test]
    fn test_max_items() {
        let mut quote = Quote::new(&config(2));
        quote.add_item(window(1000, 1000)).unwrap();
        quote.add_item(window(1000, 1000)).unwrap();

        let err = quote.add_item(window(1000, 1000)).unwrap_err();
        assert!(matches!(err, QuoteError::QuoteTooLarge { max: 2 }));
    }

    #[test]
    fn test_update_quantity_reprices() {
        let mut quote = Quote::new(&config(10));
        let id = quote.add_item(window(1000, 1000)).unwrap();

        quote.update_quantity(&id, 4).unwrap();
        let item = quote.item(&id).unwrap();
        assert_eq!(item.input.quantity, 4);
        assert_eq!(item.breakdown.line_subtotal, Money::from_major(500));
        assert_eq!(quote.total_quantity(), 4);

        assert!(quote.update_quantity(&id, 1000).is_err());
        assert_eq!(quote.item(&id).unwrap().input.quantity, 4);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut quote = Quote::new(&config(10));
        let id = quote.add_item(window(1000, 1000)).unwrap();

        quote.update_quantity(&id, 0).unwrap();
        assert!(quote.is_empty());
        assert!(matches!(
            quote.remove_item(&id),
            Err(QuoteError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_expired_quote_is_frozen() {
        let created = Utc::now() - Duration::days(30);
        let mut quote = Quote::created_at(&QuoteConfig::default(), created);

        assert!(quote.is_expired(Utc::now()));
        assert!(!quote.is_expired(created + Duration::days(15)));
        assert!(matches!(
            quote.add_item(window(1000, 1000)),
            Err(QuoteError::QuoteExpired { .. })
        ));
    }

    #[test]
    fn test_totals() {
        let mut quote = Quote::new(&config(10));
        let a = quote.add_item(window(1000, 1000)).unwrap();
        quote.add_item(window(500, 500)).unwrap();
        quote.update_quantity(&a, 2).unwrap();

        let totals = quote.totals();
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 3);
        // 2 × 125 + (60 + 0.25 × 40) / 0.8
        assert_eq!(totals.subtotal.amount(), dec!(337.5));
    }

    #[test]
    fn test_subtotal_overflow_rejects_item() {
        let mut huge = window(1000, 1000);
        huge.model.margin_percentage = Decimal::ZERO;
        huge.model.profile.base_price = Money::new(Decimal::MAX / dec!(2.5));

        let mut quote = Quote::new(&config(10));
        let id = quote.add_item(huge.clone()).unwrap();
        quote.add_item(huge.clone()).unwrap();
        let before = quote.subtotal();

        let err = quote.add_item(huge).unwrap_err();
        assert!(matches!(err, QuoteError::Pricing(CoreError::Overflow { .. })));
        assert_eq!(quote.item_count(), 2);

        let err = quote.update_quantity(&id, 2).unwrap_err();
        assert!(matches!(err, QuoteError::Pricing(CoreError::Overflow { .. })));
        assert_eq!(quote.item(&id).unwrap().input.quantity, 1);
        assert_eq!(quote.subtotal(), before);
    }

    #[test]
    fn test_state_shared_between_clones() {
        let state = QuoteState::new(Quote::new(&config(10)));
        let other = state.clone();

        other
            .with_quote_mut(|quote| quote.add_item(window(1000, 1000)))
            .unwrap();
        assert_eq!(state.with_quote(Quote::item_count), 1);
    }
}
