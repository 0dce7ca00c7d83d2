//! # glazing-core: Pure Pricing Engine for the Glazing Quoter
//!
//! This crate is the **source of truth** for window prices. It contains
//! the pricing rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Glazing Quoter Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser (catalog, cart)                      │   │
//! │  │    Model form ──► live price preview (TS mirror of this crate)  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ LineItemInput + PreviewPrice           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 glazing-quote (quote assembly)                  │   │
//! │  │    add_item, reconcile preview, totals, expiry                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ glazing-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌────────┐ ┌──────────┐ ┌───────┐ ┌────────┐ ┌─────────────┐  │   │
//! │  │  │ money  │ │dimensions│ │ glass │ │ margin │ │   pricing   │  │   │
//! │  │  │ Money  │ │ effective│ │ area  │ │ cost / │ │ breakdown   │  │   │
//! │  │  │        │ │ meters   │ │ cost  │ │(1 - m) │ │ pipeline    │  │   │
//! │  │  └────────┘ └──────────┘ └───────┘ └────────┘ └─────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO LOGGING • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Exact decimal `Money`
//! - [`dimensions`] - Raw, effective and metric window dimensions
//! - [`glass`] - Billable glass area and glass cost
//! - [`margin`] - Margin-on-sales-price inversion
//! - [`profile`] - Linear profile cost
//! - [`services`] - Area/perimeter/fixed additional services
//! - [`pricing`] - The line-item pipeline and its breakdown
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, bit for bit
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Decimal Money**: never `f64` inside a calculation
//! 4. **Round Once**: only [`pricing::PriceBreakdown::to_display`] rounds
//!
//! ## Example Usage
//!
//! ```rust
//! use glazing_core::{Dimensions, GlassCalculator, MarginCalculator, Money, ProfileDiscount};
//! use rust_decimal::Decimal;
//!
//! let dims = Dimensions::new(1000, 1200, 800, 800);
//! let area = GlassCalculator::new().billable_area(&dims, &ProfileDiscount::new(40, 40));
//! assert_eq!(area, Decimal::new(11136, 4));
//!
//! let price = MarginCalculator::new()
//!     .sales_price(Money::from_major(100), Decimal::from(20))
//!     .unwrap();
//! assert_eq!(price.to_fixed(2), "125.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dimensions;
pub mod error;
pub mod glass;
pub mod margin;
pub mod money;
pub mod pricing;
pub mod profile;
pub mod services;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use dimensions::{Dimensions, MetersDimensions, ProfileDiscount};
pub use error::{CoreError, CoreResult, ValidationError};
pub use glass::{GlassCalculator, GlassCostInput};
pub use margin::{MarginCalculator, ModelSalesPriceInput};
pub use money::Money;
pub use pricing::{
    price_line_item, ColorPricing, DisplayBreakdown, GlassTypePricing, ItemPriceCalculator,
    LineItemInput, ModelPricing, PriceBreakdown,
};
pub use profile::ProfileCostInput;
pub use services::{ServiceCharge, ServicePricing, ServiceUnit};

// =============================================================================
// Crate-Level Constants
// =============================================================================

use rust_decimal::Decimal;

/// Millimeters per meter.
pub const MM_PER_METER: Decimal = Decimal::ONE_THOUSAND;

/// Decimal places shown for currency amounts.
pub const CURRENCY_DECIMALS: u32 = 2;

/// Decimal places shown for areas in m².
pub const AREA_DECIMALS: u32 = 2;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Largest window measurement the engine accepts, in mm (1 km).
///
/// Sides, minimums and discounts beyond this are typing errors; the bound
/// also keeps every area and perimeter far inside the decimal range.
pub const MAX_DIMENSION_MM: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
