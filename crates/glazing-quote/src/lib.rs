//! # glazing-quote: Quote Assembly for the Glazing Quoter
//!
//! Builds customer quotes from priced window lines. Every price is taken
//! from [`glazing_core`]; this crate adds the state, policy and checks
//! around it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   request handler                                                       │
//! │        │  LineItemInput (+ PreviewPrice)                                │
//! │        ▼                                                                │
//! │  ┌───────────────────────────────────────────────────────────────┐     │
//! │  │              ★ glazing-quote (THIS CRATE) ★                    │     │
//! │  │                                                                │     │
//! │  │  config ──► QuoteConfig (quote.toml, GLAZING_* env)            │     │
//! │  │  quote ───► Quote / QuoteState (items, totals, expiry)         │     │
//! │  │  parity ──► reconcile(preview, breakdown)                      │     │
//! │  │  logging ─► tracing subscriber                                 │     │
//! │  └───────────────────────────┬────────────────────────────────────┘     │
//! │                              ▼                                          │
//! │                glazing-core (pure pricing engine)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use glazing_quote::{init_tracing, reconcile, Quote, QuoteConfig, QuoteState};
//!
//! init_tracing();
//! let config = QuoteConfig::load_or_default(None);
//! let state = QuoteState::new(Quote::new(&config));
//!
//! let item_id = state.with_quote_mut(|quote| quote.add_item(input))?;
//! state.with_quote(|quote| {
//!     let item = quote.item(&item_id).unwrap();
//!     reconcile(&preview, &item.breakdown, config.quote.parity_tolerance)
//! })?;
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod parity;
pub mod quote;

pub use config::{QuoteConfig, DEFAULT_TENANT_ID};
pub use error::{QuoteError, QuoteResult};
pub use logging::init_tracing;
pub use parity::{reconcile, PreviewPrice};
pub use quote::{Quote, QuoteItem, QuoteState, QuoteTotals};
