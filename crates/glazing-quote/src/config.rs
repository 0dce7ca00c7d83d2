//! # Quote Configuration
//!
//! Tenant, currency and quote policy settings.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     GLAZING_TENANT_ID=acme-windows                                     │
//! │     GLAZING_CURRENCY_CODE=CLP                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/glazing-quoter/quote.toml (Linux)                        │
//! │     ~/Library/Application Support/com.glazing.quoter/quote.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     default tenant, USD, 15 day validity                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # quote.toml
//! [tenant]
//! id = "acme-windows"
//! name = "ACME Windows"
//!
//! [currency]
//! code = "CLP"
//! symbol = "$"
//! decimals = 0
//!
//! [quote]
//! validity_days = 15
//! max_items = 50
//! parity_tolerance = "0.00"
//! ```

use std::path::PathBuf;

use glazing_core::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{QuoteError, QuoteResult};

/// Tenant used when none is configured (single-tenant mode).
pub const DEFAULT_TENANT_ID: &str = "default";

/// Upper bound for `currency.decimals`; `Decimal` keeps far more, but no
/// currency displays more than this.
const MAX_CURRENCY_DECIMALS: u32 = 4;

/// Longest accepted quote validity (ten years).
pub const MAX_VALIDITY_DAYS: u32 = 3650;

// =============================================================================
// Tenant
// =============================================================================

/// The business issuing quotes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantConfig {
    pub id: String,

    /// Printed on quote documents.
    #[serde(default = "default_tenant_name")]
    pub name: String,
}

fn default_tenant_name() -> String {
    "Glazing Quoter".to_string()
}

impl Default for TenantConfig {
    fn default() -> Self {
        TenantConfig {
            id: DEFAULT_TENANT_ID.to_string(),
            name: default_tenant_name(),
        }
    }
}

// =============================================================================
// Currency
// =============================================================================

/// Currency the tenant quotes in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// ISO 4217 code
    #[serde(default = "default_currency_code")]
    pub code: String,

    #[serde(default = "default_currency_symbol")]
    pub symbol: String,

    /// Decimal places shown to customers. Calculation precision is
    /// unaffected.
    #[serde(default = "default_currency_decimals")]
    pub decimals: u32,
}

fn default_currency_code() -> String {
    "USD".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_currency_decimals() -> u32 {
    glazing_core::CURRENCY_DECIMALS
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        CurrencyConfig {
            code: default_currency_code(),
            symbol: default_currency_symbol(),
            decimals: default_currency_decimals(),
        }
    }
}

// =============================================================================
// Quote Policy
// =============================================================================

/// Rules applied when assembling quotes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotePolicy {
    /// Days a quote stays valid after creation.
    #[serde(default = "default_validity_days")]
    pub validity_days: u32,

    /// Maximum number of line items per quote.
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Largest accepted gap between the client preview and the server
    /// price, compared after rounding to 2 decimals.
    #[serde(default)]
    pub parity_tolerance: Decimal,
}

fn default_validity_days() -> u32 {
    15
}

fn default_max_items() -> usize {
    50
}

impl Default for QuotePolicy {
    fn default() -> Self {
        QuotePolicy {
            validity_days: default_validity_days(),
            max_items: default_max_items(),
            parity_tolerance: Decimal::ZERO,
        }
    }
}

// =============================================================================
// Main Quote Configuration
// =============================================================================

/// Complete quote configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteConfig {
    #[serde(default)]
    pub tenant: TenantConfig,

    #[serde(default)]
    pub currency: CurrencyConfig,

    #[serde(default)]
    pub quote: QuotePolicy,
}

impl QuoteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (quote.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> QuoteResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with `GLAZING_*` overrides read through
    /// `lookup` instead of the process environment.
    ///
    /// ## Example
    /// ```rust,no_run
    /// use glazing_quote::QuoteConfig;
    ///
    /// let config = QuoteConfig::load_with(None, |key| {
    ///     (key == "GLAZING_CURRENCY_CODE").then(|| "EUR".to_string())
    /// })?;
    /// assert_eq!(config.currency.code, "EUR");
    /// # Ok::<(), glazing_quote::QuoteError>(())
    /// ```
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> QuoteResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading quote config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load quote config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> QuoteResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| QuoteError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| QuoteError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| QuoteError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Quote config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> QuoteResult<()> {
        if self.tenant.id.trim().is_empty() {
            return Err(QuoteError::InvalidConfig("tenant.id is required".into()));
        }

        let code = &self.currency.code;
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(QuoteError::InvalidConfig(format!(
                "currency.code must be a 3-letter ISO 4217 code, got: '{}'",
                code
            )));
        }

        if self.currency.decimals > MAX_CURRENCY_DECIMALS {
            return Err(QuoteError::InvalidConfig(format!(
                "currency.decimals must be at most {}, got: {}",
                MAX_CURRENCY_DECIMALS, self.currency.decimals
            )));
        }

        if self.quote.validity_days == 0 || self.quote.validity_days > MAX_VALIDITY_DAYS {
            return Err(QuoteError::InvalidConfig(format!(
                "quote.validity_days must be between 1 and {}, got: {}",
                MAX_VALIDITY_DAYS, self.quote.validity_days
            )));
        }

        if self.quote.max_items == 0 {
            return Err(QuoteError::InvalidConfig(
                "quote.max_items must be greater than 0".into(),
            ));
        }

        if self.quote.parity_tolerance.is_sign_negative() {
            return Err(QuoteError::InvalidConfig(
                "quote.parity_tolerance must not be negative".into(),
            ));
        }

        Ok(())
    }

    /// Applies `GLAZING_*` overrides from any key lookup.
    ///
    /// Unparseable numeric values are logged and ignored.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = lookup("GLAZING_TENANT_ID") {
            debug!(tenant_id = %id, "Overriding tenant ID from environment");
            self.tenant.id = id;
        }

        if let Some(name) = lookup("GLAZING_TENANT_NAME") {
            self.tenant.name = name;
        }

        if let Some(code) = lookup("GLAZING_CURRENCY_CODE") {
            debug!(currency = %code, "Overriding currency from environment");
            self.currency.code = code.to_uppercase();
        }

        if let Some(symbol) = lookup("GLAZING_CURRENCY_SYMBOL") {
            self.currency.symbol = symbol;
        }

        if let Some(decimals) = lookup("GLAZING_CURRENCY_DECIMALS") {
            match decimals.parse::<u32>() {
                Ok(d) => self.currency.decimals = d,
                Err(_) => warn!(value = %decimals, "Invalid GLAZING_CURRENCY_DECIMALS"),
            }
        }

        if let Some(days) = lookup("GLAZING_QUOTE_VALIDITY_DAYS") {
            match days.parse::<u32>() {
                Ok(d) => {
                    debug!(days = d, "Overriding quote validity from environment");
                    self.quote.validity_days = d;
                }
                Err(_) => warn!(value = %days, "Invalid GLAZING_QUOTE_VALIDITY_DAYS"),
            }
        }

        if let Some(max) = lookup("GLAZING_QUOTE_MAX_ITEMS") {
            match max.parse::<usize>() {
                Ok(m) => self.quote.max_items = m,
                Err(_) => warn!(value = %max, "Invalid GLAZING_QUOTE_MAX_ITEMS"),
            }
        }

        if let Some(tolerance) = lookup("GLAZING_PARITY_TOLERANCE") {
            match tolerance.parse::<Decimal>() {
                Ok(t) => self.quote.parity_tolerance = t,
                Err(_) => warn!(value = %tolerance, "Invalid GLAZING_PARITY_TOLERANCE"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "glazing", "quoter")
            .map(|dirs| dirs.config_dir().join("quote.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn tenant_id(&self) -> &str {
        &self.tenant.id
    }

    /// Formats an amount with the currency symbol and display decimals.
    ///
    /// ## Example
    /// `Money(1234.565)` with `$` and 2 decimals → `"$1234.57"`
    pub fn format_currency(&self, amount: Money) -> String {
        let digits = amount.abs().to_fixed(self.currency.decimals);
        if amount.round_dp(self.currency.decimals).is_negative() {
            format!("-{}{}", self.currency.symbol, digits)
        } else {
            format!("{}{}", self.currency.symbol, digits)
        }
    }
}
