//! End-to-end quote workflow: config file, items, preview parity, totals.

use glazing_core::{
    ColorPricing, GlassTypePricing, LineItemInput, ModelPricing, Money, ProfileCostInput,
    ProfileDiscount, ServicePricing, ServiceUnit,
};
use glazing_quote::{reconcile, PreviewPrice, Quote, QuoteConfig, QuoteError, QuoteState};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

// =============================================================================
// Fixtures
// =============================================================================

fn casement(width: i64, height: i64, quantity: u32) -> LineItemInput {
    LineItemInput {
        width_mm: Decimal::from(width),
        height_mm: Decimal::from(height),
        quantity,
        model: ModelPricing {
            id: "4a7c1e93-2b6d-4f58-8e0a-9c3b5d7f1a26".to_string(),
            name: "Casement 70".to_string(),
            min_width_mm: dec!(400),
            max_width_mm: dec!(1800),
            min_height_mm: dec!(400),
            max_height_mm: dec!(2200),
            profile: ProfileCostInput {
                base_price: Money::from_major(90),
                accessory_price: Money::from_major(25),
                cost_per_mm_width: Money::new(dec!(0.05)),
                cost_per_mm_height: Money::new(dec!(0.05)),
            },
            profile_discount: ProfileDiscount::new(50, 50),
            margin_percentage: dec!(30),
        },
        glass: GlassTypePricing {
            id: "d8e1f2a3-b4c5-4d6e-9f70-8192a3b4c5d6".to_string(),
            name: "Double glazed 4/12/4".to_string(),
            price_per_m2: Money::from_major(80),
        },
        color: Some(ColorPricing {
            id: "5b6c7d8e-9fa0-4b1c-8d2e-3f4a5b6c7d8e".to_string(),
            name: "White".to_string(),
            surcharge_percentage: Decimal::ZERO,
        }),
        services: vec![ServicePricing {
            id: "a1b2c3d4-e5f6-4a7b-8c9d-e0f1a2b3c4d5".to_string(),
            name: "Installation".to_string(),
            unit: ServiceUnit::Area,
            rate: Money::from_major(12),
            minimum_quantity: Some(dec!(1)),
        }],
    }
}

/// Config with no `GLAZING_*` overrides, whatever the process env holds.
fn load_without_env(dir: &TempDir) -> Result<QuoteConfig, QuoteError> {
    QuoteConfig::load_with(Some(dir.path().join("quote.toml")), |_| None)
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn config_saved_and_loaded_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("quote.toml");

    let mut config = QuoteConfig::default();
    config.tenant.name = "Vidrios del Sur".to_string();
    config.currency.code = "CLP".to_string();
    config.currency.decimals = 0;
    config.quote.validity_days = 30;
    config.save(Some(path.clone())).unwrap();

    let loaded = QuoteConfig::load_with(Some(path), |_| None).unwrap();
    assert_eq!(loaded.tenant.name, "Vidrios del Sur");
    assert_eq!(loaded.currency.code, "CLP");
    assert_eq!(loaded.quote.validity_days, 30);
}

#[test]
fn overrides_apply_on_top_of_the_file() {
    let dir = TempDir::new().unwrap();
    let mut config = QuoteConfig::default();
    config.currency.code = "CLP".to_string();
    config.save(Some(dir.path().join("quote.toml"))).unwrap();

    let loaded = QuoteConfig::load_with(Some(dir.path().join("quote.toml")), |key| {
        (key == "GLAZING_QUOTE_VALIDITY_DAYS").then(|| "45".to_string())
    })
    .unwrap();
    assert_eq!(loaded.currency.code, "CLP");
    assert_eq!(loaded.quote.validity_days, 45);
}

#[test]
fn invalid_config_file_rejected() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("quote.toml"), "[quote]\nmax_items = \"many\"\n").unwrap();

    let err = load_without_env(&dir).unwrap_err();
    assert!(err.is_config_error());
    assert!(matches!(err, QuoteError::ConfigLoadFailed(_)));
}

#[test]
fn missing_config_file_means_defaults() {
    let dir = TempDir::new().unwrap();
    let config = load_without_env(&dir).unwrap();
    let defaults = QuoteConfig::default();
    assert_eq!(config.tenant_id(), defaults.tenant_id());
    assert_eq!(config.currency.code, defaults.currency.code);
    assert_eq!(config.quote.max_items, defaults.quote.max_items);
}

// =============================================================================
// Workflow
// =============================================================================

#[test]
fn quote_from_preview_to_totals() {
    let config = QuoteConfig::default();
    let mut quote = Quote::new(&config);

    let id = quote.add_item(casement(1200, 1500, 2)).unwrap();
    let item = quote.item(&id).unwrap();
    let b = &item.breakdown;

    // Glass: 1.15 × 1.45 = 1.6675 m² × 80
    assert_eq!(b.billable_area_m2, dec!(1.6675));
    assert_eq!(b.glass_cost.amount(), dec!(133.4));
    // Profile: 90 + 25 + 0.05 × 800 + 0.05 × 1100
    assert_eq!(b.profile_cost, Money::from_major(210));
    // 343.4 / 0.7 = 490.571428...
    assert_eq!(b.to_display().sales_price, "490.57");
    // Installation: 1.8 m² × 12
    assert_eq!(b.services_total.amount(), dec!(21.6));

    let preview = PreviewPrice {
        billable_area_m2: dec!(1.6675),
        glass_cost: dec!(133.40000000000001),
        unit_price: dec!(512.1714285714286),
        line_subtotal: dec!(1024.3428571428572),
    };
    reconcile(&preview, b, config.quote.parity_tolerance).unwrap();

    let totals = quote.totals();
    assert_eq!(totals.item_count, 1);
    assert_eq!(totals.total_quantity, 2);
    assert_eq!(config.format_currency(totals.subtotal), "$1024.34");
}

#[test]
fn tampered_preview_is_caught() {
    let config = QuoteConfig::default();
    let mut quote = Quote::new(&config);
    let id = quote.add_item(casement(1200, 1500, 1)).unwrap();
    let breakdown = &quote.item(&id).unwrap().breakdown;

    let mut preview = PreviewPrice::from(breakdown);
    preview.line_subtotal = dec!(450);

    let err = reconcile(&preview, breakdown, config.quote.parity_tolerance).unwrap_err();
    assert!(matches!(err, QuoteError::PriceMismatch { ref field, .. } if field == "line subtotal"));

    let mut preview = PreviewPrice::from(breakdown);
    preview.glass_cost = dec!(120);
    let err = reconcile(&preview, breakdown, config.quote.parity_tolerance).unwrap_err();
    assert!(matches!(err, QuoteError::PriceMismatch { ref field, .. } if field == "glass cost"));
}

#[test]
fn rejected_items_leave_quote_unchanged() {
    let mut quote = Quote::new(&QuoteConfig::default());
    quote.add_item(casement(1000, 1000, 1)).unwrap();
    let before = quote.totals();

    // Wider than the model allows
    assert!(quote.add_item(casement(1900, 1000, 1)).is_err());

    let mut bad_margin = casement(1000, 1000, 1);
    bad_margin.model.margin_percentage = dec!(100);
    let err = quote.add_item(bad_margin).unwrap_err();
    assert!(err.is_user_input_error());

    assert_eq!(quote.totals(), before);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_handlers_share_one_quote() {
    let mut config = QuoteConfig::default();
    config.quote.max_items = 16;
    let state = QuoteState::new(Quote::new(&config));

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let state = state.clone();
            tokio::spawn(async move {
                state.with_quote_mut(|quote| quote.add_item(casement(1000, 1000, 1)))
            })
        })
        .collect();

    let mut added = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => added += 1,
            Err(QuoteError::QuoteTooLarge { max }) => {
                assert_eq!(max, 16);
                rejected += 1;
            }
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    assert_eq!(added, 16);
    assert_eq!(rejected, 4);

    let totals = state.with_quote(|quote| quote.totals());
    let first = state.with_quote(|quote| quote.items[0].breakdown.unit_price);
    assert_eq!(totals.subtotal.to_fixed(2), (first * 16u32).to_fixed(2));
}
