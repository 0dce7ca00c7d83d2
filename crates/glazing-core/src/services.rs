//! # Additional Services
//!
//! Installation, delivery, sealing and the like. Each service has a rate
//! and a unit that decides what the rate is multiplied by:
//!
//! | Unit        | Quantity                         |
//! |-------------|----------------------------------|
//! | `area`      | raw window area in m²            |
//! | `perimeter` | raw window perimeter in meters   |
//! | `fixed`     | 1                                |
//!
//! Service charges use the RAW dimensions (the whole opening is installed,
//! not just the billable glass) and are added after the margin.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::dimensions::Dimensions;
use crate::error::CoreResult;
use crate::money::Money;

/// What a service rate is charged per.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ServiceUnit {
    /// Per square meter of window.
    Area,
    /// Per linear meter of window perimeter.
    Perimeter,
    /// Flat amount per window.
    Fixed,
}

/// A selectable service from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ServicePricing {
    pub id: String,
    pub name: String,
    pub unit: ServiceUnit,
    pub rate: Money,
    /// Smallest billable quantity (e.g. installation billed for at least 1 m²).
    #[serde(default)]
    #[ts(type = "string | null")]
    pub minimum_quantity: Option<Decimal>,
}

/// A priced service line in a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ServiceCharge {
    pub service_id: String,
    pub name: String,
    pub unit: ServiceUnit,
    #[ts(type = "string")]
    pub quantity: Decimal,
    pub rate: Money,
    pub amount: Money,
}

impl ServicePricing {
    /// Billable quantity of this service for one window.
    pub fn quantity(&self, dimensions: &Dimensions) -> Decimal {
        let measured = match self.unit {
            ServiceUnit::Area => dimensions.area_m2(),
            ServiceUnit::Perimeter => dimensions.perimeter_m(),
            ServiceUnit::Fixed => Decimal::ONE,
        };

        match self.minimum_quantity {
            Some(minimum) => measured.max(minimum),
            None => measured,
        }
    }

    /// Prices this service for one window.
    ///
    /// ## Example
    /// ```rust
    /// use glazing_core::dimensions::Dimensions;
    /// use glazing_core::money::Money;
    /// use glazing_core::services::{ServicePricing, ServiceUnit};
    ///
    /// let install = ServicePricing {
    ///     id: "install".into(),
    ///     name: "Installation".into(),
    ///     unit: ServiceUnit::Perimeter,
    ///     rate: Money::from_major(10),
    ///     minimum_quantity: None,
    /// };
    /// let charge = install.charge(&Dimensions::unconstrained(1000, 1500)).unwrap();
    /// assert_eq!(charge.amount, Money::from_major(50)); // 5 m × 10
    /// ```
    pub fn charge(&self, dimensions: &Dimensions) -> CoreResult<ServiceCharge> {
        let quantity = self.quantity(dimensions);

        Ok(ServiceCharge {
            service_id: self.id.clone(),
            name: self.name.clone(),
            unit: self.unit,
            quantity,
            rate: self.rate,
            amount: self.rate.checked_times(quantity)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn service(unit: ServiceUnit, rate: i64) -> ServicePricing {
        ServicePricing {
            id: format!("{unit:?}").to_lowercase(),
            name: format!("{unit:?} service"),
            unit,
            rate: Money::from_major(rate),
            minimum_quantity: None,
        }
    }

    #[test]
    fn test_area_service_uses_raw_area() {
        // Minimums do not reduce the installed area
        let dims = Dimensions::new(1000, 1200, 800, 800);
        let charge = service(ServiceUnit::Area, 25).charge(&dims).unwrap();
        assert_eq!(charge.quantity, dec!(1.2));
        assert_eq!(charge.amount, Money::from_major(30));
    }

    #[test]
    fn test_perimeter_service() {
        let dims = Dimensions::unconstrained(1000, 1200);
        let charge = service(ServiceUnit::Perimeter, 3).charge(&dims).unwrap();
        assert_eq!(charge.quantity, dec!(4.4));
        assert_eq!(charge.amount.amount(), dec!(13.2));
    }

    #[test]
    fn test_fixed_service_ignores_size() {
        let fixed = service(ServiceUnit::Fixed, 80);
        let small = fixed.charge(&Dimensions::unconstrained(10, 10)).unwrap();
        let large = fixed.charge(&Dimensions::unconstrained(3000, 3000)).unwrap();
        assert_eq!(small.amount, Money::from_major(80));
        assert_eq!(small.amount, large.amount);
    }

    #[test]
    fn test_minimum_quantity() {
        let mut install = service(ServiceUnit::Area, 20);
        install.minimum_quantity = Some(dec!(1));

        let small = install.charge(&Dimensions::unconstrained(500, 500)).unwrap();
        assert_eq!(small.quantity, dec!(1));
        assert_eq!(small.amount, Money::from_major(20));

        let large = install.charge(&Dimensions::unconstrained(2000, 1000)).unwrap();
        assert_eq!(large.quantity, dec!(2));
    }

    #[test]
    fn test_negative_window_is_not_billed_by_size() {
        let dims = Dimensions::unconstrained(-1000, -1000);
        let charge = service(ServiceUnit::Area, 100).charge(&dims).unwrap();
        assert_eq!(charge.quantity, Decimal::ZERO);
        assert!(charge.amount.is_zero());

        let dims = Dimensions::unconstrained(-500, 1000);
        let charge = service(ServiceUnit::Perimeter, 100).charge(&dims).unwrap();
        assert_eq!(charge.quantity, Decimal::ZERO);
        assert!(charge.amount.is_zero());

        // A configured minimum still applies
        let mut install = service(ServiceUnit::Area, 100);
        install.minimum_quantity = Some(dec!(1));
        let charge = install.charge(&Dimensions::unconstrained(-1000, -1000)).unwrap();
        assert_eq!(charge.amount, Money::from_major(100));
    }

    #[test]
    fn test_overflowing_rate_is_an_error() {
        let mut huge = service(ServiceUnit::Area, 1);
        huge.rate = Money::new(Decimal::MAX);
        let result = huge.charge(&Dimensions::unconstrained(3000, 3000));
        assert!(matches!(
            result,
            Err(crate::error::CoreError::Overflow { .. })
        ));
    }

    #[test]
    fn test_unit_serialization() {
        let json = serde_json::to_string(&ServiceUnit::Perimeter).unwrap();
        assert_eq!(json, "\"perimeter\"");
    }
}
