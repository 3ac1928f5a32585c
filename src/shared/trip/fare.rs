//! Fare math.
//!
//! Pure functions only; every screen that shows a price goes through this
//! module so the formula exists in exactly one place.

use crate::shared::trip::Category;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Normalize a route distance for quoting. Values of at least 100 are
/// treated as meters and converted to kilometers with two decimals;
/// smaller values pass through untouched (they are already kilometers).
pub fn convert_distance(value: f64) -> f64 {
    if value >= 100.0 {
        round2(value / 1000.0)
    } else {
        value
    }
}

/// Normalize a route duration. Values of at least 10 are treated as
/// seconds and converted to minutes with one decimal; smaller values
/// pass through untouched.
pub fn convert_duration(value: f64) -> f64 {
    if value >= 10.0 {
        round1(value / 60.0)
    } else {
        value
    }
}

/// Fare breakdown for one category over one route
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareQuote {
    /// Total price charged to the rider
    pub total: f64,
    /// Distance component: `tax_km * distance`
    pub distance_part: f64,
    /// Platform fee component
    pub app_part: f64,
}

impl FareQuote {
    /// Quote a category over a distance in kilometers.
    ///
    /// `total = tax_km * (distance + valor + tax_app_fraction)`, rounded to
    /// two decimals. A zero `tax_km` quotes everything as zero instead of
    /// dividing by it.
    pub fn quote(category: &Category, distance_km: f64) -> Self {
        let tax_km = category.tax_km.value();
        let valor = category.valor.value();
        let fee = category.tax_app_fraction();

        if tax_km == 0.0 || !distance_km.is_finite() || distance_km < 0.0 {
            return Self::zero();
        }

        let total = tax_km * (distance_km + valor + fee);
        let distance_part = tax_km * distance_km;
        let app_part = fee / tax_km * (distance_km + valor);

        Self {
            total: round2(total),
            distance_part: round2(distance_part),
            app_part: round2(app_part),
        }
    }

    pub fn zero() -> Self {
        Self {
            total: 0.0,
            distance_part: 0.0,
            app_part: 0.0,
        }
    }

    /// Total formatted for display.
    pub fn total_display(&self) -> String {
        format!("{:.2}", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::Decimal128;

    fn category(tax_km: f64, tax_app: &str, valor: f64) -> Category {
        Category {
            id: "c1".to_string(),
            name: "Comfort".to_string(),
            icon: None,
            tax_km: Decimal128(tax_km),
            tax_app: Some(tax_app.to_string()),
            valor: Decimal128(valor),
            delivery: false,
        }
    }

    #[test]
    fn test_reference_quote() {
        // distance 10 km, valor 2, tax_km 1.5, tax_app "10%"
        let quote = FareQuote::quote(&category(1.5, "10%", 2.0), 10.0);
        assert_eq!(quote.total, 18.15);
        assert_eq!(quote.total_display(), "18.15");
        assert_eq!(quote.distance_part, 15.0);
    }

    #[test]
    fn test_app_part_formula() {
        let quote = FareQuote::quote(&category(1.5, "10%", 2.0), 10.0);
        // 0.1 / 1.5 * (10 + 2) = 0.8
        assert_eq!(quote.app_part, 0.8);
    }

    #[test]
    fn test_zero_multiplier_quotes_zero() {
        let quote = FareQuote::quote(&category(0.0, "10%", 2.0), 10.0);
        assert_eq!(quote, FareQuote::zero());
        assert_eq!(quote.total_display(), "0.00");
    }

    #[test]
    fn test_convert_distance_meters() {
        assert_eq!(convert_distance(1500.0), 1.50);
        assert_eq!(convert_distance(100.0), 0.10);
    }

    #[test]
    fn test_convert_distance_passthrough() {
        assert_eq!(convert_distance(50.0), 50.0);
        assert_eq!(convert_distance(99.9), 99.9);
    }

    #[test]
    fn test_convert_duration_seconds() {
        assert_eq!(convert_duration(600.0), 10.0);
        assert_eq!(convert_duration(90.0), 1.5);
    }

    #[test]
    fn test_convert_duration_passthrough() {
        assert_eq!(convert_duration(5.0), 5.0);
        assert_eq!(convert_duration(9.9), 9.9);
    }
}
