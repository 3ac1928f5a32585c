//! Ride categories and their pricing parameters.

use serde::{Deserialize, Serialize};

use crate::shared::api::Decimal128;

/// A ride (or delivery) category from `/getCategory` / `/getDelivery`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Icon image URL
    #[serde(default)]
    pub icon: Option<String>,
    /// Per-kilometer multiplier
    #[serde(default)]
    pub tax_km: Decimal128,
    /// Platform fee as a percent string, e.g. "10%"
    #[serde(default)]
    pub tax_app: Option<String>,
    /// Base value added to the distance before the multiplier
    #[serde(default)]
    pub valor: Decimal128,
    #[serde(default)]
    pub delivery: bool,
}

impl Category {
    /// Platform fee as a fraction: `"10%"` becomes `0.1`. Missing or
    /// malformed values quote as zero rather than failing the screen.
    pub fn tax_app_fraction(&self) -> f64 {
        parse_percent(self.tax_app.as_deref().unwrap_or(""))
    }
}

/// Parse a percent string like `"10%"` (or bare `"10"`) into a fraction.
pub fn parse_percent(raw: &str) -> f64 {
    raw.trim()
        .trim_end_matches('%')
        .trim()
        .parse::<f64>()
        .map(|p| p / 100.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent("10%"), 0.1);
        assert_eq!(parse_percent("2.5%"), 0.025);
        assert_eq!(parse_percent("15"), 0.15);
    }

    #[test]
    fn test_parse_percent_malformed_is_zero() {
        assert_eq!(parse_percent(""), 0.0);
        assert_eq!(parse_percent("n/a"), 0.0);
    }

    #[test]
    fn test_category_deserializes() {
        let json = r#"{
            "_id": "c1",
            "name": "Comfort",
            "tax_km": {"$numberDecimal": "1.5"},
            "tax_app": "10%",
            "valor": 2
        }"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.tax_km.value(), 1.5);
        assert_eq!(category.tax_app_fraction(), 0.1);
        assert!(!category.delivery);
    }
}
