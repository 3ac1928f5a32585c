//! Property tests for fare math and status parsing.

use onride::shared::api::Decimal128;
use onride::shared::trip::category::parse_percent;
use onride::shared::trip::{convert_distance, convert_duration, Category, FareQuote, RequestStatus};
use proptest::prelude::*;

fn category(tax_km: f64, tax_app: &str, valor: f64) -> Category {
    Category {
        id: "c1".to_string(),
        name: "Test".to_string(),
        icon: None,
        tax_km: Decimal128(tax_km),
        tax_app: Some(tax_app.to_string()),
        valor: Decimal128(valor),
        delivery: false,
    }
}

proptest! {
    #[test]
    fn quote_total_is_non_negative(
        tax_km in 0.1f64..50.0,
        valor in 0.0f64..100.0,
        percent in 0.0f64..100.0,
        distance in 0.0f64..500.0,
    ) {
        let category = category(tax_km, &format!("{}%", percent), valor);
        let quote = FareQuote::quote(&category, distance);
        prop_assert!(quote.total >= 0.0);
        prop_assert!(quote.distance_part >= 0.0);
        prop_assert!(quote.app_part >= 0.0);
    }

    #[test]
    fn quote_grows_with_distance(
        tax_km in 0.1f64..50.0,
        valor in 0.0f64..100.0,
        distance in 0.0f64..500.0,
        extra in 1.0f64..100.0,
    ) {
        let category = category(tax_km, "10%", valor);
        let near = FareQuote::quote(&category, distance);
        let far = FareQuote::quote(&category, distance + extra);
        prop_assert!(far.total >= near.total);
    }

    #[test]
    fn converted_distance_is_always_in_kilometers(meters in 100.0f64..1_000_000.0) {
        let km = convert_distance(meters);
        prop_assert!(km < meters);
        prop_assert!((km - meters / 1000.0).abs() < 0.01);
    }

    #[test]
    fn short_distances_pass_through(km in 0.0f64..100.0) {
        if km < 100.0 {
            prop_assert_eq!(convert_distance(km), km);
        }
    }

    #[test]
    fn converted_duration_is_always_in_minutes(seconds in 10.0f64..100_000.0) {
        let minutes = convert_duration(seconds);
        prop_assert!((minutes - seconds / 60.0).abs() < 0.1);
    }

    #[test]
    fn known_statuses_round_trip_through_wire_strings(
        status in prop_oneof![
            Just(RequestStatus::Process),
            Just(RequestStatus::Accepted),
            Just(RequestStatus::PickUp),
            Just(RequestStatus::Canceled),
        ]
    ) {
        let wire = status.as_wire_str().to_string();
        prop_assert_eq!(RequestStatus::parse(&wire), status);
    }

    #[test]
    fn unknown_statuses_are_preserved_verbatim(raw in "[a-z]{3,12}") {
        let parsed = RequestStatus::parse(&raw);
        match &parsed {
            RequestStatus::Process
            | RequestStatus::Accepted
            | RequestStatus::PickUp
            | RequestStatus::Canceled => {}
            RequestStatus::Other(kept) => prop_assert_eq!(kept, &raw),
        }
    }

    #[test]
    fn percent_parsing_never_panics(raw in ".{0,20}") {
        let _ = parse_percent(&raw);
    }

    #[test]
    fn valid_percent_strings_scale_down(percent in 0.0f64..1000.0) {
        let fraction = parse_percent(&format!("{}%", percent));
        prop_assert!((fraction - percent / 100.0).abs() < 1e-9);
    }
}

#[test]
fn reference_quote_matches_pricing_sheet() {
    // 10 km at tax_km 1.5, base 2, 10% platform fee.
    let quote = FareQuote::quote(&category(1.5, "10%", 2.0), 10.0);
    assert_eq!(quote.total, 18.15);
}
