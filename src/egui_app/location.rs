//! # Location Feed
//!
//! One shared source of truth for the device position, plus the
//! rate-limited push of that position to the backend. Reverse geocoding
//! goes through the [`Geocoder`] trait so the provider can be swapped (or
//! mocked) without touching callers.

use std::time::{Duration, Instant};

use serde::Deserialize;
use tracing::debug;

use crate::shared::error::ApiError;

/// Minimum spacing between two location pushes
const PUSH_INTERVAL: Duration = Duration::from_secs(3);

/// A geographic position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// A reverse-geocoded place
#[derive(Debug, Clone, Default)]
pub struct Place {
    pub address: String,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

/// Great-circle distance between two positions, in meters.
pub fn haversine_m(a: Position, b: Position) -> f64 {
    const EARTH_RADIUS_M: f64 = 6_371_000.0;

    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Rough route estimate: straight-line distance in meters plus a duration
/// in seconds assuming 30 km/h average urban speed. Stands in for a
/// routing service, which this client does not call.
pub fn estimate_route(from: Position, to: Position) -> (f64, f64) {
    let distance_m = haversine_m(from, to);
    let duration_s = distance_m / (30_000.0 / 3600.0);
    (distance_m, duration_s)
}

/// Reverse geocoding provider seam
pub trait Geocoder: Send + Sync {
    fn reverse(&self, latitude: f64, longitude: f64) -> Result<Place, ApiError>;
}

/// HTTP reverse geocoder speaking the Nominatim wire format
pub struct HttpGeocoder {
    base_url: String,
    client: reqwest::blocking::Client,
}

#[derive(Deserialize)]
struct ReverseResponse {
    display_name: String,
    #[serde(default)]
    address: Option<ReverseAddress>,
}

#[derive(Deserialize, Default)]
struct ReverseAddress {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    town: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl HttpGeocoder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Geocoder for HttpGeocoder {
    fn reverse(&self, latitude: f64, longitude: f64) -> Result<Place, ApiError> {
        let url = format!("{}/reverse", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
            ])
            .send()
            .map_err(|e| ApiError::transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::status(
                response.status().as_u16(),
                response.status().to_string(),
            ));
        }

        let body: ReverseResponse = response
            .json()
            .map_err(|e| ApiError::decode(e.to_string()))?;
        let address = body.address.unwrap_or_default();

        Ok(Place {
            address: body.display_name,
            city: address.city.or(address.town),
            region: address.state,
            country: address.country,
        })
    }
}

/// Shared position state with rate-limited backend updates
#[derive(Debug)]
pub struct LocationFeed {
    position: Option<Position>,
    last_push: Option<Instant>,
}

impl LocationFeed {
    pub fn new() -> Self {
        Self {
            position: None,
            last_push: None,
        }
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn set_position(&mut self, latitude: f64, longitude: f64) {
        self.position = Some(Position {
            latitude,
            longitude,
        });
    }

    /// Whether enough time has passed for another location push.
    pub fn should_push(&self) -> bool {
        match self.last_push {
            Some(at) => at.elapsed() >= PUSH_INTERVAL,
            None => true,
        }
    }

    fn record_push(&mut self) {
        self.last_push = Some(Instant::now());
    }

    /// If a position is set and the rate limit allows another push, record
    /// the push and hand the position to the caller, who performs the
    /// actual network call off the UI thread.
    pub fn take_due_position(&mut self) -> Option<Position> {
        if !self.should_push() {
            return None;
        }
        let position = self.position?;
        self.record_push();
        debug!(
            latitude = position.latitude,
            longitude = position.longitude,
            "location push due"
        );
        Some(position)
    }
}

impl Default for LocationFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_push_is_due() {
        let feed = LocationFeed::new();
        assert!(feed.should_push());
    }

    #[test]
    fn test_push_rate_limited() {
        let mut feed = LocationFeed::new();
        feed.set_position(-8.83, 13.23);
        assert!(feed.take_due_position().is_some());
        assert!(!feed.should_push());
        assert!(feed.take_due_position().is_none());
    }

    #[test]
    fn test_no_push_without_position() {
        let mut feed = LocationFeed::new();
        assert!(feed.take_due_position().is_none());
    }

    #[test]
    fn test_position_updates() {
        let mut feed = LocationFeed::new();
        assert!(feed.position().is_none());
        feed.set_position(-8.83, 13.23);
        let position = feed.position().unwrap();
        assert_eq!(position.latitude, -8.83);
    }

    #[test]
    fn test_haversine_zero_for_same_point() {
        let p = Position {
            latitude: -8.83,
            longitude: 13.23,
        };
        assert_eq!(haversine_m(p, p), 0.0);
    }

    #[test]
    fn test_haversine_known_distance() {
        // One degree of latitude is roughly 111 km.
        let a = Position {
            latitude: 0.0,
            longitude: 0.0,
        };
        let b = Position {
            latitude: 1.0,
            longitude: 0.0,
        };
        let d = haversine_m(a, b);
        assert!((d - 111_195.0).abs() < 200.0, "got {}", d);
    }

    #[test]
    fn test_estimate_route_duration() {
        let a = Position {
            latitude: 0.0,
            longitude: 0.0,
        };
        let b = Position {
            latitude: 1.0,
            longitude: 0.0,
        };
        let (distance_m, duration_s) = estimate_route(a, b);
        // 30 km/h covers the distance in distance/8.333 seconds.
        assert!((duration_s - distance_m / 8.333_333).abs() < 1.0);
    }

    #[test]
    fn test_reverse_response_prefers_city_over_town() {
        let json = r#"{
            "display_name": "Luanda, Angola",
            "address": {"city": "Luanda", "town": "Ingombota", "country": "Angola"}
        }"#;
        let body: ReverseResponse = serde_json::from_str(json).unwrap();
        let address = body.address.unwrap();
        assert_eq!(address.city.or(address.town), Some("Luanda".to_string()));
    }
}
