//! Trip request entity and its lifecycle status.
//!
//! The backend stores status as a free-form string with mixed conventions
//! (`process`, `accepted`, `PICK-UP`, `canceled`). [`RequestStatus`] is the
//! closed form of that field, parsed once at deserialization; all lifecycle
//! logic matches on the enum, never on strings.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::shared::api::Decimal128;

/// Lifecycle status of a trip request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestStatus {
    /// Submitted, waiting for a driver
    Process,
    /// A driver took the request
    Accepted,
    /// Driver has picked up the rider / package
    PickUp,
    /// Cancelled by either side
    Canceled,
    /// Unrecognized status, preserved verbatim
    Other(String),
}

impl RequestStatus {
    /// Parse a wire status string. Case-insensitive; unknown values are
    /// preserved rather than rejected so a backend addition cannot break
    /// deserialization of the whole request.
    pub fn parse(raw: &str) -> Self {
        let lowered = raw.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "process" => Self::Process,
            "accepted" => Self::Accepted,
            "pick-up" | "pickup" => Self::PickUp,
            "canceled" | "cancelled" => Self::Canceled,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// The exact string the backend expects for this status.
    pub fn as_wire_str(&self) -> &str {
        match self {
            Self::Process => "process",
            Self::Accepted => "accepted",
            Self::PickUp => "PICK-UP",
            Self::Canceled => "canceled",
            Self::Other(raw) => raw,
        }
    }

    /// Position in the forward lifecycle, used to reject backward
    /// transitions. Cancellation sits outside the ordering.
    pub fn rank(&self) -> Option<u8> {
        match self {
            Self::Process => Some(0),
            Self::Accepted => Some(1),
            Self::PickUp => Some(2),
            Self::Canceled | Self::Other(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Canceled)
    }
}

impl<'de> Deserialize<'de> for RequestStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

impl Serialize for RequestStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_wire_str())
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

/// A trip request fetched from `/GetRequest/{id}` and friends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "categoryId", default)]
    pub category_id: Option<String>,
    pub status: RequestStatus,
    /// Pickup address text
    #[serde(default)]
    pub info: Option<String>,
    /// Destination address text
    #[serde(default)]
    pub d_info: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Destination coordinates; the backend sometimes returns these as strings
    #[serde(default)]
    pub d_latitude: Option<Decimal128>,
    #[serde(default)]
    pub d_longitude: Option<Decimal128>,
    /// Quoted fare
    #[serde(default)]
    pub valor: Option<Decimal128>,
    /// Currency code
    #[serde(default)]
    pub moeda: Option<String>,
    #[serde(default)]
    pub distance: Option<Decimal128>,
    #[serde(default)]
    pub time: Option<Decimal128>,
    /// Payment method chosen at confirmation
    #[serde(default)]
    pub pagamento: Option<String>,
    /// Delivery security code, shown to the recipient
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub delivery: bool,
    #[serde(default)]
    pub city: Option<String>,
}

impl TripRequest {
    /// Fare text for display, `0.00` when the backend sent nothing usable.
    pub fn fare_display(&self) -> String {
        self.valor
            .map(|v| v.display())
            .unwrap_or_else(|| "0.00".to_string())
    }

    pub fn destination(&self) -> Option<(f64, f64)> {
        match (self.d_latitude, self.d_longitude) {
            (Some(lat), Some(lon)) => Some((lat.value(), lon.value())),
            _ => None,
        }
    }
}

/// Payload for `POST /request`; the request id is generated client-side.
#[derive(Debug, Clone, Serialize)]
pub struct NewTripRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "requestId")]
    pub request_id: String,
    #[serde(rename = "categoryId")]
    pub category_id: String,
    pub status: RequestStatus,
    pub info: String,
    pub d_info: String,
    pub pagamento: String,
    pub latitude: f64,
    pub longitude: f64,
    pub d_latitude: f64,
    pub d_longitude: f64,
    pub distance: f64,
    pub time: f64,
    pub valor: f64,
    pub moeda: String,
    pub tax_app: String,
    pub tax_km: f64,
    pub token: Option<String>,
    pub delivery: bool,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl NewTripRequest {
    /// Mint a fresh client-side request id.
    pub fn fresh_id() -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_observed_wire_strings() {
        assert_eq!(RequestStatus::parse("process"), RequestStatus::Process);
        assert_eq!(RequestStatus::parse("accepted"), RequestStatus::Accepted);
        assert_eq!(RequestStatus::parse("PICK-UP"), RequestStatus::PickUp);
        assert_eq!(RequestStatus::parse("canceled"), RequestStatus::Canceled);
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(RequestStatus::parse("Process"), RequestStatus::Process);
        assert_eq!(RequestStatus::parse("pick-up"), RequestStatus::PickUp);
        assert_eq!(RequestStatus::parse("CANCELED"), RequestStatus::Canceled);
    }

    #[test]
    fn test_status_preserves_unknown() {
        let status = RequestStatus::parse("paused");
        assert_eq!(status, RequestStatus::Other("paused".to_string()));
        assert_eq!(status.as_wire_str(), "paused");
    }

    #[test]
    fn test_status_rank_ordering() {
        assert!(RequestStatus::Process.rank() < RequestStatus::Accepted.rank());
        assert!(RequestStatus::Accepted.rank() < RequestStatus::PickUp.rank());
        assert_eq!(RequestStatus::Canceled.rank(), None);
    }

    #[test]
    fn test_status_round_trips_pickup_casing() {
        let json = serde_json::to_string(&RequestStatus::PickUp).unwrap();
        assert_eq!(json, "\"PICK-UP\"");
        let back: RequestStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RequestStatus::PickUp);
    }

    #[test]
    fn test_request_deserializes_string_coordinates() {
        let json = r#"{
            "_id": "r1",
            "userId": "u1",
            "status": "accepted",
            "d_latitude": "-8.838333",
            "d_longitude": "13.234444",
            "valor": {"$numberDecimal": "18.15"}
        }"#;
        let request: TripRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.status, RequestStatus::Accepted);
        let (lat, lon) = request.destination().unwrap();
        assert!((lat - -8.838333).abs() < 1e-9);
        assert!((lon - 13.234444).abs() < 1e-9);
        assert_eq!(request.fare_display(), "18.15");
    }

    #[test]
    fn test_fare_display_defaults_to_zero() {
        let json = r#"{"_id": "r2", "userId": "u1", "status": "process"}"#;
        let request: TripRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.fare_display(), "0.00");
    }
}
