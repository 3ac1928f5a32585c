//! Wire-format types for the ride backend
//!
//! Every backend response is a `{status, data}` envelope. The status string
//! arrives with inconsistent casing (`Ok`, `OK`, `ok`), so it is normalized
//! into [`ApiStatus`] exactly once at deserialization; nothing past this
//! module compares status strings.
//!
//! Numeric fields backed by Mongo Decimal128 arrive either as plain JSON
//! numbers, as numeric strings, or as extended JSON
//! `{"$numberDecimal": "..."}`. [`Decimal128`] accepts all three forms.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::shared::error::ApiError;

/// Normalized backend response status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStatus {
    /// Any casing of "ok"
    Ok,
    /// Everything else, preserving the raw status string
    Failed(String),
}

impl ApiStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, ApiStatus::Ok)
    }
}

impl<'de> Deserialize<'de> for ApiStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.eq_ignore_ascii_case("ok") {
            Ok(ApiStatus::Ok)
        } else {
            Ok(ApiStatus::Failed(raw))
        }
    }
}

impl Serialize for ApiStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ApiStatus::Ok => serializer.serialize_str("Ok"),
            ApiStatus::Failed(raw) => serializer.serialize_str(raw),
        }
    }
}

/// Standard `{status, data}` response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: ApiStatus,
    #[serde(default = "none_data")]
    pub data: Option<T>,
}

fn none_data<T>() -> Option<T> {
    None
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, treating a failed status or a missing payload
    /// as a backend error.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self.status {
            ApiStatus::Ok => self
                .data
                .ok_or_else(|| ApiError::backend("response missing data payload")),
            ApiStatus::Failed(raw) => Err(ApiError::backend(format!("status '{}'", raw))),
        }
    }

    /// Check the status only, for endpoints whose payload is irrelevant.
    pub fn ack(self) -> Result<(), ApiError> {
        match self.status {
            ApiStatus::Ok => Ok(()),
            ApiStatus::Failed(raw) => Err(ApiError::backend(format!("status '{}'", raw))),
        }
    }
}

/// Numeric value that may arrive as a number, a numeric string, or
/// Mongo extended JSON `{"$numberDecimal": "..."}`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Decimal128(pub f64);

impl Decimal128 {
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Render with two decimal places, the display form used for money.
    pub fn display(&self) -> String {
        format!("{:.2}", self.0)
    }
}

impl From<f64> for Decimal128 {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalWire {
    Number(f64),
    Text(String),
    Extended {
        #[serde(rename = "$numberDecimal")]
        value: String,
    },
}

impl<'de> Deserialize<'de> for Decimal128 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match DecimalWire::deserialize(deserializer)? {
            DecimalWire::Number(n) => return Ok(Decimal128(n)),
            DecimalWire::Text(s) => s,
            DecimalWire::Extended { value } => value,
        };
        raw.trim()
            .parse::<f64>()
            .map(Decimal128)
            .map_err(|_| de::Error::custom(format!("invalid decimal value '{}'", raw)))
    }
}

impl Serialize for Decimal128 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        value: i32,
    }

    #[test]
    fn test_status_casing_normalized() {
        for raw in ["\"Ok\"", "\"OK\"", "\"ok\""] {
            let status: ApiStatus = serde_json::from_str(raw).unwrap();
            assert!(status.is_ok(), "expected {} to normalize to Ok", raw);
        }
    }

    #[test]
    fn test_status_failure_preserved() {
        let status: ApiStatus = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(status, ApiStatus::Failed("error".to_string()));
    }

    #[test]
    fn test_envelope_into_result() {
        let envelope: ApiEnvelope<Payload> =
            serde_json::from_str(r#"{"status": "OK", "data": {"value": 7}}"#).unwrap();
        assert_eq!(envelope.into_result().unwrap().value, 7);
    }

    #[test]
    fn test_envelope_failed_status_is_backend_error() {
        let envelope: ApiEnvelope<Payload> =
            serde_json::from_str(r#"{"status": "blocked", "data": null}"#).unwrap();
        match envelope.into_result() {
            Err(ApiError::Backend { message }) => assert!(message.contains("blocked")),
            other => panic!("expected Backend error, got {:?}", other),
        }
    }

    #[test]
    fn test_envelope_ok_without_data() {
        let envelope: ApiEnvelope<Payload> =
            serde_json::from_str(r#"{"status": "Ok"}"#).unwrap();
        assert!(envelope.into_result().is_err());
    }

    #[test]
    fn test_envelope_ack_ignores_payload() {
        let envelope: ApiEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert!(envelope.ack().is_ok());
    }

    #[test]
    fn test_decimal_plain_number() {
        let d: Decimal128 = serde_json::from_str("12.5").unwrap();
        assert_eq!(d.value(), 12.5);
    }

    #[test]
    fn test_decimal_numeric_string() {
        let d: Decimal128 = serde_json::from_str("\"-23.456\"").unwrap();
        assert_eq!(d.value(), -23.456);
    }

    #[test]
    fn test_decimal_extended_json() {
        let d: Decimal128 = serde_json::from_str(r#"{"$numberDecimal": "18.15"}"#).unwrap();
        assert_eq!(d.value(), 18.15);
    }

    #[test]
    fn test_decimal_invalid_string_rejected() {
        let result: Result<Decimal128, _> = serde_json::from_str("\"not-a-number\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_decimal_display_two_places() {
        assert_eq!(Decimal128(1.5).display(), "1.50");
        assert_eq!(Decimal128(18.154).display(), "18.15");
    }
}
