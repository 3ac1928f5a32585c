//! User profile entity as served by the backend.

use serde::{Deserialize, Serialize};

/// User account fetched from `/userdata` or `/user/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Profile image URL
    #[serde(default)]
    pub image: Option<String>,
    /// Currency code shown next to fares
    #[serde(default)]
    pub moeda: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, rename = "requestCount")]
    pub request_count: Option<u32>,
    /// Blocked accounts may browse but not submit trip requests
    #[serde(default)]
    pub block: bool,
    /// Per-user security code shown to delivery recipients
    #[serde(default)]
    pub code: Option<String>,
}

impl User {
    /// Whether this account may submit a new trip request.
    pub fn can_request(&self) -> bool {
        !self.block
    }

    /// Currency code, defaulting to USD when the profile has none.
    pub fn currency(&self) -> &str {
        self.moeda.as_deref().unwrap_or("USD")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_minimal_payload() {
        let json = r#"{"_id": "u1", "name": "Ana", "email": "ana@example.com"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "u1");
        assert!(!user.block);
        assert!(user.can_request());
        assert_eq!(user.currency(), "USD");
    }

    #[test]
    fn test_blocked_user_cannot_request() {
        let json = r#"{"_id": "u2", "name": "Bob", "email": "b@example.com", "block": true}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(!user.can_request());
    }

    #[test]
    fn test_request_count_rename() {
        let json = r#"{"_id": "u3", "name": "C", "email": "c@example.com", "requestCount": 4, "moeda": "EUR"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.request_count, Some(4));
        assert_eq!(user.currency(), "EUR");
    }
}
