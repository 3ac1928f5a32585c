/**
 * Shared Types Module
 *
 * Defines shared types for the egui app including app view states and the
 * auth wire payloads.
 */

use serde::{Deserialize, Serialize};

use crate::shared::User;

/// Current app view/mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppView {
    /// Login screen
    Auth,
    /// Account creation screen
    Register,
    /// Home screen with the driver connect toggle
    Dashboard,
    /// Destination and category picker
    Category,
    /// Fare/route summary before submitting a trip
    Confirm,
    /// Waiting for a driver (searching / driver assigned)
    Search,
    /// Trip in progress
    Drive,
    /// Terminal canceled screen
    Cancel,
    /// Driver's open-request feed
    Feed,
    /// Conversations and message thread
    Chat,
    /// Account profile
    Profile,
    /// Vehicle list and registration
    Vehicles,
    /// Account settings (password, pin, support)
    Settings,
}

/// Login payload for `/login-user`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration payload for `/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// A restored or freshly established session
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// Driver details shown once a request is accepted.
///
/// The backend exposes no driver-lookup endpoint, so the card falls back
/// to representative data until one exists.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverCard {
    pub name: String,
    pub rating: f64,
    pub plate: String,
    pub vehicle: String,
    pub eta_minutes: u32,
}

impl DriverCard {
    pub fn placeholder() -> Self {
        Self {
            name: "John Doe".to_string(),
            rating: 3.97,
            plate: "KW690YF".to_string(),
            vehicle: "Fuchsia Toyota Camry".to_string(),
            eta_minutes: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_view_variants() {
        assert_eq!(AppView::Auth, AppView::Auth);
        assert_ne!(AppView::Dashboard, AppView::Search);
    }

    #[test]
    fn test_login_request_serializes() {
        let req = LoginRequest {
            email: "ana@example.com".to_string(),
            password: "secret".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["email"], "ana@example.com");
    }
}
