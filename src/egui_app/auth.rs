/**
 * Authentication Module
 *
 * Holds the auth UI state and the login/register/session-restore flows
 * built on the API client.
 */

use tracing::{info, warn};

use crate::egui_app::api_client::ApiClient;
use crate::egui_app::types::{AuthSession, RegisterRequest};
use crate::shared::error::ApiError;
use crate::shared::User;

/// Authentication state
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub authenticated: bool,
    pub user: Option<User>,
    pub error: Option<String>,
    pub loading: bool,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_error(&mut self, error: String) {
        self.error = Some(error);
    }
}

/// Login with email and password. On success the token is resolved back
/// into a full profile so the session carries a verified user.
pub fn login(client: &ApiClient, email: &str, password: &str) -> Result<AuthSession, ApiError> {
    let token = client.login(email, password)?;
    let user = client.session_user(&token)?;
    info!(user = %user.email, "login succeeded");
    Ok(AuthSession { token, user })
}

/// Create an account, then log straight in with the same credentials.
pub fn register(client: &ApiClient, request: &RegisterRequest) -> Result<AuthSession, ApiError> {
    client.register(request)?;
    login(client, &request.email, &request.password)
}

/// Restore a session from a stored token.
///
/// The session is only considered valid when the token resolves to a
/// decodable user profile; an ok-status response with a missing or
/// malformed payload is treated as an expired session, not a login.
pub fn restore_session(client: &ApiClient, token: &str) -> Result<AuthSession, ApiError> {
    match client.session_user(token) {
        Ok(user) => Ok(AuthSession {
            token: token.to_string(),
            user,
        }),
        Err(e) => {
            warn!(error = %e, "stored token did not restore a session");
            Err(e)
        }
    }
}
