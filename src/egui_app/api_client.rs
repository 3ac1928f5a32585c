//! Ride Backend API Client
//!
//! Every backend endpoint the client talks to lives here. Responses come
//! back in the `{status, data}` envelope; the envelope is decoded and the
//! status normalized before anything leaves this module, so callers only
//! ever see typed values or an [`ApiError`].
//!
//! Methods are synchronous and safe to call from worker threads: each call
//! spins up a small tokio runtime and blocks on the request, the same way
//! the rest of the app bridges the UI thread to async IO.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use reqwest::Client;
use tokio::runtime::Runtime;
use tracing::{debug, warn};

use crate::egui_app::config::Config;
use crate::shared::api::ApiEnvelope;
use crate::shared::error::ApiError;
use crate::shared::messaging::{ChatMessage, Conversation, NewMessage};
use crate::shared::trip::{Category, NewTripRequest, RequestStatus, TripRequest};
use crate::shared::{NewVehicle, User, Vehicle};

/// Maximum attempts for push-token registration
const PUSH_TOKEN_ATTEMPTS: u32 = 3;

/// Extra attempts for the upload-policy endpoint when it answers 400
const UPLOAD_POLICY_RETRIES: u32 = 2;

/// Signed upload policy for the file host
#[derive(Debug, Clone, Deserialize)]
pub struct UploadPolicy {
    #[serde(rename = "apiKey")]
    pub api_key: String,
    pub policy: String,
    pub signature: String,
    pub path: String,
}

/// A stored notification from `/notificationdata/{userId}`
#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
}

#[derive(Serialize)]
struct TokenBody<'a> {
    token: &'a str,
}

#[derive(Serialize)]
struct UpdateRequestBody<'a> {
    #[serde(rename = "requestId")]
    request_id: &'a str,
    status: &'a RequestStatus,
}

#[derive(Serialize)]
struct AcceptRequestBody<'a> {
    #[serde(rename = "requestId")]
    request_id: &'a str,
    status: RequestStatus,
    #[serde(rename = "userDrive")]
    user_drive: &'a str,
}

#[derive(Serialize)]
struct UpdateLocationBody<'a> {
    email: &'a str,
    dns: &'a str,
    latitude: f64,
    longitude: f64,
}

#[derive(Serialize)]
struct UpdateVehicleBody<'a> {
    #[serde(rename = "userId")]
    user_id: &'a str,
    #[serde(rename = "vehicleId")]
    vehicle_id: &'a str,
}

#[derive(Serialize)]
struct CreateConversationBody<'a> {
    #[serde(rename = "senderId")]
    sender_id: &'a str,
    #[serde(rename = "receiverId")]
    receiver_id: &'a str,
}

#[derive(Serialize)]
struct EmailBody<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct PushTokenBody<'a> {
    token: &'a str,
    #[serde(rename = "userId")]
    user_id: &'a str,
}

/// Payload for `POST /notification`
#[derive(Debug, Clone, Serialize)]
pub struct NewNotification {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Payload for `POST /update-password`
#[derive(Debug, Clone, Serialize)]
pub struct PasswordChange {
    pub email: String,
    pub password: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

/// Ride backend API client
#[derive(Clone)]
pub struct ApiClient {
    config: Config,
    client: Client,
}

impl ApiClient {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn runtime() -> Result<Runtime, ApiError> {
        Runtime::new().map_err(|e| ApiError::transport(format!("Failed to create runtime: {}", e)))
    }

    /// POST a JSON body and decode the response envelope.
    fn post_envelope<B, T>(&self, path: &str, body: &B) -> Result<ApiEnvelope<T>, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.config.api_url(path);
        let rt = Self::runtime()?;

        rt.block_on(async {
            debug!(%url, "POST");
            let response = self
                .client
                .post(&url)
                .json(body)
                .send()
                .await
                .map_err(|e| ApiError::transport(e.to_string()))?;

            Self::decode(response).await
        })
    }

    /// GET a path and decode the response envelope.
    fn get_envelope<T>(&self, path: &str) -> Result<ApiEnvelope<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        self.get_envelope_with_query::<[(&str, String); 0], T>(path, [])
    }

    fn get_envelope_with_query<Q, T>(&self, path: &str, query: Q) -> Result<ApiEnvelope<T>, ApiError>
    where
        Q: Serialize,
        T: DeserializeOwned,
    {
        let url = self.config.api_url(path);
        let rt = Self::runtime()?;

        rt.block_on(async {
            debug!(%url, "GET");
            let response = self
                .client
                .get(&url)
                .query(&query)
                .send()
                .await
                .map_err(|e| ApiError::transport(e.to_string()))?;

            Self::decode(response).await
        })
    }

    async fn decode<T>(response: reqwest::Response) -> Result<ApiEnvelope<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            return Err(ApiError::status(status.as_u16(), error_text));
        }

        response
            .json::<ApiEnvelope<T>>()
            .await
            .map_err(|e| ApiError::decode(e.to_string()))
    }

    // --- auth ---

    /// Exchange credentials for a session token.
    pub fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let body = crate::egui_app::types::LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post_envelope::<_, String>("/login-user", &body)?
            .into_result()
    }

    /// Create a new account.
    pub fn register(&self, request: &crate::egui_app::types::RegisterRequest) -> Result<(), ApiError> {
        self.post_envelope::<_, serde_json::Value>("/register", request)?
            .ack()
    }

    /// Resolve a stored token back into the user profile.
    pub fn session_user(&self, token: &str) -> Result<User, ApiError> {
        self.post_envelope::<_, User>("/userdata", &TokenBody { token })?
            .into_result()
    }

    // --- users ---

    pub fn get_user(&self, user_id: &str) -> Result<User, ApiError> {
        self.get_envelope::<User>(&format!("/user/{}", user_id))?
            .into_result()
    }

    /// Update profile fields; the backend accepts a partial document.
    pub fn update_user(&self, fields: &serde_json::Value) -> Result<(), ApiError> {
        self.post_envelope::<_, serde_json::Value>("/update-user", fields)?
            .ack()
    }

    pub fn update_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        self.post_envelope::<_, serde_json::Value>("/update-password", change)?
            .ack()
    }

    pub fn update_pin(&self, email: &str, pin: &str) -> Result<(), ApiError> {
        #[derive(Serialize)]
        struct Body<'a> {
            email: &'a str,
            pin: &'a str,
        }
        self.post_envelope::<_, serde_json::Value>("/update-pin", &Body { email, pin })?
            .ack()
    }

    pub fn send_support_message(&self, email: &str, message: &str) -> Result<(), ApiError> {
        #[derive(Serialize)]
        struct Body<'a> {
            email: &'a str,
            message: &'a str,
        }
        self.post_envelope::<_, serde_json::Value>("/suporte", &Body { email, message })?
            .ack()
    }

    /// Fetch a signed upload policy for profile images. The endpoint is
    /// flaky and sometimes answers 400 on a fresh policy; those responses
    /// are retried a couple of times before giving up.
    pub fn generate_upload_policy(&self, email: &str) -> Result<UploadPolicy, ApiError> {
        let mut attempt = 0;
        loop {
            match self
                .post_envelope::<_, UploadPolicy>("/generate-upload-policy", &EmailBody { email })
                .and_then(ApiEnvelope::into_result)
            {
                Ok(policy) => return Ok(policy),
                Err(ApiError::Status { code: 400, .. }) if attempt < UPLOAD_POLICY_RETRIES => {
                    attempt += 1;
                    warn!(attempt, "upload policy returned 400, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub fn update_user_image(&self, user_id: &str, image_url: &str) -> Result<(), ApiError> {
        #[derive(Serialize)]
        struct Body<'a> {
            #[serde(rename = "userId")]
            user_id: &'a str,
            image: &'a str,
        }
        self.post_envelope::<_, serde_json::Value>(
            "/update-user-image",
            &Body {
                user_id,
                image: image_url,
            },
        )?
        .ack()
    }

    /// Register a push token. Transient failures are retried with
    /// exponential backoff since this runs unattended at startup.
    pub fn register_push_token(&self, token: &str, user_id: &str) -> Result<(), ApiError> {
        let body = PushTokenBody { token, user_id };
        let mut delay = std::time::Duration::from_secs(1);
        let mut last_err = ApiError::transport("no attempt made");

        for attempt in 1..=PUSH_TOKEN_ATTEMPTS {
            match self
                .post_envelope::<_, serde_json::Value>("/api/register-token", &body)
                .and_then(ApiEnvelope::ack)
            {
                Ok(()) => return Ok(()),
                Err(e) if e.is_retryable() && attempt < PUSH_TOKEN_ATTEMPTS => {
                    warn!(attempt, error = %e, "push token registration failed, backing off");
                    std::thread::sleep(delay);
                    delay *= 2;
                    last_err = e;
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_err)
    }

    // --- trips ---

    /// Submit a new trip request.
    pub fn submit_request(&self, request: &NewTripRequest) -> Result<(), ApiError> {
        self.post_envelope::<_, serde_json::Value>("/request", request)?
            .ack()
    }

    pub fn get_request(&self, request_id: &str) -> Result<TripRequest, ApiError> {
        self.get_envelope::<TripRequest>(&format!("/GetRequest/{}", request_id))?
            .into_result()
    }

    /// Move a request to a new status. Cancellation goes through here.
    pub fn update_request_status(
        &self,
        request_id: &str,
        status: &RequestStatus,
    ) -> Result<(), ApiError> {
        self.post_envelope::<_, serde_json::Value>(
            "/update-request",
            &UpdateRequestBody { request_id, status },
        )?
        .ack()
    }

    /// Past requests for the history screen.
    pub fn request_history(&self, user_id: &str) -> Result<Vec<TripRequest>, ApiError> {
        self.get_envelope::<Vec<TripRequest>>(&format!("/requestdata/{}", user_id))?
            .into_result()
    }

    /// Recent requests shown on the rider dashboard. Also how an in-flight
    /// trip is recovered when the local store has no request id.
    pub fn dashboard_requests(&self, user_id: &str) -> Result<Vec<TripRequest>, ApiError> {
        self.get_envelope::<Vec<TripRequest>>(&format!("/requestdashboard/{}", user_id))?
            .into_result()
    }

    /// Pending requests near a driver's position.
    pub fn nearby_requests(&self, latitude: f64, longitude: f64) -> Result<Vec<TripRequest>, ApiError> {
        self.get_envelope_with_query::<_, Vec<TripRequest>>(
            "/requests/process",
            [
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("max_km", "10".to_string()),
                ("timeout", "100".to_string()),
            ],
        )?
        .into_result()
    }

    /// Open requests in a city, for the driver feed.
    pub fn open_requests_by_city(&self, city: &str) -> Result<Vec<TripRequest>, ApiError> {
        self.get_envelope_with_query::<_, Vec<TripRequest>>(
            "/requestdrive",
            [("city", city.to_string())],
        )?
        .into_result()
    }

    /// Full request details for a feed entry the driver selected.
    pub fn get_request_for_driver(&self, request_id: &str) -> Result<TripRequest, ApiError> {
        self.get_envelope::<TripRequest>(&format!("/GetRequestDrive/{}", request_id))?
            .into_result()
    }

    /// Accept a pending request as a driver.
    pub fn accept_request(&self, request_id: &str, driver_id: &str) -> Result<(), ApiError> {
        self.post_envelope::<_, serde_json::Value>(
            "/accepted-request",
            &AcceptRequestBody {
                request_id,
                status: RequestStatus::Accepted,
                user_drive: driver_id,
            },
        )?
        .ack()
    }

    // --- categories ---

    pub fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_envelope::<Vec<Category>>("/getCategory")?
            .into_result()
    }

    pub fn deliveries(&self) -> Result<Vec<Category>, ApiError> {
        self.get_envelope::<Vec<Category>>("/getDelivery")?
            .into_result()
    }

    pub fn category(&self, category_id: &str) -> Result<Category, ApiError> {
        self.get_envelope::<Category>(&format!("/categorydata/{}", category_id))?
            .into_result()
    }

    // --- messaging ---

    pub fn messages(&self, user_id: &str, receiver_id: &str) -> Result<Vec<ChatMessage>, ApiError> {
        self.get_envelope::<Vec<ChatMessage>>(&format!("/messages/{}/{}", user_id, receiver_id))?
            .into_result()
    }

    pub fn send_message(&self, message: &NewMessage) -> Result<(), ApiError> {
        self.post_envelope::<_, serde_json::Value>("/messages", message)?
            .ack()
    }

    pub fn conversations(&self, user_id: &str) -> Result<Vec<Conversation>, ApiError> {
        self.get_envelope::<Vec<Conversation>>(&format!("/conversation-accept/{}", user_id))?
            .into_result()
    }

    pub fn create_conversation(
        &self,
        sender_id: &str,
        receiver_id: &str,
    ) -> Result<Conversation, ApiError> {
        self.post_envelope::<_, Conversation>(
            "/conversation",
            &CreateConversationBody {
                sender_id,
                receiver_id,
            },
        )?
        .into_result()
    }

    // --- vehicles ---

    pub fn vehicles(&self, user_id: &str) -> Result<Vec<Vehicle>, ApiError> {
        self.get_envelope::<Vec<Vehicle>>(&format!("/vehiclesdata/{}", user_id))?
            .into_result()
    }

    pub fn add_vehicle(&self, vehicle: &NewVehicle) -> Result<(), ApiError> {
        vehicle.validate()?;
        self.post_envelope::<_, serde_json::Value>("/add-vehicle", vehicle)?
            .ack()
    }

    pub fn set_active_vehicle(&self, user_id: &str, vehicle_id: &str) -> Result<(), ApiError> {
        self.post_envelope::<_, serde_json::Value>(
            "/update-vehicle",
            &UpdateVehicleBody {
                user_id,
                vehicle_id,
            },
        )?
        .ack()
    }

    // --- location ---

    /// Push the driver's current position to the backend.
    pub fn update_location(
        &self,
        email: &str,
        dns: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<(), ApiError> {
        self.post_envelope::<_, serde_json::Value>(
            "/update-location",
            &UpdateLocationBody {
                email,
                dns,
                latitude,
                longitude,
            },
        )?
        .ack()
    }

    // --- notifications ---

    pub fn notifications(&self, user_id: &str) -> Result<Vec<Notification>, ApiError> {
        self.get_envelope::<Vec<Notification>>(&format!("/notificationdata/{}", user_id))?
            .into_result()
    }

    pub fn send_notification(&self, notification: &NewNotification) -> Result<(), ApiError> {
        self.post_envelope::<_, serde_json::Value>("/notification", notification)?
            .ack()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_body_wire_shape() {
        let body = UpdateRequestBody {
            request_id: "r1",
            status: &RequestStatus::Canceled,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["requestId"], "r1");
        assert_eq!(json["status"], "canceled");
    }

    #[test]
    fn test_accept_request_body_wire_shape() {
        let body = AcceptRequestBody {
            request_id: "r1",
            status: RequestStatus::Accepted,
            user_drive: "d1",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "accepted");
        assert_eq!(json["userDrive"], "d1");
    }

    #[test]
    fn test_upload_policy_deserializes() {
        let json = r#"{
            "apiKey": "key",
            "policy": "cG9saWN5",
            "signature": "sig",
            "path": "/uploads"
        }"#;
        let policy: UploadPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.api_key, "key");
        assert_eq!(policy.path, "/uploads");
    }
}
