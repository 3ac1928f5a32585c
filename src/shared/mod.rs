//! Shared Module
//!
//! This module contains the domain types used across the client. All types
//! are designed for serialization and transmission over HTTP, matching the
//! wire formats of the ride backend.

/// Response envelope and wire-format helpers
pub mod api;

/// Application configuration
pub mod config;

/// Shared error types
pub mod error;

/// Rider/driver chat entities
pub mod messaging;

/// Trip requests, categories, fare math
pub mod trip;

/// User profile entity
pub mod user;

/// Vehicle entities
pub mod vehicle;

/// Re-export commonly used types for convenience
pub use api::{ApiEnvelope, ApiStatus, Decimal128};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::ApiError;
pub use trip::{Category, FareQuote, NewTripRequest, RequestStatus, TripRequest};
pub use user::User;
pub use vehicle::{NewVehicle, Vehicle};
