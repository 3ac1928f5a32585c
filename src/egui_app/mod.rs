//! egui Native Desktop App Module
//!
//! This module provides the native desktop client for the OnRide backend,
//! covering both the rider and driver sides of the product.
//!
//! # Architecture
//!
//! The egui_app module is organized into focused submodules:
//!
//! - **`config`** - Configuration management (server URL, poll timings)
//! - **`api_client`** - HTTP client for every backend endpoint
//! - **`auth`** - Authentication state and login/register/restore flows
//! - **`session`** - Persistent local store (token, active trip, destination)
//! - **`location`** - Position tracking, route estimation, geocoding
//! - **`trip`** - Trip request monitor and poll scheduling
//! - **`messaging`** - Rider/driver chat state
//! - **`notify`** - Transient toast notifications
//! - **`types`** - Shared types and app view enum
//! - **`state`** - Central app state driving the views
//! - **`views`** - One render function per screen
//! - **`theme`** - Colors and frame styles
//! - **`main`** - Application entry point (binary)

pub mod api_client;
pub mod auth;
pub mod config;
pub mod location;
pub mod messaging;
pub mod notify;
pub mod session;
pub mod state;
pub mod theme;
pub mod trip;
pub mod types;
pub mod views;

// Re-export commonly used types
pub use api_client::ApiClient;
pub use auth::AuthState;
pub use config::Config;
pub use notify::Notifier;
pub use session::SessionStore;
pub use state::AppState;
pub use trip::{TripMonitor, TripPhase};
pub use types::{AppView, AuthSession};
