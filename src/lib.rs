//! OnRide - Main Library
//!
//! OnRide is a ride-hailing desktop client built with Rust and egui,
//! covering both the rider flow (request, track, chat) and the driver flow
//! (feed, accept, drive) against the OnRide HTTP backend.
//!
//! # Overview
//!
//! This library provides:
//! - Full trip lifecycle: request, driver search with auto-cancel,
//!   pickup tracking, cancellation
//! - Fare quoting from category pricing and route estimates
//! - Rider/driver chat over polled conversations
//! - Vehicle registration and driver availability
//! - A persistent local session (token, in-flight trip, destination)
//!
//! # Module Structure
//!
//! - **`shared`** - Domain types matching the backend wire formats
//!   - Trip requests, categories, fare math
//!   - Users, vehicles, chat entities
//!   - The `{status, data}` response envelope and error types
//!
//! - **`egui_app`** - Native desktop app (egui/eframe)
//!   - API client, trip monitor, session store
//!   - One view module per screen
//!
//! # Error Handling
//!
//! Fallible operations return `Result<T, ApiError>`; the envelope decoder
//! normalizes backend status strings once so callers never match on raw
//! response text. See `shared::error` and `shared::api`.

/// Shared types and data structures
pub mod shared;

/// egui native desktop app
/// Only compiled for native targets (not WASM)
#[cfg(not(target_arch = "wasm32"))]
pub mod egui_app;
