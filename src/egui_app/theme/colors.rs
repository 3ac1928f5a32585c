//! Color Constants for the Ride App Theme
//!
//! This module defines all the color constants used throughout the UI.
//! The scheme is a dark slate base with a teal accent, matching the
//! night-friendly look expected of a driving app.

use eframe::egui::Color32;

/// App background - Deep slate
pub const APP_BG: Color32 = Color32::from_rgb(0x12, 0x17, 0x1D);

/// Raised card background
pub const CARD_BG: Color32 = Color32::from_rgb(0x1B, 0x22, 0x2A);

/// Card border
pub const CARD_BORDER: Color32 = Color32::from_rgb(0x2C, 0x38, 0x44);

/// Top bar background
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x16, 0x1C, 0x23);

/// Primary accent - Teal
pub const ACCENT: Color32 = Color32::from_rgb(0x19, 0xB5, 0x9A);

/// Accent hover
pub const ACCENT_HOVER: Color32 = Color32::from_rgb(0x2B, 0xCC, 0xB0);

/// Primary text on dark backgrounds
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0xE8, 0xED, 0xF2);

/// Secondary text (muted)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x8A, 0x97, 0xA5);

/// Input field background
pub const INPUT_BG: Color32 = Color32::from_rgb(0x22, 0x2B, 0x35);

/// Input field border
pub const INPUT_BORDER: Color32 = Color32::from_rgb(0x37, 0x44, 0x52);

/// Selected item background
pub const SELECTED_ITEM: Color32 = Color32::from_rgb(0x24, 0x3A, 0x3C);

/// Hovered item background
pub const HOVER_ITEM: Color32 = Color32::from_rgb(0x21, 0x2A, 0x34);

/// Success color - Green
pub const SUCCESS: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);

/// Error color - Red
pub const ERROR: Color32 = Color32::from_rgb(0xE5, 0x73, 0x73);

/// Warning color - Amber
pub const WARNING: Color32 = Color32::from_rgb(0xFF, 0xB3, 0x3E);

/// Online / driver-connected indicator
pub const STATUS_ONLINE: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);

/// Offline indicator
pub const STATUS_OFFLINE: Color32 = Color32::from_rgb(0x9E, 0x9E, 0x9E);

/// Outgoing chat bubble
pub const BUBBLE_OUTGOING: Color32 = Color32::from_rgb(0x1E, 0x40, 0x3B);

/// Incoming chat bubble
pub const BUBBLE_INCOMING: Color32 = Color32::from_rgb(0x26, 0x2F, 0x3A);

/// Chat bubble border
pub const BUBBLE_BORDER: Color32 = Color32::from_rgb(0x33, 0x41, 0x4F);

/// Timestamp text color
pub const TIMESTAMP: Color32 = Color32::from_rgb(0x6B, 0x78, 0x86);

/// Separator/divider color
pub const SEPARATOR: Color32 = Color32::from_rgb(0x2A, 0x34, 0x3F);

/// Fare amount highlight
pub const FARE: Color32 = Color32::from_rgb(0x5F, 0xD7, 0xBF);

/// Countdown text while searching for a driver
pub const COUNTDOWN: Color32 = Color32::from_rgb(0xFF, 0xB3, 0x3E);

/// Cancel / destructive button background
pub const BUTTON_DANGER: Color32 = Color32::from_rgb(0x8C, 0x2F, 0x2F);

/// Primary button background
pub const BUTTON_PRIMARY: Color32 = Color32::from_rgb(0x19, 0xB5, 0x9A);
