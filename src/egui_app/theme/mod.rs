//! Theme Module
//!
//! Color scheme and styling for the ride app UI:
//!
//! - Color constants for the dark slate / teal theme
//! - Styling helper functions for consistent appearance
//! - Frame builders for cards, bubbles, and bars

pub mod colors;
pub mod styles;

pub use colors::*;
pub use styles::*;
