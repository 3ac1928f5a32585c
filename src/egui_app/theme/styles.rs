//! Theme Styling Functions
//!
//! Helper functions for applying the dark slate scheme consistently
//! across all UI components.

use eframe::egui::{self, Color32, CornerRadius, Stroke};
use super::colors;

/// Apply the global theme to the egui context
pub fn apply_global_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    // Window styling
    style.visuals.window_fill = colors::CARD_BG;
    style.visuals.window_stroke = Stroke::new(1.0, colors::CARD_BORDER);

    // Panel styling
    style.visuals.panel_fill = colors::APP_BG;

    // Widget styling
    style.visuals.widgets.noninteractive.bg_fill = colors::INPUT_BG;
    style.visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors::TEXT_PRIMARY);

    style.visuals.widgets.inactive.bg_fill = colors::INPUT_BG;
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, colors::TEXT_PRIMARY);

    style.visuals.widgets.hovered.bg_fill = colors::HOVER_ITEM;
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, colors::TEXT_PRIMARY);

    style.visuals.widgets.active.bg_fill = colors::BUTTON_PRIMARY;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, colors::TEXT_PRIMARY);

    // Selection color
    style.visuals.selection.bg_fill = colors::SELECTED_ITEM;
    style.visuals.selection.stroke = Stroke::new(1.0, colors::ACCENT);

    ctx.set_style(style);
}

/// Create a frame style for the top bar
pub fn top_bar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::TOP_BAR_BG)
        .inner_margin(egui::Margin::symmetric(12, 8))
}

/// Create a frame for a raised content card
pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::CARD_BG)
        .stroke(Stroke::new(1.0, colors::CARD_BORDER))
        .corner_radius(CornerRadius::same(8))
        .inner_margin(egui::Margin::same(16))
}

/// Create a frame for a selectable list row
pub fn list_item_frame(is_selected: bool) -> egui::Frame {
    let bg_color = if is_selected {
        colors::SELECTED_ITEM
    } else {
        colors::CARD_BG
    };

    egui::Frame::new()
        .fill(bg_color)
        .inner_margin(egui::Margin::symmetric(12, 10))
}

/// Create a frame style for outgoing message bubbles
pub fn outgoing_bubble_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::BUBBLE_OUTGOING)
        .stroke(Stroke::new(1.0, colors::BUBBLE_BORDER))
        .corner_radius(CornerRadius {
            nw: 12,
            ne: 12,
            sw: 12,
            se: 4, // Tail side
        })
        .inner_margin(egui::Margin::symmetric(12, 8))
}

/// Create a frame style for incoming message bubbles
pub fn incoming_bubble_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::BUBBLE_INCOMING)
        .stroke(Stroke::new(1.0, colors::BUBBLE_BORDER))
        .corner_radius(CornerRadius {
            nw: 12,
            ne: 12,
            sw: 4, // Tail side
            se: 12,
        })
        .inner_margin(egui::Margin::symmetric(12, 8))
}

/// Create a frame for modal dialogs and toast overlays
pub fn modal_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::CARD_BG)
        .stroke(Stroke::new(2.0, colors::CARD_BORDER))
        .corner_radius(CornerRadius::same(12))
        .inner_margin(egui::Margin::same(20))
        .shadow(egui::epaint::Shadow {
            offset: [0, 4],
            blur: 12,
            spread: 0,
            color: Color32::from_black_alpha(60),
        })
}
