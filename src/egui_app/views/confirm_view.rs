use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::AppView;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.add_space(12.0);
    ui.horizontal(|ui| {
        ui.add_space(12.0);
        super::back_button(ui, state, AppView::Category);
        ui.label(
            egui::RichText::new("Confirm your trip")
                .size(18.0)
                .strong()
                .color(colors::TEXT_PRIMARY),
        );
    });
    ui.add_space(16.0);

    ui.vertical_centered(|ui| {
        ui.set_max_width(440.0);

        let Some(category) = state.selected_category.clone() else {
            ui.label(egui::RichText::new("No category selected.").color(colors::TEXT_SECONDARY));
            return;
        };

        let currency = state
            .auth_state
            .user
            .as_ref()
            .map(|u| u.currency().to_string())
            .unwrap_or_else(|| "USD".to_string());
        let quote = state.quote_for(&category);

        styles::card_frame().show(ui, |ui| {
            ui.label(
                egui::RichText::new(&category.name)
                    .size(16.0)
                    .strong()
                    .color(colors::TEXT_PRIMARY),
            );
            ui.add_space(8.0);

            if let Some(destination) = &state.destination {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("To:").color(colors::TEXT_SECONDARY));
                    ui.label(
                        egui::RichText::new(&destination.address).color(colors::TEXT_PRIMARY),
                    );
                });
            }
            if let Some(km) = state.route_distance_km() {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Distance:").color(colors::TEXT_SECONDARY));
                    ui.label(
                        egui::RichText::new(format!("{:.1} km", km)).color(colors::TEXT_PRIMARY),
                    );
                });
            }
            if let Some(min) = state.route_duration_min() {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Time:").color(colors::TEXT_SECONDARY));
                    ui.label(
                        egui::RichText::new(format!("{:.0} min", min)).color(colors::TEXT_PRIMARY),
                    );
                });
            }

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Fare:").color(colors::TEXT_SECONDARY));
                ui.label(
                    egui::RichText::new(format!("{} {}", quote.total_display(), currency))
                        .size(20.0)
                        .strong()
                        .color(colors::FARE),
                );
            });

            ui.add_space(12.0);

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Payment:").color(colors::TEXT_SECONDARY));
                ui.selectable_value(&mut state.payment_method, "cash".to_string(), "💵 Cash");
                ui.selectable_value(&mut state.payment_method, "card".to_string(), "💳 Card");
            });

            ui.add_space(16.0);

            if ui
                .add_sized(
                    [ui.available_width(), 38.0],
                    egui::Button::new(
                        egui::RichText::new("Request now").size(16.0).color(colors::TEXT_PRIMARY),
                    )
                    .fill(colors::ACCENT),
                )
                .clicked()
            {
                state.submit_trip();
            }
        });
    });
}
