use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::AppView;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.add_space(12.0);
    ui.horizontal(|ui| {
        ui.add_space(12.0);
        super::back_button(ui, state, AppView::Dashboard);
        ui.label(
            egui::RichText::new("Open requests")
                .size(18.0)
                .strong()
                .color(colors::TEXT_PRIMARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add_space(12.0);
            let label = if state.driver_online {
                "Disconnect"
            } else {
                "Connect"
            };
            if ui.button(label).clicked() {
                state.toggle_driver_online();
            }
        });
    });
    ui.add_space(12.0);

    if !state.driver_online {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(
                egui::RichText::new("Connect to start receiving nearby requests.")
                    .color(colors::TEXT_SECONDARY),
            );
        });
        return;
    }

    if state.feed.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.spinner();
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new("No open requests nearby yet.")
                    .color(colors::TEXT_SECONDARY),
            );
        });
        return;
    }

    let feed = state.feed.clone();
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.set_max_width(480.0);
            for request in &feed {
                let selected = state
                    .feed_selected
                    .as_ref()
                    .is_some_and(|r| r.id == request.id);

                styles::list_item_frame(selected).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label(
                                egui::RichText::new(
                                    request.info.as_deref().unwrap_or("(no pickup address)"),
                                )
                                .color(colors::TEXT_PRIMARY),
                            );
                            if let Some(d_info) = &request.d_info {
                                ui.label(
                                    egui::RichText::new(format!("→ {}", d_info))
                                        .color(colors::TEXT_SECONDARY),
                                );
                            }
                            if let Some(distance) = request.distance {
                                ui.label(
                                    egui::RichText::new(format!("{:.1} km", distance.value()))
                                        .color(colors::TIMESTAMP),
                                );
                            }
                        });
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if ui
                                    .add(
                                        egui::Button::new(
                                            egui::RichText::new("Accept")
                                                .color(colors::TEXT_PRIMARY),
                                        )
                                        .fill(colors::ACCENT),
                                    )
                                    .clicked()
                                {
                                    state.accept_feed_request(request.clone());
                                }
                                ui.colored_label(colors::FARE, request.fare_display());
                            },
                        );
                    });
                });
                ui.add_space(6.0);
            }
        });
    });
}
