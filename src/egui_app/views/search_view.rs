use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::trip::TripPhase;
use crate::egui_app::types::DriverCard;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let Some(phase) = state.monitor.as_ref().map(|m| m.phase()) else {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(egui::RichText::new("No active trip.").color(colors::TEXT_SECONDARY));
        });
        return;
    };

    ui.vertical_centered(|ui| {
        ui.set_max_width(420.0);
        ui.add_space(40.0);

        match phase {
            TripPhase::Searching { remaining_secs } => {
                if let Some(category) = state.selected_category.clone() {
                    let quote = state.quote_for(&category);
                    styles::card_frame().show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(&category.name)
                                    .size(16.0)
                                    .strong()
                                    .color(colors::TEXT_PRIMARY),
                            );
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    ui.label(
                                        egui::RichText::new(quote.total_display())
                                            .size(16.0)
                                            .strong()
                                            .color(colors::FARE),
                                    );
                                },
                            );
                        });
                        if let Some(destination) = &state.destination {
                            if !destination.address.is_empty() {
                                ui.label(
                                    egui::RichText::new(format!("→ {}", destination.address))
                                        .color(colors::TEXT_SECONDARY),
                                );
                            }
                        }
                    });
                    ui.add_space(16.0);
                }

                ui.spinner();
                ui.add_space(12.0);
                ui.label(
                    egui::RichText::new("Looking for a driver...")
                        .size(20.0)
                        .color(colors::TEXT_PRIMARY),
                );
                ui.add_space(8.0);
                // mm:ss countdown until the request auto-cancels
                ui.label(
                    egui::RichText::new(format!(
                        "{:02}:{:02}",
                        remaining_secs / 60,
                        remaining_secs % 60
                    ))
                    .size(28.0)
                    .strong()
                    .color(colors::COUNTDOWN),
                );
            }
            TripPhase::DriverAssigned(request) => {
                ui.label(
                    egui::RichText::new("Driver on the way!")
                        .size(20.0)
                        .strong()
                        .color(colors::SUCCESS),
                );
                ui.add_space(12.0);
                render_driver_card(ui, &DriverCard::placeholder());

                if request.delivery {
                    if let Some(code) = &request.token {
                        ui.add_space(12.0);
                        styles::card_frame().show(ui, |ui| {
                            ui.label(
                                egui::RichText::new("Delivery security code")
                                    .color(colors::TEXT_SECONDARY),
                            );
                            ui.label(
                                egui::RichText::new(code)
                                    .size(24.0)
                                    .strong()
                                    .color(colors::ACCENT),
                            );
                        });
                    }
                }
            }
            // The frame-level view sync moves these off this screen; render
            // something sane for the frame in between.
            TripPhase::Driving(_) => {
                ui.label(egui::RichText::new("Trip started.").color(colors::TEXT_PRIMARY));
            }
            TripPhase::Canceled | TripPhase::Ended => {
                ui.label(egui::RichText::new("Trip over.").color(colors::TEXT_SECONDARY));
            }
        }

        ui.add_space(24.0);

        if ui
            .add_sized(
                [180.0, 34.0],
                egui::Button::new(
                    egui::RichText::new("Cancel request").color(colors::TEXT_PRIMARY),
                )
                .fill(colors::BUTTON_DANGER),
            )
            .clicked()
        {
            state.cancel_trip();
        }
    });
}

fn render_driver_card(ui: &mut egui::Ui, driver: &DriverCard) {
    styles::card_frame().show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("👤").size(28.0));
            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new(&driver.name)
                        .size(16.0)
                        .strong()
                        .color(colors::TEXT_PRIMARY),
                );
                ui.label(
                    egui::RichText::new(format!("⭐ {:.2}", driver.rating))
                        .color(colors::TEXT_SECONDARY),
                );
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.vertical(|ui| {
                    ui.label(
                        egui::RichText::new(&driver.plate)
                            .strong()
                            .color(colors::TEXT_PRIMARY),
                    );
                    ui.label(
                        egui::RichText::new(&driver.vehicle).color(colors::TEXT_SECONDARY),
                    );
                    ui.label(
                        egui::RichText::new(format!("{} min away", driver.eta_minutes))
                            .color(colors::ACCENT),
                    );
                });
            });
        });
    });
}
