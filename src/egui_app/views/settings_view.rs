use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::AppView;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            ui.add_space(12.0);
            super::back_button(ui, state, AppView::Dashboard);
            ui.label(
                egui::RichText::new("Settings")
                    .size(18.0)
                    .strong()
                    .color(colors::TEXT_PRIMARY),
            );
        });
        ui.add_space(12.0);

        ui.vertical_centered(|ui| {
            ui.set_max_width(440.0);

            styles::card_frame().show(ui, |ui| {
                ui.label(
                    egui::RichText::new("Delivery PIN")
                        .strong()
                        .color(colors::TEXT_PRIMARY),
                );
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new("The 4-digit code recipients use to confirm deliveries.")
                        .color(colors::TEXT_SECONDARY),
                );
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.add_sized(
                        [100.0, 24.0],
                        egui::TextEdit::singleline(&mut state.pin_input).hint_text("0000"),
                    );
                    if ui.button("Update PIN").clicked() {
                        state.change_pin();
                    }
                });
            });

            ui.add_space(12.0);

            styles::card_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("Notifications")
                            .strong()
                            .color(colors::TEXT_PRIMARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("⟳").clicked() {
                            state.load_notifications();
                        }
                    });
                });
                ui.add_space(8.0);
                if state.notifications.is_empty() {
                    ui.label(
                        egui::RichText::new("Nothing here yet.").color(colors::TEXT_SECONDARY),
                    );
                }
                for notification in &state.notifications {
                    ui.label(
                        egui::RichText::new(&notification.title)
                            .strong()
                            .color(colors::TEXT_PRIMARY),
                    );
                    ui.label(
                        egui::RichText::new(&notification.message).color(colors::TEXT_SECONDARY),
                    );
                    if let Some(at) = &notification.created_at {
                        ui.label(egui::RichText::new(at).size(10.0).color(colors::TIMESTAMP));
                    }
                    ui.add_space(4.0);
                    ui.separator();
                    ui.add_space(4.0);
                }
            });

            ui.add_space(12.0);

            styles::card_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("Trip history")
                            .strong()
                            .color(colors::TEXT_PRIMARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("⟳").clicked() {
                            state.load_history();
                        }
                    });
                });
                ui.add_space(8.0);
                if state.history.is_empty() {
                    ui.label(egui::RichText::new("No past trips.").color(colors::TEXT_SECONDARY));
                }
                for request in &state.history {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(
                                request.d_info.as_deref().unwrap_or("(no destination)"),
                            )
                            .color(colors::TEXT_PRIMARY),
                        );
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                ui.colored_label(colors::FARE, request.fare_display());
                                ui.colored_label(
                                    colors::TEXT_SECONDARY,
                                    request.status.to_string(),
                                );
                            },
                        );
                    });
                    ui.add_space(2.0);
                }
            });

            ui.add_space(12.0);

            styles::card_frame().show(ui, |ui| {
                ui.label(
                    egui::RichText::new("About")
                        .strong()
                        .color(colors::TEXT_PRIMARY),
                );
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(format!("Server: {}", state.config.server_url()))
                        .color(colors::TEXT_SECONDARY),
                );
                let push = match state.store.get::<String>("push_token") {
                    Ok(Some(_)) => "Push notifications: registered",
                    _ => "Push notifications: not registered",
                };
                ui.label(egui::RichText::new(push).color(colors::TEXT_SECONDARY));
                ui.add_space(8.0);
                if ui
                    .add(
                        egui::Button::new(
                            egui::RichText::new("Log out").color(colors::TEXT_PRIMARY),
                        )
                        .fill(colors::BUTTON_DANGER),
                    )
                    .clicked()
                {
                    state.logout();
                }
            });
        });

        ui.add_space(24.0);
    });
}
