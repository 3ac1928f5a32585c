use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::trip::TripPhase;
use crate::egui_app::AppView;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let request = state.monitor.as_ref().and_then(|m| match m.phase() {
        TripPhase::Driving(request) | TripPhase::DriverAssigned(request) => Some(request),
        _ => None,
    });

    ui.vertical_centered(|ui| {
        ui.set_max_width(440.0);
        ui.add_space(24.0);

        ui.label(
            egui::RichText::new("Trip in progress")
                .size(20.0)
                .strong()
                .color(colors::TEXT_PRIMARY),
        );
        ui.add_space(16.0);

        match &request {
            Some(request) => {
                styles::card_frame().show(ui, |ui| {
                    if let Some(info) = &request.d_info {
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new("To:").color(colors::TEXT_SECONDARY));
                            ui.label(egui::RichText::new(info).color(colors::TEXT_PRIMARY));
                        });
                    }
                    if let Some(distance) = request.distance {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new("Distance:").color(colors::TEXT_SECONDARY),
                            );
                            ui.label(
                                egui::RichText::new(format!("{:.1} km", distance.value()))
                                    .color(colors::TEXT_PRIMARY),
                            );
                        });
                    }
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new("Fare:").color(colors::TEXT_SECONDARY));
                        ui.label(
                            egui::RichText::new(format!(
                                "{} {}",
                                request.fare_display(),
                                request.moeda.as_deref().unwrap_or("")
                            ))
                            .strong()
                            .color(colors::FARE),
                        );
                    });
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new("Payment:").color(colors::TEXT_SECONDARY));
                        ui.label(
                            egui::RichText::new(request.pagamento.as_deref().unwrap_or("cash"))
                                .color(colors::TEXT_PRIMARY),
                        );
                    });
                    if let Some(position) = state.location.position() {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new("Position:").color(colors::TEXT_SECONDARY),
                            );
                            ui.label(
                                egui::RichText::new(format!(
                                    "{:.5}, {:.5}",
                                    position.latitude, position.longitude
                                ))
                                .color(colors::TEXT_PRIMARY),
                            );
                        });
                    }
                });
            }
            None => {
                ui.spinner();
                ui.label(
                    egui::RichText::new("Waiting for trip details...")
                        .color(colors::TEXT_SECONDARY),
                );
            }
        }

        ui.add_space(20.0);

        ui.horizontal(|ui| {
            let half = (ui.available_width() - 10.0) / 2.0;
            if ui
                .add_sized(
                    [half, 34.0],
                    egui::Button::new(
                        egui::RichText::new("💬 Message").color(colors::TEXT_PRIMARY),
                    ),
                )
                .clicked()
            {
                if let Some(user) = state.auth_state.user.clone() {
                    let client = state.client.clone();
                    state.chat.refresh_conversations(&client, &user.id);
                    // A driver can message the rider directly.
                    if let Some(peer) = request
                        .as_ref()
                        .map(|r| r.user_id.clone())
                        .filter(|peer| *peer != user.id)
                    {
                        state.chat.start_conversation_with(&client, &user.id, &peer);
                    }
                }
                state.current_view = AppView::Chat;
            }
            ui.add_space(10.0);
            if ui
                .add_sized(
                    [half, 34.0],
                    egui::Button::new(
                        egui::RichText::new("Cancel trip").color(colors::TEXT_PRIMARY),
                    )
                    .fill(colors::BUTTON_DANGER),
                )
                .clicked()
            {
                state.cancel_trip();
            }
        });

        ui.add_space(10.0);

        if ui
            .add_sized(
                [200.0, 34.0],
                egui::Button::new(
                    egui::RichText::new("Finish trip").color(colors::TEXT_PRIMARY),
                )
                .fill(colors::ACCENT),
            )
            .clicked()
        {
            if let Some(monitor) = &state.monitor {
                monitor.finish();
            }
        }
    });
}
