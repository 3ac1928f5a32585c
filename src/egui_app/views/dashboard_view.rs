use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::AppView;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    render_incoming_request(ui.ctx(), state);

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            let greeting = state
                .auth_state
                .user
                .as_ref()
                .map(|u| format!("Hello, {}", u.name))
                .unwrap_or_else(|| "Hello".to_string());
            ui.label(
                egui::RichText::new(greeting)
                    .size(24.0)
                    .strong()
                    .color(colors::TEXT_PRIMARY),
            );
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new("Where are you going today?")
                    .color(colors::TEXT_SECONDARY),
            );
        });

        ui.add_space(24.0);

        ui.vertical_centered(|ui| {
            ui.set_max_width(420.0);

            styles::card_frame().show(ui, |ui| {
                ui.label(
                    egui::RichText::new("Ride")
                        .size(16.0)
                        .strong()
                        .color(colors::TEXT_PRIMARY),
                );
                ui.add_space(8.0);
                if ui
                    .add_sized(
                        [ui.available_width(), 36.0],
                        egui::Button::new(
                            egui::RichText::new("🧭 Request a trip").color(colors::TEXT_PRIMARY),
                        )
                        .fill(colors::ACCENT),
                    )
                    .clicked()
                {
                    state.load_categories();
                    state.current_view = AppView::Category;
                }
            });

            ui.add_space(12.0);

            styles::card_frame().show(ui, |ui| {
                ui.label(
                    egui::RichText::new("Drive")
                        .size(16.0)
                        .strong()
                        .color(colors::TEXT_PRIMARY),
                );
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Lat:").color(colors::TEXT_SECONDARY));
                    ui.add_sized(
                        [90.0, 24.0],
                        egui::TextEdit::singleline(&mut state.pos_lat_input),
                    );
                    ui.label(egui::RichText::new("Lon:").color(colors::TEXT_SECONDARY));
                    ui.add_sized(
                        [90.0, 24.0],
                        egui::TextEdit::singleline(&mut state.pos_lon_input),
                    );
                    if ui.button("Update").clicked() {
                        state.set_position_from_inputs();
                    }
                });
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let label = if state.driver_online {
                        "Disconnect"
                    } else {
                        "Connect"
                    };
                    if ui.button(label).clicked() {
                        state.toggle_driver_online();
                    }
                    if state.driver_online {
                        ui.colored_label(colors::STATUS_ONLINE, "receiving requests");
                    } else {
                        ui.colored_label(colors::STATUS_OFFLINE, "disconnected");
                    }
                });
                ui.add_space(8.0);
                if ui.button("📋 Open request feed").clicked() {
                    state.current_view = AppView::Feed;
                }
            });

            ui.add_space(12.0);

            styles::card_frame().show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    if ui.button("💬 Messages").clicked() {
                        if let Some(user) = state.auth_state.user.clone() {
                            let client = state.client.clone();
                            state.chat.refresh_conversations(&client, &user.id);
                        }
                        state.current_view = AppView::Chat;
                    }
                    if ui.button("🚙 Vehicles").clicked() {
                        state.load_vehicles();
                        state.current_view = AppView::Vehicles;
                    }
                    if ui.button("👤 Profile").clicked() {
                        state.current_view = AppView::Profile;
                    }
                    if ui.button("⚙ Settings").clicked() {
                        state.load_notifications();
                        state.load_history();
                        state.current_view = AppView::Settings;
                    }
                });
            });
        });

        ui.add_space(24.0);
    });
}

/// Prompt a connected driver about the closest open request.
fn render_incoming_request(ctx: &egui::Context, state: &mut AppState) {
    let Some(request) = state.incoming_request().cloned() else {
        return;
    };

    egui::Window::new("incoming_request")
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .frame(styles::modal_frame())
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_max_width(360.0);
            ui.label(
                egui::RichText::new("New trip request")
                    .size(18.0)
                    .strong()
                    .color(colors::TEXT_PRIMARY),
            );
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new(request.info.as_deref().unwrap_or("(no pickup address)"))
                    .color(colors::TEXT_PRIMARY),
            );
            if let Some(d_info) = &request.d_info {
                ui.label(
                    egui::RichText::new(format!("→ {}", d_info)).color(colors::TEXT_SECONDARY),
                );
            }
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if let Some(distance) = request.distance {
                    ui.colored_label(colors::TIMESTAMP, format!("{:.1} km", distance.value()));
                }
                ui.colored_label(colors::FARE, request.fare_display());
            });
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui
                    .add_sized(
                        [160.0, 32.0],
                        egui::Button::new(
                            egui::RichText::new("Accept").color(colors::TEXT_PRIMARY),
                        )
                        .fill(colors::ACCENT),
                    )
                    .clicked()
                {
                    state.accept_feed_request(request.clone());
                }
                if ui
                    .add_sized([160.0, 32.0], egui::Button::new("Decline"))
                    .clicked()
                {
                    state.dismiss_request(request.id.clone());
                }
            });
        });
}
