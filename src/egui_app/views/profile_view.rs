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
                egui::RichText::new("Profile")
                    .size(18.0)
                    .strong()
                    .color(colors::TEXT_PRIMARY),
            );
        });
        ui.add_space(12.0);

        ui.vertical_centered(|ui| {
            ui.set_max_width(440.0);

            let Some(user) = state.auth_state.user.clone() else {
                return;
            };

            styles::card_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("👤").size(36.0));
                    ui.vertical(|ui| {
                        ui.label(
                            egui::RichText::new(&user.name)
                                .size(18.0)
                                .strong()
                                .color(colors::TEXT_PRIMARY),
                        );
                        ui.label(egui::RichText::new(&user.email).color(colors::TEXT_SECONDARY));
                        if let Some(rating) = user.rating {
                            ui.label(
                                egui::RichText::new(format!(
                                    "⭐ {:.2} · {} trips",
                                    rating,
                                    user.request_count.unwrap_or(0)
                                ))
                                .color(colors::TEXT_SECONDARY),
                            );
                        }
                    });
                });
            });

            ui.add_space(12.0);

            styles::card_frame().show(ui, |ui| {
                ui.label(
                    egui::RichText::new("Edit details")
                        .strong()
                        .color(colors::TEXT_PRIMARY),
                );
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Name:").color(colors::TEXT_SECONDARY));
                    ui.add_sized(
                        [ui.available_width(), 24.0],
                        egui::TextEdit::singleline(&mut state.name_input)
                            .hint_text(user.name.clone()),
                    );
                });
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Phone:").color(colors::TEXT_SECONDARY));
                    ui.add_sized(
                        [ui.available_width(), 24.0],
                        egui::TextEdit::singleline(&mut state.phone_input)
                            .hint_text(user.phone.clone().unwrap_or_default()),
                    );
                });
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Photo:").color(colors::TEXT_SECONDARY));
                    ui.add_sized(
                        [ui.available_width() - 70.0, 24.0],
                        egui::TextEdit::singleline(&mut state.image_url_input)
                            .hint_text("https://..."),
                    );
                    if ui.button("Set").clicked() {
                        state.update_profile_image();
                    }
                });
                ui.add_space(10.0);
                if ui.button("Save changes").clicked() {
                    state.save_profile();
                }
            });

            ui.add_space(12.0);

            styles::card_frame().show(ui, |ui| {
                ui.label(
                    egui::RichText::new("Change password")
                        .strong()
                        .color(colors::TEXT_PRIMARY),
                );
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Current:").color(colors::TEXT_SECONDARY));
                    ui.add_sized(
                        [ui.available_width(), 24.0],
                        egui::TextEdit::singleline(&mut state.current_password_input)
                            .password(true),
                    );
                });
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("New:").color(colors::TEXT_SECONDARY));
                    ui.add_sized(
                        [ui.available_width(), 24.0],
                        egui::TextEdit::singleline(&mut state.new_password_input).password(true),
                    );
                });
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Confirm:").color(colors::TEXT_SECONDARY));
                    ui.add_sized(
                        [ui.available_width(), 24.0],
                        egui::TextEdit::singleline(&mut state.confirm_password_input)
                            .password(true),
                    );
                });
                ui.add_space(10.0);
                if ui.button("Update password").clicked() {
                    state.change_password();
                }
            });

            ui.add_space(12.0);

            styles::card_frame().show(ui, |ui| {
                ui.label(
                    egui::RichText::new("Contact support")
                        .strong()
                        .color(colors::TEXT_PRIMARY),
                );
                ui.add_space(8.0);
                ui.add_sized(
                    [ui.available_width(), 60.0],
                    egui::TextEdit::multiline(&mut state.support_input)
                        .hint_text("Describe your problem..."),
                );
                ui.add_space(8.0);
                if ui.button("Send to support").clicked() {
                    state.send_support_message();
                }
            });
        });

        ui.add_space(24.0);
    });
}
