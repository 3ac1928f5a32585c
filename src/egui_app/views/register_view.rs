use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;
use crate::egui_app::AppView;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let available_rect = ui.available_rect_before_wrap();
    ui.painter().rect_filled(available_rect, 0.0, colors::APP_BG);

    ui.scope_builder(egui::UiBuilder::new().max_rect(available_rect), |ui| {
        ui.vertical_centered(|ui| {
            let total_height = 420.0;
            let top_space = (available_rect.height() - total_height).max(0.0) / 2.0;
            ui.add_space(top_space);

            ui.label(
                egui::RichText::new("Create Account")
                    .size(24.0)
                    .color(colors::TEXT_PRIMARY),
            );
            ui.add_space(20.0);

            if let Some(ref error) = state.auth_state.error {
                ui.label(egui::RichText::new(error).color(colors::ERROR));
                ui.add_space(10.0);
            }

            let input_width = 280.0;
            let label_width = 80.0;
            let field = |ui: &mut egui::Ui, label: &str, value: &mut String, password: bool| {
                ui.horizontal(|ui| {
                    ui.add_space(
                        (available_rect.width() - input_width - label_width - 20.0) / 2.0,
                    );
                    ui.add_sized(
                        [label_width, 24.0],
                        egui::Label::new(egui::RichText::new(label).color(colors::TEXT_SECONDARY)),
                    );
                    ui.add_sized(
                        [input_width, 28.0],
                        egui::TextEdit::singleline(value)
                            .password(password)
                            .text_color(colors::TEXT_PRIMARY),
                    );
                });
                ui.add_space(8.0);
            };

            field(ui, "Name:", &mut state.name_input, false);
            field(ui, "Email:", &mut state.email_input, false);
            field(ui, "Phone:", &mut state.phone_input, false);
            field(ui, "Password:", &mut state.password_input, true);
            field(ui, "Confirm:", &mut state.confirm_password_input, true);

            ui.add_space(20.0);

            ui.horizontal(|ui| {
                let button_width = 120.0;
                let total_buttons_width = button_width * 2.0 + 10.0;
                ui.add_space((available_rect.width() - total_buttons_width) / 2.0);

                if ui
                    .add_sized(
                        [button_width, 32.0],
                        egui::Button::new(
                            egui::RichText::new("Sign Up").color(colors::TEXT_PRIMARY),
                        )
                        .fill(colors::ACCENT),
                    )
                    .clicked()
                {
                    state.auth_state.clear_error();
                    state.handle_register();
                }

                ui.add_space(10.0);

                if ui
                    .add_sized(
                        [button_width, 32.0],
                        egui::Button::new(
                            egui::RichText::new("Back to Login").color(colors::TEXT_SECONDARY),
                        ),
                    )
                    .clicked()
                {
                    state.auth_state.clear_error();
                    state.current_view = AppView::Auth;
                }
            });

            if state.auth_state.loading {
                ui.add_space(15.0);
                ui.horizontal(|ui| {
                    ui.add_space((available_rect.width() - 100.0) / 2.0);
                    ui.label(egui::RichText::new("Creating account...").color(colors::TEXT_PRIMARY));
                    ui.spinner();
                });
            }
        });
    });
}
