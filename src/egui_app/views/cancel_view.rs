use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.label(egui::RichText::new("🚫").size(48.0));
        ui.add_space(12.0);
        ui.label(
            egui::RichText::new("Trip cancelled")
                .size(22.0)
                .strong()
                .color(colors::TEXT_PRIMARY),
        );
        ui.add_space(6.0);
        ui.label(
            egui::RichText::new("The request was cancelled. You can start a new one any time.")
                .color(colors::TEXT_SECONDARY),
        );
        ui.add_space(24.0);

        if ui
            .add_sized(
                [200.0, 36.0],
                egui::Button::new(
                    egui::RichText::new("Back to home").color(colors::TEXT_PRIMARY),
                )
                .fill(colors::ACCENT),
            )
            .clicked()
        {
            state.leave_cancel_view();
        }
    });
}
