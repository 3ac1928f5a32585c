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
                egui::RichText::new("Your vehicles")
                    .size(18.0)
                    .strong()
                    .color(colors::TEXT_PRIMARY),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_space(12.0);
                if ui.button("⟳").clicked() {
                    state.load_vehicles();
                }
            });
        });
        ui.add_space(12.0);

        ui.vertical_centered(|ui| {
            ui.set_max_width(440.0);

            if state.vehicles.is_empty() {
                ui.label(
                    egui::RichText::new("No vehicles registered yet.")
                        .color(colors::TEXT_SECONDARY),
                );
                ui.add_space(8.0);
            }

            let vehicles = state.vehicles.clone();
            for vehicle in &vehicles {
                styles::list_item_frame(vehicle.active).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(vehicle.label()).color(colors::TEXT_PRIMARY),
                        );
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if vehicle.active {
                                    ui.colored_label(colors::SUCCESS, "active");
                                } else if ui.button("Make active").clicked() {
                                    state.select_vehicle(vehicle.id.clone());
                                }
                            },
                        );
                    });
                });
                ui.add_space(4.0);
            }

            ui.add_space(12.0);

            styles::card_frame().show(ui, |ui| {
                ui.label(
                    egui::RichText::new("Register a vehicle")
                        .strong()
                        .color(colors::TEXT_PRIMARY),
                );
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Model:").color(colors::TEXT_SECONDARY));
                    ui.add_sized(
                        [ui.available_width(), 24.0],
                        egui::TextEdit::singleline(&mut state.vehicle_model_input)
                            .hint_text("Toyota Camry"),
                    );
                });
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Color:").color(colors::TEXT_SECONDARY));
                    ui.add_sized(
                        [ui.available_width(), 24.0],
                        egui::TextEdit::singleline(&mut state.vehicle_color_input)
                            .hint_text("White"),
                    );
                });
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Plate:").color(colors::TEXT_SECONDARY));
                    ui.add_sized(
                        [ui.available_width(), 24.0],
                        egui::TextEdit::singleline(&mut state.vehicle_plate_input)
                            .hint_text("KW690YF"),
                    );
                });
                ui.add_space(10.0);
                if ui
                    .add(
                        egui::Button::new(
                            egui::RichText::new("Add vehicle").color(colors::TEXT_PRIMARY),
                        )
                        .fill(colors::ACCENT),
                    )
                    .clicked()
                {
                    state.add_vehicle();
                }
            });
        });

        ui.add_space(24.0);
    });
}
