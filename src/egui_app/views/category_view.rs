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
                egui::RichText::new("Choose your ride")
                    .size(18.0)
                    .strong()
                    .color(colors::TEXT_PRIMARY),
            );
        });
        ui.add_space(12.0);

        ui.vertical_centered(|ui| {
            ui.set_max_width(460.0);

            styles::card_frame().show(ui, |ui| {
                ui.label(
                    egui::RichText::new("Your position")
                        .strong()
                        .color(colors::TEXT_PRIMARY),
                );
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Lat:").color(colors::TEXT_SECONDARY));
                    ui.add_sized(
                        [100.0, 24.0],
                        egui::TextEdit::singleline(&mut state.pos_lat_input),
                    );
                    ui.label(egui::RichText::new("Lon:").color(colors::TEXT_SECONDARY));
                    ui.add_sized(
                        [100.0, 24.0],
                        egui::TextEdit::singleline(&mut state.pos_lon_input),
                    );
                    if ui.button("Update").clicked() {
                        state.set_position_from_inputs();
                    }
                });
                if state.location.position().is_none() {
                    ui.add_space(6.0);
                    ui.colored_label(
                        colors::WARNING,
                        "Set your position before requesting a trip.",
                    );
                }
            });

            ui.add_space(12.0);

            styles::card_frame().show(ui, |ui| {
                ui.label(
                    egui::RichText::new("Destination")
                        .strong()
                        .color(colors::TEXT_PRIMARY),
                );
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Lat:").color(colors::TEXT_SECONDARY));
                    ui.add_sized(
                        [100.0, 24.0],
                        egui::TextEdit::singleline(&mut state.dest_lat_input),
                    );
                    ui.label(egui::RichText::new("Lon:").color(colors::TEXT_SECONDARY));
                    ui.add_sized(
                        [100.0, 24.0],
                        egui::TextEdit::singleline(&mut state.dest_lon_input),
                    );
                    if ui.button("🔍 Lookup").clicked() {
                        state.lookup_destination_address();
                    }
                });
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Address:").color(colors::TEXT_SECONDARY));
                    ui.add_sized(
                        [ui.available_width() - 80.0, 24.0],
                        egui::TextEdit::singleline(&mut state.dest_address_input),
                    );
                    if ui.button("Set").clicked() {
                        state.set_destination_from_inputs();
                    }
                });

                if let Some(km) = state.route_distance_km() {
                    ui.add_space(6.0);
                    ui.colored_label(
                        colors::TEXT_SECONDARY,
                        format!(
                            "≈ {:.1} km, {:.0} min",
                            km,
                            state.route_duration_min().unwrap_or(0.0)
                        ),
                    );
                }
            });

            ui.add_space(12.0);

            if state.categories.is_empty() && state.deliveries.is_empty() {
                ui.spinner();
                ui.label(egui::RichText::new("Loading categories...").color(colors::TEXT_SECONDARY));
            }

            let categories: Vec<_> = state.categories.clone();
            if !categories.is_empty() {
                render_category_list(ui, state, "Rides", &categories);
            }

            let deliveries: Vec<_> = state.deliveries.clone();
            if !deliveries.is_empty() {
                ui.add_space(8.0);
                render_category_list(ui, state, "Deliveries", &deliveries);
            }
        });

        ui.add_space(24.0);
    });
}

fn render_category_list(
    ui: &mut egui::Ui,
    state: &mut AppState,
    heading: &str,
    categories: &[crate::shared::trip::Category],
) {
    ui.label(
        egui::RichText::new(heading)
            .strong()
            .color(colors::TEXT_SECONDARY),
    );
    ui.add_space(4.0);

    for category in categories {
        let selected = state
            .selected_category
            .as_ref()
            .is_some_and(|c| c.id == category.id);
        let quote = state.quote_for(category);

        styles::list_item_frame(selected).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(&category.name)
                        .size(15.0)
                        .color(colors::TEXT_PRIMARY),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Choose").clicked() {
                        state.selected_category = Some(category.clone());
                        state.current_view = AppView::Confirm;
                    }
                    ui.colored_label(colors::FARE, quote.total_display());
                });
            });
        });
        ui.add_space(4.0);
    }
}
