use eframe::egui;

use crate::egui_app::notify::ToastLevel;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;
use crate::egui_app::AppView;

pub mod auth_view;
pub mod cancel_view;
pub mod category_view;
pub mod chat_view;
pub mod confirm_view;
pub mod dashboard_view;
pub mod drive_view;
pub mod feed_view;
pub mod profile_view;
pub mod register_view;
pub mod search_view;
pub mod settings_view;
pub mod vehicles_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    let frame_style = egui::Frame::default()
        .fill(colors::TOP_BAR_BG)
        .inner_margin(egui::Margin::symmetric(12, 8));

    egui::TopBottomPanel::top("top_panel")
        .frame(frame_style)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(
                    colors::TEXT_PRIMARY,
                    egui::RichText::new("🚗 OnRide").size(18.0).strong(),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(16.0);

                    if !state.is_online {
                        ui.colored_label(colors::ERROR, "🔴 Offline");
                    } else if state.driver_online {
                        ui.colored_label(colors::STATUS_ONLINE, "🟢 Connected");
                    } else {
                        ui.colored_label(colors::STATUS_ONLINE, "🟢 Online");
                    }

                    ui.add_space(16.0);

                    if state.auth_state.authenticated {
                        if ui.button("Logout").clicked() {
                            state.logout();
                        }
                        if let Some(ref user) = state.auth_state.user {
                            ui.colored_label(colors::TEXT_PRIMARY, &user.name);
                        }
                    }
                });
            });
        });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    let frame = egui::Frame::default()
        .fill(colors::APP_BG)
        .inner_margin(egui::Margin::same(0));

    egui::CentralPanel::default()
        .frame(frame)
        .show(ctx, |ui| match state.current_view {
            AppView::Auth => auth_view::render(ui, state),
            AppView::Register => register_view::render(ui, state),
            AppView::Dashboard => dashboard_view::render(ui, state),
            AppView::Category => category_view::render(ui, state),
            AppView::Confirm => confirm_view::render(ui, state),
            AppView::Search => search_view::render(ui, state),
            AppView::Drive => drive_view::render(ui, state),
            AppView::Cancel => cancel_view::render(ui, state),
            AppView::Feed => feed_view::render(ui, state),
            AppView::Chat => chat_view::render(ui, state),
            AppView::Profile => profile_view::render(ui, state),
            AppView::Vehicles => vehicles_view::render(ui, state),
            AppView::Settings => settings_view::render(ui, state),
        });

    render_toasts(ctx, state);
}

/// Transient toast overlay, bottom-right corner.
fn render_toasts(ctx: &egui::Context, state: &AppState) {
    let toasts = state.notifier.active();
    if toasts.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("toast_overlay"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .show(ctx, |ui| {
            for toast in &toasts {
                let color = match toast.level {
                    ToastLevel::Info => colors::TEXT_SECONDARY,
                    ToastLevel::Success => colors::SUCCESS,
                    ToastLevel::Error => colors::ERROR,
                };
                egui::Frame::default()
                    .fill(colors::CARD_BG)
                    .stroke(egui::Stroke::new(1.0, color))
                    .corner_radius(egui::CornerRadius::same(6))
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .show(ui, |ui| {
                        ui.colored_label(color, &toast.message);
                    });
                ui.add_space(6.0);
            }
        });
}

/// Back button shared by the secondary screens.
pub(crate) fn back_button(ui: &mut egui::Ui, state: &mut AppState, target: AppView) {
    if ui.button("⬅ Back").clicked() {
        state.current_view = target;
    }
}
