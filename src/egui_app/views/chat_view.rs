use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::AppView;
use crate::shared::messaging::Conversation;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let Some(user) = state.auth_state.user.clone() else {
        return;
    };
    let client = state.client.clone();

    // Keep the open thread fresh while this screen is up.
    state.chat.poll_messages(&client, &user.id);

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        ui.add_space(12.0);
        if ui.button("⬅ Back").clicked() {
            state.chat.close();
            state.current_view = AppView::Dashboard;
        }
        ui.label(
            egui::RichText::new("Messages")
                .size(18.0)
                .strong()
                .color(colors::TEXT_PRIMARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add_space(12.0);
            if ui.button("⟳").clicked() {
                state.chat.refresh_conversations(&client, &user.id);
            }
        });
    });
    ui.add_space(8.0);

    if let Some(ref error) = state.chat.ui_error {
        ui.horizontal(|ui| {
            ui.add_space(12.0);
            ui.colored_label(colors::ERROR, error);
        });
        ui.add_space(4.0);
    }

    egui::SidePanel::left("conversation_list")
        .frame(egui::Frame::default().fill(colors::CARD_BG))
        .default_width(220.0)
        .show_inside(ui, |ui| {
            if state.chat.loading_conversations {
                ui.add_space(12.0);
                ui.vertical_centered(|ui| ui.spinner());
            }
            let conversations: Vec<Conversation> = state.chat.conversations.clone();
            if conversations.is_empty() && !state.chat.loading_conversations {
                ui.add_space(12.0);
                ui.label(
                    egui::RichText::new("No conversations yet.").color(colors::TEXT_SECONDARY),
                );
            }
            for conversation in conversations {
                let selected = state
                    .chat
                    .active
                    .as_ref()
                    .is_some_and(|c| c.id == conversation.id);
                let peer = conversation.peer_of(&user.id).to_string();
                let response = ui.selectable_label(selected, format!("💬 {}", peer));
                if response.clicked() {
                    state.chat.open_conversation(&client, &user.id, conversation);
                }
            }
        });

    egui::CentralPanel::default()
        .frame(egui::Frame::default().fill(colors::APP_BG))
        .show_inside(ui, |ui| {
            if state.chat.active.is_none() {
                ui.vertical_centered(|ui| {
                    ui.add_space(60.0);
                    ui.label(
                        egui::RichText::new("Pick a conversation to start chatting.")
                            .color(colors::TEXT_SECONDARY),
                    );
                });
                return;
            }

            if let Some(peer) = &state.chat.peer {
                ui.horizontal(|ui| {
                    ui.add_space(12.0);
                    ui.label(
                        egui::RichText::new(&peer.name)
                            .strong()
                            .color(colors::TEXT_PRIMARY),
                    );
                    if let Some(rating) = peer.rating {
                        ui.colored_label(colors::TEXT_SECONDARY, format!("★ {:.1}", rating));
                    }
                });
                ui.separator();
            }

            // Compose bar pinned to the bottom
            egui::TopBottomPanel::bottom("compose_bar")
                .frame(
                    egui::Frame::default()
                        .fill(colors::CARD_BG)
                        .inner_margin(egui::Margin::symmetric(12, 8)),
                )
                .show_inside(ui, |ui| {
                    ui.horizontal(|ui| {
                        let input = ui.add_sized(
                            [ui.available_width() - 70.0, 28.0],
                            egui::TextEdit::singleline(&mut state.chat.compose_input)
                                .hint_text("Type a message..."),
                        );
                        let enter_pressed = input.lost_focus()
                            && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        if ui.button("Send").clicked() || enter_pressed {
                            state.chat.send_message(&client, &user.id);
                        }
                    });
                });

            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    if state.chat.loading_messages {
                        ui.vertical_centered(|ui| {
                            ui.add_space(12.0);
                            ui.spinner();
                        });
                    }
                    for message in &state.chat.messages {
                        let outgoing = message.is_from(&user.id);
                        let layout = if outgoing {
                            egui::Layout::right_to_left(egui::Align::Min)
                        } else {
                            egui::Layout::left_to_right(egui::Align::Min)
                        };
                        ui.with_layout(layout, |ui| {
                            ui.add_space(12.0);
                            let frame = if outgoing {
                                styles::outgoing_bubble_frame()
                            } else {
                                styles::incoming_bubble_frame()
                            };
                            frame.show(ui, |ui| {
                                ui.set_max_width(320.0);
                                ui.label(
                                    egui::RichText::new(&message.message)
                                        .color(colors::TEXT_PRIMARY),
                                );
                                if let Some(at) = &message.create_at {
                                    ui.label(
                                        egui::RichText::new(at)
                                            .size(10.0)
                                            .color(colors::TIMESTAMP),
                                    );
                                }
                            });
                        });
                        ui.add_space(4.0);
                    }
                });
        });
}
