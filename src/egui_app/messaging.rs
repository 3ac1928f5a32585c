//! Chat state: the conversation list, the open thread, and its poll loop.
//!
//! Message fetches run on worker threads and report back over channels the
//! UI drains once per frame. The open thread is refreshed on the same
//! scheduler discipline the trip monitor uses, instead of re-fetching on
//! every render.

use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

use tracing::warn;

use crate::egui_app::api_client::ApiClient;
use crate::egui_app::trip::PollScheduler;
use crate::shared::error::ApiError;
use crate::shared::messaging::{ChatMessage, Conversation, MessageKind, NewMessage};
use crate::shared::User;

/// How often the open thread is re-fetched
const MESSAGE_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// State for the chat screen
pub struct ChatState {
    pub conversations: Vec<Conversation>,
    /// Conversation currently open in the thread pane
    pub active: Option<Conversation>,
    /// Profile of the other party in the open thread
    pub peer: Option<User>,
    pub messages: Vec<ChatMessage>,
    pub compose_input: String,
    pub loading_conversations: bool,
    pub loading_messages: bool,
    pub ui_error: Option<String>,

    pending_conversations: Option<Receiver<Result<Vec<Conversation>, ApiError>>>,
    pending_messages: Option<Receiver<Result<Vec<ChatMessage>, ApiError>>>,
    pending_send: Option<Receiver<Result<(), ApiError>>>,
    pending_open: Option<Receiver<Result<Conversation, ApiError>>>,
    pending_peer: Option<Receiver<Result<User, ApiError>>>,
    poll: PollScheduler,
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            conversations: Vec::new(),
            active: None,
            peer: None,
            messages: Vec::new(),
            compose_input: String::new(),
            loading_conversations: false,
            loading_messages: false,
            ui_error: None,
            pending_conversations: None,
            pending_messages: None,
            pending_send: None,
            pending_open: None,
            pending_peer: None,
            poll: PollScheduler::new(MESSAGE_POLL_INTERVAL),
        }
    }

    /// Load the conversation list in the background.
    pub fn refresh_conversations(&mut self, client: &ApiClient, user_id: &str) {
        if self.pending_conversations.is_some() {
            return;
        }
        self.loading_conversations = true;

        let client = client.clone();
        let user_id = user_id.to_string();
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let _ = tx.send(client.conversations(&user_id));
        });
        self.pending_conversations = Some(rx);
    }

    /// Open a conversation and fetch its thread.
    pub fn open_conversation(&mut self, client: &ApiClient, user_id: &str, conversation: Conversation) {
        self.messages.clear();
        self.peer = None;
        self.active = Some(conversation);
        self.fetch_peer(client, user_id);
        self.fetch_messages(client, user_id);
    }

    fn fetch_peer(&mut self, client: &ApiClient, user_id: &str) {
        let Some(active) = &self.active else { return };
        let client = client.clone();
        let peer_id = active.peer_of(user_id).to_string();
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let _ = tx.send(client.get_user(&peer_id));
        });
        self.pending_peer = Some(rx);
    }

    /// Open the thread with a specific peer, creating the conversation on
    /// the backend if none exists yet. Used to message the other party of
    /// an active trip.
    pub fn start_conversation_with(&mut self, client: &ApiClient, user_id: &str, peer_id: &str) {
        if let Some(existing) = self
            .conversations
            .iter()
            .find(|c| c.peer_of(user_id) == peer_id)
            .cloned()
        {
            self.open_conversation(client, user_id, existing);
            return;
        }
        if self.pending_open.is_some() {
            return;
        }

        let client = client.clone();
        let user_id = user_id.to_string();
        let peer_id = peer_id.to_string();
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let _ = tx.send(client.create_conversation(&user_id, &peer_id));
        });
        self.pending_open = Some(rx);
    }

    /// Re-fetch the open thread if the poll cadence allows it.
    pub fn poll_messages(&mut self, client: &ApiClient, user_id: &str) {
        if self.active.is_none() || self.pending_messages.is_some() {
            return;
        }
        if !self.poll.should_poll() {
            return;
        }
        self.poll.record_poll();
        self.fetch_messages(client, user_id);
    }

    fn fetch_messages(&mut self, client: &ApiClient, user_id: &str) {
        let Some(active) = &self.active else { return };
        self.loading_messages = self.messages.is_empty();

        let client = client.clone();
        let user_id = user_id.to_string();
        let peer_id = active.peer_of(&user_id).to_string();
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let _ = tx.send(client.messages(&user_id, &peer_id));
        });
        self.pending_messages = Some(rx);
    }

    /// Send the composed message to the open conversation.
    pub fn send_message(&mut self, client: &ApiClient, user_id: &str) {
        let text = self.compose_input.trim().to_string();
        if text.is_empty() {
            return;
        }
        let Some(active) = &self.active else { return };
        if self.pending_send.is_some() {
            return;
        }

        let message = NewMessage {
            sender_id: user_id.to_string(),
            receiver_id: active.peer_of(user_id).to_string(),
            conversation_id: active.id.clone(),
            message_type: MessageKind::Text,
            message_text: text,
        };
        self.compose_input.clear();

        let client = client.clone();
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let _ = tx.send(client.send_message(&message));
        });
        self.pending_send = Some(rx);
    }

    /// Drain finished background work. Called once per frame.
    pub fn check_results(&mut self, client: &ApiClient, user_id: &str) {
        if let Some(rx) = &self.pending_conversations {
            if let Ok(result) = rx.try_recv() {
                self.pending_conversations = None;
                self.loading_conversations = false;
                match result {
                    Ok(conversations) => self.conversations = conversations,
                    Err(e) => {
                        warn!(error = %e, "failed to load conversations");
                        self.ui_error = Some(e.to_string());
                    }
                }
            }
        }

        if let Some(rx) = &self.pending_messages {
            if let Ok(result) = rx.try_recv() {
                self.pending_messages = None;
                self.loading_messages = false;
                match result {
                    Ok(messages) => {
                        self.messages = messages;
                        self.poll.record_success();
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to load messages");
                        self.poll.record_failure();
                    }
                }
            }
        }

        if let Some(rx) = &self.pending_send {
            if let Ok(result) = rx.try_recv() {
                self.pending_send = None;
                match result {
                    // Refresh the thread so the sent message shows up.
                    Ok(()) => self.fetch_messages(client, user_id),
                    Err(e) => {
                        warn!(error = %e, "failed to send message");
                        self.ui_error = Some(e.to_string());
                    }
                }
            }
        }

        if let Some(rx) = &self.pending_open {
            if let Ok(result) = rx.try_recv() {
                self.pending_open = None;
                match result {
                    Ok(conversation) => {
                        self.conversations.push(conversation.clone());
                        self.open_conversation(client, user_id, conversation);
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to open conversation");
                        self.ui_error = Some(e.to_string());
                    }
                }
            }
        }

        if let Some(rx) = &self.pending_peer {
            if let Ok(result) = rx.try_recv() {
                self.pending_peer = None;
                match result {
                    Ok(user) => self.peer = Some(user),
                    // The thread still works with just the id.
                    Err(e) => warn!(error = %e, "failed to load peer profile"),
                }
            }
        }
    }

    pub fn close(&mut self) {
        self.active = None;
        self.peer = None;
        self.messages.clear();
        self.compose_input.clear();
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = ChatState::new();
        assert!(state.conversations.is_empty());
        assert!(state.active.is_none());
        assert!(!state.loading_messages);
    }

    #[test]
    fn test_close_clears_thread() {
        let mut state = ChatState::new();
        state.active = Some(Conversation {
            id: "c1".to_string(),
            sender_id: "u1".to_string(),
            receiver_id: "d1".to_string(),
            accepted: true,
        });
        state.compose_input = "draft".to_string();
        state.close();
        assert!(state.active.is_none());
        assert!(state.compose_input.is_empty());
    }
}
