//! Rider/driver chat entities.

use serde::{Deserialize, Serialize};

/// Kind of chat message content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Plain text message
    Text,
    /// Image message (URL in the message body)
    Image,
}

impl Default for MessageKind {
    fn default() -> Self {
        MessageKind::Text
    }
}

impl MessageKind {
    /// Wire string used by the messages endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Image => "image",
        }
    }
}

/// A chat message from `/messages/{userId}/{receiverId}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "senderId")]
    pub sender_id: String,
    /// Message body; an image URL for image messages
    pub message: String,
    #[serde(default, rename = "messageType")]
    pub message_type: MessageKind,
    /// Sent timestamp (RFC3339 string as stored by the backend)
    #[serde(default, rename = "createAt")]
    pub create_at: Option<String>,
}

impl ChatMessage {
    pub fn is_from(&self, user_id: &str) -> bool {
        self.sender_id == user_id
    }
}

/// Payload for `POST /messages`
#[derive(Debug, Clone, Serialize)]
pub struct NewMessage {
    #[serde(rename = "senderId")]
    pub sender_id: String,
    #[serde(rename = "receiverId")]
    pub receiver_id: String,
    #[serde(rename = "conversationId")]
    pub conversation_id: String,
    #[serde(rename = "messageType")]
    pub message_type: MessageKind,
    #[serde(rename = "messageText")]
    pub message_text: String,
}

/// A conversation between a rider and a driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "senderId")]
    pub sender_id: String,
    #[serde(rename = "receiverId")]
    pub receiver_id: String,
    #[serde(default)]
    pub accepted: bool,
}

impl Conversation {
    /// Id of whichever participant is not the given user.
    pub fn peer_of<'a>(&'a self, user_id: &str) -> &'a str {
        if self.sender_id == user_id {
            &self.receiver_id
        } else {
            &self.sender_id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_deserializes_wire_fields() {
        let json = r#"{
            "_id": "m1",
            "senderId": "u1",
            "message": "On my way",
            "messageType": "text",
            "createAt": "2026-01-10T09:30:00Z"
        }"#;
        let message: ChatMessage = serde_json::from_str(json).unwrap();
        assert!(message.is_from("u1"));
        assert_eq!(message.message_type, MessageKind::Text);
    }

    #[test]
    fn test_message_kind_defaults_to_text() {
        let json = r#"{"_id": "m2", "senderId": "u1", "message": "hi"}"#;
        let message: ChatMessage = serde_json::from_str(json).unwrap();
        assert_eq!(message.message_type, MessageKind::Text);
    }

    #[test]
    fn test_new_message_serializes_camel_case() {
        let msg = NewMessage {
            sender_id: "u1".to_string(),
            receiver_id: "d1".to_string(),
            conversation_id: "c1".to_string(),
            message_type: MessageKind::Text,
            message_text: "hello".to_string(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["senderId"], "u1");
        assert_eq!(json["messageText"], "hello");
    }

    #[test]
    fn test_conversation_peer() {
        let convo = Conversation {
            id: "c1".to_string(),
            sender_id: "u1".to_string(),
            receiver_id: "d1".to_string(),
            accepted: true,
        };
        assert_eq!(convo.peer_of("u1"), "d1");
        assert_eq!(convo.peer_of("d1"), "u1");
    }
}
