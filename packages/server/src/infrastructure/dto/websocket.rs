//! WebSocket envelope DTOs exchanged over a room connection.
//!
//! Inbound and outbound envelopes are JSON objects tagged by `type`.
//! Unknown inbound tags fail to decode and are skipped by the session.

use serde::{Deserialize, Serialize};

use crate::domain::Message;

/// Envelope sent by a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    Create {
        #[serde(default)]
        content: Option<String>,
        #[serde(default)]
        image_url: Option<String>,
    },
    Edit {
        message_id: String,
        content: String,
    },
    Delete {
        message_id: String,
    },
    Read {
        message_id: String,
    },
    Typing {
        #[serde(default)]
        username: Option<String>,
    },
    StopTyping,
}

impl ClientEvent {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ClientEvent::Create { .. } => "create",
            ClientEvent::Edit { .. } => "edit",
            ClientEvent::Delete { .. } => "delete",
            ClientEvent::Read { .. } => "read",
            ClientEvent::Typing { .. } => "typing",
            ClientEvent::StopTyping => "stop_typing",
        }
    }
}

/// Full message representation, shared by the create envelope and history fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: String,
    pub room_id: String,
    pub sender_id: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub created_at: String, // ISO 8601
    pub updated_at: Option<String>, // ISO 8601
    pub read_by: Vec<String>,
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.as_str().to_string(),
            room_id: message.room_id.as_str().to_string(),
            sender_id: message.sender_id.as_str().to_string(),
            content: message.content.as_ref().map(|c| c.as_str().to_string()),
            image_url: message.image_url.as_ref().map(|u| u.as_str().to_string()),
            created_at: message.created_at.to_rfc3339(),
            updated_at: message.updated_at.map(|t| t.to_rfc3339()),
            read_by: message
                .read_by
                .iter()
                .map(|u| u.as_str().to_string())
                .collect(),
        }
    }
}

/// Envelope fanned out to every connection of a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    Create(MessageDto),
    Edit {
        id: String,
        content: String,
        updated_at: String,
    },
    Delete {
        id: String,
    },
    ReadReceipt {
        message_id: String,
        user_id: String,
    },
    Typing {
        user_id: String,
        username: Option<String>,
    },
    StopTyping {
        user_id: String,
    },
    /// Sent to the acting connection only, never broadcast
    Error {
        reason: String,
        message_id: Option<String>,
    },
}

impl ServerEvent {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
