//! Domain factories for creating domain entities and value objects.

use super::{ConnectionId, MessageId, SessionEpoch};

/// Factory for generating MessageId instances.
///
/// Store-assigned ids are random UUID v4 strings.
pub struct MessageIdFactory;

impl MessageIdFactory {
    /// Generate a new MessageId with a random UUID v4.
    pub fn generate() -> MessageId {
        MessageId::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Factory for generating ConnectionId instances.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Factory for generating SessionEpoch instances.
///
/// A fresh epoch is drawn on every login.
pub struct SessionEpochFactory;

impl SessionEpochFactory {
    pub fn generate() -> SessionEpoch {
        SessionEpoch::new(uuid::Uuid::new_v4().simple().to_string())
    }
}
