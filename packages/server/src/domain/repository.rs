//! Repository trait definitions.
//!
//! The domain layer defines the collaborator interfaces; the infrastructure
//! layer provides the implementations (dependency inversion).

use async_trait::async_trait;

use super::{
    entity::{Identity, Message},
    error::{AuthError, RepositoryError},
    value_object::{ImageUrl, MessageContent, MessageId, RoomId, UserId},
};

/// Durable store of record for messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persist a new message with an empty read-set and return it.
    async fn create_message(
        &self,
        room_id: RoomId,
        sender_id: UserId,
        content: Option<MessageContent>,
        image_url: Option<ImageUrl>,
    ) -> Result<Message, RepositoryError>;

    async fn get_message(&self, message_id: &MessageId) -> Result<Message, RepositoryError>;

    /// Replace the content of a message and stamp its edit time.
    async fn update_message(
        &self,
        message_id: &MessageId,
        content: MessageContent,
    ) -> Result<Message, RepositoryError>;

    /// Remove a message. Returns `false` if it did not exist.
    async fn delete_message(&self, message_id: &MessageId) -> Result<bool, RepositoryError>;

    /// Add `user_id` to the read-set of a message (set semantics).
    async fn add_reader(
        &self,
        message_id: &MessageId,
        user_id: UserId,
    ) -> Result<Message, RepositoryError>;

    /// The `limit` most recent messages of a room, oldest first.
    async fn list_recent(
        &self,
        room_id: &RoomId,
        limit: usize,
    ) -> Result<Vec<Message>, RepositoryError>;
}

/// Validates bearer tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify_token(&self, token: &str) -> Result<Identity, AuthError>;
}
