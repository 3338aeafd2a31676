//! Core domain models for the messaging core.

use serde::{Deserialize, Serialize};

use super::{
    error::MessageError,
    value_object::{
        ConnectionId, ImageUrl, MessageContent, MessageId, RoomId, SessionEpoch, Timestamp, UserId,
    },
};

/// A chat message belonging to exactly one room.
///
/// At least one of `content` and `image_url` is always present. `read_by`
/// only ever grows and holds each reader once, in order of first read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub room_id: RoomId,
    pub sender_id: UserId,
    pub content: Option<MessageContent>,
    pub image_url: Option<ImageUrl>,
    pub created_at: Timestamp,
    /// Set on the first edit
    pub updated_at: Option<Timestamp>,
    pub read_by: Vec<UserId>,
}

impl Message {
    /// Create a new message with an empty read-set.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::EmptyPayload` if both `content` and `image_url` are absent
    pub fn new(
        id: MessageId,
        room_id: RoomId,
        sender_id: UserId,
        content: Option<MessageContent>,
        image_url: Option<ImageUrl>,
        created_at: Timestamp,
    ) -> Result<Self, MessageError> {
        if content.is_none() && image_url.is_none() {
            return Err(MessageError::EmptyPayload);
        }
        Ok(Self {
            id,
            room_id,
            sender_id,
            content,
            image_url,
            created_at,
            updated_at: None,
            read_by: Vec::new(),
        })
    }

    /// Whether `user_id` is the original sender
    pub fn is_sent_by(&self, user_id: &UserId) -> bool {
        &self.sender_id == user_id
    }

    /// Replace the content and stamp the edit time
    pub fn edit(&mut self, content: MessageContent, edited_at: Timestamp) {
        self.content = Some(content);
        self.updated_at = Some(edited_at);
    }

    /// Record that `user_id` has read this message.
    ///
    /// Returns `false` if the user had already read it.
    pub fn mark_read_by(&mut self, user_id: UserId) -> bool {
        if self.read_by.contains(&user_id) {
            return false;
        }
        self.read_by.push(user_id);
        true
    }
}

/// Result of a successful token verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub epoch: SessionEpoch,
}

/// Authorization context of one admitted connection.
///
/// Fixed for the lifetime of the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub room_id: RoomId,
    pub connection_id: ConnectionId,
    pub user_id: UserId,
}

impl SessionContext {
    pub fn new(room_id: RoomId, connection_id: ConnectionId, user_id: UserId) -> Self {
        Self {
            room_id,
            connection_id,
            user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::factory::MessageIdFactory;

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn text_message(sender: &str) -> Message {
        Message::new(
            MessageIdFactory::generate(),
            RoomId::new("r1".to_string()).unwrap(),
            user(sender),
            Some(MessageContent::new("hi".to_string()).unwrap()),
            None,
            Timestamp::new(1000),
        )
        .unwrap()
    }

    #[test]
    fn test_message_new() {
        // テスト項目: 新しい Message は既読者なし・未編集で作成される
        // when (操作):
        let message = text_message("alice");

        // then (期待する結果):
        assert!(message.read_by.is_empty());
        assert_eq!(message.updated_at, None);
        assert_eq!(message.sender_id, user("alice"));
    }

    #[test]
    fn test_message_new_image_only() {
        // テスト項目: 本文なしでも画像参照があれば作成できる
        // when (操作):
        let result = Message::new(
            MessageIdFactory::generate(),
            RoomId::new("r1".to_string()).unwrap(),
            user("alice"),
            None,
            Some(ImageUrl::new("https://cdn.example/cat.png".to_string()).unwrap()),
            Timestamp::new(1000),
        );

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().content, None);
    }

    #[test]
    fn test_message_new_empty_payload_fails() {
        // テスト項目: 本文も画像参照もないメッセージは作成できない
        // when (操作):
        let result = Message::new(
            MessageIdFactory::generate(),
            RoomId::new("r1".to_string()).unwrap(),
            user("alice"),
            None,
            None,
            Timestamp::new(1000),
        );

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), MessageError::EmptyPayload);
    }

    #[test]
    fn test_message_edit() {
        // テスト項目: 編集すると本文と編集時刻が更新される
        // given (前提条件):
        let mut message = text_message("alice");

        // when (操作):
        message.edit(
            MessageContent::new("edited".to_string()).unwrap(),
            Timestamp::new(2000),
        );

        // then (期待する結果):
        assert_eq!(message.content.as_ref().unwrap().as_str(), "edited");
        assert_eq!(message.updated_at, Some(Timestamp::new(2000)));
        assert_eq!(message.created_at, Timestamp::new(1000));
    }

    #[test]
    fn test_message_mark_read_is_idempotent() {
        // テスト項目: 同じユーザーが二度既読にしても既読者は一人のまま
        // given (前提条件):
        let mut message = text_message("alice");

        // when (操作):
        let first = message.mark_read_by(user("bob"));
        let second = message.mark_read_by(user("bob"));

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(message.read_by, vec![user("bob")]);
    }

    #[test]
    fn test_message_read_by_keeps_first_read_order() {
        // テスト項目: 既読者は最初に既読にした順で保持される
        // given (前提条件):
        let mut message = text_message("alice");

        // when (操作):
        message.mark_read_by(user("carol"));
        message.mark_read_by(user("bob"));
        message.mark_read_by(user("carol"));

        // then (期待する結果):
        assert_eq!(message.read_by, vec![user("carol"), user("bob")]);
    }

    #[test]
    fn test_message_is_sent_by() {
        // テスト項目: 送信者判定
        // given (前提条件):
        let message = text_message("alice");

        // then (期待する結果):
        assert!(message.is_sent_by(&user("alice")));
        assert!(!message.is_sent_by(&user("bob")));
    }
}
