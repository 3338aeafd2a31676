//! InMemory Message Repository 実装
//!
//! ドメイン層が定義する MessageRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! メッセージ本体は ID で引き、ルームごとの挿入順は別の Vec で保持します。
//! 挿入順は作成時刻順と一致するため、履歴取得はこの Vec の末尾から取ります。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ImageUrl, Message, MessageContent, MessageId, MessageIdFactory, MessageRepository,
    RepositoryError, RoomId, Timestamp, UserId,
};

#[derive(Default)]
struct Store {
    messages: HashMap<MessageId, Message>,
    /// ルームごとのメッセージ ID（作成順）
    room_order: HashMap<RoomId, Vec<MessageId>>,
}

/// インメモリ Message Repository 実装
#[derive(Default)]
pub struct InMemoryMessageRepository {
    store: Mutex<Store>,
}

impl InMemoryMessageRepository {
    /// 新しい InMemoryMessageRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存されているメッセージ数
    pub async fn count(&self) -> usize {
        self.store.lock().await.messages.len()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn create_message(
        &self,
        room_id: RoomId,
        sender_id: UserId,
        content: Option<MessageContent>,
        image_url: Option<ImageUrl>,
    ) -> Result<Message, RepositoryError> {
        let message = Message::new(
            MessageIdFactory::generate(),
            room_id,
            sender_id,
            content,
            image_url,
            Timestamp::now(),
        )?;

        let mut store = self.store.lock().await;
        store
            .room_order
            .entry(message.room_id.clone())
            .or_default()
            .push(message.id.clone());
        store.messages.insert(message.id.clone(), message.clone());

        Ok(message)
    }

    async fn get_message(&self, message_id: &MessageId) -> Result<Message, RepositoryError> {
        let store = self.store.lock().await;
        store
            .messages
            .get(message_id)
            .cloned()
            .ok_or_else(|| RepositoryError::MessageNotFound(message_id.to_string()))
    }

    async fn update_message(
        &self,
        message_id: &MessageId,
        content: MessageContent,
    ) -> Result<Message, RepositoryError> {
        let mut store = self.store.lock().await;
        let message = store
            .messages
            .get_mut(message_id)
            .ok_or_else(|| RepositoryError::MessageNotFound(message_id.to_string()))?;
        message.edit(content, Timestamp::now());
        Ok(message.clone())
    }

    async fn delete_message(&self, message_id: &MessageId) -> Result<bool, RepositoryError> {
        let mut store = self.store.lock().await;
        let Some(message) = store.messages.remove(message_id) else {
            return Ok(false);
        };
        if let Some(order) = store.room_order.get_mut(&message.room_id) {
            order.retain(|id| id != message_id);
        }
        Ok(true)
    }

    async fn add_reader(
        &self,
        message_id: &MessageId,
        user_id: UserId,
    ) -> Result<Message, RepositoryError> {
        let mut store = self.store.lock().await;
        let message = store
            .messages
            .get_mut(message_id)
            .ok_or_else(|| RepositoryError::MessageNotFound(message_id.to_string()))?;
        message.mark_read_by(user_id);
        Ok(message.clone())
    }

    async fn list_recent(
        &self,
        room_id: &RoomId,
        limit: usize,
    ) -> Result<Vec<Message>, RepositoryError> {
        let store = self.store.lock().await;
        let Some(order) = store.room_order.get(room_id) else {
            return Ok(Vec::new());
        };
        let start = order.len().saturating_sub(limit);
        Ok(order[start..]
            .iter()
            .filter_map(|id| store.messages.get(id).cloned())
            .collect())
    }
}
