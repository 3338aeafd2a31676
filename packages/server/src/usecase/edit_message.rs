//! UseCase: メッセージ編集処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - EditMessageUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 送信者以外の編集はストアを変更してはならない
//! - 存在しないメッセージ・別ルームのメッセージは NotFound で破棄する
//!
//! ### どのような状況を想定しているか
//! - 正常系：送信者による編集
//! - 異常系：送信者以外による編集、存在しない ID、別ルーム、空の本文

use std::sync::Arc;

use crate::{
    domain::{MessageContent, MessageId, MessageRepository, SessionContext, Timestamp},
    infrastructure::dto::websocket::ServerEvent,
};

use super::{
    error::EventError,
    guard::{ensure_owner, load_message_in_room},
};

/// メッセージ編集のユースケース
pub struct EditMessageUseCase {
    repository: Arc<dyn MessageRepository>,
}

impl EditMessageUseCase {
    /// 新しい EditMessageUseCase を作成
    pub fn new(repository: Arc<dyn MessageRepository>) -> Self {
        Self { repository }
    }

    /// メッセージ編集を実行
    ///
    /// # Returns
    ///
    /// * `Ok(ServerEvent::Edit)` - ID、新しい本文、編集時刻
    /// * `Err(EventError::Unauthorized)` - 送信者以外による編集
    pub async fn execute(
        &self,
        ctx: &SessionContext,
        message_id: String,
        content: String,
    ) -> Result<ServerEvent, EventError> {
        let message_id = MessageId::new(message_id)?;
        let content = MessageContent::new(content)?;

        // 1. 所有者チェック
        let message = load_message_in_room(self.repository.as_ref(), ctx, &message_id).await?;
        ensure_owner(&message, ctx)?;

        // 2. 更新
        let updated = self
            .repository
            .update_message(&message_id, content)
            .await?;

        Ok(ServerEvent::Edit {
            id: updated.id.into_string(),
            content: updated
                .content
                .map(|c| c.into_string())
                .unwrap_or_default(),
            updated_at: updated.updated_at.unwrap_or_else(Timestamp::now).to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            ConnectionIdFactory, Message, MockMessageRepository, RepositoryError, RoomId, UserId,
        },
        infrastructure::repository::InMemoryMessageRepository,
    };

    fn ctx(user: &str, room: &str) -> SessionContext {
        SessionContext::new(
            RoomId::new(room.to_string()).unwrap(),
            ConnectionIdFactory::generate(),
            UserId::new(user.to_string()).unwrap(),
        )
    }

    async fn seed(repository: &InMemoryMessageRepository, sender: &str, room: &str) -> Message {
        repository
            .create_message(
                RoomId::new(room.to_string()).unwrap(),
                UserId::new(sender.to_string()).unwrap(),
                Some(MessageContent::new("original".to_string()).unwrap()),
                None,
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_owner_can_edit() {
        // テスト項目: 送信者は自分のメッセージを編集できる
        // given (前提条件):
        let repository = Arc::new(InMemoryMessageRepository::new());
        let message = seed(&repository, "alice", "r1").await;
        let usecase = EditMessageUseCase::new(repository.clone());

        // when (操作):
        let result = usecase
            .execute(&ctx("alice", "r1"), message.id.to_string(), "x".to_string())
            .await;

        // then (期待する結果):
        let ServerEvent::Edit { id, content, .. } = result.unwrap() else {
            panic!("expected edit envelope");
        };
        assert_eq!(id, message.id.as_str());
        assert_eq!(content, "x");
        let stored = repository.get_message(&message.id).await.unwrap();
        assert_eq!(stored.content.unwrap().as_str(), "x");
        assert!(stored.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_non_owner_cannot_edit() {
        // テスト項目: 送信者以外の編集は Unauthorized で、ストアは変更されない
        // given (前提条件):
        let repository = Arc::new(InMemoryMessageRepository::new());
        let message = seed(&repository, "bob", "r1").await;
        let usecase = EditMessageUseCase::new(repository.clone());

        // when (操作):
        let result = usecase
            .execute(&ctx("alice", "r1"), message.id.to_string(), "x".to_string())
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(EventError::Unauthorized { .. })));
        assert_eq!(repository.get_message(&message.id).await.unwrap(), message);
    }

    #[tokio::test]
    async fn test_non_owner_never_reaches_update() {
        // テスト項目: 送信者以外の編集では update_message が呼ばれない
        // given (前提条件):
        let mut repository = MockMessageRepository::new();
        repository.expect_get_message().returning(|id| {
            Ok(Message::new(
                id.clone(),
                RoomId::new("r1".to_string()).unwrap(),
                UserId::new("bob".to_string()).unwrap(),
                Some(MessageContent::new("original".to_string()).unwrap()),
                None,
                Timestamp::new(0),
            )
            .unwrap())
        });
        repository.expect_update_message().never();
        let usecase = EditMessageUseCase::new(Arc::new(repository));

        // when (操作):
        let result = usecase
            .execute(&ctx("alice", "r1"), "m1".to_string(), "x".to_string())
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(EventError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_edit_nonexistent_message() {
        // テスト項目: 存在しないメッセージの編集は NotFound
        // given (前提条件):
        let repository = Arc::new(InMemoryMessageRepository::new());
        let usecase = EditMessageUseCase::new(repository);

        // when (操作):
        let result = usecase
            .execute(&ctx("alice", "r1"), "missing".to_string(), "x".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(EventError::NotFound("missing".to_string())));
    }

    #[tokio::test]
    async fn test_edit_message_of_other_room() {
        // テスト項目: 別ルームのメッセージは送信者本人でも NotFound
        // given (前提条件):
        let repository = Arc::new(InMemoryMessageRepository::new());
        let message = seed(&repository, "alice", "r2").await;
        let usecase = EditMessageUseCase::new(repository.clone());

        // when (操作):
        let result = usecase
            .execute(&ctx("alice", "r1"), message.id.to_string(), "x".to_string())
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(EventError::NotFound(_))));
        assert_eq!(repository.get_message(&message.id).await.unwrap(), message);
    }

    #[tokio::test]
    async fn test_edit_to_empty_content() {
        // テスト項目: 空の本文への編集は Validation
        // given (前提条件):
        let repository = Arc::new(InMemoryMessageRepository::new());
        let message = seed(&repository, "alice", "r1").await;
        let usecase = EditMessageUseCase::new(repository);

        // when (操作):
        let result = usecase
            .execute(&ctx("alice", "r1"), message.id.to_string(), String::new())
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(EventError::Validation(_))));
    }

    #[tokio::test]
    async fn test_edit_store_failure() {
        // テスト項目: ストア障害は Store エラー
        // given (前提条件):
        let mut repository = MockMessageRepository::new();
        repository
            .expect_get_message()
            .returning(|_| Err(RepositoryError::Unavailable("timeout".to_string())));
        let usecase = EditMessageUseCase::new(Arc::new(repository));

        // when (操作):
        let result = usecase
            .execute(&ctx("alice", "r1"), "m1".to_string(), "x".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(EventError::Store("timeout".to_string())));
    }
}
