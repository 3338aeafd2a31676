//! UseCase: メッセージ削除処理
//!
//! 所有者チェックは編集と同じ。削除の直前に他の接続から削除されていた場合は
//! NotFound として扱い、二重の delete エンベロープは出さない。

use std::sync::Arc;

use crate::{
    domain::{MessageId, MessageRepository, SessionContext},
    infrastructure::dto::websocket::ServerEvent,
};

use super::{
    error::EventError,
    guard::{ensure_owner, load_message_in_room},
};

/// メッセージ削除のユースケース
pub struct DeleteMessageUseCase {
    repository: Arc<dyn MessageRepository>,
}

impl DeleteMessageUseCase {
    /// 新しい DeleteMessageUseCase を作成
    pub fn new(repository: Arc<dyn MessageRepository>) -> Self {
        Self { repository }
    }

    /// メッセージ削除を実行
    ///
    /// # Returns
    ///
    /// * `Ok(ServerEvent::Delete)` - 削除されたメッセージの ID のみ
    /// * `Err(EventError)` - 破棄
    pub async fn execute(
        &self,
        ctx: &SessionContext,
        message_id: String,
    ) -> Result<ServerEvent, EventError> {
        let message_id = MessageId::new(message_id)?;

        let message = load_message_in_room(self.repository.as_ref(), ctx, &message_id).await?;
        ensure_owner(&message, ctx)?;

        if !self.repository.delete_message(&message_id).await? {
            return Err(EventError::NotFound(message_id.into_string()));
        }

        Ok(ServerEvent::Delete {
            id: message_id.into_string(),
        })
    }
}
