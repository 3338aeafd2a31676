//! UseCase: 既読処理
//!
//! 所有者チェックはない。ルームの参加者であれば誰でも既読にできる。
//! 既読者は集合として扱われ、同じユーザーが何度既読にしても一人分。

use std::sync::Arc;

use crate::{
    domain::{MessageId, MessageRepository, SessionContext},
    infrastructure::dto::websocket::ServerEvent,
};

use super::{error::EventError, guard::load_message_in_room};

/// 既読のユースケース
pub struct MarkReadUseCase {
    repository: Arc<dyn MessageRepository>,
}

impl MarkReadUseCase {
    /// 新しい MarkReadUseCase を作成
    pub fn new(repository: Arc<dyn MessageRepository>) -> Self {
        Self { repository }
    }

    /// 既読を実行
    ///
    /// # Returns
    ///
    /// * `Ok(ServerEvent::ReadReceipt)` - メッセージ ID と既読にしたユーザー
    /// * `Err(EventError)` - 破棄
    pub async fn execute(
        &self,
        ctx: &SessionContext,
        message_id: String,
    ) -> Result<ServerEvent, EventError> {
        let message_id = MessageId::new(message_id)?;

        load_message_in_room(self.repository.as_ref(), ctx, &message_id).await?;
        self.repository
            .add_reader(&message_id, ctx.user_id.clone())
            .await?;

        Ok(ServerEvent::ReadReceipt {
            message_id: message_id.into_string(),
            user_id: ctx.user_id.to_string(),
        })
    }
}
