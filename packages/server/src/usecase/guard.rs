//! 既存メッセージを操作する UseCase 共通のチェック

use crate::domain::{Message, MessageId, MessageRepository, SessionContext};

use super::error::EventError;

/// セッションのルームに属するメッセージを取得する
///
/// 別ルームのメッセージは存在しないものとして扱う
pub(crate) async fn load_message_in_room(
    repository: &dyn MessageRepository,
    ctx: &SessionContext,
    message_id: &MessageId,
) -> Result<Message, EventError> {
    let message = repository.get_message(message_id).await?;
    if message.room_id != ctx.room_id {
        return Err(EventError::NotFound(message_id.to_string()));
    }
    Ok(message)
}

/// セッションのユーザーが送信者であることを確認する
pub(crate) fn ensure_owner(message: &Message, ctx: &SessionContext) -> Result<(), EventError> {
    if !message.is_sent_by(&ctx.user_id) {
        return Err(EventError::Unauthorized {
            user_id: ctx.user_id.to_string(),
            message_id: message.id.to_string(),
        });
    }
    Ok(())
}
