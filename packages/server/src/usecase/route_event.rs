//! UseCase: 受信イベントのルーティング
//!
//! デコード済みの ClientEvent を対応する UseCase に振り分け、成功した場合のみ
//! 結果のエンベロープをルームへ broadcast する。永続化を伴うイベントは、
//! ストア呼び出しが成功して返った後にだけ broadcast される。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - EventRouter::dispatch() メソッド
//!
//! ### なぜこのテストが必要か
//! - 破棄されたイベントが broadcast されないことを保証
//! - 成功したイベントは送信者を含むルーム全員に届くことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：create / read / typing の broadcast
//! - 異常系：送信者以外の edit、ストア障害

use std::sync::Arc;

use crate::{
    domain::{MessageRepository, SessionContext},
    infrastructure::{dto::websocket::ClientEvent, registry::RoomRegistry},
};

use super::{
    create_message::CreateMessageUseCase, delete_message::DeleteMessageUseCase,
    edit_message::EditMessageUseCase, error::EventError, mark_read::MarkReadUseCase,
    notify_typing::NotifyTypingUseCase,
};

/// イベントルーター
pub struct EventRouter {
    create: CreateMessageUseCase,
    edit: EditMessageUseCase,
    delete: DeleteMessageUseCase,
    read: MarkReadUseCase,
    typing: NotifyTypingUseCase,
    registry: Arc<RoomRegistry>,
}

impl EventRouter {
    /// 新しい EventRouter を作成
    pub fn new(repository: Arc<dyn MessageRepository>, registry: Arc<RoomRegistry>) -> Self {
        Self {
            create: CreateMessageUseCase::new(repository.clone()),
            edit: EditMessageUseCase::new(repository.clone()),
            delete: DeleteMessageUseCase::new(repository.clone()),
            read: MarkReadUseCase::new(repository),
            typing: NotifyTypingUseCase::new(),
            registry,
        }
    }

    /// イベントを処理して broadcast する
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 配送できた接続数
    /// * `Err(EventError)` - イベントは破棄され、broadcast されていない
    pub async fn dispatch(
        &self,
        ctx: &SessionContext,
        event: ClientEvent,
    ) -> Result<usize, EventError> {
        let kind = event.kind();
        tracing::debug!("Dispatching '{}' from '{}' in room '{}'", kind, ctx.user_id, ctx.room_id);

        let envelope = match event {
            ClientEvent::Create { content, image_url } => {
                self.create.execute(ctx, content, image_url).await
            }
            ClientEvent::Edit {
                message_id,
                content,
            } => self.edit.execute(ctx, message_id, content).await,
            ClientEvent::Delete { message_id } => self.delete.execute(ctx, message_id).await,
            ClientEvent::Read { message_id } => self.read.execute(ctx, message_id).await,
            ClientEvent::Typing { username } => Ok(self.typing.start(ctx, username)),
            ClientEvent::StopTyping => Ok(self.typing.stop(ctx)),
        };

        let envelope = envelope.inspect_err(|e| {
            tracing::warn!("Dropped '{}' from '{}': {}", kind, ctx.user_id, e);
        })?;

        Ok(self.registry.broadcast(&ctx.room_id, &envelope).await)
    }
}
