//! UseCase: メッセージ作成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateMessageUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 本文も画像もない create は保存せずに破棄する
//! - 送信者は常にセッションのユーザーであること
//! - ストア失敗時はエンベロープを返さない（= broadcast されない）
//!
//! ### どのような状況を想定しているか
//! - 正常系：本文のみ、画像のみ
//! - 異常系：空の payload、ストア障害

use std::sync::Arc;

use crate::{
    domain::{ImageUrl, MessageContent, MessageError, MessageRepository, SessionContext},
    infrastructure::dto::websocket::{MessageDto, ServerEvent},
};

use super::error::EventError;

/// メッセージ作成のユースケース
pub struct CreateMessageUseCase {
    repository: Arc<dyn MessageRepository>,
}

impl CreateMessageUseCase {
    /// 新しい CreateMessageUseCase を作成
    pub fn new(repository: Arc<dyn MessageRepository>) -> Self {
        Self { repository }
    }

    /// メッセージ作成を実行
    ///
    /// 空文字列は未指定と同じ扱い。
    ///
    /// # Returns
    ///
    /// * `Ok(ServerEvent::Create)` - 保存されたメッセージ（既読者なし、未編集）
    /// * `Err(EventError)` - 破棄
    pub async fn execute(
        &self,
        ctx: &SessionContext,
        content: Option<String>,
        image_url: Option<String>,
    ) -> Result<ServerEvent, EventError> {
        let content = content
            .filter(|c| !c.is_empty())
            .map(MessageContent::new)
            .transpose()?;
        let image_url = image_url
            .filter(|u| !u.is_empty())
            .map(ImageUrl::new)
            .transpose()?;
        if content.is_none() && image_url.is_none() {
            return Err(MessageError::EmptyPayload.into());
        }

        let message = self
            .repository
            .create_message(ctx.room_id.clone(), ctx.user_id.clone(), content, image_url)
            .await?;

        Ok(ServerEvent::Create(MessageDto::from(&message)))
    }
}
