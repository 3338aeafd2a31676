//! UseCase: 入力中通知
//!
//! 永続化は行わない。エンベロープを組み立てるだけ。

use crate::{domain::SessionContext, infrastructure::dto::websocket::ServerEvent};

/// 表示名の最大文字数
const MAX_USERNAME_LENGTH: usize = 100;

/// 入力中通知のユースケース
#[derive(Default)]
pub struct NotifyTypingUseCase;

impl NotifyTypingUseCase {
    pub fn new() -> Self {
        Self
    }

    /// 入力開始
    ///
    /// 空の表示名は省略、長すぎる表示名は切り詰める
    pub fn start(&self, ctx: &SessionContext, username: Option<String>) -> ServerEvent {
        let username = username
            .filter(|name| !name.is_empty())
            .map(|name| name.chars().take(MAX_USERNAME_LENGTH).collect());
        ServerEvent::Typing {
            user_id: ctx.user_id.to_string(),
            username,
        }
    }

    /// 入力終了
    pub fn stop(&self, ctx: &SessionContext) -> ServerEvent {
        ServerEvent::StopTyping {
            user_id: ctx.user_id.to_string(),
        }
    }
}
