//! UseCase: 履歴取得
//!
//! ルームの直近メッセージを古い順で返す。WebSocket と同じベアラートークンで認証する。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - FetchHistoryUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 認証なしで履歴が読めてはならない
//! - limit の範囲外は早期に拒否し、ストアを呼ばない
//!
//! ### どのような状況を想定しているか
//! - 正常系：直近 N 件を古い順で取得
//! - 異常系：トークンなし、limit 範囲外、ストア障害

use std::sync::Arc;

use crate::{
    domain::{AuthError, IdentityVerifier, MessageRepository, RepositoryError, RoomId},
    infrastructure::dto::websocket::MessageDto,
};

use super::error::HistoryError;

/// 一度に取得できる最大件数
pub const MAX_HISTORY_LIMIT: usize = 200;

/// 履歴取得のユースケース
pub struct FetchHistoryUseCase {
    verifier: Arc<dyn IdentityVerifier>,
    repository: Arc<dyn MessageRepository>,
}

impl FetchHistoryUseCase {
    /// 新しい FetchHistoryUseCase を作成
    pub fn new(
        verifier: Arc<dyn IdentityVerifier>,
        repository: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            verifier,
            repository,
        }
    }

    /// 履歴取得を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<MessageDto>)` - 古い順のメッセージ
    /// * `Err(HistoryError)` - 認証失敗、limit 範囲外、ストア障害
    pub async fn execute(
        &self,
        token: Option<&str>,
        room_id: String,
        limit: usize,
    ) -> Result<Vec<MessageDto>, HistoryError> {
        // 1. 認証
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;
        self.verifier.verify_token(token).await?;

        // 2. 入力検証
        let room_id = RoomId::new(room_id).map_err(HistoryError::InvalidRoom)?;
        if limit == 0 || limit > MAX_HISTORY_LIMIT {
            return Err(HistoryError::InvalidLimit {
                max: MAX_HISTORY_LIMIT,
                actual: limit,
            });
        }

        // 3. 取得
        let messages = self
            .repository
            .list_recent(&room_id, limit)
            .await
            .map_err(|e| match e {
                RepositoryError::Unavailable(reason) => HistoryError::Store(reason),
                other => HistoryError::Store(other.to_string()),
            })?;

        Ok(messages.iter().map(MessageDto::from).collect())
    }
}
