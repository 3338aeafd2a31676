//! UseCase: セッション接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectSessionUseCase::execute() メソッド
//! - トークン検証とルームへの admit
//!
//! ### なぜこのテストが必要か
//! - トークンが無い・不正な接続はルームに一切影響してはならない
//! - admit 後の SessionContext が以後の認可の基準になる
//!
//! ### どのような状況を想定しているか
//! - 正常系：有効なトークンで接続
//! - 異常系：トークンなし、不正なトークン、失効したトークン、不正なルーム ID

use std::sync::Arc;

use tokio::sync::mpsc::Sender;

use crate::{
    domain::{AuthError, ConnectionIdFactory, IdentityVerifier, RoomId, SessionContext},
    infrastructure::registry::{Connection, RoomRegistry},
};

use super::error::AdmissionError;

/// セッション接続のユースケース
pub struct ConnectSessionUseCase {
    verifier: Arc<dyn IdentityVerifier>,
    registry: Arc<RoomRegistry>,
}

impl ConnectSessionUseCase {
    /// 新しい ConnectSessionUseCase を作成
    pub fn new(verifier: Arc<dyn IdentityVerifier>, registry: Arc<RoomRegistry>) -> Self {
        Self { verifier, registry }
    }

    /// 認証してルームに admit する
    ///
    /// # Arguments
    ///
    /// * `room_id` - 接続先ルーム ID（パスから取得した生の文字列）
    /// * `token` - ベアラートークン
    /// * `sender` - この接続へのメッセージ送信チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(SessionContext)` - admit 成功
    /// * `Err(AdmissionError)` - 認証失敗。admit は行われない
    pub async fn execute(
        &self,
        room_id: String,
        token: Option<&str>,
        sender: Sender<String>,
    ) -> Result<SessionContext, AdmissionError> {
        let room_id = RoomId::new(room_id).map_err(AdmissionError::InvalidRoom)?;

        // 1. トークン検証
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;
        let identity = self.verifier.verify_token(token).await?;

        // 2. Registry に admit
        let connection_id = ConnectionIdFactory::generate();
        self.registry
            .admit(
                room_id.clone(),
                Connection::new(connection_id, identity.user_id.clone(), sender),
            )
            .await;

        Ok(SessionContext::new(room_id, connection_id, identity.user_id))
    }
}
