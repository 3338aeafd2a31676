//! UseCase: セッション切断処理
//!
//! 切断時は Registry から evict する。broadcast 失敗による evict と競合しても
//! 二度目の evict は no-op になるため、呼び出し側は結果を気にせず一度だけ呼べばよい。

use std::sync::Arc;

use crate::{domain::SessionContext, infrastructure::registry::RoomRegistry};

/// セッション切断のユースケース
pub struct DisconnectSessionUseCase {
    registry: Arc<RoomRegistry>,
}

impl DisconnectSessionUseCase {
    /// 新しい DisconnectSessionUseCase を作成
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    /// セッション切断を実行
    ///
    /// # Returns
    ///
    /// この呼び出しで実際に削除された場合は `true`
    pub async fn execute(&self, ctx: &SessionContext) -> bool {
        self.registry
            .evict(&ctx.room_id, &ctx.connection_id)
            .await
    }
}
