//! UseCase: ルーム参加処理（移動を含む）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 参加・移動・同一ルームへの重複参加と、それに伴う通知
//!
//! ### なぜこのテストが必要か
//! - 移動時に旧ルームから外れ、新ルームにのみ所属することを保証
//! - 1 回の変更につきスナップショットが 1 回だけ配信されることを確認
//! - 認証必須の構成で未認証の接続に auth_required が届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加、移動、ルーム省略時のデフォルトルーム
//! - 異常系：未設定のルーム、未認証
//! - エッジケース：同一ルームへの重複参加

use std::sync::Arc;

use madang_shared::time::Clock;

use crate::domain::{
    ConnectionId, Nickname, PresenceRepository, RoomCatalog, SessionContext, Timestamp,
};

use super::{BroadcastGateway, IdentityResolver, error::JoinError};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    catalog: RoomCatalog,
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn PresenceRepository>,
    identity: Arc<IdentityResolver>,
    gateway: Arc<BroadcastGateway>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        catalog: RoomCatalog,
        repository: Arc<dyn PresenceRepository>,
        identity: Arc<IdentityResolver>,
        gateway: Arc<BroadcastGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            repository,
            identity,
            gateway,
            clock,
        }
    }

    /// ルーム参加を実行
    ///
    /// 別のルームに参加中であれば、そのルームから外れてから参加する。
    ///
    /// # Arguments
    ///
    /// * `connection` - 参加する接続
    /// * `session` - 接続時に提示されたセッション
    /// * `room` - 参加するルーム名（省略時はデフォルトルーム）
    /// * `claimed` - クライアントが名乗った名前
    ///
    /// # Returns
    ///
    /// * `Ok(Nickname)` - 参加後の Identity（重複参加の場合は最初の参加時のもの）
    /// * `Err(JoinError::Unauthorized)` - 未認証。呼び出し側は接続を閉じる
    /// * `Err(JoinError::InvalidRoom)` - 未設定のルーム
    pub async fn execute(
        &self,
        connection: ConnectionId,
        session: &SessionContext,
        room: Option<&str>,
        claimed: Option<&str>,
    ) -> Result<Nickname, JoinError> {
        // 1. Identity を解決（ロック外）
        let identity = match self.identity.resolve(session, claimed).await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(
                    "Connection '{}' tried to join without authentication",
                    connection
                );
                self.gateway.reject_unauthorized(&connection).await;
                return Err(e.into());
            }
        };

        // 2. ルームを解決
        let room = self.catalog.resolve(room)?;

        // 3. Repository 経由で参加（移動）
        let update = self.repository.join(connection, room, identity).await?;

        let transition = &update.transition;
        match (&transition.departed, &transition.arrived) {
            (Some(from), Some(to)) => tracing::info!(
                "'{}' ({}) moved from '{}' to '{}'",
                transition.identity,
                connection,
                from.room,
                to.room
            ),
            (None, Some(to)) => tracing::info!(
                "'{}' ({}) joined '{}'",
                transition.identity,
                connection,
                to.room
            ),
            _ => tracing::debug!(
                "'{}' ({}) is already in the requested room",
                transition.identity,
                connection
            ),
        }

        // 4. ロック解放後に通知
        let now = Timestamp::new(self.clock.now_millis());
        self.gateway.announce(&update, now).await;

        Ok(update.transition.identity)
    }
}
