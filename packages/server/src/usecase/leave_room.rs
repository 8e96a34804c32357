//! UseCase: ルーム退室処理
//!
//! 接続の現在のルームと一致する場合のみ退室する。
//! 移動後に遅れて届いた退室イベントや重複した退室は、状態を変えず通知もしない。

use std::sync::Arc;

use madang_shared::time::Clock;

use crate::domain::{ConnectionId, PresenceRepository, RoomCatalog, Timestamp};

use super::BroadcastGateway;

/// ルーム退室のユースケース
pub struct LeaveRoomUseCase {
    catalog: RoomCatalog,
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn PresenceRepository>,
    gateway: Arc<BroadcastGateway>,
    clock: Arc<dyn Clock>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(
        catalog: RoomCatalog,
        repository: Arc<dyn PresenceRepository>,
        gateway: Arc<BroadcastGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            repository,
            gateway,
            clock,
        }
    }

    /// ルーム退室を実行
    ///
    /// # Arguments
    ///
    /// * `connection` - 退室する接続
    /// * `room` - 退室するルーム名（省略時はデフォルトルーム）
    ///
    /// # Returns
    ///
    /// 実際に退室した場合は `true`
    pub async fn execute(&self, connection: ConnectionId, room: Option<&str>) -> bool {
        let room = match self.catalog.resolve(room) {
            Ok(room) => room,
            Err(e) => {
                tracing::warn!("Ignoring leave from connection '{}': {}", connection, e);
                return false;
            }
        };

        let Some(update) = self.repository.leave(&connection, &room).await else {
            tracing::debug!(
                "Connection '{}' is not in room '{}', ignoring leave",
                connection,
                room
            );
            return false;
        };
        tracing::info!(
            "'{}' ({}) left '{}'",
            update.transition.identity,
            connection,
            room
        );

        let now = Timestamp::new(self.clock.now_millis());
        self.gateway.announce(&update, now).await;
        true
    }
}
