//! UseCase: ブロードキャストゲートウェイ
//!
//! ## 責務
//!
//! - ルーム単位の配信（EmitToRoom）と、全ルームの参加者への配信（EmitGlobal）
//! - 配信先は呼び出し時点の Membership から取得する（後から参加した接続には届かない）
//! - 一部の接続への配信失敗は他の接続への配信を妨げない
//!
//! Repository のロックは配信先の取得時のみ保持し、配信中は保持しない。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePushError, MessagePusher, OutboundEvent, PresenceRepository,
    PresenceUpdate, RoomName, Timestamp,
};

use super::identity::AUTH_REQUIRED_MESSAGE;

/// ブロードキャストゲートウェイ
pub struct BroadcastGateway {
    /// Repository（配信先の取得に使用、読み取りのみ）
    repository: Arc<dyn PresenceRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl BroadcastGateway {
    /// 新しい BroadcastGateway を作成
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// ルームの現在の参加者にイベントを配信し、届いた接続数を返す
    pub async fn emit_to_room(&self, room: &RoomName, event: &OutboundEvent) -> usize {
        let targets = self.repository.members_of(room).await;
        self.deliver(targets, event).await
    }

    /// いずれかのルームに参加中の全ての接続にイベントを配信し、届いた接続数を返す
    pub async fn emit_global(&self, event: &OutboundEvent) -> usize {
        let targets = self.repository.all_members().await;
        self.deliver(targets, event).await
    }

    /// 特定の接続にイベントを配信
    pub async fn emit_to(
        &self,
        connection: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError> {
        self.message_pusher.push_to(connection, event).await
    }

    /// 認証が必要であることを該当の接続にのみ通知
    pub async fn reject_unauthorized(&self, connection: &ConnectionId) {
        let event = OutboundEvent::AuthRequired {
            msg: AUTH_REQUIRED_MESSAGE.to_string(),
        };
        if let Err(e) = self.emit_to(connection, &event).await {
            tracing::warn!(
                "Failed to send auth_required to connection '{}': {}",
                connection,
                e
            );
        }
    }

    /// プレゼンスの変化を通知
    ///
    /// 1. 退室元ルームへ「退室」通知（移動・退室・切断時）
    /// 2. 入室先ルームへ「入室」通知（参加・移動時）
    /// 3. 全ルームの参加者へスナップショット（1 回のみ）
    pub async fn announce(&self, update: &PresenceUpdate, timestamp: Timestamp) {
        let transition = &update.transition;

        if let Some(departed) = &transition.departed {
            let notice = OutboundEvent::left(departed.identity.clone(), timestamp);
            self.emit_to_room(&departed.room, &notice).await;
        }
        if let Some(arrived) = &transition.arrived {
            let notice = OutboundEvent::entered(arrived.identity.clone(), timestamp);
            self.emit_to_room(&arrived.room, &notice).await;
        }

        let delivered = self
            .emit_global(&OutboundEvent::PresenceUpdate(update.snapshot.clone()))
            .await;
        tracing::debug!("Presence snapshot delivered to {} connection(s)", delivered);
    }

    async fn deliver(&self, targets: Vec<ConnectionId>, event: &OutboundEvent) -> usize {
        match self.message_pusher.broadcast(targets, event).await {
            Ok(delivered) => delivered,
            Err(e) => {
                tracing::warn!("Failed to broadcast event: {}", e);
                0
            }
        }
    }
}
