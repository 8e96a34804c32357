//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectUseCase::execute() メソッド
//! - 参加中のルームからの削除、送信チャンネルの登録解除、通知
//!
//! ### なぜこのテストが必要か
//! - 切断が冪等であること（2 回目は何も通知しない）を保証
//! - 一度も参加していない接続の切断がエラーにならないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加中の接続の切断
//! - エッジケース：重複した切断、未参加の接続の切断

use std::sync::Arc;

use madang_shared::time::Clock;

use crate::domain::{ConnectionId, MessagePusher, PresenceRepository, Timestamp};

use super::BroadcastGateway;

/// 切断のユースケース
pub struct DisconnectUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn PresenceRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    gateway: Arc<BroadcastGateway>,
    clock: Arc<dyn Clock>,
}

impl DisconnectUseCase {
    /// 新しい DisconnectUseCase を作成
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        gateway: Arc<BroadcastGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            gateway,
            clock,
        }
    }

    /// 切断を実行（冪等）
    ///
    /// # Returns
    ///
    /// ルームから実際に外れた場合は `true`
    pub async fn execute(&self, connection: ConnectionId) -> bool {
        // 1. Repository 経由でルームから削除
        let update = self.repository.disconnect(&connection).await;

        // 2. MessagePusher から登録解除
        self.message_pusher.unregister_client(&connection).await;

        // 3. ロック解放後に通知
        match update {
            Some(update) => {
                tracing::info!(
                    "'{}' ({}) disconnected",
                    update.transition.identity,
                    connection
                );
                let now = Timestamp::new(self.clock.now_millis());
                self.gateway.announce(&update, now).await;
                true
            }
            None => {
                tracing::info!("Connection '{}' closed without joining a room", connection);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessagePushError, OutboundEvent};
    use crate::usecase::test_support::{Harness, drain, fixed_clock};

    fn usecase(harness: &Harness) -> DisconnectUseCase {
        DisconnectUseCase::new(
            harness.repository.clone(),
            harness.pusher.clone(),
            harness.gateway.clone(),
            fixed_clock(),
        )
    }

    #[tokio::test]
    async fn test_disconnect_removes_member_and_notifies() {
        // テスト項目: 切断で参加中のルームから外れ、残りの参加者に通知される
        // given (前提条件):
        let harness = Harness::new();
        let usecase = usecase(&harness);
        let (alice, _alice_rx) = harness.joined("일본", "Alice").await;
        let (_bob, mut bob_rx) = harness.joined("일본", "Bob").await;

        // when (操作):
        let removed = usecase.execute(alice).await;

        // then (期待する結果):
        assert!(removed);
        let events = drain(&mut bob_rx);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["msg"], "Alice 님이 퇴장했습니다.");
        assert_eq!(events[1]["counts"]["일본"], 1);
        assert_eq!(events[1]["lists"]["일본"], serde_json::json!(["Bob"]));
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent() {
        // テスト項目: 2 回目の切断は状態を変えず、何も通知しない
        // given (前提条件):
        let harness = Harness::new();
        let usecase = usecase(&harness);
        let (alice, _alice_rx) = harness.joined("한국", "Alice").await;
        let (_bob, mut bob_rx) = harness.joined("한국", "Bob").await;
        usecase.execute(alice).await;
        let after_first = harness.repository.snapshot().await;
        drain(&mut bob_rx);

        // when (操作):
        let removed = usecase.execute(alice).await;

        // then (期待する結果):
        assert!(!removed);
        assert_eq!(harness.repository.snapshot().await, after_first);
        assert!(drain(&mut bob_rx).is_empty());
    }

    #[tokio::test]
    async fn test_disconnect_never_joined_connection() {
        // テスト項目: 一度も参加していない接続の切断はエラーにならず、登録解除される
        // given (前提条件):
        let harness = Harness::new();
        let usecase = usecase(&harness);
        let (idle, _idle_rx) = harness.connect().await;

        // when (操作):
        let removed = usecase.execute(idle).await;

        // then (期待する結果):
        assert!(!removed);
        let push = harness
            .pusher
            .push_to(
                &idle,
                &OutboundEvent::AuthRequired {
                    msg: "x".to_string(),
                },
            )
            .await;
        assert!(matches!(push, Err(MessagePushError::ClientNotFound(_))));
    }
}
