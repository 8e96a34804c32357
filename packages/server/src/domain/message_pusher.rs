//! MessagePusher trait 定義
//!
//! 接続ごとの送信チャンネルへイベントを届けるインターフェース。
//! エンコード方式（JSON など）は実装側が決める。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, error::MessagePushError, event::OutboundEvent};

/// Outbound channel of one connection (drained by its socket writer)
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_client(&self, connection: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを登録解除（未登録でも何もしない）
    async fn unregister_client(&self, connection: &ConnectionId);

    /// 特定の接続にイベントを送信
    async fn push_to(
        &self,
        connection: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続にイベントを送信
    ///
    /// 一部の接続への送信失敗は他の接続への送信を妨げない。
    /// 戻り値は実際に送信できた接続の数。
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &OutboundEvent,
    ) -> Result<usize, MessagePushError>;
}
