//! UseCase: 接続開始処理
//!
//! 接続 ID を払い出し、送信チャンネルを MessagePusher に登録する。
//! ルームへの参加は `join` イベントで行うため、Registry には何も登録しない。

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionIdFactory, MessagePusher, PusherChannel};

/// 接続開始のユースケース
pub struct OpenConnectionUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl OpenConnectionUseCase {
    /// 新しい OpenConnectionUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続開始を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - 接続へのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// 新しい接続の ID
    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let connection = ConnectionIdFactory::generate();
        self.message_pusher.register_client(connection, sender).await;
        tracing::info!("Connection '{}' opened", connection);
        connection
    }
}
