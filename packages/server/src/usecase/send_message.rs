//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージの永続化とルームへのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 空メッセージが黙って破棄されることを保証
//! - 未認証の送信が auth_required のみを送信者に返し、永続化も配信もされないことを確認
//! - 永続化に失敗してもメッセージが配信されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト
//! - 異常系：未認証、未設定のルーム、永続化の失敗
//! - エッジケース：空白のみのメッセージ

use std::sync::Arc;

use madang_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, MessageLog, MessageText, OutboundEvent, RoomCatalog,
    SessionContext, Timestamp, ValueObjectError,
};

use super::{BroadcastGateway, IdentityResolver, error::SendMessageError};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    catalog: RoomCatalog,
    /// MessageLog（永続化の抽象化）
    message_log: Arc<dyn MessageLog>,
    identity: Arc<IdentityResolver>,
    gateway: Arc<BroadcastGateway>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        catalog: RoomCatalog,
        message_log: Arc<dyn MessageLog>,
        identity: Arc<IdentityResolver>,
        gateway: Arc<BroadcastGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            message_log,
            identity,
            gateway,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// 送信者がそのルームに参加している必要はない。
    ///
    /// # Arguments
    ///
    /// * `connection` - 送信元の接続
    /// * `session` - 接続時に提示されたセッション
    /// * `room` - 送信先のルーム名（省略時はデフォルトルーム）
    /// * `text` - メッセージ本文
    /// * `claimed` - クライアントが名乗った名前
    ///
    /// # Returns
    ///
    /// * `Ok(Some(ChatMessage))` - 配信したメッセージ
    /// * `Ok(None)` - 空メッセージのため破棄
    /// * `Err(SendMessageError)` - 未認証または未設定のルーム
    pub async fn execute(
        &self,
        connection: ConnectionId,
        session: &SessionContext,
        room: Option<&str>,
        text: Option<&str>,
        claimed: Option<&str>,
    ) -> Result<Option<ChatMessage>, SendMessageError> {
        // 1. 本文の検証（空メッセージはエラーにせず破棄）
        let text = match MessageText::new(text.unwrap_or_default().to_string()) {
            Ok(text) => text,
            Err(ValueObjectError::MessageTextEmpty) => {
                tracing::debug!("Dropping empty message from connection '{}'", connection);
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!("Dropping message from connection '{}': {}", connection, e);
                return Ok(None);
            }
        };

        // 2. Identity を解決
        let author = match self.identity.resolve(session, claimed).await {
            Ok(author) => author,
            Err(e) => {
                tracing::warn!(
                    "Connection '{}' tried to send a message without authentication",
                    connection
                );
                self.gateway.reject_unauthorized(&connection).await;
                return Err(e.into());
            }
        };

        // 3. ルームを解決
        let room = self.catalog.resolve(room)?;

        let message = ChatMessage::new(
            room,
            author,
            text,
            Timestamp::new(self.clock.now_millis()),
        );

        // 4. 永続化（失敗しても配信は続ける）
        if let Err(e) = self.message_log.append(message.clone()).await {
            tracing::warn!(
                "Failed to persist message from '{}' in room '{}': {}",
                message.author,
                message.room,
                e
            );
        }

        // 5. ルームにブロードキャスト
        let delivered = self
            .gateway
            .emit_to_room(&message.room, &OutboundEvent::Message(message.clone()))
            .await;
        tracing::info!(
            "Relayed message from '{}' to room '{}' ({} recipient(s))",
            message.author,
            message.room,
            delivered
        );

        Ok(Some(message))
    }
}
