//! UseCase: ルームのメッセージ履歴取得処理

use std::sync::Arc;

use crate::domain::{ChatMessage, MessageLog, RoomCatalog, RoomName};

use super::error::GetRoomMessagesError;

/// ルームのメッセージ履歴を取得するユースケース
pub struct GetRoomMessagesUseCase {
    catalog: RoomCatalog,
    /// MessageLog（永続化の抽象化）
    message_log: Arc<dyn MessageLog>,
}

impl GetRoomMessagesUseCase {
    /// 新しい GetRoomMessagesUseCase を作成
    pub fn new(catalog: RoomCatalog, message_log: Arc<dyn MessageLog>) -> Self {
        Self {
            catalog,
            message_log,
        }
    }

    /// メッセージ履歴を取得
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ChatMessage>)` - 追記順のメッセージ
    /// * `Err(GetRoomMessagesError::RoomNotFound)` - 未設定のルーム
    /// * `Err(GetRoomMessagesError::Repository)` - MessageLog のエラー
    pub async fn execute(&self, room: &str) -> Result<Vec<ChatMessage>, GetRoomMessagesError> {
        let room = RoomName::new(room.to_string())
            .ok()
            .filter(|room| self.catalog.contains(room))
            .ok_or_else(|| GetRoomMessagesError::RoomNotFound(room.to_string()))?;

        self.message_log
            .history(&room)
            .await
            .map_err(|e| GetRoomMessagesError::Repository(e.to_string()))
    }
}
