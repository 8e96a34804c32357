//! InMemory MessageLog 実装
//!
//! ルームごとの追記専用リスト。削除・更新は行わず、保持期間もない。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageLog, MessageLogError, RoomName};

/// インメモリ MessageLog 実装
#[derive(Default)]
pub struct InMemoryMessageLog {
    rooms: Mutex<HashMap<RoomName, Vec<ChatMessage>>>,
}

impl InMemoryMessageLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageLog for InMemoryMessageLog {
    async fn append(&self, message: ChatMessage) -> Result<(), MessageLogError> {
        let mut rooms = self.rooms.lock().await;
        tracing::debug!(
            "Appending message from '{}' to room '{}'",
            message.author,
            message.room
        );
        rooms.entry(message.room.clone()).or_default().push(message);
        Ok(())
    }

    async fn history(&self, room: &RoomName) -> Result<Vec<ChatMessage>, MessageLogError> {
        let rooms = self.rooms.lock().await;
        Ok(rooms.get(room).cloned().unwrap_or_default())
    }
}
