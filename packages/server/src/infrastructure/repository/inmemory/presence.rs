//! InMemory Presence Repository 実装
//!
//! ドメイン層が定義する PresenceRepository trait の具体的な実装。
//! `Lobby` を単一の Mutex で保護し、全ての変更をこのロック区間内で行います。
//!
//! ロック区間ではメモリ上の状態変更とスナップショット取得のみを行い、
//! I/O（ID 解決、永続化、ブロードキャスト）はロック解放後に呼び出し側が行います。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Lobby, Nickname, PresenceRepository, PresenceSnapshot, PresenceTransition,
    PresenceUpdate, RepositoryError, RoomName,
};

/// インメモリ Presence Repository 実装
pub struct InMemoryPresenceRepository {
    /// Registry と Membership Index
    lobby: Arc<Mutex<Lobby>>,
}

impl InMemoryPresenceRepository {
    /// 新しい InMemoryPresenceRepository を作成
    pub fn new(lobby: Arc<Mutex<Lobby>>) -> Self {
        Self { lobby }
    }

    fn settle(lobby: &Lobby, transition: PresenceTransition) -> PresenceUpdate {
        debug_assert!(lobby.is_consistent(), "registry and membership diverged");
        PresenceUpdate {
            transition,
            snapshot: lobby.snapshot(),
        }
    }
}

#[async_trait]
impl PresenceRepository for InMemoryPresenceRepository {
    async fn join(
        &self,
        connection: ConnectionId,
        room: RoomName,
        identity: Nickname,
    ) -> Result<PresenceUpdate, RepositoryError> {
        let mut lobby = self.lobby.lock().await;
        let transition = lobby.join(connection, room, identity)?;
        Ok(Self::settle(&lobby, transition))
    }

    async fn leave(&self, connection: &ConnectionId, room: &RoomName) -> Option<PresenceUpdate> {
        let mut lobby = self.lobby.lock().await;
        let transition = lobby.leave(connection, room)?;
        Some(Self::settle(&lobby, transition))
    }

    async fn disconnect(&self, connection: &ConnectionId) -> Option<PresenceUpdate> {
        let mut lobby = self.lobby.lock().await;
        let transition = lobby.disconnect(connection)?;
        Some(Self::settle(&lobby, transition))
    }

    async fn members_of(&self, room: &RoomName) -> Vec<ConnectionId> {
        self.lobby.lock().await.members_of(room)
    }

    async fn all_members(&self) -> Vec<ConnectionId> {
        self.lobby.lock().await.all_members()
    }

    async fn current_room(&self, connection: &ConnectionId) -> Option<RoomName> {
        let lobby = self.lobby.lock().await;
        lobby.entry(connection).map(|entry| entry.room.clone())
    }

    async fn snapshot(&self) -> PresenceSnapshot {
        self.lobby.lock().await.snapshot()
    }
}
