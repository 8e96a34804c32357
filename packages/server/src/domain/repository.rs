//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    ConnectionId, Nickname, RoomName,
    entity::{ChatMessage, PresenceSnapshot, PresenceUpdate},
    error::{MessageLogError, RepositoryError},
};

/// Presence Repository trait
///
/// Registry と Membership Index の唯一の所有者。
/// 状態を変更する操作は、変更と同じロック区間で取得したスナップショットを返す。
///
/// ## 依存性の逆転（DIP）
///
/// - UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない
#[async_trait]
pub trait PresenceRepository: Send + Sync {
    /// 参加（別ルームに参加中なら移動）
    async fn join(
        &self,
        connection: ConnectionId,
        room: RoomName,
        identity: Nickname,
    ) -> Result<PresenceUpdate, RepositoryError>;

    /// 退室（現在のルームと一致する場合のみ）
    async fn leave(&self, connection: &ConnectionId, room: &RoomName) -> Option<PresenceUpdate>;

    /// 切断（冪等）
    async fn disconnect(&self, connection: &ConnectionId) -> Option<PresenceUpdate>;

    /// ルームに参加中の接続を取得
    async fn members_of(&self, room: &RoomName) -> Vec<ConnectionId>;

    /// いずれかのルームに参加中の全ての接続を取得
    async fn all_members(&self) -> Vec<ConnectionId>;

    /// 接続の現在のルームを取得
    async fn current_room(&self, connection: &ConnectionId) -> Option<RoomName>;

    /// 全ルームの人数とメンバーを取得
    async fn snapshot(&self) -> PresenceSnapshot;
}

/// Message Log trait
///
/// チャットメッセージの追記専用ログ（永続化の外部コラボレーター）。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageLog: Send + Sync {
    /// メッセージを追記
    async fn append(&self, message: ChatMessage) -> Result<(), MessageLogError>;

    /// ルームのメッセージ履歴を追記順に取得
    async fn history(&self, room: &RoomName) -> Result<Vec<ChatMessage>, MessageLogError>;
}
