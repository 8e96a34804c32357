//! UseCase テスト用のヘルパー
//!
//! 実際のインメモリ Repository と WebSocketMessagePusher（チャンネル経由）を組み合わせ、
//! 各接続が受け取った JSON を検証できるようにする。

use std::{collections::HashMap, sync::Arc};

use madang_shared::time::{Clock, FixedClock};
use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{
        AuthPolicy, ConnectionId, ConnectionIdFactory, IdentityProvider, Lobby, MessagePusher,
        Nickname, PresenceRepository, RoomCatalog, RoomName,
    },
    infrastructure::{
        auth::InMemorySessionDirectory, message_pusher::WebSocketMessagePusher,
        repository::InMemoryPresenceRepository,
    },
};

use super::{BroadcastGateway, IdentityResolver};

/// 2023-01-01 09:00:00 KST
pub const TEST_TIME: i64 = 1672498800000 + 9 * 3600 * 1000;

pub fn room(name: &str) -> RoomName {
    RoomName::new(name.to_string()).unwrap()
}

pub fn nick(name: &str) -> Nickname {
    Nickname::new(name.to_string()).unwrap()
}

pub fn catalog() -> RoomCatalog {
    RoomCatalog::with_first_as_default(
        ["한국", "일본", "중국", "미국"].into_iter().map(room).collect(),
    )
    .unwrap()
}

pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::new(TEST_TIME))
}

/// 匿名参加を許可する IdentityResolver（認証済みセッションなし）
pub fn optional_identity() -> Arc<IdentityResolver> {
    Arc::new(IdentityResolver::new(
        Arc::new(InMemorySessionDirectory::default()),
        AuthPolicy::Optional {
            anonymous_name: nick("익명"),
        },
    ))
}

/// 認証必須の IdentityResolver
pub fn required_identity(provider: Arc<dyn IdentityProvider>) -> Arc<IdentityResolver> {
    Arc::new(IdentityResolver::new(provider, AuthPolicy::Required))
}

/// 実アダプターを組み合わせたテスト環境
pub struct Harness {
    pub catalog: RoomCatalog,
    pub repository: Arc<InMemoryPresenceRepository>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub gateway: Arc<BroadcastGateway>,
}

impl Harness {
    pub fn new() -> Self {
        let catalog = catalog();
        let repository = Arc::new(InMemoryPresenceRepository::new(Arc::new(Mutex::new(
            Lobby::new(catalog.clone()),
        ))));
        let pusher = Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
            HashMap::new(),
        ))));
        let gateway = Arc::new(BroadcastGateway::new(repository.clone(), pusher.clone()));
        Self {
            catalog,
            repository,
            pusher,
            gateway,
        }
    }

    /// 接続を作成し、送信チャンネルを登録する
    pub async fn connect(&self) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let connection = ConnectionIdFactory::generate();
        self.pusher.register_client(connection, tx).await;
        (connection, rx)
    }

    /// 接続を作成し、指定のルームに参加させる（イベントは破棄）
    pub async fn joined(
        &self,
        room_name: &str,
        identity: &str,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (connection, mut rx) = self.connect().await;
        self.repository
            .join(connection, room(room_name), nick(identity))
            .await
            .unwrap();
        drain(&mut rx);
        (connection, rx)
    }
}

/// チャンネルに溜まっているイベントを全て取り出す
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<serde_json::Value> {
    let mut events = Vec::new();
    while let Ok(text) = rx.try_recv() {
        events.push(serde_json::from_str(&text).unwrap());
    }
    events
}
