//! Application state: use cases wired to their adapters.

use std::{collections::HashMap, sync::Arc};

use madang_shared::time::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::{
    config::{ConfigError, ServerConfig},
    domain::Lobby,
    infrastructure::{
        auth::InMemorySessionDirectory, message_log::InMemoryMessageLog,
        message_pusher::WebSocketMessagePusher, repository::InMemoryPresenceRepository,
    },
    usecase::{
        BroadcastGateway, DisconnectUseCase, GetPresenceUseCase, GetRoomMessagesUseCase,
        IdentityResolver, JoinRoomUseCase, LeaveRoomUseCase, OpenConnectionUseCase,
        SendMessageUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// OpenConnectionUseCase（接続開始のユースケース）
    pub open_connection_usecase: Arc<OpenConnectionUseCase>,
    /// JoinRoomUseCase（ルーム参加・移動のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（ルーム退室のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// DisconnectUseCase（切断のユースケース）
    pub disconnect_usecase: Arc<DisconnectUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// GetPresenceUseCase（プレゼンス取得のユースケース）
    pub get_presence_usecase: Arc<GetPresenceUseCase>,
    /// GetRoomMessagesUseCase（メッセージ履歴取得のユースケース）
    pub get_room_messages_usecase: Arc<GetRoomMessagesUseCase>,
}

impl AppState {
    /// Wire the in-memory adapters and use cases for `config`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the rooms, auth policy or sessions are invalid.
    pub fn from_config(config: &ServerConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Same as [`AppState::from_config`] with an explicit clock.
    pub fn with_clock(config: &ServerConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        let catalog = config.room_catalog()?;
        let policy = config.auth_policy()?;
        let sessions = config.session_entries()?;

        // Initialize dependencies in order:
        // 1. Repository / MessageLog / IdentityProvider
        // 2. MessagePusher
        // 3. Gateway / IdentityResolver
        // 4. UseCases

        // 1. Create Repository (in-memory presence state)
        let lobby = Arc::new(Mutex::new(Lobby::new(catalog.clone())));
        let repository = Arc::new(InMemoryPresenceRepository::new(lobby));
        let message_log = Arc::new(InMemoryMessageLog::new());
        let sessions = Arc::new(InMemorySessionDirectory::new(sessions));

        // 2. Create MessagePusher (WebSocket implementation)
        let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
        let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients));

        // 3. Create Gateway and IdentityResolver
        let gateway = Arc::new(BroadcastGateway::new(
            repository.clone(),
            message_pusher.clone(),
        ));
        let identity = Arc::new(IdentityResolver::new(sessions, policy));

        // 4. Create UseCases
        tracing::info!(
            "Serving rooms {:?} (default '{}')",
            catalog.rooms().iter().map(|r| r.as_str()).collect::<Vec<_>>(),
            catalog.default_room()
        );
        Ok(Self {
            open_connection_usecase: Arc::new(OpenConnectionUseCase::new(message_pusher.clone())),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(
                catalog.clone(),
                repository.clone(),
                identity.clone(),
                gateway.clone(),
                clock.clone(),
            )),
            leave_room_usecase: Arc::new(LeaveRoomUseCase::new(
                catalog.clone(),
                repository.clone(),
                gateway.clone(),
                clock.clone(),
            )),
            disconnect_usecase: Arc::new(DisconnectUseCase::new(
                repository.clone(),
                message_pusher,
                gateway.clone(),
                clock.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                catalog.clone(),
                message_log.clone(),
                identity,
                gateway,
                clock,
            )),
            get_presence_usecase: Arc::new(GetPresenceUseCase::new(repository)),
            get_room_messages_usecase: Arc::new(GetRoomMessagesUseCase::new(
                catalog,
                message_log,
            )),
        })
    }
}
