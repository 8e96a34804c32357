//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::{
        http::{MessageDto, RoomSummaryDto},
        websocket::RoomUsersUpdate,
    },
    ui::state::AppState,
    usecase::GetRoomMessagesError,
};

/// Debug endpoint: the current `room_users_update` payload
pub async fn debug_presence(State(state): State<Arc<AppState>>) -> Json<RoomUsersUpdate> {
    let snapshot = state.get_presence_usecase.execute().await;
    Json(RoomUsersUpdate::from(&snapshot))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms with their members, in configured order
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let snapshot = state.get_presence_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(snapshot.rooms.iter().map(RoomSummaryDto::from).collect())
}

/// Get message history of a room
pub async fn get_room_messages(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<Vec<MessageDto>>, StatusCode> {
    match state.get_room_messages_usecase.execute(&room).await {
        Ok(messages) => Ok(Json(messages.into_iter().map(MessageDto::from).collect())),
        Err(GetRoomMessagesError::RoomNotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(GetRoomMessagesError::Repository(e)) => {
            tracing::error!("Failed to read history of room '{}': {}", room, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
