//! Conversion logic between DTOs and domain entities.

use madang_shared::time::{timestamp_to_kst_clock_time, timestamp_to_kst_rfc3339};

use crate::domain::{ChatMessage, NoticeKind, OutboundEvent, PresenceSnapshot, RoomOccupancy};
use crate::infrastructure::dto::{http, websocket as dto};

/// Sender name used for presence notices
pub const SYSTEM_USER: &str = "SYSTEM";

fn notice_text(kind: NoticeKind, identity: &str) -> String {
    match kind {
        NoticeKind::Entered => format!("{} 님이 입장했습니다.", identity),
        NoticeKind::Left => format!("{} 님이 퇴장했습니다.", identity),
    }
}

// ========================================
// Domain Entity → WebSocket DTO
// ========================================

impl From<&ChatMessage> for dto::ReceiveMessage {
    fn from(model: &ChatMessage) -> Self {
        Self {
            r#type: dto::MessageType::ReceiveMessage,
            user: model.author.as_str().to_string(),
            msg: model.text.as_str().to_string(),
            time: timestamp_to_kst_clock_time(model.timestamp.value()),
        }
    }
}

impl From<&PresenceSnapshot> for dto::RoomUsersUpdate {
    fn from(model: &PresenceSnapshot) -> Self {
        Self {
            r#type: dto::MessageType::RoomUsersUpdate,
            counts: model
                .rooms
                .iter()
                .map(|r| (r.room.as_str().to_string(), r.count()))
                .collect(),
            lists: model
                .rooms
                .iter()
                .map(|r| {
                    (
                        r.room.as_str().to_string(),
                        r.members.iter().map(|m| m.as_str().to_string()).collect(),
                    )
                })
                .collect(),
        }
    }
}

/// Encode an outbound event as a JSON text frame
pub fn encode_event(event: &OutboundEvent) -> Result<String, serde_json::Error> {
    match event {
        OutboundEvent::Message(message) => {
            serde_json::to_string(&dto::ReceiveMessage::from(message))
        }
        OutboundEvent::Notice {
            kind,
            identity,
            timestamp,
        } => serde_json::to_string(&dto::ReceiveMessage {
            r#type: dto::MessageType::ReceiveMessage,
            user: SYSTEM_USER.to_string(),
            msg: notice_text(*kind, identity.as_str()),
            time: timestamp_to_kst_clock_time(timestamp.value()),
        }),
        OutboundEvent::PresenceUpdate(snapshot) => {
            serde_json::to_string(&dto::RoomUsersUpdate::from(snapshot))
        }
        OutboundEvent::AuthRequired { msg } => serde_json::to_string(&dto::AuthRequired {
            r#type: dto::MessageType::AuthRequired,
            msg: msg.clone(),
        }),
    }
}

// ========================================
// Domain Entity → HTTP DTO
// ========================================

impl From<&RoomOccupancy> for http::RoomSummaryDto {
    fn from(model: &RoomOccupancy) -> Self {
        Self {
            name: model.room.as_str().to_string(),
            count: model.count(),
            members: model.members.iter().map(|m| m.as_str().to_string()).collect(),
        }
    }
}

impl From<ChatMessage> for http::MessageDto {
    fn from(model: ChatMessage) -> Self {
        Self {
            user: model.author.into_string(),
            msg: model.text.into_string(),
            time: timestamp_to_kst_rfc3339(model.timestamp.value()),
        }
    }
}
