//! WebSocket event DTOs for the chat server.
//!
//! Every frame is a JSON object tagged by `type`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outbound message type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    ReceiveMessage,
    RoomUsersUpdate,
    AuthRequired,
}

/// Chat message or system notice delivered to a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveMessage {
    pub r#type: MessageType,
    pub user: String,
    pub msg: String,
    /// Wall clock time in KST (`HH:MM:SS`)
    pub time: String,
}

/// Counts and member lists of every room, delivered to all joined connections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomUsersUpdate {
    pub r#type: MessageType,
    pub counts: BTreeMap<String, usize>,
    pub lists: BTreeMap<String, Vec<String>>,
}

/// Authentication required notice, delivered to the offending connection only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRequired {
    pub r#type: MessageType,
    pub msg: String,
}

/// Payload of `join` and `leave`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresencePayload {
    pub room: Option<String>,
    /// Nickname claimed by the client (`user` or `identity`)
    pub user: Option<String>,
}

/// Payload of `send_message`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendMessagePayload {
    pub room: Option<String>,
    /// Message text (`msg` or `text`)
    pub msg: Option<String>,
    pub user: Option<String>,
}

/// Inbound event from a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Join(PresencePayload),
    Leave(PresencePayload),
    SendMessage(SendMessagePayload),
}

/// Reasons an inbound frame is not an event
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("frame is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("frame is not a JSON object")]
    NotAnObject,

    #[error("frame has no string `type` field")]
    MissingType,

    #[error("unknown event type '{0}'")]
    UnknownType(String),
}

/// First string value among `keys`; fields of any other JSON type count as missing.
fn string_field(object: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Decode an inbound text frame.
///
/// Only the envelope is strict (a JSON object with a known `type`); payload
/// fields that are missing or malformed are left as `None` so that the
/// caller can apply defaults.
pub fn decode_client_event(text: &str) -> Result<ClientEvent, DecodeError> {
    let value: Value = serde_json::from_str(text)?;
    let object = value.as_object().ok_or(DecodeError::NotAnObject)?;
    let event_type = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingType)?;

    let room = string_field(object, &["room"]);
    let user = string_field(object, &["user", "identity"]);

    match event_type {
        "join" => Ok(ClientEvent::Join(PresencePayload { room, user })),
        "leave" => Ok(ClientEvent::Leave(PresencePayload { room, user })),
        "send_message" => Ok(ClientEvent::SendMessage(SendMessagePayload {
            room,
            msg: string_field(object, &["msg", "text"]),
            user,
        })),
        other => Err(DecodeError::UnknownType(other.to_string())),
    }
}
