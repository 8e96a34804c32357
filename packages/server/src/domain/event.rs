//! Events pushed from the server to connections.

use super::{
    Nickname, Timestamp,
    entity::{ChatMessage, PresenceSnapshot},
};

/// Kind of a system presence notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Entered,
    Left,
}

/// An outbound event, independent of its wire encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// A relayed chat message
    Message(ChatMessage),
    /// "<identity> entered/left", scoped to one room
    Notice {
        kind: NoticeKind,
        identity: Nickname,
        timestamp: Timestamp,
    },
    /// Counts and member lists of all rooms
    PresenceUpdate(PresenceSnapshot),
    /// Sent only to a connection that needs an authenticated identity
    AuthRequired { msg: String },
}

impl OutboundEvent {
    pub fn entered(identity: Nickname, timestamp: Timestamp) -> Self {
        Self::Notice {
            kind: NoticeKind::Entered,
            identity,
            timestamp,
        }
    }

    pub fn left(identity: Nickname, timestamp: Timestamp) -> Self {
        Self::Notice {
            kind: NoticeKind::Left,
            identity,
            timestamp,
        }
    }
}
