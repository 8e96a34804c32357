//! Core domain models for the presence coordinator.

use serde::{Deserialize, Serialize};

use super::value_object::{MessageText, Nickname, RoomName, Timestamp};

/// Registry entry: what a joined connection currently is and where it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Display identity resolved at join time
    pub identity: Nickname,
    /// The single room the connection currently belongs to
    pub room: RoomName,
}

/// One side of a membership change: who entered or left which room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomPresence {
    pub room: RoomName,
    pub identity: Nickname,
}

/// Result of a Join / Leave / Disconnect on the lobby.
///
/// A switch carries both a departure and an arrival. A duplicate join
/// carries neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceTransition {
    /// Identity recorded for the connection after the change
    pub identity: Nickname,
    pub departed: Option<RoomPresence>,
    pub arrived: Option<RoomPresence>,
}

impl PresenceTransition {
    /// Whether membership actually changed.
    pub fn is_membership_change(&self) -> bool {
        self.departed.is_some() || self.arrived.is_some()
    }
}

/// Members of one room at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomOccupancy {
    pub room: RoomName,
    /// Identities in join order; duplicates are kept (one per connection)
    pub members: Vec<Nickname>,
}

impl RoomOccupancy {
    pub fn count(&self) -> usize {
        self.members.len()
    }
}

/// Counts and member lists of every configured room at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PresenceSnapshot {
    /// One entry per configured room, in catalog order
    pub rooms: Vec<RoomOccupancy>,
}

impl PresenceSnapshot {
    /// Find the occupancy of a room by name
    pub fn room(&self, name: &str) -> Option<&RoomOccupancy> {
        self.rooms.iter().find(|r| r.room.as_str() == name)
    }

    /// Number of connections in a room (`None` if the room is not configured)
    pub fn count(&self, name: &str) -> Option<usize> {
        self.room(name).map(RoomOccupancy::count)
    }

    /// Member identities of a room (`None` if the room is not configured)
    pub fn members(&self, name: &str) -> Option<&[Nickname]> {
        self.room(name).map(|r| r.members.as_slice())
    }

    /// Number of joined connections across all rooms
    pub fn total(&self) -> usize {
        self.rooms.iter().map(RoomOccupancy::count).sum()
    }
}

/// A transition together with the snapshot taken under the same lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceUpdate {
    pub transition: PresenceTransition,
    pub snapshot: PresenceSnapshot,
}

/// Represents a chat message in the domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Room the message was sent to
    pub room: RoomName,
    /// Sender's resolved identity
    pub author: Nickname,
    /// Message text
    pub text: MessageText,
    /// Timestamp when the message was accepted
    pub timestamp: Timestamp,
}

impl ChatMessage {
    /// Create a new chat message
    pub fn new(room: RoomName, author: Nickname, text: MessageText, timestamp: Timestamp) -> Self {
        Self {
            room,
            author,
            text,
            timestamp,
        }
    }
}
