//! Domain layer for the presence and broadcast coordinator.
//!
//! This module contains the presence state and business rules, independent
//! of data transfer objects (DTOs) and infrastructure concerns.

pub mod catalog;
pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod identity;
pub mod lobby;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use catalog::RoomCatalog;
pub use entity::{
    ChatMessage, PresenceSnapshot, PresenceTransition, PresenceUpdate, RegistryEntry,
    RoomOccupancy, RoomPresence,
};
pub use error::{
    CatalogError, LobbyError, MessageLogError, MessagePushError, RepositoryError,
    ValueObjectError,
};
pub use event::{NoticeKind, OutboundEvent};
pub use factory::ConnectionIdFactory;
pub use identity::{AuthPolicy, IdentityProvider};
pub use lobby::Lobby;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{MessageLog, PresenceRepository};
pub use value_object::{
    ConnectionId, MessageText, Nickname, RoomName, SessionContext, Timestamp,
};
