//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// RoomName validation error
    #[error("RoomName cannot be empty")]
    RoomNameEmpty,

    /// RoomName too long error
    #[error("RoomName cannot exceed {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    /// Nickname validation error
    #[error("Nickname cannot be empty")]
    NicknameEmpty,

    /// Nickname too long error
    #[error("Nickname cannot exceed {max} characters (got {actual})")]
    NicknameTooLong { max: usize, actual: usize },

    /// MessageText validation error (blank after trimming)
    #[error("MessageText cannot be empty")]
    MessageTextEmpty,

    /// MessageText too long error
    #[error("MessageText cannot exceed {max} characters (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },

    /// ConnectionId invalid format error (not a valid UUID format)
    #[error("ConnectionId must be a valid UUID format (got: {0})")]
    ConnectionIdInvalidFormat(String),
}

/// Errors related to the room catalog configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("At least one room must be configured")]
    Empty,

    #[error("Room '{0}' is configured more than once")]
    DuplicateRoom(String),

    #[error("Default room '{0}' is not one of the configured rooms")]
    DefaultRoomNotConfigured(String),
}

/// Errors related to Lobby domain logic
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LobbyError {
    /// The room is outside the configured room set
    #[error("Room '{0}' is not a configured room")]
    UnknownRoom(String),
}

/// Errors returned by the presence repository
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),
}

impl From<LobbyError> for RepositoryError {
    fn from(err: LobbyError) -> Self {
        match err {
            LobbyError::UnknownRoom(room) => Self::RoomNotFound(room),
        }
    }
}

/// Errors returned by the message log (persistence collaborator)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageLogError {
    #[error("Message log is unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned by the message pusher
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("Client '{0}' is not registered")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),

    #[error("Failed to encode event: {0}")]
    EncodeFailed(String),
}
