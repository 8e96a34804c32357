//! UseCase layer error definitions.

use thiserror::Error;

use crate::domain::{LobbyError, RepositoryError};

/// Errors when resolving the identity behind a connection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Authentication is required and the session carries no identity
    #[error("Authentication is required")]
    Unauthorized,
}

/// Errors during JoinRoomUseCase execution
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// The room is outside the configured room set
    #[error("Room '{0}' is not a configured room")]
    InvalidRoom(String),

    /// No identity where one is required; the connection must be closed
    #[error("Authentication is required to join a room")]
    Unauthorized,
}

impl From<IdentityError> for JoinError {
    fn from(error: IdentityError) -> Self {
        match error {
            IdentityError::Unauthorized => JoinError::Unauthorized,
        }
    }
}

impl From<LobbyError> for JoinError {
    fn from(error: LobbyError) -> Self {
        match error {
            LobbyError::UnknownRoom(room) => JoinError::InvalidRoom(room),
        }
    }
}

impl From<RepositoryError> for JoinError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::RoomNotFound(room) => JoinError::InvalidRoom(room),
        }
    }
}

/// Errors during SendMessageUseCase execution
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// The room is outside the configured room set
    #[error("Room '{0}' is not a configured room")]
    InvalidRoom(String),

    /// No identity where one is required; the message was dropped
    #[error("Authentication is required to send messages")]
    Unauthorized,
}

impl From<IdentityError> for SendMessageError {
    fn from(error: IdentityError) -> Self {
        match error {
            IdentityError::Unauthorized => SendMessageError::Unauthorized,
        }
    }
}

impl From<LobbyError> for SendMessageError {
    fn from(error: LobbyError) -> Self {
        match error {
            LobbyError::UnknownRoom(room) => SendMessageError::InvalidRoom(room),
        }
    }
}

/// Errors during GetRoomMessagesUseCase execution
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GetRoomMessagesError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    #[error("Message log error: {0}")]
    Repository(String),
}
