//! Server configuration.
//!
//! Command-line arguments are converted into a `ServerConfig`, which is
//! validated into domain values when the application state is built.

use thiserror::Error;

use crate::domain::{AuthPolicy, CatalogError, Nickname, RoomCatalog, RoomName, ValueObjectError};

/// Rooms served when none are configured
pub const DEFAULT_ROOMS: [&str; 4] = ["한국", "일본", "중국", "미국"];

/// Display name of unauthenticated connections that claim no nickname
pub const DEFAULT_ANONYMOUS_NAME: &str = "익명";

/// Errors in the server configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid room name '{name}': {source}")]
    InvalidRoomName {
        name: String,
        source: ValueObjectError,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Invalid anonymous name '{name}': {source}")]
    InvalidAnonymousName {
        name: String,
        source: ValueObjectError,
    },

    #[error("Session entry must be TOKEN=NICKNAME (got '{0}')")]
    MalformedSession(String),

    #[error("Invalid nickname for session '{token}': {source}")]
    InvalidSessionNickname {
        token: String,
        source: ValueObjectError,
    },
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Configured rooms in display order
    pub rooms: Vec<String>,
    /// Room used when a client omits one (first room when `None`)
    pub default_room: Option<String>,
    /// Reject connections without an authenticated identity
    pub require_auth: bool,
    pub anonymous_name: String,
    /// `(token, nickname)` pairs seeding the session directory
    pub sessions: Vec<(String, String)>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            rooms: DEFAULT_ROOMS.iter().map(|room| room.to_string()).collect(),
            default_room: None,
            require_auth: false,
            anonymous_name: DEFAULT_ANONYMOUS_NAME.to_string(),
            sessions: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Build the room catalog.
    ///
    /// # Errors
    ///
    /// * `ConfigError::InvalidRoomName` - a room name is blank or too long
    /// * `ConfigError::Catalog` - no rooms, a duplicate room, or an unknown default room
    pub fn room_catalog(&self) -> Result<RoomCatalog, ConfigError> {
        let rooms = self
            .rooms
            .iter()
            .map(|name| parse_room(name))
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = match &self.default_room {
            Some(default_room) => RoomCatalog::new(rooms, parse_room(default_room)?)?,
            None => RoomCatalog::with_first_as_default(rooms)?,
        };
        Ok(catalog)
    }

    /// Build the authentication policy.
    pub fn auth_policy(&self) -> Result<AuthPolicy, ConfigError> {
        if self.require_auth {
            return Ok(AuthPolicy::Required);
        }
        let anonymous_name = Nickname::new(self.anonymous_name.clone()).map_err(|source| {
            ConfigError::InvalidAnonymousName {
                name: self.anonymous_name.clone(),
                source,
            }
        })?;
        Ok(AuthPolicy::Optional { anonymous_name })
    }

    /// Validate the seeded sessions.
    pub fn session_entries(&self) -> Result<Vec<(String, Nickname)>, ConfigError> {
        self.sessions
            .iter()
            .map(|(token, nickname)| {
                Nickname::new(nickname.clone())
                    .map(|nickname| (token.clone(), nickname))
                    .map_err(|source| ConfigError::InvalidSessionNickname {
                        token: token.clone(),
                        source,
                    })
            })
            .collect()
    }
}

fn parse_room(name: &str) -> Result<RoomName, ConfigError> {
    RoomName::new(name.to_string()).map_err(|source| ConfigError::InvalidRoomName {
        name: name.to_string(),
        source,
    })
}

/// Parse a `TOKEN=NICKNAME` session entry.
pub fn parse_session_entry(entry: &str) -> Result<(String, String), ConfigError> {
    match entry.split_once('=') {
        Some((token, nickname)) if !token.trim().is_empty() && !nickname.trim().is_empty() => {
            Ok((token.trim().to_string(), nickname.trim().to_string()))
        }
        _ => Err(ConfigError::MalformedSession(entry.to_string())),
    }
}
