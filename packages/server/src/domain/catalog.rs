//! The statically configured set of chat rooms.

use super::{
    RoomName,
    error::{CatalogError, LobbyError},
};

/// Fixed set of rooms plus the room used when a client omits one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCatalog {
    rooms: Vec<RoomName>,
    default_room: RoomName,
}

impl RoomCatalog {
    /// Create a catalog. Room order is kept for listings.
    ///
    /// # Errors
    ///
    /// * `CatalogError::Empty` - no rooms given
    /// * `CatalogError::DuplicateRoom` - a room appears twice
    /// * `CatalogError::DefaultRoomNotConfigured` - the default is not in `rooms`
    pub fn new(rooms: Vec<RoomName>, default_room: RoomName) -> Result<Self, CatalogError> {
        if rooms.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, room) in rooms.iter().enumerate() {
            if rooms[..i].contains(room) {
                return Err(CatalogError::DuplicateRoom(room.as_str().to_string()));
            }
        }
        if !rooms.contains(&default_room) {
            return Err(CatalogError::DefaultRoomNotConfigured(
                default_room.into_string(),
            ));
        }
        Ok(Self {
            rooms,
            default_room,
        })
    }

    /// Create a catalog whose default room is the first room.
    pub fn with_first_as_default(rooms: Vec<RoomName>) -> Result<Self, CatalogError> {
        let default_room = rooms.first().cloned().ok_or(CatalogError::Empty)?;
        Self::new(rooms, default_room)
    }

    pub fn rooms(&self) -> &[RoomName] {
        &self.rooms
    }

    pub fn default_room(&self) -> &RoomName {
        &self.default_room
    }

    pub fn contains(&self, room: &RoomName) -> bool {
        self.rooms.contains(room)
    }

    /// Resolve a client-supplied room name.
    ///
    /// A missing or blank name resolves to the default room.
    ///
    /// # Errors
    ///
    /// Returns `LobbyError::UnknownRoom` when the name is outside the catalog.
    pub fn resolve(&self, requested: Option<&str>) -> Result<RoomName, LobbyError> {
        let Some(requested) = requested.map(str::trim).filter(|r| !r.is_empty()) else {
            return Ok(self.default_room.clone());
        };
        self.rooms
            .iter()
            .find(|room| room.as_str() == requested)
            .cloned()
            .ok_or_else(|| LobbyError::UnknownRoom(requested.to_string()))
    }
}
