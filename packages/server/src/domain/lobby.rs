//! Lobby: the connection registry and room membership index.
//!
//! Both sides of the relation live in one owned value so that every
//! mutation updates them together:
//!
//! ```text
//! registry[c].room == r  <=>  c ∈ membership[r]
//! ```
//!
//! A connection is in at most one room. A connection that has never
//! joined (or has left) has no registry entry.

use std::collections::{BTreeMap, HashMap};

use super::{
    ConnectionId, Nickname, RoomCatalog, RoomName,
    entity::{
        PresenceSnapshot, PresenceTransition, RegistryEntry, RoomOccupancy, RoomPresence,
    },
    error::LobbyError,
};

/// Presence state of every live connection.
#[derive(Debug, Clone)]
pub struct Lobby {
    catalog: RoomCatalog,
    registry: HashMap<ConnectionId, RegistryEntry>,
    /// Connections per room in join order
    membership: BTreeMap<RoomName, Vec<ConnectionId>>,
}

impl Lobby {
    /// Create an empty lobby with one (empty) membership set per configured room
    pub fn new(catalog: RoomCatalog) -> Self {
        let membership = catalog
            .rooms()
            .iter()
            .map(|room| (room.clone(), Vec::new()))
            .collect();
        Self {
            catalog,
            registry: HashMap::new(),
            membership,
        }
    }

    /// Join `room`, moving the connection out of its previous room if any.
    ///
    /// Joining the room the connection is already in changes nothing and
    /// returns the identity recorded at the first join.
    ///
    /// # Errors
    ///
    /// Returns `LobbyError::UnknownRoom` if `room` is not configured.
    pub fn join(
        &mut self,
        connection: ConnectionId,
        room: RoomName,
        identity: Nickname,
    ) -> Result<PresenceTransition, LobbyError> {
        if !self.membership.contains_key(&room) {
            return Err(LobbyError::UnknownRoom(room.into_string()));
        }

        if let Some(entry) = self.registry.get(&connection)
            && entry.room == room
        {
            return Ok(PresenceTransition {
                identity: entry.identity.clone(),
                departed: None,
                arrived: None,
            });
        }

        let departed = self.detach(&connection);
        self.attach(connection, room.clone(), identity.clone());

        Ok(PresenceTransition {
            identity: identity.clone(),
            departed,
            arrived: Some(RoomPresence { room, identity }),
        })
    }

    /// Leave `room`. Ignored unless `room` is the connection's current room,
    /// so a late leave for a room already switched away from is harmless.
    pub fn leave(&mut self, connection: &ConnectionId, room: &RoomName) -> Option<PresenceTransition> {
        match self.registry.get(connection) {
            Some(entry) if &entry.room == room => self.detach(connection).map(Self::departure),
            _ => None,
        }
    }

    /// Remove the connection from wherever it is. Unknown connections are a no-op.
    pub fn disconnect(&mut self, connection: &ConnectionId) -> Option<PresenceTransition> {
        self.detach(connection).map(Self::departure)
    }

    fn departure(departed: RoomPresence) -> PresenceTransition {
        PresenceTransition {
            identity: departed.identity.clone(),
            departed: Some(departed),
            arrived: None,
        }
    }

    fn attach(&mut self, connection: ConnectionId, room: RoomName, identity: Nickname) {
        self.membership
            .entry(room.clone())
            .or_default()
            .push(connection);
        self.registry
            .insert(connection, RegistryEntry { identity, room });
    }

    fn detach(&mut self, connection: &ConnectionId) -> Option<RoomPresence> {
        let entry = self.registry.remove(connection)?;
        if let Some(members) = self.membership.get_mut(&entry.room) {
            members.retain(|member| member != connection);
        }
        Some(RoomPresence {
            room: entry.room,
            identity: entry.identity,
        })
    }

    /// Registry entry of a connection, if it has joined a room
    pub fn entry(&self, connection: &ConnectionId) -> Option<&RegistryEntry> {
        self.registry.get(connection)
    }

    /// Connections currently in `room` (empty for unknown rooms)
    pub fn members_of(&self, room: &RoomName) -> Vec<ConnectionId> {
        self.membership.get(room).cloned().unwrap_or_default()
    }

    /// Connections currently in any room
    pub fn all_members(&self) -> Vec<ConnectionId> {
        self.membership.values().flatten().copied().collect()
    }

    /// Counts and member identities of every configured room, in catalog order
    pub fn snapshot(&self) -> PresenceSnapshot {
        let rooms = self
            .catalog
            .rooms()
            .iter()
            .map(|room| RoomOccupancy {
                room: room.clone(),
                members: self
                    .membership
                    .get(room)
                    .into_iter()
                    .flatten()
                    .filter_map(|connection| self.registry.get(connection))
                    .map(|entry| entry.identity.clone())
                    .collect(),
            })
            .collect();
        PresenceSnapshot { rooms }
    }

    /// Check that membership sets are disjoint, free of duplicates and in
    /// exact agreement with the registry.
    pub fn is_consistent(&self) -> bool {
        let mut seen = HashMap::new();
        for (room, members) in &self.membership {
            for connection in members {
                if seen.insert(*connection, room).is_some() {
                    return false;
                }
                match self.registry.get(connection) {
                    Some(entry) if &entry.room == room => {}
                    _ => return false,
                }
            }
        }
        seen.len() == self.registry.len()
    }
}
