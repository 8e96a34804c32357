//! Multi-room chat presence and broadcast server.
//!
//! Tracks which room each connection is in, relays chat messages to rooms
//! and pushes presence snapshots to every joined connection.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
