//! Request handlers.

mod http;
mod websocket;

pub use http::{debug_presence, get_room_messages, get_rooms, health_check};
pub use websocket::websocket_handler;
