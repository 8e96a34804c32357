//! HTTP API response DTOs for the chat server.

use serde::{Deserialize, Serialize};

/// Room summary for the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    pub count: usize,
    pub members: Vec<String>,
}

/// One message of a room's history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub user: String,
    pub msg: String,
    pub time: String, // ISO 8601
}
