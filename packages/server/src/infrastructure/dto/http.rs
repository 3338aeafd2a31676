//! HTTP API request and response DTOs.

use serde::{Deserialize, Serialize};

pub use super::websocket::MessageDto;

/// Live presence of a room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomPresenceDto {
    pub id: String,
    /// Number of admitted connections
    pub connections: usize,
    /// Distinct users behind those connections, sorted
    pub users: Vec<String>,
}

/// Query parameters for the history endpoint
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// Development login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub token_type: String,
}
