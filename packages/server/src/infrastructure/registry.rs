//! In-memory room registry.
//!
//! Maps each room to the connections currently admitted to it and fans
//! envelopes out to them. Each connection is represented by the sending half
//! of a bounded channel; the owning session drains the other half into its
//! socket. Delivery never waits: a connection whose queue is full or closed
//! is evicted, so a slow client never blocks a broadcast.
//!
//! Lock order is `rooms` before `members`. `fanout` is only ever taken
//! without `rooms` held.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{
    Mutex,
    mpsc::{self, Receiver, Sender, error::TrySendError},
};

use crate::{
    domain::{ConnectionId, RoomId, Timestamp, UserId},
    infrastructure::dto::websocket::ServerEvent,
};

/// Handle to one live connection
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ConnectionId,
    pub user_id: UserId,
    /// Outbound frame channel, drained by the owning session
    pub sender: Sender<String>,
    pub connected_at: Timestamp,
}

impl Connection {
    pub fn new(id: ConnectionId, user_id: UserId, sender: Sender<String>) -> Self {
        Self {
            id,
            user_id,
            sender,
            connected_at: Timestamp::now(),
        }
    }
}

/// Frames a connection may have queued before it is considered stalled
pub const OUTBOUND_CAPACITY: usize = 256;

/// Outbound queue of one connection
pub fn outbound_channel() -> (Sender<String>, Receiver<String>) {
    mpsc::channel(OUTBOUND_CAPACITY)
}

#[derive(Default)]
struct RoomSlot {
    members: Mutex<HashMap<ConnectionId, Connection>>,
    /// Serializes broadcasts so every member sees the same order
    fanout: Mutex<()>,
}

/// Room id → live connection set
#[derive(Default)]
pub struct RoomRegistry {
    rooms: Mutex<HashMap<RoomId, Arc<RoomSlot>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to a room, creating the room's set if absent.
    pub async fn admit(&self, room_id: RoomId, connection: Connection) {
        let mut rooms = self.rooms.lock().await;
        let slot = rooms.entry(room_id.clone()).or_default().clone();
        let mut members = slot.members.lock().await;
        tracing::info!(
            "Admitted connection {} of '{}' to room '{}'",
            connection.id,
            connection.user_id,
            room_id
        );
        members.insert(connection.id, connection);
    }

    /// Remove a connection from a room.
    ///
    /// Returns `false` if it was not a member; that is not an error. Empty
    /// rooms are pruned.
    pub async fn evict(&self, room_id: &RoomId, connection_id: &ConnectionId) -> bool {
        let mut rooms = self.rooms.lock().await;
        let Some(slot) = rooms.get(room_id).cloned() else {
            return false;
        };
        let mut members = slot.members.lock().await;
        let removed = members.remove(connection_id).is_some();
        if members.is_empty() {
            drop(members);
            rooms.remove(room_id);
        }
        if removed {
            tracing::info!("Evicted connection {} from room '{}'", connection_id, room_id);
        }
        removed
    }

    /// Deliver `event` to every connection of the room.
    ///
    /// Membership is snapshotted under the lock and delivery happens outside
    /// it. A connection whose queue is closed or full is evicted; the others still
    /// receive the event. Returns the number of successful deliveries.
    pub async fn broadcast(&self, room_id: &RoomId, event: &ServerEvent) -> usize {
        let json = match event.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize envelope for room '{}': {}", room_id, e);
                return 0;
            }
        };

        let slot = self.rooms.lock().await.get(room_id).cloned();
        let Some(slot) = slot else {
            return 0;
        };

        let (delivered, failed) = {
            let _order = slot.fanout.lock().await;
            let targets: Vec<Connection> = slot.members.lock().await.values().cloned().collect();

            let mut failed = Vec::new();
            for connection in &targets {
                match connection.sender.try_send(json.clone()) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        tracing::warn!(
                            "Outbound queue of connection {} of '{}' is full",
                            connection.id,
                            connection.user_id
                        );
                        failed.push(connection.id);
                    }
                    Err(TrySendError::Closed(_)) => {
                        tracing::warn!(
                            "Failed to deliver to connection {} of '{}'",
                            connection.id,
                            connection.user_id
                        );
                        failed.push(connection.id);
                    }
                }
            }
            (targets.len() - failed.len(), failed)
        };

        for connection_id in failed {
            self.evict(room_id, &connection_id).await;
        }
        delivered
    }

    /// Number of connections admitted to the room
    pub async fn connection_count(&self, room_id: &RoomId) -> usize {
        let slot = self.rooms.lock().await.get(room_id).cloned();
        match slot {
            Some(slot) => slot.members.lock().await.len(),
            None => 0,
        }
    }

    /// Distinct users connected to the room, sorted
    pub async fn users(&self, room_id: &RoomId) -> Vec<UserId> {
        let slot = self.rooms.lock().await.get(room_id).cloned();
        let Some(slot) = slot else {
            return Vec::new();
        };
        let mut users: Vec<UserId> = slot
            .members
            .lock()
            .await
            .values()
            .map(|c| c.user_id.clone())
            .collect();
        users.sort();
        users.dedup();
        users
    }

    /// Number of rooms with at least one connection
    pub async fn room_count(&self) -> usize {
        self.rooms.lock().await.len()
    }
}
