//! Chat rooms: one broadcast channel per room, fanned out to every connection that joined it.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

/// Backlog per room, and per connection queue.
pub const ROOM_CAPACITY: usize = 64;

/// In-process registry of rooms keyed by name.
#[derive(Clone, Default)]
pub struct RoomHub {
    rooms: Arc<RwLock<HashMap<String, broadcast::Sender<String>>>>,
}

impl RoomHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receiver for the room, creating the room on first join.
    pub async fn join(&self, room: &str) -> broadcast::Receiver<String> {
        let mut rooms = self.rooms.write().await;
        rooms
            .entry(room.to_string())
            .or_insert_with(|| {
                debug!(room = %room, "room opened");
                broadcast::channel(ROOM_CAPACITY).0
            })
            .subscribe()
    }

    /// Send a payload to everyone in the room. Returns how many receivers got it.
    pub async fn publish(&self, room: &str, payload: String) -> usize {
        let rooms = self.rooms.read().await;
        rooms
            .get(room)
            .and_then(|tx| tx.send(payload).ok())
            .unwrap_or(0)
    }

    /// Drop the room once its last receiver is gone. Call after dropping the caller's receiver.
    pub async fn leave(&self, room: &str) {
        let mut rooms = self.rooms.write().await;
        if rooms.get(room).is_some_and(|tx| tx.receiver_count() == 0) {
            rooms.remove(room);
            debug!(room = %room, "room closed");
        }
    }

    pub async fn member_count(&self, room: &str) -> usize {
        let rooms = self.rooms.read().await;
        rooms.get(room).map(|tx| tx.receiver_count()).unwrap_or(0)
    }
}
