mod bounded_log;
mod memory;
mod redis;

pub use bounded_log::BoundedLog;
pub use memory::MemoryRoomStore;
pub use redis::RedisRoomStore;

use async_trait::async_trait;
use beacon_core::model::{ChatMessage, Recording, Room, RoomStatus, SignalRecord};
use beacon_core::{RoomId, SignalError};
use std::time::Duration;

/// Retained chat lines per room.
pub const CHAT_LOG_CAP: usize = 100;
/// Retained signal records per room.
pub const SIGNAL_LOG_CAP: usize = 20;

/// Room persistence behind one seam, so the durable and volatile flavors
/// are a constructor-time choice.
///
/// `get` performs lazy expiry: reading a room whose TTL has elapsed
/// transitions it to `Expired` as a side effect of the read. Callers must
/// tolerate that state change on any read path.
#[async_trait]
pub trait RoomStore: Send + Sync {
    async fn create(
        &self,
        companion_id: &str,
        user_id: &str,
        ttl: Duration,
    ) -> Result<Room, SignalError>;

    async fn get(&self, room_id: &RoomId) -> Result<Room, SignalError>;

    /// Single-field status update. Rejected with `Conflict` if the room
    /// has already left the `Active` state (transitions are one-way).
    /// Never touches `expires_at` or the store-level TTL.
    async fn set_status(&self, room_id: &RoomId, status: RoomStatus) -> Result<(), SignalError>;

    async fn delete(&self, room_id: &RoomId) -> Result<(), SignalError>;

    async fn append_chat(
        &self,
        room_id: &RoomId,
        message: ChatMessage,
    ) -> Result<(), SignalError>;

    /// The most recent `limit` chat lines, oldest first.
    async fn recent_chat(
        &self,
        room_id: &RoomId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, SignalError>;

    async fn append_signal(
        &self,
        room_id: &RoomId,
        record: SignalRecord,
    ) -> Result<(), SignalError>;

    /// All retained signal records, oldest first.
    async fn signals(&self, room_id: &RoomId) -> Result<Vec<SignalRecord>, SignalError>;

    async fn store_recording(&self, recording: Recording) -> Result<(), SignalError>;
}
