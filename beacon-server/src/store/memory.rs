use crate::store::{BoundedLog, CHAT_LOG_CAP, RoomStore, SIGNAL_LOG_CAP};
use async_trait::async_trait;
use beacon_core::model::{ChatMessage, Recording, Room, RoomStatus, SignalRecord};
use beacon_core::{RoomId, SignalError};
use chrono::{TimeDelta, Utc};
use dashmap::DashMap;
use std::time::Duration;
use tracing::debug;

struct RoomEntry {
    room: Room,
    chat: BoundedLog<ChatMessage>,
    signals: BoundedLog<SignalRecord>,
}

/// Pure in-process room store. TTL is only checked lazily on read; there
/// is no sweeper, so a room that is never read again after its TTL
/// elapses stays resident until the process exits. Room state does not
/// survive a restart.
#[derive(Default)]
pub struct MemoryRoomStore {
    rooms: DashMap<RoomId, RoomEntry>,
    recordings: DashMap<String, Recording>,
}

impl MemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomStore for MemoryRoomStore {
    async fn create(
        &self,
        companion_id: &str,
        user_id: &str,
        ttl: Duration,
    ) -> Result<Room, SignalError> {
        let now = Utc::now();
        let ttl = TimeDelta::from_std(ttl)
            .map_err(|e| SignalError::InvalidPayload(format!("ttl out of range: {e}")))?;

        let room = Room {
            room_id: RoomId::new(),
            companion_id: companion_id.to_string(),
            user_id: user_id.to_string(),
            status: RoomStatus::Active,
            created_at: now,
            expires_at: now + ttl,
        };

        self.rooms.insert(
            room.room_id,
            RoomEntry {
                room: room.clone(),
                chat: BoundedLog::new(CHAT_LOG_CAP),
                signals: BoundedLog::new(SIGNAL_LOG_CAP),
            },
        );

        debug!(room_id = %room.room_id, "created room");
        Ok(room)
    }

    async fn get(&self, room_id: &RoomId) -> Result<Room, SignalError> {
        let mut entry = self
            .rooms
            .get_mut(room_id)
            .ok_or(SignalError::NotFound("room"))?;

        // Lazy expiry: the read itself moves an overdue active room to
        // expired. Idempotent on repeat reads.
        if entry.room.status == RoomStatus::Active && entry.room.is_past_expiry(Utc::now()) {
            entry.room.status = RoomStatus::Expired;
            debug!(room_id = %room_id, "room lazily expired on read");
        }

        Ok(entry.room.clone())
    }

    async fn set_status(&self, room_id: &RoomId, status: RoomStatus) -> Result<(), SignalError> {
        let mut entry = self
            .rooms
            .get_mut(room_id)
            .ok_or(SignalError::NotFound("room"))?;

        if !entry.room.status.can_transition(status) {
            return Err(SignalError::Conflict(format!(
                "room is {} and cannot become {}",
                entry.room.status, status
            )));
        }

        entry.room.status = status;
        Ok(())
    }

    async fn delete(&self, room_id: &RoomId) -> Result<(), SignalError> {
        self.rooms
            .remove(room_id)
            .map(|_| ())
            .ok_or(SignalError::NotFound("room"))
    }

    async fn append_chat(
        &self,
        room_id: &RoomId,
        message: ChatMessage,
    ) -> Result<(), SignalError> {
        let mut entry = self
            .rooms
            .get_mut(room_id)
            .ok_or(SignalError::NotFound("room"))?;
        entry.chat.push(message);
        Ok(())
    }

    async fn recent_chat(
        &self,
        room_id: &RoomId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, SignalError> {
        let entry = self
            .rooms
            .get(room_id)
            .ok_or(SignalError::NotFound("room"))?;
        Ok(entry.chat.recent(limit).cloned().collect())
    }

    async fn append_signal(
        &self,
        room_id: &RoomId,
        record: SignalRecord,
    ) -> Result<(), SignalError> {
        let mut entry = self
            .rooms
            .get_mut(room_id)
            .ok_or(SignalError::NotFound("room"))?;
        entry.signals.push(record);
        Ok(())
    }

    async fn signals(&self, room_id: &RoomId) -> Result<Vec<SignalRecord>, SignalError> {
        let entry = self
            .rooms
            .get(room_id)
            .ok_or(SignalError::NotFound("room"))?;
        Ok(entry.signals.iter().cloned().collect())
    }

    async fn store_recording(&self, recording: Recording) -> Result<(), SignalError> {
        self.recordings
            .insert(recording.recording_id.clone(), recording);
        Ok(())
    }
}
