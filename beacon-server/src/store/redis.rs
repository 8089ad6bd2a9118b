use crate::store::{CHAT_LOG_CAP, RoomStore, SIGNAL_LOG_CAP};
use async_trait::async_trait;
use beacon_core::model::{ChatMessage, Recording, Room, RoomStatus, SignalRecord};
use beacon_core::{RoomId, SignalError};
use chrono::{DateTime, TimeDelta, Utc};
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, Script};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Guards the one-way status transition on the room hash. HSET alone
/// would let a late `end` overwrite an `expired` room.
///
/// Returns 1 on success (or no-op), 0 when the current status forbids the
/// transition, -1 when the room hash is gone.
const SET_STATUS: &str = r#"
local current = redis.call('HGET', KEYS[1], 'status')
if current == false then
    return -1
end
if current == ARGV[1] then
    return 1
end
if current == 'active' then
    redis.call('HSET', KEYS[1], 'status', ARGV[1])
    return 1
end
return 0
"#;

/// Durable room store on Redis. One hash per room with a key-level TTL,
/// so orphaned rooms self-delete without a sweeper; one capped list per
/// room for chat and for signaling history.
///
/// The `MultiplexedConnection` is cheap to clone and safe to use
/// concurrently; every operation clones it rather than locking.
#[derive(Clone)]
pub struct RedisRoomStore {
    connection: MultiplexedConnection,
    op_timeout: Duration,
    log_ttl: Duration,
    set_status_script: Script,
}

fn room_key(room_id: &RoomId) -> String {
    format!("room:{room_id}")
}

fn chat_key(room_id: &RoomId) -> String {
    format!("chat:{room_id}")
}

fn signal_key(room_id: &RoomId) -> String {
    format!("signal:{room_id}")
}

fn recording_key(recording_id: &str) -> String {
    format!("recording:{recording_id}")
}

impl RedisRoomStore {
    /// Connect to Redis. `op_timeout` bounds every store call; `log_ttl`
    /// is applied to chat/signal list keys so logs do not outlive their
    /// room by more than one room lifetime.
    pub async fn connect(
        redis_url: &str,
        op_timeout: Duration,
        log_ttl: Duration,
    ) -> Result<Self, SignalError> {
        let client = Client::open(redis_url).map_err(|e| {
            // The URL may embed credentials; log the error only.
            error!(error = %e, "failed to open redis client");
            SignalError::StoreUnavailable(format!("failed to open redis client: {e}"))
        })?;

        let connection = tokio::time::timeout(op_timeout, client.get_multiplexed_async_connection())
            .await
            .map_err(|_| SignalError::StoreUnavailable("redis connect timed out".into()))?
            .map_err(|e| {
                error!(error = %e, "failed to connect to redis");
                SignalError::StoreUnavailable(format!("failed to connect to redis: {e}"))
            })?;

        Ok(Self {
            connection,
            op_timeout,
            log_ttl,
            set_status_script: Script::new(SET_STATUS),
        })
    }

    /// Run one redis call under the store timeout.
    async fn run<T, F>(&self, op: F) -> Result<T, SignalError>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.op_timeout, op).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                warn!(error = %e, "redis operation failed");
                Err(SignalError::StoreUnavailable(e.to_string()))
            }
            Err(_) => Err(SignalError::StoreUnavailable(
                "redis operation timed out".into(),
            )),
        }
    }

    async fn append_capped(
        &self,
        key: String,
        entry: String,
        cap: usize,
    ) -> Result<(), SignalError> {
        let mut conn = self.connection.clone();
        let ttl_secs = self.log_ttl.as_secs() as i64;

        self.run(async move {
            let mut pipe = redis::pipe();
            pipe.atomic()
                .lpush(&key, entry)
                .ignore()
                .ltrim(&key, 0, cap as isize - 1)
                .ignore()
                .expire(&key, ttl_secs)
                .ignore();
            let done: redis::RedisResult<()> = pipe.query_async(&mut conn).await;
            done
        })
        .await
    }

    /// LRANGE returns newest first (LPUSH order); flip to insertion order
    /// and drop entries that no longer decode.
    async fn read_list<T: serde::de::DeserializeOwned>(
        &self,
        key: String,
        stop: isize,
    ) -> Result<Vec<T>, SignalError> {
        let mut conn = self.connection.clone();
        let raw: Vec<String> = self.run(async move { conn.lrange(&key, 0, stop).await }).await?;

        let mut entries: Vec<T> = raw
            .iter()
            .filter_map(|line| match serde_json::from_str(line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "dropping undecodable log entry");
                    None
                }
            })
            .collect();
        entries.reverse();
        Ok(entries)
    }
}

fn room_from_hash(room_id: &RoomId, hash: HashMap<String, String>) -> Result<Room, SignalError> {
    fn field<'a>(
        hash: &'a HashMap<String, String>,
        name: &'static str,
    ) -> Result<&'a str, SignalError> {
        hash.get(name)
            .map(String::as_str)
            .ok_or_else(|| SignalError::Internal(format!("room hash missing field {name}")))
    }

    fn timestamp(raw: &str, name: &str) -> Result<DateTime<Utc>, SignalError> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| SignalError::Internal(format!("room hash field {name} unparseable: {e}")))
    }

    let status: RoomStatus = field(&hash, "status")?
        .parse()
        .map_err(SignalError::Internal)?;

    Ok(Room {
        room_id: *room_id,
        companion_id: field(&hash, "companionId")?.to_string(),
        user_id: field(&hash, "userId")?.to_string(),
        status,
        created_at: timestamp(field(&hash, "createdAt")?, "createdAt")?,
        expires_at: timestamp(field(&hash, "expiresAt")?, "expiresAt")?,
    })
}

#[async_trait]
impl RoomStore for RedisRoomStore {
    async fn create(
        &self,
        companion_id: &str,
        user_id: &str,
        ttl: Duration,
    ) -> Result<Room, SignalError> {
        let now = Utc::now();
        let delta = TimeDelta::from_std(ttl)
            .map_err(|e| SignalError::InvalidPayload(format!("ttl out of range: {e}")))?;

        let room = Room {
            room_id: RoomId::new(),
            companion_id: companion_id.to_string(),
            user_id: user_id.to_string(),
            status: RoomStatus::Active,
            created_at: now,
            expires_at: now + delta,
        };

        let key = room_key(&room.room_id);
        let fields = [
            ("roomId", room.room_id.to_string()),
            ("companionId", room.companion_id.clone()),
            ("userId", room.user_id.clone()),
            ("status", room.status.to_string()),
            ("createdAt", room.created_at.to_rfc3339()),
            ("expiresAt", room.expires_at.to_rfc3339()),
        ];
        let ttl_secs = ttl.as_secs() as i64;

        let mut conn = self.connection.clone();
        self.run(async move {
            let mut pipe = redis::pipe();
            pipe.atomic()
                .hset_multiple(&key, &fields)
                .ignore()
                .expire(&key, ttl_secs)
                .ignore();
            let done: redis::RedisResult<()> = pipe.query_async(&mut conn).await;
            done
        })
        .await?;

        debug!(room_id = %room.room_id, "created room");
        Ok(room)
    }

    async fn get(&self, room_id: &RoomId) -> Result<Room, SignalError> {
        let key = room_key(room_id);
        let mut conn = self.connection.clone();
        let hash: HashMap<String, String> =
            self.run(async move { conn.hgetall(&key).await }).await?;

        if hash.is_empty() {
            return Err(SignalError::NotFound("room"));
        }

        let mut room = room_from_hash(room_id, hash)?;

        // Lazy expiry. The guarded write keeps a concurrent status change
        // from being overwritten; the read still reports expired either
        // way, which is a valid ordering of the two.
        if room.status == RoomStatus::Active && room.is_past_expiry(Utc::now()) {
            let key = room_key(room_id);
            let mut conn = self.connection.clone();
            let script = self.set_status_script.clone();
            let _: i64 = self
                .run(async move {
                    script
                        .key(&key)
                        .arg(RoomStatus::Expired.as_str())
                        .invoke_async(&mut conn)
                        .await
                })
                .await?;
            room.status = RoomStatus::Expired;
            debug!(room_id = %room_id, "room lazily expired on read");
        }

        Ok(room)
    }

    async fn set_status(&self, room_id: &RoomId, status: RoomStatus) -> Result<(), SignalError> {
        let key = room_key(room_id);
        let mut conn = self.connection.clone();
        let script = self.set_status_script.clone();

        let outcome: i64 = self
            .run(async move {
                script
                    .key(&key)
                    .arg(status.as_str())
                    .invoke_async(&mut conn)
                    .await
            })
            .await?;

        match outcome {
            1 => Ok(()),
            0 => Err(SignalError::Conflict(format!(
                "room cannot become {status}"
            ))),
            _ => Err(SignalError::NotFound("room")),
        }
    }

    async fn delete(&self, room_id: &RoomId) -> Result<(), SignalError> {
        let keys = vec![room_key(room_id), chat_key(room_id), signal_key(room_id)];
        let mut conn = self.connection.clone();
        let removed: i64 = self.run(async move { conn.del(&keys).await }).await?;

        if removed == 0 {
            return Err(SignalError::NotFound("room"));
        }
        Ok(())
    }

    async fn append_chat(
        &self,
        room_id: &RoomId,
        message: ChatMessage,
    ) -> Result<(), SignalError> {
        let entry = serde_json::to_string(&message)
            .map_err(|e| SignalError::Internal(format!("chat encode failed: {e}")))?;
        self.append_capped(chat_key(room_id), entry, CHAT_LOG_CAP)
            .await
    }

    async fn recent_chat(
        &self,
        room_id: &RoomId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, SignalError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        self.read_list(chat_key(room_id), limit as isize - 1).await
    }

    async fn append_signal(
        &self,
        room_id: &RoomId,
        record: SignalRecord,
    ) -> Result<(), SignalError> {
        let entry = serde_json::to_string(&record)
            .map_err(|e| SignalError::Internal(format!("signal encode failed: {e}")))?;
        self.append_capped(signal_key(room_id), entry, SIGNAL_LOG_CAP)
            .await
    }

    async fn signals(&self, room_id: &RoomId) -> Result<Vec<SignalRecord>, SignalError> {
        self.read_list(signal_key(room_id), -1).await
    }

    async fn store_recording(&self, recording: Recording) -> Result<(), SignalError> {
        let key = recording_key(&recording.recording_id);
        let fields = [
            ("recordingId", recording.recording_id.clone()),
            ("roomId", recording.room_id.to_string()),
            ("url", recording.url.clone()),
            ("uploadedAt", recording.uploaded_at.to_rfc3339()),
        ];

        let mut conn = self.connection.clone();
        self.run(async move { conn.hset_multiple(&key, &fields).await })
            .await
    }
}
