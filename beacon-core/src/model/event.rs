use crate::model::ids::RoomId;
use crate::model::room::UserRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Events a client may send over the streaming channel. Unknown event
/// names or missing fields fail the decode as a whole; a half-parsed
/// event never reaches the router.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    Join {
        room_id: RoomId,
        user_id: String,
        role: UserRole,
    },
    Offer {
        room_id: RoomId,
        from: String,
        sdp: String,
    },
    Answer {
        room_id: RoomId,
        from: String,
        sdp: String,
    },
    Candidate {
        room_id: RoomId,
        from: String,
        candidate: serde_json::Value,
    },
    Leave {
        room_id: RoomId,
        user_id: String,
    },
    End {
        room_id: RoomId,
        reason: Option<String>,
    },
    Message {
        from: String,
        text: String,
    },
}

/// Events the coordinator pushes to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    UserJoined {
        user_id: String,
        role: UserRole,
    },
    UserLeft {
        user_id: String,
    },
    Offer {
        from: String,
        sdp: String,
    },
    Answer {
        from: String,
        sdp: String,
    },
    Candidate {
        from: String,
        candidate: serde_json::Value,
    },
    CallEnded {
        reason: Option<String>,
    },
    Message {
        from: String,
        text: String,
        timestamp: DateTime<Utc>,
    },
    Error {
        message: String,
        kind: String,
    },
}
