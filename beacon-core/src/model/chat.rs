use crate::model::ids::RoomId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One chat line. Append-only per room, oldest evicted first once the
/// retained window is full.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub room_id: RoomId,
    pub from: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// The negotiation payload flavor a signal record captures.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Offer,
    Answer,
    Candidate,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Offer => "offer",
            SignalKind::Answer => "answer",
            SignalKind::Candidate => "candidate",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "offer" => Ok(SignalKind::Offer),
            "answer" => Ok(SignalKind::Answer),
            "candidate" => Ok(SignalKind::Candidate),
            other => Err(format!("unknown signal kind: {other}")),
        }
    }
}

/// A relayed negotiation payload, kept for diagnostics and late-join
/// replay. The payload blob is never interpreted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignalRecord {
    pub room_id: RoomId,
    #[serde(rename = "type")]
    pub kind: SignalKind,
    pub from: String,
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

/// Pointer to a recorded session uploaded elsewhere.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    pub recording_id: String,
    pub room_id: RoomId,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}
