use crate::model::ids::RoomId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a room. Transitions are one-way: `Active` may move to
/// `Inactive` or `Expired`, and neither of those ever moves again.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Active,
    Inactive,
    Expired,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Active => "active",
            RoomStatus::Inactive => "inactive",
            RoomStatus::Expired => "expired",
        }
    }

    /// Whether moving from `self` to `next` is allowed.
    pub fn can_transition(&self, next: RoomStatus) -> bool {
        match self {
            RoomStatus::Active => true,
            RoomStatus::Inactive | RoomStatus::Expired => *self == next,
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(RoomStatus::Active),
            "inactive" => Ok(RoomStatus::Inactive),
            "expired" => Ok(RoomStatus::Expired),
            other => Err(format!("unknown room status: {other}")),
        }
    }
}

/// Which side of the call a participant is on.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Companion,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Companion => "companion",
        }
    }
}

/// A negotiation room binding one companion and one user for a bounded
/// lifetime. `expires_at` is fixed at creation; status changes never move
/// it.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_id: RoomId,
    pub companion_id: String,
    pub user_id: String,
    pub status: RoomStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Room {
    /// Whether the TTL has elapsed at `now`.
    pub fn is_past_expiry(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
