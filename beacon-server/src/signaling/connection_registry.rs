use beacon_core::model::UserRole;
use beacon_core::{ConnectionId, RoomId, SignalError};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::collections::HashSet;

/// What a live connection is currently doing: which room, as whom.
#[derive(Debug, Clone, PartialEq)]
pub struct Association {
    pub room_id: RoomId,
    pub user_id: String,
    pub role: UserRole,
}

struct ConnectionState {
    #[allow(dead_code)]
    connected_at: DateTime<Utc>,
    association: Option<Association>,
}

/// In-process map from live connections to their room association, plus
/// the reverse room → members index used to compute broadcast targets.
///
/// A connection holds at most one association. Membership mutation and
/// broadcast-set reads for one room serialize on that room's map entry,
/// so a concurrent leave cannot race a target computation into a torn
/// set. Nothing here is persisted; a restart forgets every connection.
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: DashMap<ConnectionId, ConnectionState>,
    members: DashMap<RoomId, HashSet<ConnectionId>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_connect(&self, conn_id: ConnectionId) {
        self.connections.insert(
            conn_id,
            ConnectionState {
                connected_at: Utc::now(),
                association: None,
            },
        );
    }

    /// Drop the connection entirely, returning the association it held so
    /// the caller can notify the room it implicitly left.
    pub fn on_disconnect(&self, conn_id: &ConnectionId) -> Option<Association> {
        let state = self.connections.remove(conn_id)?.1;
        let association = state.association?;
        self.remove_member(&association.room_id, conn_id);
        Some(association)
    }

    /// Associate a connection with a room. Joining while already joined
    /// elsewhere implicitly leaves the first room; the prior association
    /// is returned so the caller can notify it.
    pub fn join(
        &self,
        conn_id: ConnectionId,
        association: Association,
    ) -> Result<Option<Association>, SignalError> {
        let prior = {
            let mut state = self
                .connections
                .get_mut(&conn_id)
                .ok_or_else(|| SignalError::Conflict("connection is not registered".into()))?;
            state.association.replace(association.clone())
        };

        if let Some(prior) = &prior {
            self.remove_member(&prior.room_id, &conn_id);
        }

        self.members
            .entry(association.room_id)
            .or_default()
            .insert(conn_id);

        Ok(prior)
    }

    /// Clear the association with `room_id`. Fails with `Conflict` when
    /// the connection is not joined to that room; no state changes then.
    pub fn leave(
        &self,
        conn_id: ConnectionId,
        room_id: &RoomId,
    ) -> Result<Association, SignalError> {
        let association = {
            let mut state = self
                .connections
                .get_mut(&conn_id)
                .ok_or_else(|| SignalError::Conflict("connection is not registered".into()))?;

            match &state.association {
                Some(assoc) if assoc.room_id == *room_id => {}
                _ => {
                    return Err(SignalError::Conflict(
                        "connection is not joined to this room".into(),
                    ));
                }
            }
            state
                .association
                .take()
                .ok_or_else(|| SignalError::Internal("association vanished".into()))?
        };

        self.remove_member(room_id, &conn_id);
        Ok(association)
    }

    pub fn association(&self, conn_id: &ConnectionId) -> Option<Association> {
        self.connections
            .get(conn_id)
            .and_then(|state| state.association.clone())
    }

    /// Snapshot of the room's broadcast group, taken under the room's
    /// entry lock.
    pub fn members_of(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        self.members
            .get(room_id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    fn remove_member(&self, room_id: &RoomId, conn_id: &ConnectionId) {
        if let Some(mut set) = self.members.get_mut(room_id) {
            set.remove(conn_id);
            if set.is_empty() {
                drop(set);
                self.members.remove_if(room_id, |_, set| set.is_empty());
            }
        }
    }
}
