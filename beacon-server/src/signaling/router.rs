use crate::signaling::{Association, ConnectionRegistry, SignalingOutput};
use crate::store::RoomStore;
use beacon_core::model::{
    ChatMessage, ClientEvent, RoomStatus, ServerEvent, SignalKind, SignalRecord, UserRole,
};
use beacon_core::{ConnectionId, RoomId, SignalError};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The state machine and dispatch core. Validates every inbound event,
/// mutates the store and the registry, and tells the output seam which
/// connections receive which payloads.
///
/// Per-connection state is `Disconnected → Connected → Joined`;
/// `Connected` is a registry entry without an association, `Joined` one
/// with. Validation failures mutate nothing and produce a targeted
/// `error` event to the origin only. Persistence failures on
/// broadcast-carrying events do not suppress the broadcast: notifying
/// peers is best-effort and independent of the store call.
pub struct SignalingRouter {
    store: Arc<dyn RoomStore>,
    registry: ConnectionRegistry,
    output: Arc<dyn SignalingOutput>,
}

impl SignalingRouter {
    pub fn new(store: Arc<dyn RoomStore>, output: Arc<dyn SignalingOutput>) -> Self {
        Self {
            store,
            registry: ConnectionRegistry::new(),
            output,
        }
    }

    pub fn on_connect(&self, conn_id: ConnectionId) {
        info!(%conn_id, "connection opened");
        self.registry.on_connect(conn_id);
    }

    /// Transport-level disconnect. A joined connection implicitly leaves
    /// its room; remaining members hear `user_left` exactly once.
    pub async fn on_disconnect(&self, conn_id: ConnectionId) {
        info!(%conn_id, "connection closed");
        if let Some(association) = self.registry.on_disconnect(&conn_id) {
            self.broadcast(
                association.room_id,
                Some(conn_id),
                &ServerEvent::UserLeft {
                    user_id: association.user_id,
                },
            )
            .await;
        }
    }

    /// Apply one inbound event. Errors go back to the origin as a
    /// targeted `error` event; the connection stays up either way.
    pub async fn handle(&self, conn_id: ConnectionId, event: ClientEvent) {
        let result = match event {
            ClientEvent::Join {
                room_id,
                user_id,
                role,
            } => self.handle_join(conn_id, room_id, user_id, role).await,
            ClientEvent::Offer {
                room_id,
                from,
                sdp,
            } => {
                let outbound = ServerEvent::Offer {
                    from: from.clone(),
                    sdp: sdp.clone(),
                };
                self.relay(
                    conn_id,
                    room_id,
                    SignalKind::Offer,
                    from,
                    serde_json::json!({ "sdp": sdp }),
                    outbound,
                )
                .await
            }
            ClientEvent::Answer {
                room_id,
                from,
                sdp,
            } => {
                let outbound = ServerEvent::Answer {
                    from: from.clone(),
                    sdp: sdp.clone(),
                };
                self.relay(
                    conn_id,
                    room_id,
                    SignalKind::Answer,
                    from,
                    serde_json::json!({ "sdp": sdp }),
                    outbound,
                )
                .await
            }
            ClientEvent::Candidate {
                room_id,
                from,
                candidate,
            } => {
                let outbound = ServerEvent::Candidate {
                    from: from.clone(),
                    candidate: candidate.clone(),
                };
                self.relay(conn_id, room_id, SignalKind::Candidate, from, candidate, outbound)
                    .await
            }
            ClientEvent::Leave { room_id, .. } => self.handle_leave(conn_id, room_id).await,
            ClientEvent::End { room_id, reason } => {
                self.handle_end(conn_id, room_id, reason).await
            }
            ClientEvent::Message { from, text } => {
                self.handle_message(conn_id, from, text).await
            }
        };

        if let Err(err) = result {
            warn!(%conn_id, error = %err, kind = err.kind(), "event rejected");
            self.output
                .send(
                    conn_id,
                    ServerEvent::Error {
                        message: err.to_string(),
                        kind: err.kind().to_string(),
                    },
                )
                .await;
        }
    }

    async fn handle_join(
        &self,
        conn_id: ConnectionId,
        room_id: RoomId,
        user_id: String,
        role: UserRole,
    ) -> Result<(), SignalError> {
        // The read performs lazy expiry, so an overdue room is caught
        // here before any registry mutation.
        let room = self.store.get(&room_id).await?;
        match room.status {
            RoomStatus::Active => {}
            RoomStatus::Expired => return Err(SignalError::Expired),
            RoomStatus::Inactive => {
                return Err(SignalError::Conflict("room is no longer active".into()));
            }
        }

        let prior = self.registry.join(
            conn_id,
            Association {
                room_id,
                user_id: user_id.clone(),
                role,
            },
        )?;

        // Joining elsewhere while joined implicitly leaves the first
        // room; its remaining members hear about it.
        if let Some(prior) = prior {
            if prior.room_id != room_id {
                debug!(%conn_id, old_room = %prior.room_id, new_room = %room_id, "implicit leave");
                self.broadcast(
                    prior.room_id,
                    Some(conn_id),
                    &ServerEvent::UserLeft {
                        user_id: prior.user_id,
                    },
                )
                .await;
            }
        }

        info!(%conn_id, %room_id, user_id = %user_id, role = role.as_str(), "joined room");
        self.broadcast(
            room_id,
            Some(conn_id),
            &ServerEvent::UserJoined { user_id, role },
        )
        .await;
        Ok(())
    }

    /// Shared path for offer/answer/candidate: record, then forward to
    /// every other member.
    async fn relay(
        &self,
        conn_id: ConnectionId,
        room_id: RoomId,
        kind: SignalKind,
        from: String,
        payload: serde_json::Value,
        outbound: ServerEvent,
    ) -> Result<(), SignalError> {
        self.require_joined(conn_id, &room_id)?;

        let record = SignalRecord {
            room_id,
            kind,
            from,
            payload,
            timestamp: Utc::now(),
        };
        let store_result = self.store.append_signal(&room_id, record).await;

        debug!(%conn_id, %room_id, kind = %kind, "relaying signal");
        self.broadcast(room_id, Some(conn_id), &outbound).await;

        store_result
    }

    async fn handle_message(
        &self,
        conn_id: ConnectionId,
        from: String,
        text: String,
    ) -> Result<(), SignalError> {
        let association = self
            .registry
            .association(&conn_id)
            .ok_or_else(|| SignalError::Conflict("join a room before chatting".into()))?;

        let message = ChatMessage {
            room_id: association.room_id,
            from,
            text,
            timestamp: Utc::now(),
        };
        let store_result = self
            .store
            .append_chat(&association.room_id, message.clone())
            .await;

        // Chat echoes to the sender, unlike negotiation relays, so the
        // WS path matches what the REST chat endpoint broadcasts.
        self.broadcast_to_room(
            association.room_id,
            &ServerEvent::Message {
                from: message.from,
                text: message.text,
                timestamp: message.timestamp,
            },
        )
        .await;

        store_result
    }

    async fn handle_leave(
        &self,
        conn_id: ConnectionId,
        room_id: RoomId,
    ) -> Result<(), SignalError> {
        let association = self.registry.leave(conn_id, &room_id)?;
        info!(%conn_id, %room_id, user_id = %association.user_id, "left room");

        self.broadcast(
            room_id,
            Some(conn_id),
            &ServerEvent::UserLeft {
                user_id: association.user_id,
            },
        )
        .await;
        Ok(())
    }

    async fn handle_end(
        &self,
        conn_id: ConnectionId,
        room_id: RoomId,
        reason: Option<String>,
    ) -> Result<(), SignalError> {
        self.require_joined(conn_id, &room_id)?;

        // Ending does not touch the room's TTL: an inactive room still
        // expires (and self-deletes, durably) on its original clock.
        let store_result = self.store.set_status(&room_id, RoomStatus::Inactive).await;

        info!(%conn_id, %room_id, "call ended");
        self.broadcast_to_room(room_id, &ServerEvent::CallEnded { reason })
            .await;

        store_result
    }

    fn require_joined(
        &self,
        conn_id: ConnectionId,
        room_id: &RoomId,
    ) -> Result<Association, SignalError> {
        match self.registry.association(&conn_id) {
            Some(association) if association.room_id == *room_id => Ok(association),
            Some(_) => Err(SignalError::Conflict(
                "connection is joined to a different room".into(),
            )),
            None => Err(SignalError::Conflict("join a room first".into())),
        }
    }

    /// Deliver to every member except `except`. The target set is a
    /// snapshot taken under the room's membership lock; a target that
    /// disconnects after the snapshot is skipped by the output seam.
    async fn broadcast(
        &self,
        room_id: RoomId,
        except: Option<ConnectionId>,
        event: &ServerEvent,
    ) {
        for target in self.registry.members_of(&room_id) {
            if Some(target) == except {
                continue;
            }
            self.output.send(target, event.clone()).await;
        }
    }

    /// Deliver to every member, the origin included. Used by `end`, by
    /// chat, and by the REST chat endpoint.
    pub async fn broadcast_to_room(&self, room_id: RoomId, event: &ServerEvent) {
        self.broadcast(room_id, None, event).await;
    }

    /// Declared identities of everyone currently joined to the room.
    pub fn participants(&self, room_id: &RoomId) -> Vec<Association> {
        self.registry
            .members_of(room_id)
            .into_iter()
            .filter_map(|conn_id| self.registry.association(&conn_id))
            .collect()
    }

    /// Registry view for callers outside the event path.
    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }
}
