use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use beacon_core::ConnectionId;
use beacon_core::model::ServerEvent;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, warn};

struct SignalingInner {
    connections: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
}

/// Live-connection side of the transport adapter: one outbound queue per
/// WebSocket, filled here and drained by the connection's send task.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                connections: DashMap::new(),
            }),
        }
    }

    pub fn add_connection(&self, conn_id: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.connections.insert(conn_id, tx);
    }

    pub fn remove_connection(&self, conn_id: &ConnectionId) {
        self.inner.connections.remove(conn_id);
    }

    pub fn send_event(&self, conn_id: ConnectionId, event: &ServerEvent) {
        if let Some(conn) = self.inner.connections.get(&conn_id) {
            match serde_json::to_string(event) {
                Ok(json) => {
                    if let Err(e) = conn.send(Message::Text(json.into())) {
                        error!(%conn_id, error = %e, "failed to queue outbound event");
                    }
                }
                Err(e) => error!(error = %e, "failed to serialize outbound event"),
            }
        } else {
            // The target raced a disconnect; skip it.
            warn!(%conn_id, "attempted to send event to a gone connection");
        }
    }
}

impl Default for SignalingService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send(&self, conn_id: ConnectionId, event: ServerEvent) {
        self.send_event(conn_id, &event);
    }
}
