use async_trait::async_trait;
use beacon_core::ConnectionId;
use beacon_core::model::ServerEvent;
use beacon_server::SignalingOutput;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Mock SignalingOutput that captures every outbound event, grouped by
/// target connection.
#[derive(Clone, Default)]
pub struct MockSignalingOutput {
    events: Arc<Mutex<HashMap<ConnectionId, Vec<ServerEvent>>>>,
}

impl MockSignalingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events delivered to a connection so far, in delivery order.
    pub async fn events_for(&self, conn_id: &ConnectionId) -> Vec<ServerEvent> {
        self.events
            .lock()
            .await
            .get(conn_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Drain a connection's events, so later assertions only see what a
    /// subsequent step produced.
    pub async fn take_events(&self, conn_id: &ConnectionId) -> Vec<ServerEvent> {
        self.events
            .lock()
            .await
            .remove(conn_id)
            .unwrap_or_default()
    }

    pub async fn total_events(&self) -> usize {
        self.events.lock().await.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl SignalingOutput for MockSignalingOutput {
    async fn send(&self, conn_id: ConnectionId, event: ServerEvent) {
        tracing::debug!(%conn_id, ?event, "[MockSignaling] captured event");
        self.events
            .lock()
            .await
            .entry(conn_id)
            .or_default()
            .push(event);
    }
}
