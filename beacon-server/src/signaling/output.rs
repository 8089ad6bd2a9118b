use async_trait::async_trait;
use beacon_core::ConnectionId;
use beacon_core::model::ServerEvent;

/// Outbound side of the transport adapter. The router computes who gets
/// what; an implementation of this trait does the actual delivery.
///
/// Delivery to a connection that has already gone away is a soft failure:
/// implementations log and skip it, and it never reaches the router.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    async fn send(&self, conn_id: ConnectionId, event: ServerEvent);
}
