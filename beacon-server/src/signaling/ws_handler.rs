use crate::app::AppState;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use beacon_core::model::{ClientEvent, ServerEvent};
use beacon_core::{ConnectionId, SignalError};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // The transport assigns the ephemeral identity; clients never pick
    // their own connection id.
    let conn_id = ConnectionId::new();
    info!(%conn_id, "new websocket connection");

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    state.signaling.add_connection(conn_id, tx);
    state.router.on_connect(conn_id);

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let state = state.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => state.router.handle(conn_id, event).await,
                        Err(e) => {
                            warn!(%conn_id, error = %e, "undecodable event");
                            let err = SignalError::InvalidPayload(e.to_string());
                            state.signaling.send_event(
                                conn_id,
                                &ServerEvent::Error {
                                    message: err.to_string(),
                                    kind: err.kind().to_string(),
                                },
                            );
                        }
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    state.router.on_disconnect(conn_id).await;
    state.signaling.remove_connection(&conn_id);
    info!(%conn_id, "websocket disconnected");
}
