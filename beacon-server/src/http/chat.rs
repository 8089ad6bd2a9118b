use crate::app::AppState;
use crate::http::ApiResult;
use axum::Json;
use axum::extract::{Path, Query, State};
use beacon_core::RoomId;
use beacon_core::model::{ChatMessage, ServerEvent};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMessageRequest {
    pub room_id: RoomId,
    pub from: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMessageResponse {
    pub status: &'static str,
    pub message_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// REST fallback for clients without a live streaming channel. Persists
/// and then triggers the same include-sender broadcast as the streaming
/// `message` event.
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PostMessageRequest>,
) -> ApiResult<Json<PostMessageResponse>> {
    state.store.get(&request.room_id).await?;

    let message = ChatMessage {
        room_id: request.room_id,
        from: request.from,
        text: request.text,
        timestamp: Utc::now(),
    };
    state.store.append_chat(&request.room_id, message.clone()).await?;

    state
        .router
        .broadcast_to_room(
            request.room_id,
            &ServerEvent::Message {
                from: message.from,
                text: message.text,
                timestamp: message.timestamp,
            },
        )
        .await;

    Ok(Json(PostMessageResponse {
        status: "sent",
        message_id: Uuid::new_v4(),
    }))
}

pub async fn chat_history(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<Uuid>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<ChatMessage>>> {
    let room_id = RoomId(room_id);
    // Consistent 404 for unknown rooms across both store flavors.
    state.store.get(&room_id).await?;

    let limit = query.limit.unwrap_or(50);
    let messages = state.store.recent_chat(&room_id, limit).await?;
    Ok(Json(messages))
}
