use crate::app::AppState;
use crate::http::{ApiError, ApiResult};
use axum::Json;
use axum::extract::{Path, State};
use beacon_core::model::{Room, RoomStatus, UserRole};
use beacon_core::{RoomId, SignalError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub companion_id: String,
    pub user_id: String,
    pub ttl_minutes: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub user_id: String,
    pub role: UserRole,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfo {
    pub room_id: RoomId,
    pub status: RoomStatus,
    pub participants: Vec<Participant>,
}

pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateRoomRequest>,
) -> ApiResult<Json<Room>> {
    let ttl = match request.ttl_minutes {
        Some(minutes) => minutes
            .checked_mul(60)
            .filter(|_| minutes > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| {
                SignalError::InvalidPayload("ttlMinutes must be a positive minute count".into())
            })?,
        None => state.settings.default_room_ttl,
    };

    // The caller may name any companion; only catalogued ones get rooms.
    if state.catalog.fetch(&request.companion_id).await.is_none() {
        return Err(SignalError::NotFound("companion").into());
    }

    let room = state
        .store
        .create(&request.companion_id, &request.user_id, ttl)
        .await?;

    info!(
        room_id = %room.room_id,
        companion_id = %request.companion_id,
        user_id = %request.user_id,
        "created room"
    );
    Ok(Json(room))
}

pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<Uuid>,
) -> ApiResult<axum::http::StatusCode> {
    let room_id = RoomId(room_id);
    state.store.delete(&room_id).await?;
    info!(%room_id, "deleted room");
    Ok(axum::http::StatusCode::NO_CONTENT)
}

pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<Uuid>,
) -> ApiResult<Json<RoomInfo>> {
    let room_id = RoomId(room_id);
    let room = state.store.get(&room_id).await?;

    // The read above may have lazily expired the room.
    if room.status == RoomStatus::Expired {
        return Err(ApiError(SignalError::Expired));
    }

    let participants = state
        .router
        .participants(&room_id)
        .into_iter()
        .map(|association| Participant {
            user_id: association.user_id,
            role: association.role,
        })
        .collect();

    Ok(Json(RoomInfo {
        room_id,
        status: room.status,
        participants,
    }))
}
