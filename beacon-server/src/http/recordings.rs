use crate::app::AppState;
use crate::http::ApiResult;
use axum::Json;
use axum::extract::State;
use beacon_core::RoomId;
use beacon_core::model::Recording;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecordingRequest {
    pub recording_id: String,
    pub room_id: RoomId,
    pub url: String,
}

pub async fn upload_recording(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UploadRecordingRequest>,
) -> ApiResult<Json<Recording>> {
    // Recordings only attach to rooms that exist (expired or not).
    state.store.get(&request.room_id).await?;

    let recording = Recording {
        recording_id: request.recording_id,
        room_id: request.room_id,
        url: request.url,
        uploaded_at: Utc::now(),
    };
    state.store.store_recording(recording.clone()).await?;

    info!(
        recording_id = %recording.recording_id,
        room_id = %recording.room_id,
        "stored recording"
    );
    Ok(Json(recording))
}
