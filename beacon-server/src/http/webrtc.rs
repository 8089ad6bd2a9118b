use crate::app::AppState;
use axum::Json;
use axum::extract::State;
use beacon_core::model::IceConfig;
use std::sync::Arc;

pub async fn webrtc_config(State(state): State<Arc<AppState>>) -> Json<IceConfig> {
    Json(state.ice.ice_config())
}
