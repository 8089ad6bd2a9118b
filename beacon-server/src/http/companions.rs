use crate::app::AppState;
use axum::Json;
use axum::extract::State;
use beacon_core::model::Companion;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct CompanionsResponse {
    pub companions: Vec<Companion>,
}

pub async fn list_companions(State(state): State<Arc<AppState>>) -> Json<CompanionsResponse> {
    Json(CompanionsResponse {
        companions: state.catalog.fetch_all().await,
    })
}
