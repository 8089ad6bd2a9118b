use crate::companion::CompanionCatalog;
use crate::config::Settings;
use crate::http;
use crate::ice::IceConfigService;
use crate::signaling::{SignalingRouter, SignalingService, ws_handler};
use crate::store::RoomStore;
use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use beacon_core::SignalError;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Everything the handlers share. The store flavor is decided by whoever
/// constructs this; nothing below cares which one it got.
pub struct AppState {
    pub settings: Settings,
    pub store: Arc<dyn RoomStore>,
    pub catalog: CompanionCatalog,
    pub ice: IceConfigService,
    pub signaling: SignalingService,
    pub router: SignalingRouter,
}

impl AppState {
    pub fn new(settings: Settings, store: Arc<dyn RoomStore>) -> Result<Self, SignalError> {
        let catalog = CompanionCatalog::new(settings.companion_api_url.clone())?;
        let ice = IceConfigService::from_settings(&settings);
        let signaling = SignalingService::new();
        let router = SignalingRouter::new(store.clone(), Arc::new(signaling.clone()));

        Ok(Self {
            settings,
            store,
            catalog,
            ice,
            signaling,
            router,
        })
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    let origins: Vec<HeaderValue> = state
        .settings
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(http::health))
        .route("/rooms", post(http::create_room))
        .route(
            "/rooms/{room_id}",
            get(http::get_room).delete(http::delete_room),
        )
        .route("/chat/messages", post(http::post_message))
        .route("/chat/messages/{room_id}", get(http::chat_history))
        .route("/recordings", post(http::upload_recording))
        .route("/companions", get(http::list_companions))
        .route("/webrtc/config", get(http::webrtc_config))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(state)
}
