mod chat;
mod companions;
mod health;
mod recordings;
mod rooms;
mod webrtc;

pub use chat::{chat_history, post_message};
pub use companions::list_companions;
pub use health::health;
pub use recordings::upload_recording;
pub use rooms::{create_room, delete_room, get_room};
pub use webrtc::webrtc_config;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use beacon_core::SignalError;
use serde_json::json;

pub type ApiResult<T> = Result<T, ApiError>;

/// REST-side wrapper mapping the shared failure taxonomy onto status
/// codes. The body carries the same `kind` tag the streaming `error`
/// event uses.
pub struct ApiError(pub SignalError);

impl From<SignalError> for ApiError {
    fn from(err: SignalError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SignalError::NotFound(_) => StatusCode::NOT_FOUND,
            SignalError::Expired => StatusCode::GONE,
            SignalError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            SignalError::Conflict(_) => StatusCode::CONFLICT,
            SignalError::StoreUnavailable(_) | SignalError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.0.to_string(),
            "kind": self.0.kind(),
        }));

        (status, body).into_response()
    }
}
