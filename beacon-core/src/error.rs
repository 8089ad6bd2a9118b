use thiserror::Error;

/// Failure taxonomy shared by the REST and streaming surfaces.
///
/// REST handlers map these to status codes; the streaming side emits a
/// targeted `error` event carrying `kind()` and leaves the connection's
/// state machine untouched.
#[derive(Debug, Error)]
pub enum SignalError {
    /// Room or companion does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The room's TTL has elapsed.
    #[error("room has expired")]
    Expired,

    /// Malformed payload, or a field failed validation.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The action requires a different connection state (e.g. signaling
    /// before joining a room).
    #[error("{0}")]
    Conflict(String),

    /// The backing store did not answer in time or refused the call.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Anything that should not happen.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SignalError {
    /// Stable machine-readable tag, carried by the `error` wire event.
    pub fn kind(&self) -> &'static str {
        match self {
            SignalError::NotFound(_) => "not_found",
            SignalError::Expired => "expired",
            SignalError::InvalidPayload(_) => "invalid_payload",
            SignalError::Conflict(_) => "conflict",
            SignalError::StoreUnavailable(_) => "store_unavailable",
            SignalError::Internal(_) => "internal",
        }
    }
}
