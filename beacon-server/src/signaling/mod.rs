mod connection_registry;
mod output;
mod router;
mod signaling_service;
mod ws_handler;

pub use connection_registry::{Association, ConnectionRegistry};
pub use output::SignalingOutput;
pub use router::SignalingRouter;
pub use signaling_service::SignalingService;
pub use ws_handler::ws_handler;
