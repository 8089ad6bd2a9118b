pub mod error;
pub mod model;

pub use error::SignalError;
pub use model::{ConnectionId, RoomId};
