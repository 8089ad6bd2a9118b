mod chat;
mod companion;
mod event;
mod ice;
mod ids;
mod room;

pub use chat::{ChatMessage, Recording, SignalKind, SignalRecord};
pub use companion::Companion;
pub use event::{ClientEvent, ServerEvent};
pub use ice::{IceConfig, IceServerConfig};
pub use ids::{ConnectionId, RoomId};
pub use room::{Room, RoomStatus, UserRole};
