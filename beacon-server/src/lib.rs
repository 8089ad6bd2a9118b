pub mod app;
pub mod companion;
pub mod config;
pub mod http;
pub mod ice;
pub mod signaling;
pub mod store;

pub use app::AppState;
pub use companion::CompanionCatalog;
pub use config::Settings;
pub use ice::IceConfigService;
pub use signaling::{
    Association, ConnectionRegistry, SignalingOutput, SignalingRouter, SignalingService,
};
pub use store::{BoundedLog, MemoryRoomStore, RedisRoomStore, RoomStore};
