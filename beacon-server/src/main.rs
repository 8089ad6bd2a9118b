use anyhow::Result;
use beacon_server::{AppState, MemoryRoomStore, RedisRoomStore, RoomStore, Settings, app};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{Level, info};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("starting beacon signaling coordinator");

    let settings = Settings::from_env();

    let store: Arc<dyn RoomStore> = match &settings.redis_url {
        Some(url) => {
            info!("room store: redis (durable)");
            Arc::new(
                RedisRoomStore::connect(url, settings.store_timeout, settings.default_room_ttl)
                    .await?,
            )
        }
        None => {
            info!("room store: in-memory (volatile, lost on restart)");
            Arc::new(MemoryRoomStore::new())
        }
    };

    let addr = SocketAddr::from((settings.host, settings.port));
    let state = Arc::new(AppState::new(settings, store)?);
    let app = app::app(state);

    info!("signaling server listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
