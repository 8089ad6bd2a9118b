use std::env;
use std::net::IpAddr;
use std::time::Duration;

/// Runtime configuration, read once at startup from the environment.
///
/// `REDIS_URL` decides the store flavor: set, the coordinator persists
/// rooms durably; unset, it runs on the in-process store and room state
/// dies with the process.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: IpAddr,
    pub port: u16,
    pub redis_url: Option<String>,
    pub companion_api_url: String,
    pub turn_server_url: String,
    pub turn_username: Option<String>,
    pub turn_credential: Option<String>,
    pub cors_origins: Vec<String>,
    pub default_room_ttl: Duration,
    pub store_timeout: Duration,
}

const DEFAULT_COMPANION_API_URL: &str = "https://persona-fetcher-api.up.railway.app/personas";
const DEFAULT_TURN_SERVER_URL: &str = "turn:global.turn.twilio.com:3478";
const DEFAULT_ROOM_TTL_MINUTES: u64 = 60;
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 5;

impl Settings {
    pub fn from_env() -> Self {
        let host = env::var("HOST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(IpAddr::from([0, 0, 0, 0]));
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8000);

        let redis_url = env::var("REDIS_URL").ok().filter(|v| !v.is_empty());

        let companion_api_url = env::var("PERSONA_FETCHER_API_URL")
            .unwrap_or_else(|_| DEFAULT_COMPANION_API_URL.to_string());

        let turn_server_url =
            env::var("TURN_SERVER_URL").unwrap_or_else(|_| DEFAULT_TURN_SERVER_URL.to_string());
        let turn_username = env::var("TURN_USERNAME").ok().filter(|v| !v.is_empty());
        let turn_credential = env::var("TURN_CREDENTIAL").ok().filter(|v| !v.is_empty());

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                ]
            });

        let default_room_ttl = env::var("ROOM_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(|minutes: u64| Duration::from_secs(minutes * 60))
            .unwrap_or(Duration::from_secs(DEFAULT_ROOM_TTL_MINUTES * 60));

        let store_timeout = env::var("STORE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS));

        Self {
            host,
            port,
            redis_url,
            companion_api_url,
            turn_server_url,
            turn_username,
            turn_credential,
            cors_origins,
            default_room_ttl,
            store_timeout,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
