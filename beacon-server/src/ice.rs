use crate::config::Settings;
use beacon_core::model::{IceConfig, IceServerConfig};

/// Assembles the ICE server list handed out over `/webrtc/config`:
/// static public STUN entries, plus one TURN entry when credentials are
/// configured.
#[derive(Clone)]
pub struct IceConfigService {
    servers: Vec<IceServerConfig>,
}

impl IceConfigService {
    pub fn from_settings(settings: &Settings) -> Self {
        let mut servers = vec![
            IceServerConfig {
                urls: vec!["stun:stun.l.google.com:19302".into()],
                username: None,
                credential: None,
            },
            IceServerConfig {
                urls: vec!["stun:stun1.l.google.com:19302".into()],
                username: None,
                credential: None,
            },
            IceServerConfig {
                urls: vec!["stun:stun2.l.google.com:19302".into()],
                username: None,
                credential: None,
            },
        ];

        if let (Some(username), Some(credential)) =
            (&settings.turn_username, &settings.turn_credential)
        {
            servers.push(IceServerConfig {
                urls: vec![settings.turn_server_url.clone()],
                username: Some(username.clone()),
                credential: Some(credential.clone()),
            });
        }

        Self { servers }
    }

    pub fn ice_config(&self) -> IceConfig {
        IceConfig {
            ice_servers: self.servers.clone(),
        }
    }
}
