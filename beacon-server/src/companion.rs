use beacon_core::SignalError;
use beacon_core::model::Companion;
use std::time::Duration;
use tracing::{info, warn};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the external companion catalog. The coordinator only needs
/// an existence check at room-creation time; the full list is forwarded
/// to clients untouched. When the upstream is unreachable, a canned
/// fallback list keeps the room flow usable.
pub struct CompanionCatalog {
    base_url: String,
    client: reqwest::Client,
}

impl CompanionCatalog {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SignalError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| SignalError::Internal(format!("http client init failed: {e}")))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub async fn fetch_all(&self) -> Vec<Companion> {
        match self.fetch_remote().await {
            Ok(companions) => {
                info!(count = companions.len(), "fetched companions");
                companions
            }
            Err(e) => {
                warn!(error = %e, "companion catalog unreachable, serving fallback");
                Self::fallback()
            }
        }
    }

    /// Existence check by id.
    pub async fn fetch(&self, companion_id: &str) -> Option<Companion> {
        self.fetch_all()
            .await
            .into_iter()
            .find(|companion| companion.id == companion_id)
    }

    async fn fetch_remote(&self) -> Result<Vec<Companion>, reqwest::Error> {
        self.client
            .get(&self.base_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    fn fallback() -> Vec<Companion> {
        vec![
            Companion {
                id: "companion_1".into(),
                name: "Alex".into(),
                avatar_url: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=200&h=200&fit=crop&crop=face".into(),
                description: Some("A friendly and helpful companion".into()),
                voice_id: Some("voice_1".into()),
                personality: Some("Friendly and supportive".into()),
                metadata: None,
            },
            Companion {
                id: "companion_2".into(),
                name: "Sarah".into(),
                avatar_url: "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=200&h=200&fit=crop&crop=face".into(),
                description: Some("An intelligent and curious companion".into()),
                voice_id: Some("voice_2".into()),
                personality: Some("Intelligent and curious".into()),
                metadata: None,
            },
            Companion {
                id: "companion_3".into(),
                name: "Marcus".into(),
                avatar_url: "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=200&h=200&fit=crop&crop=face".into(),
                description: Some("A creative and artistic companion".into()),
                voice_id: Some("voice_3".into()),
                personality: Some("Creative and artistic".into()),
                metadata: None,
            },
        ]
    }
}
