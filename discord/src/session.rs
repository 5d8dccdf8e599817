use std::sync::RwLock;

use async_trait::async_trait;

use serenity::client::bridge::gateway::ShardMessenger;
use serenity::model::id::UserId;
use serenity::model::user::OnlineStatus;

use model::{AssetDescriptor, PresencePayload};
use presence::session::Session;
use presence::PresenceError;

use crate::activity::to_activity;

/// Where the platform publishes an application's uploaded asset catalogue.
/// Public endpoint, no auth required.
const ASSET_ENDPOINT: &str = "https://discord.com/api/v9/oauth2/applications";

struct Connected {
    shard: ShardMessenger,
    user_id: UserId,
    username: String,
}

/// Process-wide handle to the gateway connection. Starts disconnected; the
/// ready event marks it connected and captures the shard messenger that
/// presence updates go out through.
pub struct DiscordSession {
    inner: RwLock<Option<Connected>>,
}

impl DiscordSession {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// Record the connected gateway session. Returns true on the first
    /// connect, so the caller can run one-time startup work.
    pub fn connect(&self, shard: ShardMessenger, user_id: UserId, username: String) -> bool {
        let mut inner = self.inner.write().unwrap();
        let first = inner.is_none();

        *inner = Some(Connected {
            shard,
            user_id,
            username,
        });

        first
    }
}

impl Default for DiscordSession {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Session for DiscordSession {
    fn ready(&self) -> bool {
        self.inner.read().unwrap().is_some()
    }

    fn user_id(&self) -> Option<String> {
        self.inner.read().unwrap().as_ref().map(|c| c.user_id.to_string())
    }

    fn username(&self) -> Option<String> {
        self.inner.read().unwrap().as_ref().map(|c| c.username.clone())
    }

    async fn set_activity(&self, payload: &PresencePayload) -> Result<(), PresenceError> {
        let activity = to_activity(payload);

        let inner = self.inner.read().unwrap();
        match inner.as_ref() {
            Some(connected) => {
                connected.shard.set_presence(Some(activity), OnlineStatus::Online);
                Ok(())
            }
            None => Err(PresenceError::SessionNotReady),
        }
    }

    async fn clear_activity(&self) -> Result<(), PresenceError> {
        let inner = self.inner.read().unwrap();
        match inner.as_ref() {
            Some(connected) => {
                connected.shard.set_presence(None, OnlineStatus::Online);
                Ok(())
            }
            None => Err(PresenceError::SessionNotReady),
        }
    }

    async fn fetch_assets(&self, application_id: &str) -> Result<Vec<AssetDescriptor>, PresenceError> {
        let url = format!("{}/{}/assets", ASSET_ENDPOINT, application_id);

        let response = reqwest::get(&url)
            .await
            .map_err(|e| PresenceError::AssetLookup(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PresenceError::AssetLookup(format!("status {}", response.status())));
        }

        response
            .json::<Vec<AssetDescriptor>>()
            .await
            .map_err(|e| PresenceError::AssetLookup(e.to_string()))
    }
}
