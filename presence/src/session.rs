use async_trait::async_trait;

use model::{AssetDescriptor, PresencePayload};

use crate::controller::PresenceError;

/// The capability set the controller needs from the platform connection.
/// Implemented by the live gateway adapter in the discord crate, and by
/// fakes in tests.
#[async_trait]
pub trait Session: Send + Sync {
    /// Whether the session is connected and able to take presence updates.
    fn ready(&self) -> bool;

    /// Id of the logged-in account, once connected.
    fn user_id(&self) -> Option<String>;

    /// Display name of the logged-in account, once connected.
    fn username(&self) -> Option<String>;

    async fn set_activity(&self, payload: &PresencePayload) -> Result<(), PresenceError>;

    async fn clear_activity(&self) -> Result<(), PresenceError>;

    async fn fetch_assets(&self, application_id: &str) -> Result<Vec<AssetDescriptor>, PresenceError>;
}
