use std::fmt;
use std::sync::Arc;

use log::*;

use model::{AssetDescriptor, PresenceConfig};

use crate::builder::{self, BuildOutcome};
use crate::session::Session;

#[allow(dead_code)]
#[non_exhaustive]
#[derive(Debug)]
pub enum PresenceOk {
    Applied,
    Cleared,
    Saved,
    Reset,
}

impl fmt::Display for PresenceOk {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[allow(unreachable_patterns)]
        let ret = match self {
            PresenceOk::Applied => "Presence applied.",
            PresenceOk::Cleared => "Presence cleared.",
            PresenceOk::Saved   => "Configuration saved.",
            PresenceOk::Reset   => "Configuration reset.",
            _ => "Unknown response, fill me in!",
        };

        write!(f, "{}", ret)
    }
}

#[non_exhaustive]
#[derive(Debug)]
pub enum PresenceError {
    Storage(String),
    Validation(String),
    SessionNotReady,
    Session(String),
    AssetLookup(String),
}

impl fmt::Display for PresenceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[allow(unreachable_patterns)]
        match self {
            PresenceError::Storage(e)      => write!(f, "storage failure: {}", e),
            PresenceError::Validation(e)   => write!(f, "invalid configuration: {}", e),
            PresenceError::SessionNotReady => write!(f, "session is not connected yet"),
            PresenceError::Session(e)      => write!(f, "session error: {}", e),
            PresenceError::AssetLookup(e)  => write!(f, "asset lookup failed: {}", e),
            _ => write!(f, "unknown error"),
        }
    }
}

pub type PresenceResult = Result<PresenceOk, PresenceError>;

/// Drives apply/clear against the live session. Cheap to clone; every
/// frontend gets its own handle to the same session.
#[derive(Clone)]
pub struct PresenceController {
    session: Arc<dyn Session>,
}

impl PresenceController {
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Arc<dyn Session> {
        &self.session
    }

    /// Build the payload for `config` and submit it. A disabled config
    /// clears instead. Validation and readiness are checked before the
    /// session is touched.
    pub async fn apply(&self, config: &PresenceConfig) -> PresenceResult {
        if !self.session.ready() {
            return Err(PresenceError::SessionNotReady);
        }

        let user_id = self.session.user_id().unwrap_or_default();

        match builder::build(config, &user_id)? {
            BuildOutcome::Clear => self.clear().await,
            BuildOutcome::Activity(payload) => {
                self.session.set_activity(&payload).await?;

                info!(
                    "applied presence: app={} name={:?} kind={} images={} buttons={}",
                    payload.application_id,
                    payload.name,
                    payload.kind,
                    payload.large_image.is_some() || payload.small_image.is_some(),
                    payload.buttons.len(),
                );

                Ok(PresenceOk::Applied)
            }
        }
    }

    /// Set an empty activity with online status. Clearing an already-clear
    /// presence is a no-op success.
    pub async fn clear(&self) -> PresenceResult {
        if !self.session.ready() {
            return Err(PresenceError::SessionNotReady);
        }

        self.session.clear_activity().await?;
        debug!("cleared presence");

        Ok(PresenceOk::Cleared)
    }

    /// Best-effort lookup of an application's asset catalogue. Failures
    /// collapse to an empty list here; this is enrichment, not critical path.
    pub async fn fetch_assets(&self, application_id: &str) -> Vec<AssetDescriptor> {
        match self.session.fetch_assets(application_id).await {
            Ok(assets) => assets,
            Err(e) => {
                debug!("asset lookup for {} failed: {}", application_id, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use model::{ActivityKind, PresencePayload};

    struct FakeSession {
        ready: bool,
        assets: Result<Vec<AssetDescriptor>, ()>,
        applied: Mutex<Vec<PresencePayload>>,
        clears: AtomicUsize,
    }

    impl FakeSession {
        fn new(ready: bool) -> Self {
            Self {
                ready,
                assets: Ok(Vec::new()),
                applied: Mutex::new(Vec::new()),
                clears: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Session for FakeSession {
        fn ready(&self) -> bool {
            self.ready
        }

        fn user_id(&self) -> Option<String> {
            self.ready.then(|| "99".to_string())
        }

        fn username(&self) -> Option<String> {
            self.ready.then(|| "tester".to_string())
        }

        async fn set_activity(&self, payload: &PresencePayload) -> Result<(), PresenceError> {
            self.applied.lock().unwrap().push(payload.clone());
            Ok(())
        }

        async fn clear_activity(&self) -> Result<(), PresenceError> {
            self.clears.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn fetch_assets(&self, _application_id: &str) -> Result<Vec<AssetDescriptor>, PresenceError> {
            match &self.assets {
                Ok(assets) => Ok(assets.clone()),
                Err(()) => Err(PresenceError::AssetLookup("boom".to_string())),
            }
        }
    }

    fn enabled_config() -> PresenceConfig {
        PresenceConfig {
            enabled: true,
            application_id: Some("123".to_string()),
            name: Some("Chess".to_string()),
            ..PresenceConfig::default()
        }
    }

    #[tokio::test]
    async fn apply_requires_a_ready_session() {
        let controller = PresenceController::new(Arc::new(FakeSession::new(false)));

        let err = controller.apply(&enabled_config()).await.unwrap_err();
        assert!(matches!(err, PresenceError::SessionNotReady));
    }

    #[tokio::test]
    async fn apply_forwards_the_built_payload() {
        let session = Arc::new(FakeSession::new(true));
        let controller = PresenceController::new(session.clone());

        controller.apply(&enabled_config()).await.unwrap();

        let applied = session.applied.lock().unwrap();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].name, "Chess");
        assert_eq!(applied[0].kind, ActivityKind::Playing);
    }

    #[tokio::test]
    async fn disabled_config_clears_instead() {
        let session = Arc::new(FakeSession::new(true));
        let controller = PresenceController::new(session.clone());

        let config = PresenceConfig {
            enabled: false,
            ..enabled_config()
        };

        let ok = controller.apply(&config).await.unwrap();
        assert!(matches!(ok, PresenceOk::Cleared));
        assert!(session.applied.lock().unwrap().is_empty());
        assert_eq!(session.clears.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn clear_twice_is_fine() {
        let session = Arc::new(FakeSession::new(true));
        let controller = PresenceController::new(session.clone());

        controller.clear().await.unwrap();
        controller.clear().await.unwrap();
        assert_eq!(session.clears.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn asset_lookup_failure_collapses_to_empty() {
        let mut session = FakeSession::new(true);
        session.assets = Err(());
        let controller = PresenceController::new(Arc::new(session));

        assert!(controller.fetch_assets("123").await.is_empty());
    }

    #[tokio::test]
    async fn validation_error_propagates_unchanged() {
        let session = Arc::new(FakeSession::new(true));
        let controller = PresenceController::new(session.clone());

        let config = PresenceConfig {
            enabled: true,
            application_id: None,
            ..PresenceConfig::default()
        };

        let err = controller.apply(&config).await.unwrap_err();
        assert!(matches!(err, PresenceError::Validation(_)));
        assert!(session.applied.lock().unwrap().is_empty());
    }
}
