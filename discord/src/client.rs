use std::{
    env,
    sync::Arc,
};

use log::*;

use serenity::{
    async_trait,
    client::ClientBuilder,
    model::gateway::Ready,
    prelude::*,
};

use presence::{ConfigStore, PresenceController};

use crate::session::DiscordSession;

struct Handler;

#[async_trait]
impl EventHandler for Handler {
    // Called when a shard is booted and Discord sends the READY payload,
    // which carries the logged-in user. First connect triggers the one-time
    // auto-apply of the persisted record.
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        let (session, controller, store) = {
            let data = ctx.data.read().await;

            let session = data.get::<SessionKey>().cloned();
            let controller = data.get::<ControllerKey>().cloned();
            let store = data.get::<ConfigStoreKey>().cloned();

            match (session, controller, store) {
                (Some(s), Some(c), Some(st)) => (s, c, st),
                _ => {
                    error!("client data is missing its presence state, skipping auto-apply");
                    return;
                }
            }
        };

        let first = session.connect(ctx.shard.clone(), ready.user.id, ready.user.name.clone());
        if !first {
            debug!("gateway session resumed, leaving presence as-is");
            return;
        }

        let config = store.load();
        if config.enabled && config.application_id.is_some() {
            match controller.apply(&config).await {
                Ok(ok) => info!("startup presence: {}", ok),
                Err(e) => error!("startup presence apply failed: {}", e),
            }
        }
    }
}

/* Enter mess to make the singleton magic via serenity here */
pub struct SessionKey;

impl TypeMapKey for SessionKey {
    type Value = Arc<DiscordSession>;
}

pub trait SessionInit {
    fn register_session(self, session: Arc<DiscordSession>) -> Self;
}

impl SessionInit for ClientBuilder<'_> {
    fn register_session(self, session: Arc<DiscordSession>) -> Self {
        self.type_map_insert::<SessionKey>(session)
    }
}

pub struct ControllerKey;

impl TypeMapKey for ControllerKey {
    type Value = PresenceController;
}

pub trait ControllerInit {
    fn register_controller(self, controller: PresenceController) -> Self;
}

impl ControllerInit for ClientBuilder<'_> {
    fn register_controller(self, controller: PresenceController) -> Self {
        self.type_map_insert::<ControllerKey>(controller)
    }
}

pub struct ConfigStoreKey;

impl TypeMapKey for ConfigStoreKey {
    type Value = ConfigStore;
}

pub trait ConfigStoreInit {
    fn register_store(self, store: ConfigStore) -> Self;
}

impl ConfigStoreInit for ClientBuilder<'_> {
    fn register_store(self, store: ConfigStore) -> Self {
        self.type_map_insert::<ConfigStoreKey>(store)
    }
}

pub async fn create_client(
    session: Arc<DiscordSession>,
    controller: PresenceController,
    store: ConfigStore,
) -> serenity::Client {
    let token = env::var("DISCORD_TOKEN").expect("Must provide env var DISCORD_TOKEN");

    // Create a new instance of the Client, logging in as a bot. Shards will
    // automatically attempt to reconnect with exponential backoff.
    let client =
        Client::builder(&token)
            .event_handler(Handler)
            .register_session(session)
            .register_controller(controller)
            .register_store(store)
            .await.expect("Err creating client");

    client
}
