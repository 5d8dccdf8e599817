use std::net::SocketAddr;
use std::sync::Arc;

use dotenv;
use log::*;

use presage_config::{read_config, CONFIG};
use presence::{ConfigStore, PresenceController};

use discord::DiscordSession;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    env_logger::init();

    debug!("config = {:?}", *CONFIG);

    let store = ConfigStore::new(read_config!(storage.config_path).clone());
    let session = Arc::new(DiscordSession::new());
    let controller = PresenceController::new(session.clone());

    let addr: SocketAddr = format!("{}:{}", read_config!(web.bind_address), read_config!(web.port))
        .parse()
        .expect("invalid web.bind_address/web.port");

    let routes = webapi::get_web_filter(store.clone(), controller.clone());
    tokio::spawn(async move {
        warp::serve(routes).run(addr).await;
    });
    info!("dashboard listening on http://{}", addr);

    let mut client = discord::client::create_client(session, controller, store).await;

    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
    }
}
