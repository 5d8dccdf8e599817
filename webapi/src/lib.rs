pub mod api;
pub mod embed;

use warp::Filter;

use presence::{ConfigStore, PresenceController};

/// The whole web surface: JSON API plus the embedded dashboard page.
pub fn get_web_filter(
    store: ConfigStore,
    controller: PresenceController,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    api::get_api_filter(store, controller)
        .or(embed::get_embedded_file_filter())
}
