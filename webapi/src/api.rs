use std::convert::Infallible;

use log::*;
use serde_json::{json, Value};

use warp::{
    Filter,
    Reply,
    hyper::StatusCode,
};

use model::web::{
    ApiReply,
    AssetsReply,
    ConfigReply,
    QuickSetRequest,
    StatusReply,
};
use presence::{ConfigStore, PresenceController, PresenceError};

fn json_error(status: StatusCode, message: String) -> warp::reply::Response {
    let mut resp = warp::reply::json(&ApiReply::err(message)).into_response();
    *resp.status_mut() = status;
    resp
}

fn error_reply(e: &PresenceError) -> warp::reply::Response {
    debug!("rejecting request: {}", e);

    let status = match e {
        PresenceError::Validation(_) | PresenceError::SessionNotReady => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    json_error(status, e.to_string())
}

fn not_ready() -> warp::reply::Response {
    json_error(StatusCode::BAD_REQUEST, PresenceError::SessionNotReady.to_string())
}

fn missing_fields(missing: &[&str]) -> warp::reply::Response {
    json_error(StatusCode::BAD_REQUEST, format!("missing {}", missing.join(" and ")))
}

async fn get_config(store: ConfigStore) -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::json(&ConfigReply::new(store.load())))
}

async fn update_config(store: ConfigStore, patch: Value) -> Result<impl warp::Reply, Infallible> {
    match store.merge_and_save(&patch) {
        Ok(config) => Ok(warp::reply::json(&ConfigReply::with_message(config, "Configuration saved.")).into_response()),
        Err(e) => Ok(error_reply(&e)),
    }
}

async fn start_presence(store: ConfigStore, controller: PresenceController) -> Result<impl warp::Reply, Infallible> {
    if !controller.session().ready() {
        return Ok(not_ready());
    }

    let merged = match store.merge(&json!({ "enabled": true })) {
        Ok(c) => c,
        Err(e) => return Ok(error_reply(&e)),
    };

    let missing = merged.missing_required();
    if !missing.is_empty() {
        return Ok(missing_fields(&missing));
    }

    if let Err(e) = store.save(&merged) {
        return Ok(error_reply(&e));
    }

    match controller.apply(&merged).await {
        Ok(ok) => Ok(warp::reply::json(&ApiReply::ok(ok.to_string())).into_response()),
        Err(e) => Ok(error_reply(&e)),
    }
}

async fn stop_presence(store: ConfigStore, controller: PresenceController) -> Result<impl warp::Reply, Infallible> {
    if !controller.session().ready() {
        return Ok(not_ready());
    }

    let merged = match store.merge(&json!({ "enabled": false })) {
        Ok(c) => c,
        Err(e) => return Ok(error_reply(&e)),
    };

    if let Err(e) = store.save(&merged) {
        return Ok(error_reply(&e));
    }

    match controller.clear().await {
        Ok(ok) => Ok(warp::reply::json(&ApiReply::ok(ok.to_string())).into_response()),
        Err(e) => Ok(error_reply(&e)),
    }
}

async fn quick_set(
    store: ConfigStore,
    controller: PresenceController,
    body: QuickSetRequest,
) -> Result<impl warp::Reply, Infallible> {
    if !controller.session().ready() {
        return Ok(not_ready());
    }

    let mut patch = match serde_json::to_value(&body) {
        Ok(Value::Object(map)) => map,
        _ => return Ok(json_error(StatusCode::BAD_REQUEST, "expected a JSON object".to_string())),
    };
    patch.insert("enabled".to_string(), Value::Bool(true));

    let merged = match store.merge(&Value::Object(patch)) {
        Ok(c) => c,
        Err(e) => return Ok(error_reply(&e)),
    };

    // required fields are checked before anything lands on disk
    let missing = merged.missing_required();
    if !missing.is_empty() {
        return Ok(missing_fields(&missing));
    }

    if let Err(e) = store.save(&merged) {
        return Ok(error_reply(&e));
    }

    match controller.apply(&merged).await {
        Ok(ok) => Ok(warp::reply::json(&ConfigReply::with_message(merged, ok.to_string())).into_response()),
        Err(e) => Ok(error_reply(&e)),
    }
}

async fn reset_config(store: ConfigStore, controller: PresenceController) -> Result<impl warp::Reply, Infallible> {
    let config = match store.reset() {
        Ok(c) => c,
        Err(e) => return Ok(error_reply(&e)),
    };

    // best effort; resetting while disconnected is still a reset
    if controller.session().ready() {
        if let Err(e) = controller.clear().await {
            debug!("clear after reset failed: {}", e);
        }
    }

    Ok(warp::reply::json(&ConfigReply::with_message(config, "Configuration reset.")).into_response())
}

async fn show_status(store: ConfigStore, controller: PresenceController) -> Result<impl warp::Reply, Infallible> {
    let session = controller.session();

    Ok(warp::reply::json(&StatusReply {
        success: true,
        connected: session.ready(),
        user: session.username(),
        enabled: store.load().enabled,
    }))
}

async fn list_assets(application_id: String, controller: PresenceController) -> Result<impl warp::Reply, Infallible> {
    let assets = controller.fetch_assets(&application_id).await;

    Ok(warp::reply::json(&AssetsReply {
        success: true,
        assets,
    }))
}

pub fn get_api_filter(
    store: ConfigStore,
    controller: PresenceController,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let store = warp::any().map(move || store.clone());
    let controller = warp::any().map(move || controller.clone());

    // Arbitrary length limit, config patches are small
    let limit = warp::body::content_length_limit(4096);

    let config_get = warp::get()
        .and(warp::path("api"))
        .and(warp::path("config"))
        .and(warp::path::end())
        .and(store.clone())
        .and_then(get_config);

    let config_post = warp::post()
        .and(warp::path("api"))
        .and(warp::path("config"))
        .and(warp::path::end())
        .and(store.clone())
        .and(limit.clone().and(warp::body::json()))
        .and_then(update_config);

    // PUT is accepted as an alias for the same partial update
    let config_put = warp::put()
        .and(warp::path("api"))
        .and(warp::path("config"))
        .and(warp::path::end())
        .and(store.clone())
        .and(limit.clone().and(warp::body::json()))
        .and_then(update_config);

    let start = warp::post()
        .and(warp::path("api"))
        .and(warp::path("start"))
        .and(warp::path::end())
        .and(store.clone())
        .and(controller.clone())
        .and_then(start_presence);

    let stop = warp::post()
        .and(warp::path("api"))
        .and(warp::path("stop"))
        .and(warp::path::end())
        .and(store.clone())
        .and(controller.clone())
        .and_then(stop_presence);

    let quickset = warp::post()
        .and(warp::path("api"))
        .and(warp::path("quickset"))
        .and(warp::path::end())
        .and(store.clone())
        .and(controller.clone())
        .and(limit.and(warp::body::json()))
        .and_then(quick_set);

    let reset = warp::post()
        .and(warp::path("api"))
        .and(warp::path("reset"))
        .and(warp::path::end())
        .and(store.clone())
        .and(controller.clone())
        .and_then(reset_config);

    let status = warp::get()
        .and(warp::path("api"))
        .and(warp::path("status"))
        .and(warp::path::end())
        .and(store.clone())
        .and(controller.clone())
        .and_then(show_status);

    let assets = warp::get()
        .and(warp::path("api"))
        .and(warp::path("assets"))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(controller)
        .and_then(list_assets);

    config_get
        .or(config_post)
        .or(config_put)
        .or(start)
        .or(stop)
        .or(quickset)
        .or(reset)
        .or(status)
        .or(assets)
}
