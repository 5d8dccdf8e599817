use warp::Filter;
use rust_embed::RustEmbed;
use log::*;

#[derive(RustEmbed)]
#[folder = "static/"]
struct EmbeddedDashboard;

fn serve(filename: &str) -> warp::http::Result<warp::http::Response<Vec<u8>>> {
    let file = EmbeddedDashboard::iter().find(|f| *f == filename);
    debug!("GET /{}", filename);

    if let Some(data) = file {
        let mime = mime_guess::from_path(filename).first();
        let data = EmbeddedDashboard::get(&data).unwrap().data;

        if let Some(mime) = mime {
            warp::http::Response::builder()
                .header("Content-Type", mime.to_string())
                .body(Vec::from(data))
        } else {
            warp::http::Response::builder().status(500).body(Vec::new())
        }
    } else {
        warn!("file not embedded: {}", filename);
        warp::http::Response::builder().status(404).body(Vec::new())
    }
}

pub fn get_embedded_file_filter() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let index = warp::get()
        .and(warp::path::end())
        .map(|| serve("index.html"));

    let files = warp::get()
        .and(warp::path::param())
        .and(warp::path::end())
        .map(|filename: String| serve(&filename));

    index.or(files)
}
