use std::{collections::HashMap, sync::Arc};

use axum::{
    Json, Router,
    extract::Query,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use crate::{AppState, omdb::OmdbClient, store::MovieStore};

pub const TEST_API_KEY: &str = "test-key";

/// Starts a stand-in for the OMDb API on a random local port and returns its
/// base URL. Answers depend on the `t` parameter.
pub async fn fake_omdb() -> String {
    let app = Router::new().route("/", get(omdb_reply));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

/// A local URL nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}

async fn omdb_reply(Query(q): Query<HashMap<String, String>>) -> Response {
    if q.get("apikey").map(String::as_str) != Some(TEST_API_KEY) {
        return Json(json!({"Response": "False", "Error": "Invalid API key!"})).into_response();
    }

    match q.get("t").map(String::as_str) {
        Some("Dune") => Json(json!({
            "Response": "True",
            "Title": "Dune",
            "Director": "D. Villeneuve",
            "Year": "2021",
            "imdbRating": "8.0",
            "Poster": "https://img.example/dune.jpg",
        }))
        .into_response(),
        Some("Broken") => ([(header::CONTENT_TYPE, "application/json")], "{\"Response\": ")
            .into_response(),
        Some("Garbled") => Json(json!({
            "Response": "True",
            "Title": "Garbled",
            "imdbRating": "eight",
        }))
        .into_response(),
        Some("Teapot") => StatusCode::IM_A_TEAPOT.into_response(),
        _ => Json(json!({"Response": "False", "Error": "Movie not found!"})).into_response(),
    }
}

/// App state over a fresh in-memory database, with lookups sent to `omdb_url`.
pub async fn state(omdb_url: String) -> Arc<AppState> {
    let db = crate::db::connect_and_migrate("sqlite::memory:").await.unwrap();
    Arc::new(AppState {
        store: MovieStore::new(db),
        omdb: OmdbClient::new(reqwest::Client::new(), TEST_API_KEY.to_string(), omdb_url),
    })
}
