mod config;
mod db;
mod entities;
mod error;
mod flash;
mod models;
mod omdb;
mod routes;
mod store;
mod templates;
#[cfg(test)]
mod test_support;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{config::Config, omdb::OmdbClient, store::MovieStore};

pub struct AppState {
    pub store: MovieStore,
    pub omdb: OmdbClient,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,moviweb=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let http = reqwest::Client::builder()
        .user_agent("moviweb/0.1")
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?;

    let db = db::connect_and_migrate(&config.database_url).await?;

    let state = Arc::new(AppState {
        store: MovieStore::new(db),
        omdb: OmdbClient::new(http, config.omdb_api_key.clone(), config.omdb_base_url.clone()),
    });

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app(state)).await?;

    Ok(())
}

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/users", post(routes::add_user))
        .route("/users/{user_id}/delete", post(routes::delete_user))
        .route("/users/{user_id}/movies", get(routes::user_movies))
        .route(
            "/users/{user_id}/add_movie",
            get(routes::add_movie_form).post(routes::add_movie),
        )
        .route(
            "/users/{user_id}/movies/{movie_id}/update",
            get(routes::update_movie_form).post(routes::update_movie),
        )
        .route("/users/{user_id}/movies/{movie_id}/delete", post(routes::delete_movie))
        .fallback(routes::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
