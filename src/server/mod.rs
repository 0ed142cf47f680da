mod routes;

use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::Router;
use reqwest::Client;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::storage::SqliteStorage;

/// Shared application state; storage handles are passed in explicitly
/// at startup rather than living in globals.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub storage: Arc<SqliteStorage>,
    pub client: Client,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/scrape", get(routes::scrape))
        .route("/add_to_bucket_list", post(routes::add_to_bucket_list))
        .route("/get_bucket_list", get(routes::get_bucket_list))
        .route("/update_bucket_list/:id", put(routes::update_bucket_list))
        .route(
            "/delete_from_bucket_list/:id",
            delete(routes::delete_from_bucket_list),
        )
        .route("/price-history", get(routes::price_history))
        .route("/configure-email", post(routes::configure_email))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
