use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;

use super::handlers::{not_found, scrape_jobs};
use super::middleware::{handle_panic, log_request};
use super::state::AppState;

pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/scrape-jobs", get(scrape_jobs))
        .fallback(not_found)
        .layer(from_fn(log_request))
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}
