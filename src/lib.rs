pub mod booking;
pub mod config;
pub mod error;
pub mod models;
pub mod rate_limit;
pub mod routes;
pub mod state;
pub mod store;
pub mod sweeper;
pub mod views;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::booking::{CollectionLoader, SubmissionPipeline};
use crate::config::{Config, ObjectStoreConfig};
use crate::rate_limit::SubmissionRateLimiter;
use crate::state::{AppState, SharedState};
use crate::store::{DocumentStore, ObjectStore};

pub fn build_app(
    config: Config,
    documents: Arc<dyn DocumentStore>,
    objects: Arc<dyn ObjectStore>,
) -> (Router, SharedState) {
    let loader = Arc::new(CollectionLoader::new(documents.clone()));

    let mut pipeline = SubmissionPipeline::new(documents, objects);
    pipeline.subscribe(loader.clone());

    let submission_limiter =
        SubmissionRateLimiter::new(config.submit_rate_limit, config.submit_rate_window_secs);

    let max_body_size = config.max_body_size;
    let upload_dir = match &config.object_store {
        ObjectStoreConfig::Local { dir } => Some(dir.clone()),
        ObjectStoreConfig::Http { .. } => None,
    };

    let state: SharedState = Arc::new(AppState {
        config,
        pipeline,
        loader,
        submission_limiter,
    });

    let mut router = Router::new()
        .merge(routes::api_routes())
        .merge(views::view_routes())
        .nest_service("/static", ServeDir::new("static"))
        .route("/health", axum::routing::get(health));

    if let Some(dir) = upload_dir {
        router = router.nest_service("/uploads", ServeDir::new(dir));
    }

    // Security headers
    let app = router
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state.clone());

    (app, state)
}

async fn health() -> &'static str {
    "ok"
}
