use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::{Health, LIVENESS_BANNER};
use service::guitars::GuitarRepository;

pub mod admin;
pub mod guitars;

/// Shared handler state: the one guitar collection for this process.
#[derive(Clone)]
pub struct ServerState {
    pub guitars: Arc<dyn GuitarRepository>,
}

pub async fn root() -> &'static str {
    LIVENESS_BANNER
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: liveness, guitar CRUD and admin reload.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health));

    let guitar_routes = Router::new()
        .route("/guitars", get(guitars::list_guitars).post(guitars::create_guitar))
        .route(
            "/guitars/:id",
            get(guitars::get_guitar)
                .put(guitars::update_guitar)
                .delete(guitars::delete_guitar),
        );

    // `/refresh` is kept as an alias for older clients
    let admin_routes = Router::new()
        .route("/admin/refresh", post(admin::refresh))
        .route("/refresh", post(admin::refresh));

    public
        .merge(guitar_routes)
        .merge(admin_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
