use axum::Router;
use axum::http::{Method, header};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::state::AppState;

pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_DISPOSITION])
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route(
            "/api/generate-contract",
            get(handlers::generate_probe).post(handlers::generate_contract),
        )
        // Path used by the single-function deployments
        .route("/generate-contract", post(handlers::generate_contract))
        .route("/api/template-info", get(handlers::template_info))
        .layer(cors())
        .with_state(state)
}
