use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use service::cafes::CafeRepository;

pub mod cafes;

/// The HTTP layer only sees the repository capability, never the file path.
pub type SharedRepo = Arc<dyn CafeRepository>;

/// Build the full application router: the five /cafes routes plus the
/// catch-all. The catch-all is also installed per method router so an
/// unlisted method on a known path gets the same 404 instead of a bare 405.
pub fn build_router(repo: SharedRepo, cors: CorsLayer) -> Router {
    Router::new()
        .route(
            "/cafes",
            get(cafes::list_cafes)
                .post(cafes::create_cafe)
                .fallback(cafes::unknown_route),
        )
        .route(
            "/cafes/:id",
            get(cafes::get_cafe)
                .put(cafes::update_cafe)
                .delete(cafes::delete_cafe)
                .fallback(cafes::unknown_route),
        )
        .fallback(cafes::unknown_route)
        .with_state(repo)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one span per request, method and path included
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // response side carries status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
