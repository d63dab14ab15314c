use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// The builder UI is served from a different origin than the API, so any
/// origin may call it. Only the verbs the session routes use are allowed.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
