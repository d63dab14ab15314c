use axum::http::Request;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

/// Span per request carrying the method and matched path.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuilderSpan;

impl<B> MakeSpan<B> for BuilderSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
        )
    }
}

pub fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, BuilderSpan> {
    TraceLayer::new_for_http()
        .make_span_with(BuilderSpan)
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}
