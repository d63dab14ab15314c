use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/ping", get(ping))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthReport {
    status: &'static str,
    store: &'static str,
    open_sessions: usize,
    subscribers: usize,
}

/// Fails with 500 when the page store cannot be reached.
async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthReport>> {
    state
        .store()
        .ping()
        .await
        .map_err(|e| ApiError::Internal(format!("page store health check failed: {e}")))?;

    Ok(Json(HealthReport {
        status: "ok",
        store: state.store().backend(),
        open_sessions: state.session_count().await,
        subscribers: state.event_bus().subscriber_count(),
    }))
}

async fn ping() -> &'static str {
    "pong"
}
