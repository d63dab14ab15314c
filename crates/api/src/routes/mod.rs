pub mod blocks;
pub mod health;
pub mod sessions;

use axum::Router;

use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(blocks::routes())
        .merge(sessions::routes())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use page_builder_core::{EventBus, MemoryPageStore};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::state::AppState;
    use crate::store::AppStore;

    pub fn memory_state() -> AppState {
        AppState::new(
            AppStore::Memory(MemoryPageStore::new()),
            AppConfig::default(),
            EventBus::new(16),
        )
    }

    /// Send one request and decode the JSON response.
    pub async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use super::build_router;
    use super::test_support::{call, memory_state};

    #[tokio::test]
    async fn health_reports_memory_backend() {
        let app = build_router(memory_state());
        let (status, body) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["store"], "memory");
        assert_eq!(body["openSessions"], 0);

        let (status, pong) = call(&app, Method::GET, "/v1/ping", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(pong, "pong");
    }

    #[tokio::test]
    async fn block_picker_lists_sixteen_types() {
        let app = build_router(memory_state());
        let (status, body) = call(&app, Method::GET, "/v1/blocks", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 16);
        assert_eq!(body[0]["type"], "hero");
        assert_eq!(body[0]["displayName"], "Hero Section");
    }
}
