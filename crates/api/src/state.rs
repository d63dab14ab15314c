use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use page_builder_core::{BuilderSession, EventBus, PageDocument, SessionConfig};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::store::AppStore;

pub type SharedSession = Arc<Mutex<BuilderSession>>;

struct SessionEntry {
    session: SharedSession,
    touched: Instant,
}

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    store: AppStore,
    config: AppConfig,
    event_bus: EventBus,
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl AppState {
    pub fn new(store: AppStore, config: AppConfig, event_bus: EventBus) -> Self {
        Self {
            inner: Arc::new(InnerState {
                store,
                config,
                event_bus,
                sessions: RwLock::new(HashMap::new()),
            }),
        }
    }

    pub fn store(&self) -> &AppStore {
        &self.inner.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.inner.event_bus
    }

    /// Open a builder session on `doc` and register it.
    pub async fn open_session(&self, doc: PageDocument) -> (Uuid, SharedSession) {
        let config = SessionConfig {
            history_capacity: self.inner.config.history_capacity,
        };
        let session = BuilderSession::open(doc, config).with_events(self.inner.event_bus.clone());
        let id = Uuid::now_v7();
        let shared = Arc::new(Mutex::new(session));
        let entry = SessionEntry {
            session: Arc::clone(&shared),
            touched: Instant::now(),
        };
        self.inner.sessions.write().await.insert(id, entry);
        tracing::info!(session = %id, "builder session opened");
        (id, shared)
    }

    /// Look up a session and mark it as in use.
    pub async fn session(&self, id: Uuid) -> ApiResult<SharedSession> {
        let mut sessions = self.inner.sessions.write().await;
        let entry = sessions
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("session {id}")))?;
        entry.touched = Instant::now();
        Ok(Arc::clone(&entry.session))
    }

    /// Discard a session without saving.
    pub async fn close_session(&self, id: Uuid) -> ApiResult<()> {
        match self.inner.sessions.write().await.remove(&id) {
            Some(_) => {
                tracing::info!(session = %id, "builder session closed");
                Ok(())
            }
            None => Err(ApiError::NotFound(format!("session {id}"))),
        }
    }

    pub async fn session_count(&self) -> usize {
        self.inner.sessions.read().await.len()
    }

    /// Discard sessions untouched for longer than `idle`. Unsaved edits in
    /// them are lost.
    pub async fn evict_idle(&self, idle: Duration) -> usize {
        let mut sessions = self.inner.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, entry| {
            let keep = entry.touched.elapsed() <= idle;
            if !keep {
                tracing::info!(session = %id, "idle builder session evicted");
            }
            keep
        });
        before - sessions.len()
    }

    /// Periodically evict idle sessions, when the config sets an idle limit.
    pub fn spawn_idle_sweeper(&self) -> Option<JoinHandle<()>> {
        let idle = self.inner.config.session_idle()?;
        let state = self.clone();
        Some(tokio::spawn(async move {
            let mut ticks = tokio::time::interval(idle / 4);
            loop {
                ticks.tick().await;
                let evicted = state.evict_idle(idle).await;
                if evicted > 0 {
                    tracing::debug!(evicted, "idle session sweep");
                }
            }
        }))
    }
}
