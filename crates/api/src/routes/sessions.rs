use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use page_builder_core::document::{validate_document, SearchPreview};
use page_builder_core::preview::{render_canvas, Viewport};
use page_builder_core::{
    Applied, BlockId, BuilderSession, Command, HistoryStatus, PageDocument,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Builder session routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/sessions", post(open_session))
        .route("/v1/sessions/{id}", get(get_session).delete(close_session))
        .route("/v1/sessions/{id}/commands", post(apply_command))
        .route("/v1/sessions/{id}/undo", post(undo))
        .route("/v1/sessions/{id}/redo", post(redo))
        .route("/v1/sessions/{id}/drag", post(drag_start))
        .route("/v1/sessions/{id}/drop", post(drop_block))
        .route("/v1/sessions/{id}/select", post(select_block))
        .route("/v1/sessions/{id}/save", post(save))
        .route("/v1/sessions/{id}/preview", get(preview))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OpenSession {
    /// Page to edit, as sent by the caller.
    document: Option<PageDocument>,
    /// Slug of a saved page to hydrate from the store.
    slug: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionView {
    session_id: Uuid,
    document: Arc<PageDocument>,
    history: HistoryStatus,
    selected: Option<BlockId>,
    dragging: Option<BlockId>,
    search_preview: SearchPreview,
}

impl SessionView {
    fn of(session_id: Uuid, session: &BuilderSession, host: &str) -> Self {
        let document = session.snapshot();
        Self {
            session_id,
            search_preview: SearchPreview::for_page(&document, host),
            document,
            history: session.status(),
            selected: session.selected().cloned(),
            dragging: session.dragging().cloned(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangeResponse {
    /// Whether a new undo step was recorded.
    changed: bool,
    block: Option<BlockId>,
    session: SessionView,
}

impl ChangeResponse {
    fn new(applied: Applied, session: SessionView) -> Self {
        match applied {
            Applied::Recorded { block } => Self { changed: true, block, session },
            Applied::NoOp => Self { changed: false, block: None, session },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DragRequest {
    block_id: BlockId,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DropRequest {
    target_id: Option<BlockId>,
}

#[derive(Debug, Default, Deserialize)]
struct PreviewQuery {
    #[serde(default)]
    viewport: Viewport,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectRequest {
    block_id: Option<BlockId>,
}

async fn open_session(
    State(state): State<AppState>,
    Json(body): Json<OpenSession>,
) -> ApiResult<(StatusCode, Json<SessionView>)> {
    let doc = match body {
        OpenSession { document: Some(doc), .. } => {
            validate_document(&doc)?;
            doc
        }
        OpenSession { slug: Some(slug), .. } => state
            .store()
            .load(&slug)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("page {slug}")))?,
        OpenSession { .. } => PageDocument::new_untitled(),
    };

    let (id, shared) = state.open_session(doc).await;
    let session = shared.lock().await;
    Ok((
        StatusCode::CREATED,
        Json(SessionView::of(id, &session, &state.config().preview_host)),
    ))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionView>> {
    let shared = state.session(id).await?;
    let session = shared.lock().await;
    Ok(Json(SessionView::of(id, &session, &state.config().preview_host)))
}

async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.close_session(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn apply_command(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(command): Json<Command>,
) -> ApiResult<Json<ChangeResponse>> {
    let shared = state.session(id).await?;
    let mut session = shared.lock().await;
    let applied = session.apply(command)?;
    let view = SessionView::of(id, &session, &state.config().preview_host);
    Ok(Json(ChangeResponse::new(applied, view)))
}

async fn undo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ChangeResponse>> {
    step_history(state, id, BuilderSession::undo).await
}

async fn redo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ChangeResponse>> {
    step_history(state, id, BuilderSession::redo).await
}

async fn step_history(
    state: AppState,
    id: Uuid,
    step: fn(&mut BuilderSession) -> bool,
) -> ApiResult<Json<ChangeResponse>> {
    let shared = state.session(id).await?;
    let mut session = shared.lock().await;
    let moved = step(&mut session);
    let view = SessionView::of(id, &session, &state.config().preview_host);
    Ok(Json(ChangeResponse {
        changed: moved,
        block: None,
        session: view,
    }))
}

async fn drag_start(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<DragRequest>,
) -> ApiResult<Json<SessionView>> {
    let shared = state.session(id).await?;
    let mut session = shared.lock().await;
    session.drag_start(body.block_id)?;
    Ok(Json(SessionView::of(id, &session, &state.config().preview_host)))
}

async fn drop_block(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<DropRequest>,
) -> ApiResult<Json<ChangeResponse>> {
    let shared = state.session(id).await?;
    let mut session = shared.lock().await;
    let applied = (*session).drop(body.target_id.as_ref())?;
    let view = SessionView::of(id, &session, &state.config().preview_host);
    Ok(Json(ChangeResponse::new(applied, view)))
}

async fn select_block(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SelectRequest>,
) -> ApiResult<Json<SessionView>> {
    let shared = state.session(id).await?;
    let mut session = shared.lock().await;
    session.select(body.block_id)?;
    Ok(Json(SessionView::of(id, &session, &state.config().preview_host)))
}

async fn save(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionView>> {
    let shared = state.session(id).await?;
    let mut session = shared.lock().await;
    session.save(state.store()).await?;
    Ok(Json(SessionView::of(id, &session, &state.config().preview_host)))
}

async fn preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PreviewQuery>,
) -> ApiResult<Html<String>> {
    let shared = state.session(id).await?;
    let session = shared.lock().await;
    Ok(Html(render_canvas(session.document(), query.viewport)))
}
