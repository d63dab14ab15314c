use axum::{routing::get, Json, Router};
use page_builder_core::{list_block_types, BlockTypeInfo};

use crate::state::AppState;

/// Block picker catalog.
pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/blocks", get(block_types))
}

async fn block_types() -> Json<Vec<BlockTypeInfo>> {
    Json(list_block_types())
}
