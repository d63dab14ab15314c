use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::BlockId;

/// Events emitted by a builder session after its state moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BuilderEvent {
    Changed(ChangeEvent),
    Undone(HistoryEvent),
    Redone(HistoryEvent),
    Saved(SaveEvent),
    SaveFailed(SaveEvent),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub slug: String,
    pub operation: String,
    pub block_id: Option<BlockId>,
    pub cursor: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEvent {
    pub slug: String,
    pub cursor: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEvent {
    pub slug: String,
    pub page_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
