/// Builder commands and their results.
///
/// A `Command` is the serializable form of one Mutation API call; it is what
/// the HTTP surface accepts and what builder events name.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::block::{BlockSettings, BlockType, ContentShapeError};
use crate::document::{BlockId, PageDocument, PageStatus, SeoMetadata};

use super::ops;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "op",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum Command {
    AddBlock {
        block_type: BlockType,
        /// Insert position; appends when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        at: Option<usize>,
    },
    UpdateBlock {
        block_id: BlockId,
        patch: BlockPatch,
    },
    DeleteBlock {
        block_id: BlockId,
    },
    DuplicateBlock {
        block_id: BlockId,
    },
    MoveBlock {
        block_id: BlockId,
        direction: Direction,
    },
    ToggleVisibility {
        block_id: BlockId,
    },
    Reorder {
        source: BlockId,
        target: BlockId,
    },
    SetTitle {
        title: String,
    },
    SetSlug {
        slug: String,
    },
    SetSeo {
        seo: SeoMetadata,
    },
    SetStatus {
        status: PageStatus,
    },
}

impl Command {
    /// Short operation name used in logs and events.
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddBlock { .. } => "addBlock",
            Command::UpdateBlock { .. } => "updateBlock",
            Command::DeleteBlock { .. } => "deleteBlock",
            Command::DuplicateBlock { .. } => "duplicateBlock",
            Command::MoveBlock { .. } => "moveBlock",
            Command::ToggleVisibility { .. } => "toggleVisibility",
            Command::Reorder { .. } => "reorder",
            Command::SetTitle { .. } => "setTitle",
            Command::SetSlug { .. } => "setSlug",
            Command::SetSeo { .. } => "setSeo",
            Command::SetStatus { .. } => "setStatus",
        }
    }

    /// Derive a new document from `doc`. `now` stamps `publishedAt`.
    pub fn apply(&self, doc: &PageDocument, now: DateTime<Utc>) -> Result<Outcome, MutationError> {
        match self {
            Command::AddBlock { block_type, at } => ops::add_block(doc, *block_type, *at),
            Command::UpdateBlock { block_id, patch } => ops::update_block(doc, block_id, patch),
            Command::DeleteBlock { block_id } => ops::delete_block(doc, block_id),
            Command::DuplicateBlock { block_id } => ops::duplicate_block(doc, block_id),
            Command::MoveBlock {
                block_id,
                direction,
            } => ops::move_block(doc, block_id, *direction),
            Command::ToggleVisibility { block_id } => ops::toggle_visibility(doc, block_id),
            Command::Reorder { source, target } => ops::reorder(doc, source, target),
            Command::SetTitle { title } => ops::set_title(doc, title),
            Command::SetSlug { slug } => ops::set_slug(doc, slug),
            Command::SetSeo { seo } => ops::set_seo(doc, seo),
            Command::SetStatus { status } => ops::set_status(doc, *status, now),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Partial update of a block. Content keys are shallow-merged over the
/// current payload; the block type itself never changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsPatch>,
}

/// Field-wise settings update. An empty string clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<String>,
}

impl SettingsPatch {
    pub fn apply_to(&self, settings: &mut BlockSettings) {
        fn merge(slot: &mut Option<String>, update: &Option<String>) {
            match update.as_deref() {
                None => {}
                Some("") => *slot = None,
                Some(v) => *slot = Some(v.to_string()),
            }
        }

        if let Some(visible) = self.visible {
            settings.visible = visible;
        }
        merge(&mut settings.class_name, &self.class_name);
        merge(&mut settings.padding, &self.padding);
        merge(&mut settings.margin, &self.margin);
        merge(&mut settings.background_color, &self.background_color);
        merge(&mut settings.animation, &self.animation);
    }
}

/// Result of a successful mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A new document was derived. `block` names the block that was
    /// created or touched, if any.
    Changed {
        document: PageDocument,
        block: Option<BlockId>,
    },
    /// The command was valid but left the document as it was.
    Unchanged,
}

impl Outcome {
    pub(crate) fn changed(document: PageDocument, block: impl Into<Option<BlockId>>) -> Self {
        Outcome::Changed {
            document,
            block: block.into(),
        }
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, Outcome::Changed { .. })
    }

    pub fn document(&self) -> Option<&PageDocument> {
        match self {
            Outcome::Changed { document, .. } => Some(document),
            Outcome::Unchanged => None,
        }
    }

    pub fn block(&self) -> Option<&BlockId> {
        match self {
            Outcome::Changed { block, .. } => block.as_ref(),
            Outcome::Unchanged => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MutationError {
    #[error("block not found: {0}")]
    BlockNotFound(BlockId),

    #[error(transparent)]
    InvalidContent(#[from] ContentShapeError),

    #[error("invalid slug {0:?}")]
    InvalidSlug(String),

    #[error("insert position {index} is past the end of {len} blocks")]
    IndexOutOfRange { index: usize, len: usize },
}
