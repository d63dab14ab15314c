//! # Builder Session
//!
//! One open page builder. The session owns the snapshot history, the drag
//! state, and the current selection; the current document is always the
//! history snapshot under the cursor.
//!
//! Every successful, non-trivial command is recorded as exactly one undo
//! step. No-op commands and rejected commands leave history untouched.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::block::ContentBlock;
use crate::document::{BlockId, PageDocument};
use crate::events::{BuilderEvent, ChangeEvent, EventBus, HistoryEvent, SaveEvent};
use crate::history::{History, DEFAULT_HISTORY_CAPACITY};
use crate::mutation::{Command, MutationError, Outcome};
use crate::reorder::DragState;
use crate::store::{PageStore, SaveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Maximum undo snapshots (0 = unlimited).
    pub history_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// What the session did with a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// A new snapshot was recorded.
    Recorded { block: Option<BlockId> },
    /// The command changed nothing; history is as it was.
    NoOp,
}

impl Applied {
    pub fn is_recorded(&self) -> bool {
        matches!(self, Applied::Recorded { .. })
    }
}

/// Flags the toolbar needs to enable or disable its controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStatus {
    pub can_undo: bool,
    pub can_redo: bool,
    pub dirty: bool,
}

#[derive(Debug)]
pub struct BuilderSession {
    history: History,
    drag: DragState,
    selected: Option<BlockId>,
    /// Snapshot last handed to a store, or the one the session opened with.
    baseline: Arc<PageDocument>,
    events: Option<EventBus>,
}

impl BuilderSession {
    /// Open a builder on `doc`. The opening document is the first snapshot,
    /// so the first edit can be undone.
    pub fn open(doc: PageDocument, config: SessionConfig) -> Self {
        let baseline = Arc::new(doc);
        let mut history = History::with_capacity(config.history_capacity);
        history.record(Arc::clone(&baseline));
        tracing::debug!(slug = %baseline.slug, blocks = baseline.len(), "builder session opened");
        Self {
            history,
            drag: DragState::new(),
            selected: None,
            baseline,
            events: None,
        }
    }

    pub fn new_page(config: SessionConfig) -> Self {
        Self::open(PageDocument::new_untitled(), config)
    }

    /// Publish session events on `bus`.
    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    fn current(&self) -> &Arc<PageDocument> {
        // History always holds the opening snapshot.
        self.history.current().unwrap_or(&self.baseline)
    }

    pub fn document(&self) -> &PageDocument {
        self.current()
    }

    /// Shared handle to the current snapshot.
    pub fn snapshot(&self) -> Arc<PageDocument> {
        Arc::clone(self.current())
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Run `command` against the current document and record the result.
    pub fn apply(&mut self, command: Command) -> Result<Applied, MutationError> {
        let current = Arc::clone(self.current());
        let outcome = command.apply(&current, Utc::now()).inspect_err(|e| {
            tracing::debug!(op = command.name(), error = %e, "command rejected");
        })?;

        let applied = self.commit(command.name(), outcome);
        if let Applied::Recorded { block } = &applied {
            match &command {
                Command::AddBlock { .. } | Command::DuplicateBlock { .. } => {
                    self.selected = block.clone();
                }
                Command::DeleteBlock { block_id } if self.selected.as_ref() == Some(block_id) => {
                    self.selected = None;
                }
                _ => {}
            }
        }
        Ok(applied)
    }

    fn commit(&mut self, operation: &'static str, outcome: Outcome) -> Applied {
        match outcome {
            Outcome::Unchanged => {
                tracing::debug!(op = operation, "command left the page unchanged");
                Applied::NoOp
            }
            Outcome::Changed { document, block } => {
                let slug = document.slug.clone();
                self.history.record(Arc::new(document));
                let cursor = self.history.cursor().unwrap_or(0);
                tracing::debug!(op = operation, cursor, block = ?block, "command recorded");
                self.publish(BuilderEvent::Changed(ChangeEvent {
                    slug,
                    operation: operation.to_string(),
                    block_id: block.clone(),
                    cursor,
                    timestamp: Utc::now(),
                }));
                Applied::Recorded { block }
            }
        }
    }

    /// Step back one snapshot. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if self.history.undo().is_none() {
            return false;
        }
        self.after_history_move(BuilderEvent::Undone);
        true
    }

    /// Step forward one snapshot. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        if self.history.redo().is_none() {
            return false;
        }
        self.after_history_move(BuilderEvent::Redone);
        true
    }

    fn after_history_move(&mut self, event: fn(HistoryEvent) -> BuilderEvent) {
        let current = Arc::clone(self.current());
        if self.selected.as_ref().is_some_and(|id| !current.contains(id)) {
            self.selected = None;
        }
        self.drag.cancel();
        self.publish(event(HistoryEvent {
            slug: current.slug.clone(),
            cursor: self.history.cursor().unwrap_or(0),
            timestamp: Utc::now(),
        }));
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Whether the current snapshot differs from the last saved one.
    pub fn is_dirty(&self) -> bool {
        !Arc::ptr_eq(self.current(), &self.baseline)
    }

    pub fn status(&self) -> HistoryStatus {
        HistoryStatus {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            dirty: self.is_dirty(),
        }
    }

    pub fn drag_start(&mut self, source: BlockId) -> Result<(), MutationError> {
        if !self.current().contains(&source) {
            return Err(MutationError::BlockNotFound(source));
        }
        self.drag.start(source);
        Ok(())
    }

    /// Drop the dragged block before `target`. Only a real reorder is recorded.
    pub fn drop(&mut self, target: Option<&BlockId>) -> Result<Applied, MutationError> {
        let current = Arc::clone(self.current());
        let outcome = self.drag.drop(&current, target)?;
        Ok(self.commit("reorder", outcome))
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    pub fn dragging(&self) -> Option<&BlockId> {
        self.drag.source()
    }

    /// Select a block for the settings panel, or clear the selection.
    pub fn select(&mut self, id: Option<BlockId>) -> Result<(), MutationError> {
        if let Some(id) = &id {
            if !self.current().contains(id) {
                return Err(MutationError::BlockNotFound(id.clone()));
            }
        }
        self.selected = id;
        Ok(())
    }

    pub fn selected(&self) -> Option<&BlockId> {
        self.selected.as_ref()
    }

    pub fn selected_block(&self) -> Option<&ContentBlock> {
        self.selected
            .as_ref()
            .and_then(|id| self.current().block(id))
    }

    /// Hand the current document to `store`. Never retried; on failure the
    /// document and history stay exactly as they were. The first save of a
    /// new page adopts the id the store assigned.
    pub async fn save<S: PageStore>(&mut self, store: &S) -> Result<(), SaveError> {
        let snapshot = Arc::clone(self.current());
        match store.save(&snapshot).await {
            Ok(page_id) => {
                if page_id != snapshot.id {
                    self.history.assign_page_id(&page_id);
                }
                tracing::info!(
                    slug = %snapshot.slug,
                    page_id = %page_id,
                    blocks = snapshot.len(),
                    "page saved"
                );
                self.publish(BuilderEvent::Saved(SaveEvent {
                    slug: snapshot.slug.clone(),
                    page_id: page_id.to_string(),
                    timestamp: Utc::now(),
                    error: None,
                }));
                self.baseline = Arc::clone(self.current());
                Ok(())
            }
            Err(e) => {
                tracing::warn!(slug = %snapshot.slug, error = %e, "page save failed");
                self.publish(BuilderEvent::SaveFailed(SaveEvent {
                    slug: snapshot.slug.clone(),
                    page_id: snapshot.id.to_string(),
                    timestamp: Utc::now(),
                    error: Some(e.to_string()),
                }));
                Err(e)
            }
        }
    }

    fn publish(&self, event: BuilderEvent) {
        if let Some(bus) = &self.events {
            bus.publish(event);
        }
    }
}
