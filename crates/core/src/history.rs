//! # Snapshot History
//!
//! A linear undo/redo timeline of whole-document snapshots.
//!
//! - `record` drops every snapshot after the cursor, appends, and moves the
//!   cursor to the new end. There is no branching.
//! - `undo`/`redo` only move the cursor; at either end they return `None`.
//! - With a capacity, the oldest snapshots are evicted first.
//!
//! Snapshots are `Arc`s of immutable documents, so moving through history
//! never copies a page.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::document::{PageDocument, PageId};

/// Default number of snapshots kept per builder session.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<Arc<PageDocument>>,
    /// Index of the current snapshot; `None` until the first record.
    cursor: Option<usize>,
    /// Maximum number of snapshots (0 = unlimited).
    capacity: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            cursor: None,
            capacity,
        }
    }

    /// Make `doc` the current snapshot, discarding any undone future.
    pub fn record(&mut self, doc: Arc<PageDocument>) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.snapshots.truncate(keep);
        self.snapshots.push_back(doc);

        if self.capacity > 0 {
            while self.snapshots.len() > self.capacity {
                self.snapshots.pop_front();
            }
        }
        self.cursor = Some(self.snapshots.len() - 1);
        tracing::trace!(
            cursor = self.snapshots.len() - 1,
            len = self.snapshots.len(),
            "snapshot recorded"
        );
    }

    /// Step back one snapshot. `None` when nothing is left to undo.
    pub fn undo(&mut self) -> Option<Arc<PageDocument>> {
        let cursor = self.cursor.filter(|&c| c > 0)? - 1;
        self.cursor = Some(cursor);
        tracing::trace!(cursor, "undo");
        self.snapshots.get(cursor).cloned()
    }

    /// Step forward one snapshot. `None` when nothing is left to redo.
    pub fn redo(&mut self) -> Option<Arc<PageDocument>> {
        let cursor = self.cursor.filter(|&c| c + 1 < self.snapshots.len())? + 1;
        self.cursor = Some(cursor);
        tracing::trace!(cursor, "redo");
        self.snapshots.get(cursor).cloned()
    }

    /// Give every snapshot the page's stored identity. Undo never takes a
    /// page back to being unsaved.
    pub fn assign_page_id(&mut self, id: &PageId) {
        for snapshot in &mut self.snapshots {
            if snapshot.id != *id {
                Arc::make_mut(snapshot).id = id.clone();
            }
        }
    }

    pub fn current(&self) -> Option<&Arc<PageDocument>> {
        self.cursor.and_then(|c| self.snapshots.get(c))
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.snapshots.len())
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
