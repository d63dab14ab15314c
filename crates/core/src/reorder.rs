//! Drag-and-drop reordering as two explicit messages: `start(source)` then
//! `drop(target)`. The drag source is transient UI state and never enters
//! history.

use crate::document::{BlockId, PageDocument};
use crate::mutation::{self, MutationError, Outcome};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    source: Option<BlockId>,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin dragging `source`, replacing any drag in progress.
    pub fn start(&mut self, source: BlockId) {
        self.source = Some(source);
    }

    pub fn source(&self) -> Option<&BlockId> {
        self.source.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.source.is_some()
    }

    pub fn cancel(&mut self) {
        self.source = None;
    }

    /// Finish the drag over `target`. The drag ends whatever the result.
    ///
    /// Dropping with no drag in progress, onto nothing, or onto the source
    /// itself yields [`Outcome::Unchanged`].
    pub fn drop(
        &mut self,
        doc: &PageDocument,
        target: Option<&BlockId>,
    ) -> Result<Outcome, MutationError> {
        let Some(source) = self.source.take() else {
            return Ok(Outcome::Unchanged);
        };
        match target {
            Some(target) => mutation::reorder(doc, &source, target),
            None => Ok(Outcome::Unchanged),
        }
    }
}
