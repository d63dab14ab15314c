//! # Page Builder Core
//!
//! Block-based page documents with pure mutations, snapshot undo/redo and
//! drag-and-drop reordering.
//!
//! ```text
//! UI action ─▶ Command::apply(doc) ─▶ new doc ─▶ History::record ─▶ preview
//!                                                       │
//!                                  explicit save ───────┴─▶ PageStore
//! ```
//!
//! ```rust,ignore
//! use page_builder_core::{BlockType, BuilderSession, Command, SessionConfig};
//!
//! let mut session = BuilderSession::new_page(SessionConfig::default());
//! session.apply(Command::AddBlock { block_type: BlockType::Hero, at: None })?;
//! session.undo();
//! session.save(&store).await?;
//! ```

pub mod block;
pub mod document;
pub mod events;
pub mod history;
pub mod mutation;
pub mod preview;
pub mod reorder;
pub mod session;
pub mod store;

pub use block::{
    list_block_types, template_for, BlockContent, BlockSettings, BlockTemplate, BlockType,
    BlockTypeInfo, ContentBlock,
};
pub use document::{BlockId, PageDocument, PageId, PageStatus, SeoMetadata, ValidationError};
pub use events::{BuilderEvent, EventBus};
pub use history::History;
pub use mutation::{BlockPatch, Command, Direction, MutationError, Outcome, SettingsPatch};
pub use reorder::DragState;
pub use session::{Applied, BuilderSession, HistoryStatus, SessionConfig};
pub use store::{MemoryPageStore, PageStore, SaveError};
