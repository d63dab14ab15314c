/// Identifier types for pages and blocks.
///
/// Block IDs minted by the builder follow `block_{uuid-v7 hex}`; they are
/// time-ordered and never reused, even after a delete is undone. IDs read
/// from storage are kept verbatim.
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const BLOCK_PREFIX: &str = "block_";
const PAGE_PREFIX: &str = "page_";

/// Identifier of a content block within a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Mint a fresh, globally unique block ID.
    pub fn generate() -> Self {
        Self(format!("{BLOCK_PREFIX}{}", Uuid::now_v7().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this ID was minted by [`BlockId::generate`].
    pub fn is_generated(&self) -> bool {
        self.0
            .strip_prefix(BLOCK_PREFIX)
            .is_some_and(|rest| Uuid::try_parse(rest).is_ok())
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a page. Empty until the page has been persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub fn unsaved() -> Self {
        Self::default()
    }

    /// Mint the id a store gives a page on its first save.
    pub fn generate() -> Self {
        Self(format!("{PAGE_PREFIX}{}", Uuid::now_v7().simple()))
    }

    pub fn is_unsaved(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
