//! The save hand-off: the only place a page leaves the builder.
//!
//! Stores key pages by [`PageId`] and keep slugs unique. A page without an id
//! is new: the store mints one and returns it. A save whose slug already
//! belongs to another page is rejected, so one page never overwrites another.

use std::collections::HashMap;
use std::future::Future;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::document::{PageDocument, PageId};

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("page store unavailable: {0}")]
    Unavailable(String),

    #[error("page rejected by store: {0}")]
    Rejected(String),

    #[error("failed to encode page: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SaveError {
    pub fn slug_taken(slug: &str) -> Self {
        SaveError::Rejected(format!("slug {slug:?} belongs to another page"))
    }
}

/// Persistence collaborator receiving explicitly saved pages.
pub trait PageStore: Send + Sync {
    /// Persist `page` and return the id it is stored under.
    fn save(&self, page: &PageDocument) -> impl Future<Output = Result<PageId, SaveError>> + Send;
}

#[derive(Debug, Default)]
struct Pages {
    by_id: HashMap<PageId, PageDocument>,
    slugs: HashMap<String, PageId>,
}

/// Process-local page store.
#[derive(Debug, Default)]
pub struct MemoryPageStore {
    pages: RwLock<Pages>,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&self, slug: &str) -> Option<PageDocument> {
        let pages = self.pages.read().await;
        pages.slugs.get(slug).and_then(|id| pages.by_id.get(id)).cloned()
    }

    pub async fn len(&self) -> usize {
        self.pages.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pages.read().await.by_id.is_empty()
    }
}

impl PageStore for MemoryPageStore {
    async fn save(&self, page: &PageDocument) -> Result<PageId, SaveError> {
        let mut pages = self.pages.write().await;
        let id = if page.id.is_unsaved() {
            PageId::generate()
        } else {
            page.id.clone()
        };

        if pages.slugs.get(&page.slug).is_some_and(|owner| *owner != id) {
            return Err(SaveError::slug_taken(&page.slug));
        }

        let mut stored = page.clone();
        stored.id = id.clone();
        if let Some(previous) = pages.by_id.insert(id.clone(), stored) {
            if previous.slug != page.slug {
                pages.slugs.remove(&previous.slug);
            }
        }
        pages.slugs.insert(page.slug.clone(), id.clone());
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_save_mints_an_id_and_later_saves_reuse_it() {
        let store = MemoryPageStore::new();
        assert!(store.is_empty().await);

        let mut page = PageDocument::new_untitled();
        let id = store.save(&page).await.unwrap();
        assert!(!id.is_unsaved());

        page.id = id.clone();
        page.title = "Renamed".into();
        assert_eq!(store.save(&page).await.unwrap(), id);

        assert_eq!(store.len().await, 1);
        let loaded = store.load("untitled-page").await.unwrap();
        assert_eq!(loaded.title, "Renamed");
        assert_eq!(loaded.id, id);
        assert!(store.load("missing").await.is_none());
    }

    #[tokio::test]
    async fn new_page_cannot_take_an_existing_slug() {
        let store = MemoryPageStore::new();
        let first = PageDocument::new_untitled();
        store.save(&first).await.unwrap();

        let second = PageDocument {
            title: "Another".into(),
            ..PageDocument::new_untitled()
        };
        let err = store.save(&second).await.unwrap_err();
        assert!(matches!(err, SaveError::Rejected(_)));
        assert_eq!(store.len().await, 1);
        assert_eq!(store.load("untitled-page").await.unwrap().title, "Untitled Page");
    }

    #[tokio::test]
    async fn slug_change_moves_the_page() {
        let store = MemoryPageStore::new();
        let mut page = PageDocument::new_untitled();
        page.id = store.save(&page).await.unwrap();

        page.slug = "spring-sale".into();
        store.save(&page).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert!(store.load("untitled-page").await.is_none());
        assert_eq!(store.load("spring-sale").await.unwrap().id, page.id);

        let newcomer = PageDocument::new_untitled();
        assert!(store.save(&newcomer).await.is_ok());
    }
}
