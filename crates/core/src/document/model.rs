use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{BlockId, PageId};
use super::seo::SeoMetadata;
use super::validate::{validate_document, ValidationError};
use crate::block::ContentBlock;

/// Publication state of a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    #[default]
    Draft,
    Published,
    Scheduled,
}

impl PageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageStatus::Draft => "draft",
            PageStatus::Published => "published",
            PageStatus::Scheduled => "scheduled",
        }
    }
}

/// A page under construction in the builder.
///
/// Block order is render order. Blocks are shared between successive
/// snapshots, so deriving a new document only allocates the blocks it touches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDocument {
    #[serde(default)]
    pub id: PageId,
    pub title: String,
    pub slug: String,
    pub blocks: Vec<Arc<ContentBlock>>,
    pub seo: SeoMetadata,
    #[serde(default)]
    pub status: PageStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl PageDocument {
    /// A blank draft, as the builder shows when no page is passed in.
    pub fn new_untitled() -> Self {
        Self {
            id: PageId::unsaved(),
            title: "Untitled Page".to_string(),
            slug: "untitled-page".to_string(),
            blocks: Vec::new(),
            seo: SeoMetadata::default(),
            status: PageStatus::Draft,
            published_at: None,
        }
    }

    /// Hydrate a document from its JSON exchange form.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let doc: Self =
            serde_json::from_str(json).map_err(|e| ValidationError::Malformed(e.to_string()))?;
        validate_document(&doc)?;
        Ok(doc)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn position_of(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    pub fn block(&self, id: &BlockId) -> Option<&ContentBlock> {
        self.blocks.iter().find(|b| &b.id == id).map(Arc::as_ref)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.position_of(id).is_some()
    }

    pub fn block_ids(&self) -> Vec<BlockId> {
        self.blocks.iter().map(|b| b.id.clone()).collect()
    }

    /// Blocks that take part in rendering.
    pub fn visible_blocks(&self) -> impl Iterator<Item = &ContentBlock> {
        self.blocks
            .iter()
            .map(Arc::as_ref)
            .filter(|b| b.settings.visible)
    }
}

impl Default for PageDocument {
    fn default() -> Self {
        Self::new_untitled()
    }
}

/// Derive a URL-safe slug from a title: lowercase ASCII words joined by `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn untitled_page_defaults() {
        let doc = PageDocument::new_untitled();
        assert!(doc.id.is_unsaved());
        assert_eq!(doc.slug, "untitled-page");
        assert_eq!(doc.status, PageStatus::Draft);
        assert!(doc.is_empty());
    }

    #[test]
    fn hydrates_the_exchange_shape() {
        let json = json!({
            "id": "page-1",
            "title": "Landing",
            "slug": "landing",
            "blocks": [{
                "id": "b1",
                "type": "divider",
                "content": { "style": "line", "color": "#000" },
                "settings": { "visible": false, "className": "mt-4" }
            }],
            "seo": { "title": "", "description": "", "keywords": ["shoes"] },
            "status": "published",
            "publishedAt": "2026-03-01T12:00:00Z"
        });
        let doc = PageDocument::from_json(&json.to_string()).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.position_of(&BlockId::from("b1")), Some(0));
        assert_eq!(doc.visible_blocks().count(), 0);
        assert_eq!(doc.status, PageStatus::Published);

        let back: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn hydration_rejects_malformed_json() {
        let err = PageDocument::from_json("{\"title\": 3}").unwrap_err();
        assert!(matches!(err, ValidationError::Malformed(_)));
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("  Summer Sale -- 2026! "), "summer-sale-2026");
        assert_eq!(slugify("Über uns"), "ber-uns");
        assert_eq!(slugify("***"), "");
    }
}
