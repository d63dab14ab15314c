use serde::{Deserialize, Serialize};

use super::model::PageDocument;

/// Recommended maximum length of a search-result title.
pub const SEO_TITLE_LIMIT: usize = 60;
/// Recommended maximum length of a meta description.
pub const SEO_DESCRIPTION_LIMIT: usize = 160;

/// Search-engine metadata attached to a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
}

impl SeoMetadata {
    /// Length guidance only; long titles are still accepted.
    pub fn title_over_limit(&self) -> bool {
        self.title.chars().count() > SEO_TITLE_LIMIT
    }

    pub fn description_over_limit(&self) -> bool {
        self.description.chars().count() > SEO_DESCRIPTION_LIMIT
    }
}

/// Split a comma-separated keyword field.
pub fn parse_keywords(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// How a page would appear as a search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchPreview {
    pub title: String,
    pub url: String,
    pub description: String,
}

impl SearchPreview {
    pub fn for_page(doc: &PageDocument, host: &str) -> Self {
        let title = if doc.seo.title.is_empty() {
            doc.title.clone()
        } else {
            doc.seo.title.clone()
        };
        let description = if doc.seo.description.is_empty() {
            "No description set".to_string()
        } else {
            doc.seo.description.clone()
        };
        Self {
            title,
            url: format!("{}/{}", host.trim_end_matches('/'), doc.slug),
            description,
        }
    }
}
