/// Document validation utilities.
use std::collections::HashSet;

use thiserror::Error;

use super::model::{PageDocument, PageStatus};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("malformed page document: {0}")]
    Malformed(String),
    #[error("block id cannot be empty")]
    EmptyBlockId,
    #[error("duplicate block id: {0}")]
    DuplicateBlockId(String),
    #[error("invalid slug {0:?}: use lowercase letters, digits and single hyphens")]
    InvalidSlug(String),
    #[error("publishedAt is only allowed on published pages")]
    UnexpectedPublishedAt,
}

/// Check that a slug is non-empty lowercase ASCII words joined by single hyphens.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let valid = !slug.is_empty()
        && slug.split('-').all(|part| {
            !part.is_empty()
                && part
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        });
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidSlug(slug.to_string()))
    }
}

/// Validate the document-level invariants of a hydrated page.
pub fn validate_document(doc: &PageDocument) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(doc.blocks.len());
    for block in &doc.blocks {
        if block.id.as_str().is_empty() {
            return Err(ValidationError::EmptyBlockId);
        }
        if !seen.insert(block.id.as_str()) {
            return Err(ValidationError::DuplicateBlockId(block.id.to_string()));
        }
    }
    validate_slug(&doc.slug)?;
    if doc.published_at.is_some() && doc.status != PageStatus::Published {
        return Err(ValidationError::UnexpectedPublishedAt);
    }
    Ok(())
}
