//! Pure document operations.
//!
//! Every function takes the current document by reference and returns a new
//! one; the argument is never modified. Blocks that an operation does not
//! touch are shared with the input through their `Arc`.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::types::{BlockPatch, Direction, MutationError, Outcome};
use crate::block::{template_for, BlockSettings, BlockType, ContentBlock};
use crate::document::{validate_slug, BlockId, PageDocument, PageStatus, SeoMetadata};

fn locate(doc: &PageDocument, id: &BlockId) -> Result<usize, MutationError> {
    doc.position_of(id)
        .ok_or_else(|| MutationError::BlockNotFound(id.clone()))
}

fn with_blocks(doc: &PageDocument, blocks: Vec<Arc<ContentBlock>>) -> PageDocument {
    PageDocument {
        blocks,
        ..doc.clone()
    }
}

/// Insert a block of `block_type` seeded from its template.
pub fn add_block(
    doc: &PageDocument,
    block_type: BlockType,
    at: Option<usize>,
) -> Result<Outcome, MutationError> {
    let index = match at {
        Some(index) if index > doc.len() => {
            return Err(MutationError::IndexOutOfRange {
                index,
                len: doc.len(),
            })
        }
        Some(index) => index,
        None => doc.len(),
    };

    let block = ContentBlock {
        id: BlockId::generate(),
        content: template_for(block_type).default_content(),
        settings: BlockSettings::default(),
    };
    let id = block.id.clone();

    let mut blocks = doc.blocks.clone();
    blocks.insert(index, Arc::new(block));
    Ok(Outcome::changed(with_blocks(doc, blocks), id))
}

pub fn update_block(
    doc: &PageDocument,
    id: &BlockId,
    patch: &BlockPatch,
) -> Result<Outcome, MutationError> {
    let index = locate(doc, id)?;
    let current = &doc.blocks[index];

    let mut updated = ContentBlock::clone(current);
    if let Some(content) = &patch.content {
        updated.content = current.content.merged(content)?;
    }
    if let Some(settings) = &patch.settings {
        settings.apply_to(&mut updated.settings);
    }
    if updated == **current {
        return Ok(Outcome::Unchanged);
    }

    let mut blocks = doc.blocks.clone();
    blocks[index] = Arc::new(updated);
    Ok(Outcome::changed(with_blocks(doc, blocks), id.clone()))
}

pub fn delete_block(doc: &PageDocument, id: &BlockId) -> Result<Outcome, MutationError> {
    let index = locate(doc, id)?;
    let mut blocks = doc.blocks.clone();
    blocks.remove(index);
    Ok(Outcome::changed(with_blocks(doc, blocks), id.clone()))
}

/// Copy a block under a fresh id, directly after the original.
pub fn duplicate_block(doc: &PageDocument, id: &BlockId) -> Result<Outcome, MutationError> {
    let index = locate(doc, id)?;
    let source = &doc.blocks[index];
    let copy = ContentBlock {
        id: BlockId::generate(),
        content: source.content.clone(),
        settings: source.settings.clone(),
    };
    let copy_id = copy.id.clone();

    let mut blocks = doc.blocks.clone();
    blocks.insert(index + 1, Arc::new(copy));
    Ok(Outcome::changed(with_blocks(doc, blocks), copy_id))
}

/// Swap a block with its neighbour. Moving past either end is a no-op.
pub fn move_block(
    doc: &PageDocument,
    id: &BlockId,
    direction: Direction,
) -> Result<Outcome, MutationError> {
    let index = locate(doc, id)?;
    let neighbour = match direction {
        Direction::Up if index == 0 => return Ok(Outcome::Unchanged),
        Direction::Up => index - 1,
        Direction::Down if index + 1 == doc.len() => return Ok(Outcome::Unchanged),
        Direction::Down => index + 1,
    };

    let mut blocks = doc.blocks.clone();
    blocks.swap(index, neighbour);
    Ok(Outcome::changed(with_blocks(doc, blocks), id.clone()))
}

pub fn toggle_visibility(doc: &PageDocument, id: &BlockId) -> Result<Outcome, MutationError> {
    let index = locate(doc, id)?;
    let mut blocks = doc.blocks.clone();
    let block = Arc::make_mut(&mut blocks[index]);
    block.settings.visible = !block.settings.visible;
    Ok(Outcome::changed(with_blocks(doc, blocks), id.clone()))
}

/// Move `source` so that it sits immediately before `target`.
pub fn reorder(
    doc: &PageDocument,
    source: &BlockId,
    target: &BlockId,
) -> Result<Outcome, MutationError> {
    if source == target {
        return Ok(Outcome::Unchanged);
    }
    let from = locate(doc, source)?;
    let to = locate(doc, target)?;
    if from + 1 == to {
        return Ok(Outcome::Unchanged);
    }

    let mut blocks = doc.blocks.clone();
    let moved = blocks.remove(from);
    // Removing an earlier block shifts the target one slot left.
    let insert_at = if from < to { to - 1 } else { to };
    blocks.insert(insert_at, moved);
    Ok(Outcome::changed(with_blocks(doc, blocks), source.clone()))
}

pub fn set_title(doc: &PageDocument, title: &str) -> Result<Outcome, MutationError> {
    if doc.title == title {
        return Ok(Outcome::Unchanged);
    }
    let next = PageDocument {
        title: title.to_string(),
        ..doc.clone()
    };
    Ok(Outcome::changed(next, None::<BlockId>))
}

pub fn set_slug(doc: &PageDocument, slug: &str) -> Result<Outcome, MutationError> {
    validate_slug(slug).map_err(|_| MutationError::InvalidSlug(slug.to_string()))?;
    if doc.slug == slug {
        return Ok(Outcome::Unchanged);
    }
    let next = PageDocument {
        slug: slug.to_string(),
        ..doc.clone()
    };
    Ok(Outcome::changed(next, None::<BlockId>))
}

pub fn set_seo(doc: &PageDocument, seo: &SeoMetadata) -> Result<Outcome, MutationError> {
    if &doc.seo == seo {
        return Ok(Outcome::Unchanged);
    }
    let next = PageDocument {
        seo: seo.clone(),
        ..doc.clone()
    };
    Ok(Outcome::changed(next, None::<BlockId>))
}

/// Change the publication state. `publishedAt` is stamped on the transition
/// into `published` and cleared on the way out.
pub fn set_status(
    doc: &PageDocument,
    status: PageStatus,
    now: DateTime<Utc>,
) -> Result<Outcome, MutationError> {
    if doc.status == status {
        return Ok(Outcome::Unchanged);
    }
    let published_at = match status {
        PageStatus::Published => Some(now),
        PageStatus::Draft | PageStatus::Scheduled => None,
    };
    let next = PageDocument {
        status,
        published_at,
        ..doc.clone()
    };
    Ok(Outcome::changed(next, None::<BlockId>))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockContent;
    use crate::mutation::types::SettingsPatch;
    use serde_json::json;

    fn page(types: &[(&str, BlockType)]) -> PageDocument {
        let mut doc = PageDocument::new_untitled();
        doc.blocks = types
            .iter()
            .map(|(id, ty)| {
                Arc::new(ContentBlock {
                    id: BlockId::from(*id),
                    content: template_for(*ty).default_content(),
                    settings: BlockSettings::default(),
                })
            })
            .collect();
        doc
    }

    fn ids(doc: &PageDocument) -> Vec<String> {
        doc.blocks.iter().map(|b| b.id.to_string()).collect()
    }

    fn changed(outcome: Outcome) -> PageDocument {
        match outcome {
            Outcome::Changed { document, .. } => document,
            Outcome::Unchanged => panic!("expected a changed document"),
        }
    }

    #[test]
    fn add_appends_with_template_defaults() {
        let doc = page(&[("a", BlockType::Hero)]);
        let outcome = add_block(&doc, BlockType::Image, None).unwrap();
        let new_id = outcome.block().cloned().unwrap();
        let next = changed(outcome);

        assert_eq!(next.len(), 2);
        assert_eq!(next.blocks[1].id, new_id);
        assert_eq!(next.blocks[1].block_type(), BlockType::Image);
        assert_eq!(next.blocks[1].settings.padding.as_deref(), Some("medium"));
        assert!(next.blocks[1].settings.visible);
        // Input untouched, untouched blocks shared.
        assert_eq!(doc.len(), 1);
        assert!(Arc::ptr_eq(&doc.blocks[0], &next.blocks[0]));
    }

    #[test]
    fn add_at_index_inserts_there() {
        let doc = page(&[("a", BlockType::Hero), ("b", BlockType::Text)]);
        let next = changed(add_block(&doc, BlockType::Divider, Some(1)).unwrap());
        assert_eq!(next.blocks[0].id.as_str(), "a");
        assert_eq!(next.blocks[1].block_type(), BlockType::Divider);
        assert_eq!(next.blocks[2].id.as_str(), "b");

        let err = add_block(&doc, BlockType::Divider, Some(3)).unwrap_err();
        assert_eq!(err, MutationError::IndexOutOfRange { index: 3, len: 2 });
    }

    #[test]
    fn update_merges_content_and_settings() {
        let doc = page(&[("a", BlockType::Hero)]);
        let patch = BlockPatch {
            content: json!({ "title": "New arrivals" }).as_object().cloned(),
            settings: Some(SettingsPatch {
                background_color: Some("#111".into()),
                ..Default::default()
            }),
        };
        let next = changed(update_block(&doc, &BlockId::from("a"), &patch).unwrap());
        let block = next.block(&BlockId::from("a")).unwrap();
        match &block.content {
            BlockContent::Hero(hero) => {
                assert_eq!(hero.title, "New arrivals");
                assert_eq!(hero.subtitle, "Discover amazing features");
            }
            other => panic!("expected hero, got {other:?}"),
        }
        assert_eq!(block.settings.background_color.as_deref(), Some("#111"));
    }

    #[test]
    fn update_rejects_shape_violations_and_keeps_document() {
        let doc = page(&[("a", BlockType::Spacer)]);
        let patch = BlockPatch {
            content: json!({ "height": 40 }).as_object().cloned(),
            settings: None,
        };
        let err = update_block(&doc, &BlockId::from("a"), &patch).unwrap_err();
        assert!(matches!(err, MutationError::InvalidContent(_)));
    }

    #[test]
    fn update_to_identical_block_is_a_no_op() {
        let doc = page(&[("a", BlockType::Spacer)]);
        let patch = BlockPatch {
            content: json!({ "height": "40px" }).as_object().cloned(),
            settings: None,
        };
        assert_eq!(
            update_block(&doc, &BlockId::from("a"), &patch).unwrap(),
            Outcome::Unchanged
        );
    }

    #[test]
    fn missing_ids_are_reported() {
        let doc = page(&[("a", BlockType::Text)]);
        let ghost = BlockId::from("ghost");
        let expected = MutationError::BlockNotFound(ghost.clone());
        assert_eq!(update_block(&doc, &ghost, &BlockPatch::default()).unwrap_err(), expected);
        assert_eq!(delete_block(&doc, &ghost).unwrap_err(), expected);
        assert_eq!(duplicate_block(&doc, &ghost).unwrap_err(), expected);
        assert_eq!(move_block(&doc, &ghost, Direction::Up).unwrap_err(), expected);
        assert_eq!(toggle_visibility(&doc, &ghost).unwrap_err(), expected);
        assert_eq!(reorder(&doc, &ghost, &BlockId::from("a")).unwrap_err(), expected);
    }

    #[test]
    fn delete_removes_only_that_block() {
        let doc = page(&[("a", BlockType::Hero), ("b", BlockType::Text), ("c", BlockType::Cta)]);
        let next = changed(delete_block(&doc, &BlockId::from("b")).unwrap());
        assert_eq!(ids(&next), ["a", "c"]);
    }

    #[test]
    fn duplicate_inserts_copy_after_source() {
        let doc = page(&[("a", BlockType::Faq), ("b", BlockType::Text)]);
        let outcome = duplicate_block(&doc, &BlockId::from("a")).unwrap();
        let copy_id = outcome.block().cloned().unwrap();
        let next = changed(outcome);

        assert_eq!(next.len(), 3);
        assert_eq!(next.blocks[1].id, copy_id);
        assert_ne!(copy_id.as_str(), "a");
        assert_eq!(next.blocks[1].content, next.blocks[0].content);
        assert_eq!(next.blocks[1].settings, next.blocks[0].settings);
        assert_eq!(next.blocks[2].id.as_str(), "b");
    }

    #[test]
    fn move_swaps_neighbours_and_stops_at_edges() {
        let doc = page(&[("a", BlockType::Hero), ("b", BlockType::Text), ("c", BlockType::Image)]);
        let next = changed(move_block(&doc, &BlockId::from("c"), Direction::Up).unwrap());
        assert_eq!(ids(&next), ["a", "c", "b"]);

        assert_eq!(
            move_block(&doc, &BlockId::from("a"), Direction::Up).unwrap(),
            Outcome::Unchanged
        );
        assert_eq!(
            move_block(&doc, &BlockId::from("c"), Direction::Down).unwrap(),
            Outcome::Unchanged
        );
    }

    #[test]
    fn toggle_twice_restores_visibility() {
        let doc = page(&[("a", BlockType::Hero)]);
        let id = BlockId::from("a");
        let hidden = changed(toggle_visibility(&doc, &id).unwrap());
        assert!(!hidden.blocks[0].settings.visible);
        assert_eq!(hidden.len(), 1);
        assert!(doc.blocks[0].settings.visible);

        let shown = changed(toggle_visibility(&hidden, &id).unwrap());
        assert_eq!(shown, doc);
    }

    #[test]
    fn reorder_places_source_before_target() {
        let doc = page(&[
            ("a", BlockType::Hero),
            ("b", BlockType::Text),
            ("c", BlockType::Image),
            ("d", BlockType::Cta),
        ]);
        let down = changed(reorder(&doc, &BlockId::from("a"), &BlockId::from("c")).unwrap());
        assert_eq!(ids(&down), ["b", "a", "c", "d"]);

        let up = changed(reorder(&doc, &BlockId::from("d"), &BlockId::from("b")).unwrap());
        assert_eq!(ids(&up), ["a", "d", "b", "c"]);

        assert_eq!(
            reorder(&doc, &BlockId::from("b"), &BlockId::from("b")).unwrap(),
            Outcome::Unchanged
        );
        assert_eq!(
            reorder(&doc, &BlockId::from("a"), &BlockId::from("b")).unwrap(),
            Outcome::Unchanged
        );
    }

    #[test]
    fn status_transitions_stamp_published_at() {
        let doc = PageDocument::new_untitled();
        let now = Utc::now();
        let published = changed(set_status(&doc, PageStatus::Published, now).unwrap());
        assert_eq!(published.published_at, Some(now));

        let again = set_status(&published, PageStatus::Published, Utc::now()).unwrap();
        assert_eq!(again, Outcome::Unchanged);

        let scheduled = changed(set_status(&published, PageStatus::Scheduled, now).unwrap());
        assert_eq!(scheduled.published_at, None);
    }

    #[test]
    fn metadata_edits() {
        let doc = PageDocument::new_untitled();
        let titled = changed(set_title(&doc, "Spring").unwrap());
        assert_eq!(titled.title, "Spring");
        assert_eq!(set_title(&titled, "Spring").unwrap(), Outcome::Unchanged);

        assert_eq!(
            set_slug(&doc, "Bad Slug").unwrap_err(),
            MutationError::InvalidSlug("Bad Slug".into())
        );
        let slugged = changed(set_slug(&doc, "spring").unwrap());
        assert_eq!(slugged.slug, "spring");

        let seo = SeoMetadata {
            title: "Spring".into(),
            ..Default::default()
        };
        let with_seo = changed(set_seo(&doc, &seo).unwrap());
        assert_eq!(with_seo.seo, seo);
    }
}
