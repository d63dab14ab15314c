use std::collections::BTreeSet;

use page_builder_core::mutation::{self, Outcome};
use page_builder_core::{
    Applied, BlockId, BlockType, BuilderSession, Command, Direction, PageDocument, SessionConfig,
};
use proptest::collection::vec as vec_of;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Add(usize, Option<usize>),
    Delete(usize),
    Duplicate(usize),
    Move(usize, bool),
    Toggle(usize),
    Reorder(usize, usize),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..16usize, proptest::option::of(0..8usize)).prop_map(|(t, at)| Step::Add(t, at)),
        (0..8usize).prop_map(Step::Delete),
        (0..8usize).prop_map(Step::Duplicate),
        (0..8usize, any::<bool>()).prop_map(|(i, up)| Step::Move(i, up)),
        (0..8usize).prop_map(Step::Toggle),
        (0..8usize, 0..8usize).prop_map(|(a, b)| Step::Reorder(a, b)),
    ]
}

/// Turn a generated step into a command valid for `doc`, if one exists.
fn command_for(step: &Step, doc: &PageDocument) -> Option<Command> {
    let id_at = |i: usize| -> Option<BlockId> {
        (!doc.is_empty()).then(|| doc.blocks[i % doc.len()].id.clone())
    };
    Some(match step {
        Step::Add(t, at) => Command::AddBlock {
            block_type: BlockType::ALL[*t],
            at: at.map(|i| i % (doc.len() + 1)),
        },
        Step::Delete(i) => Command::DeleteBlock { block_id: id_at(*i)? },
        Step::Duplicate(i) => Command::DuplicateBlock { block_id: id_at(*i)? },
        Step::Move(i, up) => Command::MoveBlock {
            block_id: id_at(*i)?,
            direction: if *up { Direction::Up } else { Direction::Down },
        },
        Step::Toggle(i) => Command::ToggleVisibility { block_id: id_at(*i)? },
        Step::Reorder(a, b) => Command::Reorder {
            source: id_at(*a)?,
            target: id_at(*b)?,
        },
    })
}

fn seeded_doc(types: &[usize]) -> PageDocument {
    let mut doc = PageDocument::new_untitled();
    for &t in types {
        if let Outcome::Changed { document, .. } =
            mutation::add_block(&doc, BlockType::ALL[t], None).unwrap()
        {
            doc = document;
        }
    }
    doc
}

proptest! {
    #[test]
    fn undo_then_redo_everything_returns_to_latest(steps in vec_of(step_strategy(), 1..40)) {
        let mut session = BuilderSession::new_page(SessionConfig::default());
        let mut recorded = 0usize;
        for step in &steps {
            if let Some(cmd) = command_for(step, session.document()) {
                if session.apply(cmd).unwrap().is_recorded() {
                    recorded += 1;
                }
            }
        }
        let latest = session.document().clone();

        for _ in 0..recorded {
            prop_assert!(session.undo());
        }
        prop_assert!(!session.undo());
        prop_assert_eq!(session.document(), &PageDocument::new_untitled());

        for _ in 0..recorded {
            prop_assert!(session.redo());
        }
        prop_assert!(!session.redo());
        prop_assert_eq!(session.document(), &latest);
    }

    #[test]
    fn block_ids_stay_unique(steps in vec_of(step_strategy(), 1..40)) {
        let mut session = BuilderSession::new_page(SessionConfig::default());
        for step in &steps {
            if let Some(cmd) = command_for(step, session.document()) {
                session.apply(cmd).unwrap();
            }
            let ids = session.document().block_ids();
            let unique: BTreeSet<_> = ids.iter().collect();
            prop_assert_eq!(unique.len(), ids.len());
        }
    }

    #[test]
    fn reorder_preserves_membership(
        types in vec_of(0..16usize, 2..10),
        a in 0..10usize,
        b in 0..10usize
    ) {
        let doc = seeded_doc(&types);
        let source = doc.blocks[a % doc.len()].id.clone();
        let target = doc.blocks[b % doc.len()].id.clone();

        match mutation::reorder(&doc, &source, &target).unwrap() {
            Outcome::Changed { document, .. } => {
                let before: BTreeSet<_> = doc.block_ids().into_iter().collect();
                let after: BTreeSet<_> = document.block_ids().into_iter().collect();
                prop_assert_eq!(before, after);
                let s = document.position_of(&source).unwrap();
                let t = document.position_of(&target).unwrap();
                prop_assert_eq!(s + 1, t);
            }
            Outcome::Unchanged => {
                let s = doc.position_of(&source).unwrap();
                let t = doc.position_of(&target).unwrap();
                prop_assert!(s == t || s + 1 == t);
            }
        }
    }

    #[test]
    fn toggle_visibility_is_an_involution(types in vec_of(0..16usize, 1..8), i in 0..8usize) {
        let doc = seeded_doc(&types);
        let id = doc.blocks[i % doc.len()].id.clone();
        let once = mutation::toggle_visibility(&doc, &id).unwrap();
        let twice = mutation::toggle_visibility(once.document().unwrap(), &id).unwrap();
        prop_assert_eq!(twice.document().unwrap(), &doc);
    }

    #[test]
    fn duplicate_adds_one_equal_block_with_a_fresh_id(
        types in vec_of(0..16usize, 1..8),
        i in 0..8usize
    ) {
        let doc = seeded_doc(&types);
        let source = doc.blocks[i % doc.len()].clone();
        let outcome = mutation::duplicate_block(&doc, &source.id).unwrap();
        let copy_id = outcome.block().cloned().unwrap();
        let next = outcome.document().unwrap();

        prop_assert_eq!(next.len(), doc.len() + 1);
        prop_assert!(!doc.contains(&copy_id));
        let copy = next.block(&copy_id).unwrap();
        prop_assert_eq!(&copy.content, &source.content);
        prop_assert_eq!(&copy.settings, &source.settings);
    }
}

#[test]
fn moving_first_block_up_leaves_document_equal() {
    let doc = seeded_doc(&[0, 1, 2]);
    let first = doc.blocks[0].id.clone();
    assert_eq!(
        mutation::move_block(&doc, &first, Direction::Up).unwrap(),
        Outcome::Unchanged
    );
}

#[test]
fn new_edit_after_undo_makes_redo_unreachable() {
    let mut session = BuilderSession::new_page(SessionConfig::default());
    session
        .apply(Command::AddBlock { block_type: BlockType::Hero, at: None })
        .unwrap();
    session
        .apply(Command::AddBlock { block_type: BlockType::Text, at: None })
        .unwrap();
    assert!(session.undo());
    assert!(session.can_redo());

    let applied = session
        .apply(Command::AddBlock { block_type: BlockType::Faq, at: Some(0) })
        .unwrap();
    assert!(matches!(applied, Applied::Recorded { .. }));
    assert!(!session.can_redo());
    assert!(!session.redo());
    assert_eq!(session.document().blocks[0].block_type(), BlockType::Faq);
}

#[test]
fn history_capacity_bounds_undo_depth() {
    let mut session = BuilderSession::new_page(SessionConfig { history_capacity: 3 });
    for _ in 0..5 {
        session
            .apply(Command::AddBlock { block_type: BlockType::Spacer, at: None })
            .unwrap();
    }
    let mut undone = 0;
    while session.undo() {
        undone += 1;
    }
    assert_eq!(undone, 2);
    assert_eq!(session.document().len(), 3);
}

#[test]
fn hydrated_page_round_trips_through_a_session() {
    let json = r##"{
        "id": "p-42",
        "title": "Pricing",
        "slug": "pricing",
        "blocks": [
            {"id": "hero-1", "type": "hero", "content": {
                "title": "Plans", "subtitle": "", "buttonText": "Start", "buttonLink": "/start",
                "backgroundImage": "", "alignment": "center"},
             "settings": {"visible": true, "padding": "large"}},
            {"id": "div-1", "type": "divider", "content": {"style": "line", "color": "#ccc"},
             "settings": {"visible": true}}
        ],
        "seo": {"title": "Pricing", "description": "Plans and prices", "keywords": ["pricing"]},
        "status": "draft"
    }"##;
    let doc = PageDocument::from_json(json).unwrap();
    let mut session = BuilderSession::open(doc.clone(), SessionConfig::default());

    session
        .apply(Command::Reorder {
            source: BlockId::from("div-1"),
            target: BlockId::from("hero-1"),
        })
        .unwrap();
    assert_eq!(
        session.document().block_ids(),
        vec![BlockId::from("div-1"), BlockId::from("hero-1")]
    );
    assert!(session.undo());
    assert_eq!(session.document(), &doc);
    assert!(!session.is_dirty());
}
