//! Integration tests for the edit session: history laws and the
//! persistence round-trip.

use anyhow::Result;
use pagegrid_content::{load_tree_value, ContentTree, Element, ElementKind, SequentialIds};
use pagegrid_editor::{EditSession, Mutation, Selection};

fn session() -> EditSession {
    EditSession::with_id_source(ContentTree::new(), Box::new(SequentialIds::new("s")))
}

fn add_section() -> Mutation {
    Mutation::AddSection {
        at_index: None,
        preset: None,
    }
}

#[test]
fn test_undo_redo_inverse_law() {
    let mut session = session();
    let t0 = session.tree().clone();

    for _ in 0..5 {
        session.apply(add_section());
    }
    let tn = session.tree().clone();

    for _ in 0..5 {
        session.undo();
    }
    assert_eq!(session.tree(), &t0);
    assert!(!session.can_undo());

    for _ in 0..5 {
        session.redo();
    }
    assert_eq!(session.tree(), &tn);
    assert!(!session.can_redo());
}

#[test]
fn test_undo_reaches_origin_after_long_sessions() {
    // The inverse law holds for arbitrarily long edit sequences
    let mut session = session();
    for _ in 0..150 {
        session.apply(add_section());
    }
    assert_eq!(session.tree().sections.len(), 150);

    for _ in 0..150 {
        session.undo();
    }
    assert_eq!(session.tree(), &ContentTree::new());
    assert!(!session.can_undo());
}

#[test]
fn test_undo_at_boundary_is_a_no_op() {
    let mut session = session();
    let t0 = session.tree().clone();
    session.undo();
    assert_eq!(session.tree(), &t0);
    session.redo();
    assert_eq!(session.tree(), &t0);
}

#[test]
fn test_redo_truncated_by_fresh_edit() {
    let mut session = session();
    session.apply(add_section());
    session.apply(add_section());
    session.apply(add_section());

    session.undo();
    session.undo();
    assert!(session.can_redo());
    assert_eq!(session.tree().sections.len(), 1);

    // A fresh edit discards the undone states for good
    session.apply(Mutation::RemoveSection {
        section_id: session.tree().sections[0].id.clone(),
    });
    assert!(!session.can_redo());

    let after = session.tree().clone();
    session.redo();
    assert_eq!(session.tree(), &after);
    assert_eq!(session.tree().sections.len(), 0);
}

#[test]
fn test_no_op_mutations_still_record() {
    let mut session = session();
    session.apply(add_section());
    session.apply(Mutation::MoveSection {
        section_id: session.tree().sections[0].id.clone(),
        direction: pagegrid_editor::MoveDirection::Up,
    });

    // Two edits recorded; two undos reach the empty tree
    session.undo();
    session.undo();
    assert_eq!(session.tree(), &ContentTree::new());
}

#[test]
fn test_save_load_round_trip() -> Result<()> {
    let mut session = session();
    session.apply(add_section());
    let section_id = session.tree().sections[0].id.clone();
    let column_id = session.tree().sections[0].columns[0].id.clone();

    for kind in [
        ElementKind::Heading,
        ElementKind::Text,
        ElementKind::Image,
        ElementKind::Button,
        ElementKind::Video,
        ElementKind::Form,
        ElementKind::Spacer,
    ] {
        let template = {
            let mut ids = SequentialIds::new("tpl");
            Element::new(kind, &mut ids)
        };
        session.apply(Mutation::AddElement {
            section_id: section_id.clone(),
            column_id: column_id.clone(),
            template,
        });
    }

    let saved = session.save();
    let reloaded = load_tree_value(&saved);
    assert_eq!(&reloaded, session.tree());

    // And a reloaded session saves the identical shape
    let session2 = EditSession::new(reloaded);
    assert_eq!(session2.save(), saved);
    Ok(())
}

#[test]
fn test_selection_routes_and_prunes() {
    let mut session = session();
    session.apply(add_section());
    let section_id = session.tree().sections[0].id.clone();
    let column_id = session.tree().sections[0].columns[0].id.clone();

    session.select(Selection::Column {
        section_id: section_id.clone(),
        column_id: column_id.clone(),
    });
    assert!(matches!(session.selection(), Selection::Column { .. }));

    // Selection survives unrelated edits
    session.apply(add_section());
    assert!(matches!(session.selection(), Selection::Column { .. }));

    // Undoing past the column's creation clears it
    session.undo();
    session.undo();
    assert_eq!(session.selection(), &Selection::None);
}
