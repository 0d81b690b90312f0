//! Integration tests for mutation sequences

use pagegrid_content::{ContentTree, Element, ElementKind, SequentialIds};
use pagegrid_editor::{
    ContentPatch, ElementPatch, MoveDirection, Mutation, NestedColumnStylePatch,
};

fn apply(tree: &ContentTree, ids: &mut SequentialIds, mutation: Mutation) -> ContentTree {
    mutation.apply(tree, ids)
}

#[test]
fn test_add_and_move_sections() {
    let mut ids = SequentialIds::new("doc");
    let mut tree = ContentTree::new();

    for _ in 0..2 {
        tree = apply(
            &tree,
            &mut ids,
            Mutation::AddSection {
                at_index: None,
                preset: None,
            },
        );
    }

    // Both sections seeded with one full-width column
    assert_eq!(tree.sections.len(), 2);
    for section in &tree.sections {
        assert_eq!(section.columns.len(), 1);
        assert_eq!(section.columns[0].width, 12);
    }

    let first = tree.sections[0].id.clone();
    let second = tree.sections[1].id.clone();

    tree = apply(
        &tree,
        &mut ids,
        Mutation::MoveSection {
            section_id: second.clone(),
            direction: MoveDirection::Up,
        },
    );
    assert_eq!(tree.sections[0].id, second);
    assert_eq!(tree.sections[1].id, first);

    // Moving the now-first section up again is a no-op
    let unchanged = apply(
        &tree,
        &mut ids,
        Mutation::MoveSection {
            section_id: second,
            direction: MoveDirection::Up,
        },
    );
    assert_eq!(unchanged, tree);
}

#[test]
fn test_duplicate_section_id_freedom() {
    let mut ids = SequentialIds::new("doc");
    let mut tree = apply(
        &ContentTree::new(),
        &mut ids,
        Mutation::AddSection {
            at_index: None,
            preset: None,
        },
    );
    let section_id = tree.sections[0].id.clone();
    let column_id = tree.sections[0].columns[0].id.clone();

    // Populate the section with elements and a nested column holding more
    for kind in [ElementKind::Heading, ElementKind::Text, ElementKind::Button] {
        let template = Element::new(kind, &mut ids);
        tree = apply(
            &tree,
            &mut ids,
            Mutation::AddElement {
                section_id: section_id.clone(),
                column_id: column_id.clone(),
                template,
            },
        );
    }
    tree = apply(
        &tree,
        &mut ids,
        Mutation::AddNestedColumn {
            section_id: section_id.clone(),
            column_id: column_id.clone(),
            width: Some(6),
        },
    );
    let nested_id = tree.sections[0].columns[0].nested[0].id.clone();
    let template = Element::new(ElementKind::Image, &mut ids);
    tree = apply(
        &tree,
        &mut ids,
        Mutation::AddNestedElement {
            section_id: section_id.clone(),
            column_id,
            nested_id,
            template,
        },
    );

    let tree = apply(&tree, &mut ids, Mutation::DuplicateSection { section_id });

    // No two nodes anywhere in the result share an id
    let all = tree.all_ids();
    let mut deduped: Vec<&str> = all.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(all.len(), deduped.len());
}

#[test]
fn test_invalid_coordinates_never_change_the_tree() {
    let mut ids = SequentialIds::new("doc");
    let mut tree = apply(
        &ContentTree::new(),
        &mut ids,
        Mutation::AddSection {
            at_index: None,
            preset: None,
        },
    );
    let section_id = tree.sections[0].id.clone();
    let column_id = tree.sections[0].columns[0].id.clone();
    let template = Element::new(ElementKind::Text, &mut ids);
    tree = apply(
        &tree,
        &mut ids,
        Mutation::AddElement {
            section_id: section_id.clone(),
            column_id: column_id.clone(),
            template,
        },
    );

    let bad: Vec<Mutation> = vec![
        Mutation::RemoveSection {
            section_id: "nope".into(),
        },
        Mutation::DuplicateSection {
            section_id: "nope".into(),
        },
        Mutation::AddColumn {
            section_id: "nope".into(),
            width: None,
        },
        Mutation::RemoveColumn {
            section_id: section_id.clone(),
            column_id: "nope".into(),
        },
        Mutation::UpdateColumnWidth {
            section_id: "nope".into(),
            column_id: column_id.clone(),
            width: 4,
        },
        Mutation::RemoveElement {
            section_id: section_id.clone(),
            column_id: column_id.clone(),
            element_id: "nope".into(),
        },
        Mutation::UpdateElement {
            section_id: section_id.clone(),
            column_id: column_id.clone(),
            element_id: "nope".into(),
            patch: ElementPatch {
                content: ContentPatch {
                    content: Some("never applied".into()),
                    ..Default::default()
                },
                ..Default::default()
            },
        },
        Mutation::MoveElement {
            section_id,
            column_id,
            element_id: "nope".into(),
            direction: MoveDirection::Down,
        },
        Mutation::RemoveNestedColumn {
            section_id: "nope".into(),
            column_id: "nope".into(),
            nested_id: "nope".into(),
        },
        Mutation::UpdateNestedColumnStyle {
            section_id: "nope".into(),
            column_id: "nope".into(),
            nested_id: "nope".into(),
            patch: NestedColumnStylePatch {
                card: Some(true),
                ..Default::default()
            },
        },
    ];

    for mutation in bad {
        let next = apply(&tree, &mut ids, mutation.clone());
        assert_eq!(next, tree, "expected no-op for {:?}", mutation.name());
    }
}

#[test]
fn test_add_section_at_explicit_index() {
    let mut ids = SequentialIds::new("doc");
    let mut tree = ContentTree::new();
    for _ in 0..2 {
        tree = apply(
            &tree,
            &mut ids,
            Mutation::AddSection {
                at_index: None,
                preset: None,
            },
        );
    }
    let first = tree.sections[0].id.clone();

    tree = apply(
        &tree,
        &mut ids,
        Mutation::AddSection {
            at_index: Some(1),
            preset: None,
        },
    );
    assert_eq!(tree.sections.len(), 3);
    assert_eq!(tree.sections[0].id, first);

    // An out-of-range index clamps to the end
    tree = apply(
        &tree,
        &mut ids,
        Mutation::AddSection {
            at_index: Some(99),
            preset: None,
        },
    );
    assert_eq!(tree.sections.len(), 4);
}

#[test]
fn test_column_width_clamped_to_grid() {
    let mut ids = SequentialIds::new("doc");
    let mut tree = apply(
        &ContentTree::new(),
        &mut ids,
        Mutation::AddSection {
            at_index: None,
            preset: None,
        },
    );
    let section_id = tree.sections[0].id.clone();
    let column_id = tree.sections[0].columns[0].id.clone();

    tree = apply(
        &tree,
        &mut ids,
        Mutation::UpdateColumnWidth {
            section_id: section_id.clone(),
            column_id: column_id.clone(),
            width: 40,
        },
    );
    assert_eq!(tree.sections[0].columns[0].width, 12);

    tree = apply(
        &tree,
        &mut ids,
        Mutation::UpdateColumnWidth {
            section_id: section_id.clone(),
            column_id: column_id.clone(),
            width: 0,
        },
    );
    assert_eq!(tree.sections[0].columns[0].width, 1);

    tree = apply(
        &tree,
        &mut ids,
        Mutation::AddNestedColumn {
            section_id: section_id.clone(),
            column_id: column_id.clone(),
            width: None,
        },
    );
    let nested_id = tree.sections[0].columns[0].nested[0].id.clone();
    tree = apply(
        &tree,
        &mut ids,
        Mutation::UpdateNestedColumnWidth {
            section_id,
            column_id,
            nested_id,
            width: 99,
        },
    );
    assert_eq!(tree.sections[0].columns[0].nested[0].width, 12);
}

#[test]
fn test_sibling_widths_are_never_validated() {
    // Overflowing the 12-unit grid across siblings is accepted behavior
    let mut ids = SequentialIds::new("doc");
    let mut tree = apply(
        &ContentTree::new(),
        &mut ids,
        Mutation::AddSection {
            at_index: None,
            preset: None,
        },
    );
    let section_id = tree.sections[0].id.clone();
    for _ in 0..3 {
        tree = apply(
            &tree,
            &mut ids,
            Mutation::AddColumn {
                section_id: section_id.clone(),
                width: Some(10),
            },
        );
    }
    let total: u32 = tree.sections[0].columns.iter().map(|c| c.width as u32).sum();
    assert_eq!(total, 42);
}
