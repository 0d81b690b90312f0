//! # Selection
//!
//! Tracks which node the editing surface is targeting. A pure state
//! holder: selecting never touches the tree, and a selection whose target
//! disappears is cleared rather than left dangling.

use pagegrid_content::ContentTree;
use serde::{Deserialize, Serialize};

/// Currently targeted node, addressed by the minimal coordinate set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    None,
    Section {
        section_id: String,
    },
    Column {
        section_id: String,
        column_id: String,
    },
    Element {
        section_id: String,
        column_id: String,
        element_id: String,
    },
    NestedColumn {
        section_id: String,
        column_id: String,
        nested_id: String,
    },
    NestedElement {
        section_id: String,
        column_id: String,
        nested_id: String,
        element_id: String,
    },
}

impl Selection {
    /// Whether the referenced node still exists in the tree
    pub fn resolves_in(&self, tree: &ContentTree) -> bool {
        match self {
            Selection::None => true,
            Selection::Section { section_id } => tree.find_section(section_id).is_some(),
            Selection::Column { section_id, column_id } => tree
                .find_section(section_id)
                .and_then(|s| s.find_column(column_id))
                .is_some(),
            Selection::Element { section_id, column_id, element_id } => tree
                .find_section(section_id)
                .and_then(|s| s.find_column(column_id))
                .and_then(|c| c.find_element(element_id))
                .is_some(),
            Selection::NestedColumn { section_id, column_id, nested_id } => tree
                .find_section(section_id)
                .and_then(|s| s.find_column(column_id))
                .and_then(|c| c.find_nested(nested_id))
                .is_some(),
            Selection::NestedElement {
                section_id,
                column_id,
                nested_id,
                element_id,
            } => tree
                .find_section(section_id)
                .and_then(|s| s.find_column(column_id))
                .and_then(|c| c.find_nested(nested_id))
                .map(|n| n.elements.iter().any(|e| e.id == *element_id))
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    current: Selection,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, selection: Selection) {
        self.current = selection;
    }

    pub fn clear(&mut self) {
        self.current = Selection::None;
    }

    pub fn current(&self) -> &Selection {
        &self.current
    }

    /// Clear the selection if its target no longer exists
    pub fn prune(&mut self, tree: &ContentTree) {
        if !self.current.resolves_in(tree) {
            self.current = Selection::None;
        }
    }
}
