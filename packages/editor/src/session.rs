//! # Edit Session
//!
//! One session per open editor: owns the live tree, its history, the
//! current selection, and the id source. Sessions are independent —
//! multiple editors in one process never share state.

use pagegrid_content::{load_tree, save_tree, ContentTree, IdSource, UuidIds};
use serde_json::Value;
use tracing::debug;

use crate::history::HistoryLog;
use crate::mutations::Mutation;
use crate::selection::{Selection, SelectionModel};
use crate::EditorError;

pub struct EditSession {
    tree: ContentTree,
    history: HistoryLog,
    selection: SelectionModel,
    ids: Box<dyn IdSource>,
    /// Increments on each applied mutation
    version: u64,
}

impl EditSession {
    /// New session over a tree, with random production ids
    pub fn new(tree: ContentTree) -> Self {
        Self::with_id_source(tree, Box::new(UuidIds))
    }

    /// New session with an injected id source (deterministic in tests)
    pub fn with_id_source(tree: ContentTree, ids: Box<dyn IdSource>) -> Self {
        Self {
            history: HistoryLog::new(tree.clone()),
            tree,
            selection: SelectionModel::new(),
            ids,
            version: 0,
        }
    }

    /// New session from persisted page content
    pub fn load(content: &str) -> Result<Self, EditorError> {
        Ok(Self::new(load_tree(content)?))
    }

    /// Current persisted shape of the tree
    pub fn save(&self) -> Value {
        save_tree(&self.tree)
    }

    pub fn tree(&self) -> &ContentTree {
        &self.tree
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply a mutation, record the result, and prune stale selection.
    ///
    /// Mutations with invalid coordinates leave the tree value-identical;
    /// they are still recorded, matching the editing surface's behavior.
    pub fn apply(&mut self, mutation: Mutation) -> &ContentTree {
        debug!(mutation = mutation.name(), version = self.version, "applying mutation");
        self.tree = mutation.apply(&self.tree, self.ids.as_mut());
        self.history.record(self.tree.clone());
        self.selection.prune(&self.tree);
        self.version += 1;
        &self.tree
    }

    /// Step back in history; no-op at the first snapshot
    pub fn undo(&mut self) -> &ContentTree {
        self.tree = self.history.undo().clone();
        self.selection.prune(&self.tree);
        &self.tree
    }

    /// Step forward in history; no-op at the last snapshot
    pub fn redo(&mut self) -> &ContentTree {
        self.tree = self.history.redo().clone();
        self.selection.prune(&self.tree);
        &self.tree
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Replace the tree wholesale and restart history at a single entry
    pub fn set_content(&mut self, tree: ContentTree) {
        self.history.reset(tree.clone());
        self.tree = tree;
        self.selection.prune(&self.tree);
    }

    pub fn select(&mut self, selection: Selection) {
        self.selection.select(selection);
    }

    pub fn selection(&self) -> &Selection {
        self.selection.current()
    }

    /// Fresh id from the session's id source, for building element templates
    pub fn next_id(&mut self) -> String {
        self.ids.next_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagegrid_content::SequentialIds;

    fn session() -> EditSession {
        EditSession::with_id_source(
            ContentTree::new(),
            Box::new(SequentialIds::new("session")),
        )
    }

    #[test]
    fn test_version_increments_per_mutation() {
        let mut session = session();
        assert_eq!(session.version(), 0);

        session.apply(Mutation::AddSection {
            at_index: None,
            preset: None,
        });
        assert_eq!(session.version(), 1);

        // No-op mutations still count as edits
        session.apply(Mutation::RemoveSection {
            section_id: "missing".to_string(),
        });
        assert_eq!(session.version(), 2);
    }

    #[test]
    fn test_selection_cleared_when_node_removed() {
        let mut session = session();
        session.apply(Mutation::AddSection {
            at_index: None,
            preset: None,
        });
        let section_id = session.tree().sections[0].id.clone();

        session.select(Selection::Section {
            section_id: section_id.clone(),
        });
        session.apply(Mutation::RemoveSection { section_id });

        assert_eq!(session.selection(), &Selection::None);
    }

    #[test]
    fn test_set_content_resets_history() {
        let mut session = session();
        session.apply(Mutation::AddSection {
            at_index: None,
            preset: None,
        });
        assert!(session.can_undo());

        session.set_content(ContentTree::new());
        assert!(!session.can_undo());
        assert!(!session.can_redo());
    }
}
