//! # Pagegrid Editor
//!
//! Structural editing engine for the page-builder content tree.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ content: persisted JSON ⇄ ContentTree       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: session + mutations                 │
//! │  - Apply mutations (total over coordinates) │
//! │  - Snapshot history with undo/redo          │
//! │  - Selection routing                        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: ContentTree → VDOM                │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core principles
//!
//! 1. **The tree is the source of truth**: rendered output is a derived view
//! 2. **Mutations are pure**: current tree in, next tree out
//! 3. **Stale coordinates never corrupt**: missing ids make an operation a
//!    no-op, never a panic or partial application
//! 4. **History is linear**: a fresh edit discards the redo tail
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagegrid_editor::{EditSession, Mutation};
//!
//! let mut session = EditSession::load(&page.content)?;
//!
//! session.apply(Mutation::AddSection { at_index: None, preset: None });
//! session.undo();
//! session.redo();
//!
//! let json = session.save();
//! ```

mod errors;
mod history;
mod mutations;
mod selection;
mod session;

pub use errors::EditorError;
pub use history::HistoryLog;
pub use mutations::{
    ColumnStylePatch, ContentPatch, ElementPatch, MoveDirection, Mutation, NestedColumnStylePatch,
    StylePatch,
};
pub use selection::{Selection, SelectionModel};
pub use session::EditSession;

// Re-export the tree types for convenience
pub use pagegrid_content::{ContentTree, Element, ElementKind, ElementPayload};
