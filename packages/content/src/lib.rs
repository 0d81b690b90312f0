//! # Pagegrid Content
//!
//! Data model for the page-builder content tree.
//!
//! A page is a `Section → Column → Element` tree. Columns may nest one
//! further level of columns; nested columns cannot nest again. All nodes
//! carry opaque stable ids assigned through an injected [`IdSource`].
//!
//! The crate also owns the serialization boundary with page storage:
//! [`load_tree`] accepts both the current `sections[]` shape and the legacy
//! `rows[]` shape; [`save_tree`] always emits `sections[]`.

pub mod error;
pub mod id;
pub mod json;
pub mod model;

pub use error::ContentError;
pub use id::{IdSource, SequentialIds, UuidIds};
pub use json::{load_tree, load_tree_value, save_tree};
pub use model::*;
