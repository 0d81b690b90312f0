//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("content error: {0}")]
    Content(#[from] pagegrid_content::ContentError),
}
