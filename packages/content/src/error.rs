use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
