//! Model codec error types

use thiserror::Error;

/// Result type for model conversions
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while converting to or from a [`WorkbookModel`](crate::WorkbookModel)
#[derive(Debug, Error)]
pub enum ModelError {
    /// The model is structurally inconsistent
    #[error("Malformed model: {0}")]
    MalformedModel(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] tabula_core::Error),
}

impl ModelError {
    /// Create a malformed-model error, logging it first
    pub(crate) fn malformed<S: Into<String>>(msg: S) -> Self {
        let msg = msg.into();
        log::warn!("rejecting workbook model: {}", msg);
        ModelError::MalformedModel(msg)
    }
}
