//! Error types for tabula-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tabula-core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Value shape outside the supported set
    #[error("Unsupported value kind: {0}")]
    UnsupportedValueKind(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateWorksheetName(String),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Defined name already bound to another cell
    #[error("Name '{name}' already refers to {existing}")]
    DuplicateName {
        /// The name that was being assigned
        name: String,
        /// Where the name currently points (e.g. `Sheet1!A1`)
        existing: String,
    },

    /// Defined name that is not a legal identifier
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// String handle not issued by this workbook's string table
    #[error("String handle #{0} is not in the shared string table")]
    InvalidStringHandle(u32),
}
