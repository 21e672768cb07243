//! Prelude module - common imports for tabula users
//!
//! ```rust
//! use tabula::prelude::*;
//! ```

pub use crate::{
    // Cell types
    Cell,
    CellAddress,
    CellInput,
    CellMut,
    FormulaResult,
    Hyperlink,
    Value,
    ValueType,

    // Names and strings
    DefinedName,
    SharedStrings,
    StringHandle,

    // Error types
    Error,
    ModelError,
    ModelResult,
    Result,

    // Main types
    Workbook,
    WorkbookProperties,
    Worksheet,
    WorksheetMut,

    // Model types
    ModelCodec,
    WorkbookModel,
    // Extension traits
    WorkbookModelExt,
};
