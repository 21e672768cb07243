//! # tabula
//!
//! An in-memory spreadsheet document model.
//!
//! A [`Workbook`] holds ordered worksheets of sparse, A1-addressed cells. Values
//! are assigned loosely (numbers, text, dates, hyperlinks, formulas with a
//! cached result) and typed on assignment. Literal strings live in one shared
//! table per workbook so equal text is stored once. Cells can carry a defined
//! name that is unique across the workbook.
//!
//! The whole document converts to and from a serializable [`WorkbookModel`],
//! which is what file encoders consume.
//!
//! ## Features
//!
//! - Type inference from loosely-structured input ([`CellInput`])
//! - Workbook-wide string interning with stable handles
//! - Case-insensitive defined names
//! - Lossless conversion to and from [`WorkbookModel`] and JSON
//!
//! ## Example
//!
//! ```rust
//! use tabula::prelude::*;
//!
//! let mut workbook = Workbook::new();
//! let mut sheet = workbook.add_worksheet("blort").unwrap();
//!
//! let mut a1 = sheet.cell("A1").unwrap();
//! a1.set_value(7).unwrap();
//! a1.set_alias("Seven").unwrap();
//!
//! sheet.set_cell_value("B1", "Hello").unwrap();
//! sheet
//!     .set_cell_value("A2", CellInput::formula("A1", 7))
//!     .unwrap();
//!
//! let model = workbook.to_model();
//! let restored = Workbook::from_model(&model).unwrap();
//! assert_eq!(restored, workbook);
//! assert_eq!(restored.named_cell("seven").unwrap().value().as_number(), Some(7.0));
//! ```

pub mod prelude;

// Re-export core types
pub use tabula_core::{
    cell, names, strings, Cell, CellAddress, CellInput, CellMut, DefinedName, DefinedNames,
    Error, FormulaResult, Hyperlink, Result, SharedStrings, StringHandle, Value, ValueType,
    Workbook, WorkbookProperties, Worksheet, WorksheetMut, MAX_COLS, MAX_NAME_LEN, MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};

// Re-export model types
pub use tabula_model::{
    model, CellModel, DefinedNameModel, FormulaModel, HyperlinkModel, ModelCodec, ModelError,
    ModelReader, ModelResult, ModelWriter, PropertiesModel, ResultModel, ValueModel,
    WorkbookModel, WorksheetModel,
};

/// Extension trait for converting a [`Workbook`] to and from its model
pub trait WorkbookModelExt: Sized {
    /// Convert to the serializable model
    fn to_model(&self) -> WorkbookModel;

    /// Rebuild from a serializable model
    fn from_model(model: &WorkbookModel) -> ModelResult<Self>;

    /// Serialize as pretty-printed JSON
    fn to_json(&self) -> ModelResult<String>;

    /// Rebuild from JSON
    fn from_json(json: &str) -> ModelResult<Self>;
}

impl WorkbookModelExt for Workbook {
    fn to_model(&self) -> WorkbookModel {
        ModelCodec::to_model(self)
    }

    fn from_model(model: &WorkbookModel) -> ModelResult<Workbook> {
        ModelCodec::from_model(model)
    }

    fn to_json(&self) -> ModelResult<String> {
        ModelCodec::to_json(self)
    }

    fn from_json(json: &str) -> ModelResult<Workbook> {
        ModelCodec::from_json(json)
    }
}
