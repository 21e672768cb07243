//! # tabula-core
//!
//! Core document model for the tabula spreadsheet library.
//!
//! This crate provides the fundamental types used throughout tabula:
//! - [`CellAddress`] - A1-style cell coordinates
//! - [`CellInput`], [`Value`] and [`ValueType`] - loosely-structured input, the
//!   closed set of stored values, and the inference between them
//! - [`SharedStrings`] - the workbook-scoped string interning table
//! - [`Workbook`], [`Worksheet`], [`Cell`] - the document structures
//!
//! ## Example
//!
//! ```rust
//! use tabula_core::{CellInput, ValueType, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let mut sheet = workbook.add_worksheet("Data").unwrap();
//!
//! sheet.cell("A1").unwrap().set_value(42.0).unwrap();
//! sheet.cell("B1").unwrap().set_value("Hello").unwrap();
//! sheet
//!     .cell("C1")
//!     .unwrap()
//!     .set_value(CellInput::formula("A1*2", 84.0))
//!     .unwrap();
//!
//! let sheet = workbook.worksheet("Data").unwrap();
//! assert_eq!(sheet.cell("C1").unwrap().unwrap().value_type(), ValueType::Formula);
//! ```

pub mod cell;
pub mod error;
pub mod names;
pub mod strings;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{
    Cell, CellAddress, CellInput, CellMut, FormulaResult, Hyperlink, Value, ValueType,
};
pub use error::{Error, Result};
pub use names::{DefinedName, DefinedNames};
pub use strings::{SharedStrings, StringHandle};
pub use workbook::{Workbook, WorkbookProperties};
pub use worksheet::{Worksheet, WorksheetMut};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Maximum length of a defined name
pub const MAX_NAME_LEN: usize = 255;
