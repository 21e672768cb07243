//! # tabula-model
//!
//! Serializable workbook model for tabula, and the codec between it and
//! [`tabula_core::Workbook`].
//!
//! The model is plain data: worksheets with addressed cells, a shared string
//! table, defined names and document properties. Cells refer to literal strings
//! by table index, so a write followed by a read restores the same handles and
//! the same sharing between cells.
//!
//! ## Example
//!
//! ```rust
//! use tabula_core::Workbook;
//! use tabula_model::ModelCodec;
//!
//! let mut workbook = Workbook::new();
//! workbook
//!     .add_worksheet("Data")
//!     .unwrap()
//!     .set_cell_value("A1", "Hello")
//!     .unwrap();
//!
//! let json = ModelCodec::to_json(&workbook).unwrap();
//! let restored = ModelCodec::from_json(&json).unwrap();
//! assert_eq!(restored, workbook);
//! ```

pub mod error;
pub mod model;
pub mod reader;
pub mod writer;

pub use error::{ModelError, ModelResult};
pub use model::{
    CellModel, DefinedNameModel, FormulaModel, HyperlinkModel, PropertiesModel, ResultModel,
    ValueModel, WorkbookModel, WorksheetModel,
};
pub use reader::ModelReader;
pub use writer::ModelWriter;

use tabula_core::Workbook;

/// Entry points for converting workbooks to and from the model
pub struct ModelCodec;

impl ModelCodec {
    /// Convert a workbook to its serializable model
    pub fn to_model(workbook: &Workbook) -> WorkbookModel {
        ModelWriter::write(workbook)
    }

    /// Rebuild a workbook from a model
    pub fn from_model(model: &WorkbookModel) -> ModelResult<Workbook> {
        ModelReader::read(model)
    }

    /// Serialize a workbook as pretty-printed JSON
    pub fn to_json(workbook: &Workbook) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(&Self::to_model(workbook))?)
    }

    /// Rebuild a workbook from JSON produced by [`ModelCodec::to_json`]
    pub fn from_json(json: &str) -> ModelResult<Workbook> {
        let model: WorkbookModel = serde_json::from_str(json)?;
        Self::from_model(&model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_syntax_error() {
        assert!(matches!(
            ModelCodec::from_json("{\"worksheets\": ["),
            Err(ModelError::Json(_))
        ));
    }

    #[test]
    fn test_from_json_unknown_type_tag() {
        let json = r#"{"worksheets": [{"name": "S", "cells": [
            {"address": "A1", "value": {"type": "boolean", "payload": true}}
        ]}]}"#;
        assert!(matches!(ModelCodec::from_json(json), Err(ModelError::Json(_))));
    }

    #[test]
    fn test_from_json_malformed() {
        let json = r#"{"worksheets": [{"name": "S", "cells": [
            {"address": "A1", "value": {"type": "string", "payload": 0}}
        ]}]}"#;
        assert!(matches!(
            ModelCodec::from_json(json),
            Err(ModelError::MalformedModel(_))
        ));
    }
}
