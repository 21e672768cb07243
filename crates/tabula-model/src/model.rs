//! Serializable workbook records
//!
//! These types are the boundary between the document model and whatever
//! encodes it to a file. They hold only primitives: strings, numbers and
//! type tags. Literal cell strings are indices into `shared_strings`; dates
//! are milliseconds since the Unix epoch, read as naive (no timezone).
//!
//! A cell serializes as
//!
//! ```json
//! {"address": "B1", "value": {"type": "string", "payload": 0}}
//! ```

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tabula_core::ValueType;

fn is_zero(n: &u32) -> bool {
    *n == 0
}

/// A whole workbook
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkbookModel {
    /// Document properties
    #[serde(default)]
    pub properties: PropertiesModel,
    /// Worksheets in presentation order
    #[serde(default)]
    pub worksheets: Vec<WorksheetModel>,
    /// Shared string table; entry `i` is the content of handle `i`
    #[serde(default)]
    pub shared_strings: Vec<String>,
    /// Defined names, ordered by name
    #[serde(default)]
    pub defined_names: Vec<DefinedNameModel>,
}

/// Document properties
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertiesModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    /// Epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    /// Epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<i64>,
}

/// One worksheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorksheetModel {
    pub name: String,
    /// Cells in row-major order
    #[serde(default)]
    pub cells: Vec<CellModel>,
}

/// One cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellModel {
    /// A1-style address
    pub address: String,
    pub value: ValueModel,
    /// Opaque style key, passed through untouched
    #[serde(default, skip_serializing_if = "is_zero")]
    pub style_index: u32,
}

/// A cell value with its type tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ValueModel {
    Null,
    Number(f64),
    /// Index into the shared string table
    String(u32),
    /// Epoch milliseconds
    Date(i64),
    Hyperlink(HyperlinkModel),
    Formula(FormulaModel),
}

impl ValueModel {
    /// The type tag of this value
    pub fn value_type(&self) -> ValueType {
        match self {
            ValueModel::Null => ValueType::Null,
            ValueModel::Number(_) => ValueType::Number,
            ValueModel::String(_) => ValueType::String,
            ValueModel::Date(_) => ValueType::Date,
            ValueModel::Hyperlink(_) => ValueType::Hyperlink,
            ValueModel::Formula(_) => ValueType::Formula,
        }
    }
}

/// Hyperlink payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyperlinkModel {
    pub text: String,
    pub target: String,
}

/// Formula payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaModel {
    pub formula: String,
    pub result: ResultModel,
}

/// A formula's cached result; strings are written inline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ResultModel {
    Null,
    Number(f64),
    String(String),
    /// Epoch milliseconds
    Date(i64),
    Hyperlink(HyperlinkModel),
}

/// A defined name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinedNameModel {
    pub name: String,
    /// Worksheet name
    pub sheet: String,
    /// A1-style address
    pub address: String,
}

/// Convert a naive timestamp to epoch milliseconds
pub fn date_to_millis(date: NaiveDateTime) -> i64 {
    date.and_utc().timestamp_millis()
}

/// Convert epoch milliseconds back to a naive timestamp
pub fn millis_to_date(millis: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis).map(|d| d.naive_utc())
}
