//! Cell value types and value inference
//!
//! Assignment goes through two layers. [`CellInput`] is whatever the caller
//! hands over: a number, a date, some text, or a record of named fields.
//! [`infer`] maps that shape onto the closed [`Value`] set, checking the
//! shapes in a fixed order:
//!
//! 1. empty input becomes [`Value::Null`]
//! 2. a finite number becomes [`Value::Number`]
//! 3. a date becomes [`Value::Date`]
//! 4. a record with a formula field and a `result` field becomes [`Value::Formula`]
//! 5. a record with display text and a link target becomes [`Value::Hyperlink`]
//! 6. text becomes [`Value::String`], interned in the workbook's [`SharedStrings`]
//! 7. anything else is rejected with [`Error::UnsupportedValueKind`]
//!
//! Only step 6 touches the string table. A formula's result is inferred the
//! same way but keeps its text inline, so it never shares a handle with a
//! literal string.

use std::fmt;

use chrono::{NaiveDateTime, SubsecRound};

use crate::error::{Error, Result};
use crate::strings::{SharedStrings, StringHandle};

/// Record keys accepted for a formula expression
pub const FORMULA_KEYS: &[&str] = &["formula", "expression"];
/// Record keys accepted for a formula's cached result
pub const RESULT_KEYS: &[&str] = &["result"];
/// Record keys accepted for a hyperlink's display text
pub const TEXT_KEYS: &[&str] = &["text", "displayText"];
/// Record keys accepted for a hyperlink's target
pub const TARGET_KEYS: &[&str] = &["hyperlink", "target"];

/// The type tag of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ValueType {
    Null,
    Number,
    String,
    Date,
    Hyperlink,
    Formula,
}

impl ValueType {
    /// Lowercase name used in messages and serialized tags
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Date => "date",
            ValueType::Hyperlink => "hyperlink",
            ValueType::Formula => "formula",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A link with the text shown in the cell
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hyperlink {
    /// Text displayed in the cell
    pub text: String,
    /// Link target (URL or location)
    pub target: String,
}

impl Hyperlink {
    /// Create a new hyperlink
    pub fn new(text: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target: target.into(),
        }
    }
}

/// Represents the value stored in a cell
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Empty cell (no value)
    #[default]
    Null,

    /// Numeric value
    Number(f64),

    /// Literal string, interned in the workbook's shared string table
    String(StringHandle),

    /// Date and time without a timezone, millisecond precision
    Date(NaiveDateTime),

    /// Hyperlink with display text
    Hyperlink(Hyperlink),

    /// Formula with the result of its last calculation
    Formula {
        /// Formula text as written (e.g. `SUM(A1:A10)`)
        formula: String,
        /// Last calculated value
        result: FormulaResult,
    },
}

impl Value {
    /// The type tag of this value
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Date(_) => ValueType::Date,
            Value::Hyperlink(_) => ValueType::Hyperlink,
            Value::Formula { .. } => ValueType::Formula,
        }
    }

    /// Check if the value is empty
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if the value is a formula
    pub fn is_formula(&self) -> bool {
        matches!(self, Value::Formula { .. })
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the shared string handle of a literal string value
    pub fn string_handle(&self) -> Option<StringHandle> {
        match self {
            Value::String(handle) => Some(*handle),
            _ => None,
        }
    }

    /// Try to get the value as a date
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Try to get the value as a hyperlink
    pub fn as_hyperlink(&self) -> Option<&Hyperlink> {
        match self {
            Value::Hyperlink(link) => Some(link),
            _ => None,
        }
    }

    /// Get the formula text if this is a formula
    pub fn formula_text(&self) -> Option<&str> {
        match self {
            Value::Formula { formula, .. } => Some(formula),
            _ => None,
        }
    }

    /// Get the cached result if this is a formula
    pub fn formula_result(&self) -> Option<&FormulaResult> {
        match self {
            Value::Formula { result, .. } => Some(result),
            _ => None,
        }
    }
}

/// The cached result of a formula
///
/// Mirrors [`Value`] without the formula variant, and with strings held
/// inline rather than as shared string handles.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormulaResult {
    #[default]
    Null,
    Number(f64),
    String(String),
    Date(NaiveDateTime),
    Hyperlink(Hyperlink),
}

impl FormulaResult {
    /// The type tag of this result
    pub fn value_type(&self) -> ValueType {
        match self {
            FormulaResult::Null => ValueType::Null,
            FormulaResult::Number(_) => ValueType::Number,
            FormulaResult::String(_) => ValueType::String,
            FormulaResult::Date(_) => ValueType::Date,
            FormulaResult::Hyperlink(_) => ValueType::Hyperlink,
        }
    }

    /// Try to get the result as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FormulaResult::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the result as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FormulaResult::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the result as a date
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            FormulaResult::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for FormulaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaResult::Null => Ok(()),
            FormulaResult::Number(n) => write!(f, "{}", n),
            FormulaResult::String(s) => f.write_str(s),
            FormulaResult::Date(d) => write!(f, "{}", d),
            FormulaResult::Hyperlink(link) => f.write_str(&link.text),
        }
    }
}

/// Loosely-structured input assigned to a cell
///
/// Most callers never build this directly: `set_value` accepts anything
/// convertible into it, such as `f64`, `&str` or [`NaiveDateTime`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellInput {
    /// No value
    #[default]
    Empty,
    /// A number
    Number(f64),
    /// A timestamp
    Date(NaiveDateTime),
    /// Plain text
    Text(String),
    /// A boolean (not storable)
    Boolean(bool),
    /// A sequence of inputs (not storable)
    List(Vec<CellInput>),
    /// Named fields, e.g. `{formula, result}` or `{text, hyperlink}`
    Record(Vec<(String, CellInput)>),
}

impl CellInput {
    /// Build a `{formula, result}` record
    pub fn formula(formula: impl Into<String>, result: impl Into<CellInput>) -> Self {
        CellInput::Record(vec![
            ("formula".to_string(), CellInput::Text(formula.into())),
            ("result".to_string(), result.into()),
        ])
    }

    /// Build a `{text, hyperlink}` record
    pub fn hyperlink(text: impl Into<String>, target: impl Into<String>) -> Self {
        CellInput::Record(vec![
            ("text".to_string(), CellInput::Text(text.into())),
            ("hyperlink".to_string(), CellInput::Text(target.into())),
        ])
    }

    /// Build a record from key/value pairs
    pub fn record<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CellInput>,
    {
        CellInput::Record(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Short description of the input's shape, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            CellInput::Empty => "empty",
            CellInput::Number(_) => "number",
            CellInput::Date(_) => "date",
            CellInput::Text(_) => "text",
            CellInput::Boolean(_) => "boolean",
            CellInput::List(_) => "list",
            CellInput::Record(_) => "record",
        }
    }
}

impl From<f64> for CellInput {
    fn from(n: f64) -> Self {
        CellInput::Number(n)
    }
}

impl From<i32> for CellInput {
    fn from(n: i32) -> Self {
        CellInput::Number(n as f64)
    }
}

impl From<i64> for CellInput {
    fn from(n: i64) -> Self {
        CellInput::Number(n as f64)
    }
}

impl From<u32> for CellInput {
    fn from(n: u32) -> Self {
        CellInput::Number(n as f64)
    }
}

impl From<bool> for CellInput {
    fn from(b: bool) -> Self {
        CellInput::Boolean(b)
    }
}

impl From<&str> for CellInput {
    fn from(s: &str) -> Self {
        CellInput::Text(s.to_string())
    }
}

impl From<String> for CellInput {
    fn from(s: String) -> Self {
        CellInput::Text(s)
    }
}

impl From<NaiveDateTime> for CellInput {
    fn from(d: NaiveDateTime) -> Self {
        CellInput::Date(d)
    }
}

impl From<Hyperlink> for CellInput {
    fn from(link: Hyperlink) -> Self {
        CellInput::hyperlink(link.text, link.target)
    }
}

impl<T: Into<CellInput>> From<Option<T>> for CellInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellInput::Empty, Into::into)
    }
}

impl<T: Into<CellInput>> From<Vec<T>> for CellInput {
    fn from(items: Vec<T>) -> Self {
        CellInput::List(items.into_iter().map(Into::into).collect())
    }
}

/// JSON input: objects become records, so `{"formula": "A1", "result": 7}`
/// infers as a formula. Dates have no JSON form and arrive as text.
#[cfg(feature = "serde")]
impl From<serde_json::Value> for CellInput {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match value {
            Json::Null => CellInput::Empty,
            Json::Bool(b) => CellInput::Boolean(b),
            // Unrepresentable numbers become NaN, which assignment rejects
            Json::Number(n) => CellInput::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => CellInput::Text(s),
            Json::Array(items) => CellInput::List(items.into_iter().map(Into::into).collect()),
            Json::Object(fields) => CellInput::Record(
                fields.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

/// Infer the stored value for an input, interning literal text in `strings`
pub fn infer(input: CellInput, strings: &mut SharedStrings) -> Result<Value> {
    match input {
        CellInput::Empty => Ok(Value::Null),
        CellInput::Number(n) => Ok(Value::Number(finite(n)?)),
        CellInput::Date(d) => Ok(Value::Date(truncate_millis(d))),
        CellInput::Record(mut fields) => {
            if has_fields(&fields, FORMULA_KEYS, RESULT_KEYS) {
                let (formula, result) = take_pair(&mut fields, FORMULA_KEYS, RESULT_KEYS);
                let formula = expect_text(formula, "formula")?;
                let result = infer_result(result)?;
                Ok(Value::Formula { formula, result })
            } else if has_fields(&fields, TEXT_KEYS, TARGET_KEYS) {
                Ok(Value::Hyperlink(take_hyperlink(&mut fields)?))
            } else {
                Err(unsupported_record(&fields))
            }
        }
        CellInput::Text(s) => Ok(Value::String(strings.intern(s))),
        other => Err(Error::UnsupportedValueKind(format!(
            "cannot store a {} value in a cell",
            other.kind_name()
        ))),
    }
}

/// Infer a formula's cached result; text stays inline
fn infer_result(input: CellInput) -> Result<FormulaResult> {
    match input {
        CellInput::Empty => Ok(FormulaResult::Null),
        CellInput::Number(n) => Ok(FormulaResult::Number(finite(n)?)),
        CellInput::Date(d) => Ok(FormulaResult::Date(truncate_millis(d))),
        CellInput::Record(mut fields) => {
            if has_fields(&fields, FORMULA_KEYS, RESULT_KEYS) {
                Err(Error::UnsupportedValueKind(
                    "a formula result cannot itself be a formula".into(),
                ))
            } else if has_fields(&fields, TEXT_KEYS, TARGET_KEYS) {
                Ok(FormulaResult::Hyperlink(take_hyperlink(&mut fields)?))
            } else {
                Err(unsupported_record(&fields))
            }
        }
        CellInput::Text(s) => Ok(FormulaResult::String(s)),
        other => Err(Error::UnsupportedValueKind(format!(
            "cannot store a {} value as a formula result",
            other.kind_name()
        ))),
    }
}

/// Bring an already-typed value to the form [`infer`] would have produced
///
/// Dates lose sub-millisecond precision and non-finite numbers are rejected.
pub(crate) fn normalize(value: Value) -> Result<Value> {
    Ok(match value {
        Value::Number(n) => Value::Number(finite(n)?),
        Value::Date(d) => Value::Date(truncate_millis(d)),
        Value::Formula { formula, result } => Value::Formula {
            formula,
            result: match result {
                FormulaResult::Number(n) => FormulaResult::Number(finite(n)?),
                FormulaResult::Date(d) => FormulaResult::Date(truncate_millis(d)),
                other => other,
            },
        },
        other => other,
    })
}

pub(crate) fn truncate_millis(d: NaiveDateTime) -> NaiveDateTime {
    d.trunc_subsecs(3)
}

fn finite(n: f64) -> Result<f64> {
    if n.is_finite() {
        Ok(n)
    } else {
        Err(Error::UnsupportedValueKind(format!(
            "cannot store non-finite number {}",
            n
        )))
    }
}

fn position(fields: &[(String, CellInput)], keys: &[&str]) -> Option<usize> {
    fields.iter().position(|(k, _)| keys.contains(&k.as_str()))
}

fn has_fields(fields: &[(String, CellInput)], first: &[&str], second: &[&str]) -> bool {
    position(fields, first).is_some() && position(fields, second).is_some()
}

/// Remove and return the fields matching `first` and `second`.
/// Callers check presence with [`has_fields`] beforehand.
fn take_pair(
    fields: &mut Vec<(String, CellInput)>,
    first: &[&str],
    second: &[&str],
) -> (CellInput, CellInput) {
    let a = position(fields, first)
        .map(|i| fields.swap_remove(i).1)
        .unwrap_or_default();
    let b = position(fields, second)
        .map(|i| fields.swap_remove(i).1)
        .unwrap_or_default();
    (a, b)
}

fn take_hyperlink(fields: &mut Vec<(String, CellInput)>) -> Result<Hyperlink> {
    let (text, target) = take_pair(fields, TEXT_KEYS, TARGET_KEYS);
    Ok(Hyperlink {
        text: expect_text(text, "hyperlink text")?,
        target: expect_text(target, "hyperlink target")?,
    })
}

fn expect_text(input: CellInput, field: &str) -> Result<String> {
    match input {
        CellInput::Text(s) => Ok(s),
        other => Err(Error::UnsupportedValueKind(format!(
            "{} must be text, got {}",
            field,
            other.kind_name()
        ))),
    }
}

fn unsupported_record(fields: &[(String, CellInput)]) -> Error {
    let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
    Error::UnsupportedValueKind(format!(
        "record with fields [{}] is neither a formula nor a hyperlink",
        keys.join(", ")
    ))
}
