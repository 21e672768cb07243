//! Cell-related types
//!
//! This module contains:
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellInput`] / [`Value`] - what is assigned to a cell and what is stored
//! - [`Cell`] - Complete cell data including value, alias and style index
//! - [`CellMut`] - Mutable access to a cell inside its workbook

mod address;
mod value;

pub use address::CellAddress;
pub use value::{
    infer, CellInput, FormulaResult, Hyperlink, Value, ValueType, FORMULA_KEYS, RESULT_KEYS,
    TARGET_KEYS, TEXT_KEYS,
};
pub(crate) use value::truncate_millis;

use crate::error::{Error, Result};
use crate::names::{name_key, DefinedNames};
use crate::strings::SharedStrings;

/// Complete data for a single cell
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    address: CellAddress,
    value: Value,
    alias: Option<String>,
    /// Opaque key owned by the styling layer (0 = default style)
    style_index: u32,
}

impl Cell {
    /// Create an empty cell
    pub(crate) fn new(address: CellAddress) -> Self {
        Self {
            address,
            value: Value::Null,
            alias: None,
            style_index: 0,
        }
    }

    /// The cell's address
    pub fn address(&self) -> CellAddress {
        self.address
    }

    /// The cell's value
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The type of the cell's value
    pub fn value_type(&self) -> ValueType {
        self.value.value_type()
    }

    /// The defined name pointing at this cell, if any
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Style index assigned by the styling layer
    pub fn style_index(&self) -> u32 {
        self.style_index
    }

    /// Check if this cell holds nothing worth keeping
    pub fn is_empty(&self) -> bool {
        self.value.is_null() && self.alias.is_none() && self.style_index == 0
    }
}

/// Mutable access to one cell
///
/// Borrowed from a [`WorksheetMut`](crate::WorksheetMut), it carries the
/// workbook's string table and name table along with the cell so that value
/// and alias assignment can update them.
#[derive(Debug)]
pub struct CellMut<'a> {
    cell: &'a mut Cell,
    sheet: &'a str,
    strings: &'a mut SharedStrings,
    names: &'a mut DefinedNames,
}

impl<'a> CellMut<'a> {
    pub(crate) fn new(
        cell: &'a mut Cell,
        sheet: &'a str,
        strings: &'a mut SharedStrings,
        names: &'a mut DefinedNames,
    ) -> Self {
        Self {
            cell,
            sheet,
            strings,
            names,
        }
    }

    /// The cell's address
    pub fn address(&self) -> CellAddress {
        self.cell.address
    }

    /// The cell's value
    pub fn value(&self) -> &Value {
        &self.cell.value
    }

    /// The type of the cell's value
    pub fn value_type(&self) -> ValueType {
        self.cell.value_type()
    }

    /// The content of a literal string value
    pub fn text(&self) -> Option<&str> {
        self.cell
            .value
            .string_handle()
            .and_then(|h| self.strings.resolve(h))
    }

    /// The defined name pointing at this cell, if any
    pub fn alias(&self) -> Option<&str> {
        self.cell.alias()
    }

    /// Read-only view of the cell
    pub fn cell(&self) -> &Cell {
        self.cell
    }

    /// Assign a value, inferring its type
    ///
    /// On error the previous value is kept.
    pub fn set_value<V: Into<CellInput>>(&mut self, input: V) -> Result<()> {
        let value = value::infer(input.into(), self.strings)?;
        self.cell.value = value;
        Ok(())
    }

    /// Store an already-typed value
    ///
    /// Literal string values must carry a handle issued by this workbook's
    /// string table. Dates are truncated to milliseconds and non-finite
    /// numbers are rejected, as with [`CellMut::set_value`].
    pub fn set_typed_value(&mut self, value: Value) -> Result<()> {
        if let Value::String(handle) = value {
            if !self.strings.contains(handle) {
                return Err(Error::InvalidStringHandle(handle.index()));
            }
        }
        self.cell.value = value::normalize(value)?;
        Ok(())
    }

    /// Reset the value to [`Value::Null`]
    ///
    /// The alias and style index stay, and the string table keeps any string
    /// the old value referred to.
    pub fn clear(&mut self) {
        self.cell.value = Value::Null;
    }

    /// Give this cell a defined name
    ///
    /// A name already bound to this cell is accepted as is. A name bound to
    /// another cell fails with [`Error::DuplicateName`]. Any previous alias of
    /// this cell is released.
    pub fn set_alias(&mut self, name: &str) -> Result<()> {
        self.names.bind(name, self.sheet, self.cell.address)?;

        if let Some(old) = self.cell.alias.take() {
            if name_key(&old) != name_key(name) {
                self.names.remove(&old);
            }
        }
        let bound = self
            .names
            .get(name)
            .map_or_else(|| name.to_string(), |n| n.name.clone());
        self.cell.alias = Some(bound);
        Ok(())
    }

    /// Remove this cell's defined name, returning it
    pub fn clear_alias(&mut self) -> Option<String> {
        let old = self.cell.alias.take()?;
        self.names.remove(&old);
        Some(old)
    }

    /// Set the style index (0 = default)
    pub fn set_style_index(&mut self, style_index: u32) {
        self.cell.style_index = style_index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strings::StringHandle;

    struct Fixture {
        cell: Cell,
        strings: SharedStrings,
        names: DefinedNames,
    }

    impl Fixture {
        fn new(address: &str) -> Self {
            Self {
                cell: Cell::new(CellAddress::parse(address).unwrap()),
                strings: SharedStrings::new(),
                names: DefinedNames::new(),
            }
        }

        fn cell_mut(&mut self) -> CellMut<'_> {
            CellMut::new(&mut self.cell, "Sheet1", &mut self.strings, &mut self.names)
        }
    }

    #[test]
    fn test_new_cell_is_null() {
        let fx = Fixture::new("B3");
        assert_eq!(fx.cell.address().to_string(), "B3");
        assert_eq!(fx.cell.value_type(), ValueType::Null);
        assert!(fx.cell.is_empty());
    }

    #[test]
    fn test_set_value_and_text() {
        let mut fx = Fixture::new("A1");
        let mut cell = fx.cell_mut();

        cell.set_value("Hello").unwrap();
        assert_eq!(cell.value_type(), ValueType::String);
        assert_eq!(cell.text(), Some("Hello"));

        cell.set_value(12).unwrap();
        assert_eq!(cell.value(), &Value::Number(12.0));
        assert_eq!(cell.text(), None);

        // The string table keeps what was interned
        assert_eq!(fx.strings.len(), 1);
    }

    #[test]
    fn test_failed_assignment_keeps_value() {
        let mut fx = Fixture::new("A1");
        let mut cell = fx.cell_mut();
        cell.set_value(5).unwrap();

        assert!(matches!(
            cell.set_value(true),
            Err(Error::UnsupportedValueKind(_))
        ));
        assert_eq!(cell.value(), &Value::Number(5.0));
    }

    #[test]
    fn test_set_typed_value_checks_handle() {
        let mut fx = Fixture::new("A1");
        let handle = fx.strings.intern("known");
        let mut cell = fx.cell_mut();

        cell.set_typed_value(Value::String(handle)).unwrap();
        assert_eq!(cell.text(), Some("known"));

        let err = cell
            .set_typed_value(Value::String(StringHandle::from_index(9)))
            .unwrap_err();
        assert_eq!(err, Error::InvalidStringHandle(9));
    }

    #[test]
    fn test_set_typed_value_normalizes() {
        let mut fx = Fixture::new("A1");
        let mut cell = fx.cell_mut();
        let day = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        cell.set_typed_value(Value::Date(
            day.and_hms_nano_opt(1, 2, 3, 123_456_789).unwrap(),
        ))
        .unwrap();
        assert_eq!(
            cell.value().as_date(),
            day.and_hms_milli_opt(1, 2, 3, 123)
        );

        let err = cell
            .set_typed_value(Value::Number(f64::INFINITY))
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedValueKind(_)));
        assert_eq!(cell.value_type(), ValueType::Date);
    }

    #[test]
    fn test_alias_lifecycle() {
        let mut fx = Fixture::new("A1");
        let mut cell = fx.cell_mut();

        cell.set_alias("Seven").unwrap();
        cell.set_alias("seven").unwrap();
        assert_eq!(cell.alias(), Some("Seven"));

        cell.set_alias("Renamed").unwrap();
        assert_eq!(cell.alias(), Some("Renamed"));
        assert!(!fx.names.contains("Seven"));
        assert_eq!(
            fx.names.get("renamed").unwrap().address,
            CellAddress::new(1, 1)
        );

        let mut cell = fx.cell_mut();
        assert_eq!(cell.clear_alias(), Some("Renamed".to_string()));
        assert!(fx.names.is_empty());
        assert!(fx.cell.alias().is_none());
    }

    #[test]
    fn test_invalid_alias_keeps_previous() {
        let mut fx = Fixture::new("A1");
        let mut cell = fx.cell_mut();
        cell.set_alias("Good").unwrap();

        assert!(matches!(
            cell.set_alias("not valid"),
            Err(Error::InvalidName(_))
        ));
        assert_eq!(cell.alias(), Some("Good"));
        assert!(fx.names.contains("Good"));
    }

    #[test]
    fn test_clear_keeps_alias_and_style() {
        let mut fx = Fixture::new("C4");
        let mut cell = fx.cell_mut();
        cell.set_value(1.5).unwrap();
        cell.set_alias("Rate").unwrap();
        cell.set_style_index(3);
        cell.clear();

        assert!(fx.cell.value().is_null());
        assert_eq!(fx.cell.alias(), Some("Rate"));
        assert_eq!(fx.cell.style_index(), 3);
        assert!(!fx.cell.is_empty());
    }
}
