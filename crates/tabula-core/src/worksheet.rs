//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{Cell, CellAddress, CellInput, CellMut};
use crate::error::Result;
use crate::names::{name_key, DefinedNames};
use crate::strings::SharedStrings;

/// A worksheet (single sheet in a workbook)
///
/// Cells are stored sparsely: only cells that have been touched through a
/// [`WorksheetMut`] exist. Iteration is row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Cell storage
    cells: BTreeMap<CellAddress, Cell>,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub(crate) fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Cell Access ===

    /// Get a cell by address string (e.g., "A1")
    ///
    /// Returns `Ok(None)` for a well-formed address that has no cell yet.
    pub fn cell(&self, address: &str) -> Result<Option<&Cell>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cells.get(&addr))
    }

    /// Get a cell by address
    pub fn cell_at(&self, address: CellAddress) -> Option<&Cell> {
        self.cells.get(&address)
    }

    /// Iterate over all cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    /// Get the number of stored cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if the sheet has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // === Names ===

    /// Find the cell carrying the alias `name` (case-insensitive)
    pub fn address_of(&self, name: &str) -> Option<CellAddress> {
        let key = name_key(name);
        self.aliases()
            .find(|(alias, _)| name_key(alias) == key)
            .map(|(_, addr)| addr)
    }

    /// All aliases of cells in this sheet with their addresses
    pub fn aliases(&self) -> impl Iterator<Item = (&str, CellAddress)> {
        self.cells
            .values()
            .filter_map(|c| c.alias().map(|a| (a, c.address())))
    }
}

/// Mutable access to a worksheet inside its workbook
///
/// Obtained from [`Workbook::add_worksheet`](crate::Workbook::add_worksheet)
/// or [`Workbook::worksheet_mut`](crate::Workbook::worksheet_mut). Cell access
/// through this view creates the cell on first touch.
#[derive(Debug)]
pub struct WorksheetMut<'a> {
    sheet: &'a mut Worksheet,
    strings: &'a mut SharedStrings,
    names: &'a mut DefinedNames,
}

impl<'a> WorksheetMut<'a> {
    pub(crate) fn new(
        sheet: &'a mut Worksheet,
        strings: &'a mut SharedStrings,
        names: &'a mut DefinedNames,
    ) -> Self {
        Self {
            sheet,
            strings,
            names,
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.sheet.name
    }

    /// Read-only view of the sheet
    pub fn worksheet(&self) -> &Worksheet {
        self.sheet
    }

    /// Get or create the cell at an address string (e.g., "A1")
    ///
    /// Fails only when the address does not parse.
    pub fn cell(&mut self, address: &str) -> Result<CellMut<'_>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_at(addr))
    }

    /// Get or create the cell at an address
    pub fn cell_at(&mut self, address: CellAddress) -> CellMut<'_> {
        let Worksheet { name, cells } = &mut *self.sheet;
        let cell = cells
            .entry(address)
            .or_insert_with(|| Cell::new(address));
        CellMut::new(cell, name.as_str(), self.strings, self.names)
    }

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellInput>>(&mut self, address: &str, value: V) -> Result<()> {
        self.cell(address)?.set_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Value, ValueType};
    use crate::error::Error;

    struct Parts {
        sheet: Worksheet,
        strings: SharedStrings,
        names: DefinedNames,
    }

    impl Parts {
        fn new() -> Self {
            Self {
                sheet: Worksheet::new("Sheet1"),
                strings: SharedStrings::new(),
                names: DefinedNames::new(),
            }
        }

        fn sheet_mut(&mut self) -> WorksheetMut<'_> {
            WorksheetMut::new(&mut self.sheet, &mut self.strings, &mut self.names)
        }
    }

    #[test]
    fn test_new_worksheet() {
        let parts = Parts::new();
        assert_eq!(parts.sheet.name(), "Sheet1");
        assert!(parts.sheet.is_empty());
        assert_eq!(parts.sheet.cell("A1").unwrap(), None);
    }

    #[test]
    fn test_cell_created_on_first_touch() {
        let mut parts = Parts::new();
        {
            let mut ws = parts.sheet_mut();
            let cell = ws.cell("B2").unwrap();
            assert_eq!(cell.value_type(), ValueType::Null);
        }
        assert_eq!(parts.sheet.cell_count(), 1);
        assert!(parts.sheet.cell("B2").unwrap().is_some());
    }

    #[test]
    fn test_invalid_address() {
        let mut parts = Parts::new();
        let mut ws = parts.sheet_mut();
        assert!(matches!(ws.cell("A0"), Err(Error::InvalidAddress(_))));
        assert!(matches!(
            ws.set_cell_value("", 1),
            Err(Error::InvalidAddress(_))
        ));
        assert!(parts.sheet.is_empty());
    }

    #[test]
    fn test_set_cell_values() {
        let mut parts = Parts::new();
        let mut ws = parts.sheet_mut();
        ws.set_cell_value("A1", "Hello").unwrap();
        ws.set_cell_value("b1", 42.0).unwrap();

        let sheet = &parts.sheet;
        assert_eq!(sheet.cell("A1").unwrap().unwrap().value_type(), ValueType::String);
        assert_eq!(sheet.cell("B1").unwrap().unwrap().value(), &Value::Number(42.0));
    }

    #[test]
    fn test_cells_iterate_row_major() {
        let mut parts = Parts::new();
        let mut ws = parts.sheet_mut();
        for addr in ["C2", "A2", "B1", "A1"] {
            ws.set_cell_value(addr, 1).unwrap();
        }

        let order: Vec<String> = parts
            .sheet
            .cells()
            .map(|c| c.address().to_string())
            .collect();
        assert_eq!(order, vec!["A1", "B1", "A2", "C2"]);
    }

    #[test]
    fn test_address_of() {
        let mut parts = Parts::new();
        let mut ws = parts.sheet_mut();
        ws.cell("D4").unwrap().set_alias("Total").unwrap();

        assert_eq!(
            parts.sheet.address_of("total"),
            Some(CellAddress::new(4, 4))
        );
        assert_eq!(parts.sheet.address_of("Missing"), None);
        assert_eq!(parts.names.get("TOTAL").unwrap().sheet, "Sheet1");
    }
}
