//! Workbook type - the main document structure

use chrono::NaiveDateTime;

use crate::cell::{truncate_millis, Cell};
use crate::error::{Error, Result};
use crate::names::{DefinedName, DefinedNames};
use crate::strings::{SharedStrings, StringHandle};
use crate::worksheet::{Worksheet, WorksheetMut};
use crate::MAX_SHEET_NAME_LEN;

/// A workbook (spreadsheet document)
///
/// The workbook owns everything below it: its worksheets and their cells,
/// the defined-name table, and the shared string table used by every cell.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Workbook {
    /// Worksheets in presentation order
    worksheets: Vec<Worksheet>,
    /// Defined names
    names: DefinedNames,
    /// Shared string table
    strings: SharedStrings,
    /// Document properties
    properties: WorkbookProperties,
}

impl Workbook {
    /// Create an empty workbook with no worksheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty workbook around an existing string table
    ///
    /// Used when rebuilding a workbook from a serialized model, where the
    /// handles stored in cells must match the table they were written with.
    pub fn with_strings(strings: SharedStrings) -> Self {
        Self {
            strings,
            ..Self::default()
        }
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by name (case-insensitive)
    pub fn worksheet(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets
            .iter()
            .find(|ws| same_sheet_name(ws.name(), name))
    }

    /// Get mutable access to a worksheet by name (case-insensitive)
    pub fn worksheet_mut(&mut self, name: &str) -> Option<WorksheetMut<'_>> {
        let index = self.sheet_index(name)?;
        self.worksheet_at_mut(index)
    }

    /// Get a worksheet by index
    pub fn worksheet_at(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get mutable access to a worksheet by index
    pub fn worksheet_at_mut(&mut self, index: usize) -> Option<WorksheetMut<'_>> {
        let sheet = self.worksheets.get_mut(index)?;
        Some(WorksheetMut::new(sheet, &mut self.strings, &mut self.names))
    }

    /// Get the index of a worksheet by name (case-insensitive)
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.worksheets
            .iter()
            .position(|ws| same_sheet_name(ws.name(), name))
    }

    /// Iterate over all worksheets in order
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Add a new worksheet at the end
    ///
    /// Fails with [`Error::DuplicateWorksheetName`] if a sheet with the same
    /// name (ignoring case) exists.
    pub fn add_worksheet(&mut self, name: &str) -> Result<WorksheetMut<'_>> {
        self.validate_sheet_name(name)?;

        let index = self.worksheets.len();
        self.worksheets.push(Worksheet::new(name));
        Ok(WorksheetMut::new(
            &mut self.worksheets[index],
            &mut self.strings,
            &mut self.names,
        ))
    }

    /// Remove a worksheet by name
    ///
    /// Defined names referring into the sheet are removed with it. Strings
    /// its cells used stay in the string table.
    pub fn remove_worksheet(&mut self, name: &str) -> Option<Worksheet> {
        let index = self.sheet_index(name)?;
        let worksheet = self.worksheets.remove(index);

        let dropped = self.names.remove_sheet(worksheet.name());
        if !dropped.is_empty() {
            log::debug!(
                "removed {} defined name(s) with worksheet '{}'",
                dropped.len(),
                worksheet.name()
            );
        }

        Some(worksheet)
    }

    // ==================== Strings ====================

    /// The shared string table
    pub fn strings(&self) -> &SharedStrings {
        &self.strings
    }

    /// Get the content behind a string handle
    pub fn resolve_string(&self, handle: StringHandle) -> Option<&str> {
        self.strings.resolve(handle)
    }

    // ==================== Defined Names ====================

    /// The defined-name table
    pub fn defined_names(&self) -> &DefinedNames {
        &self.names
    }

    /// Look up a defined name (case-insensitive)
    pub fn resolve_name(&self, name: &str) -> Option<&DefinedName> {
        self.names.get(name)
    }

    /// Get the cell a defined name refers to
    pub fn named_cell(&self, name: &str) -> Option<&Cell> {
        let target = self.names.get(name)?;
        self.worksheet(&target.sheet)?.cell_at(target.address)
    }

    // ==================== Properties ====================

    /// Get document properties
    pub fn properties(&self) -> &WorkbookProperties {
        &self.properties
    }

    /// Get mutable document properties
    pub fn properties_mut(&mut self) -> &mut WorkbookProperties {
        &mut self.properties
    }

    /// Validate a sheet name
    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        // Check length
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        // Check for invalid characters
        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        for c in INVALID_CHARS {
            if name.contains(*c) {
                return Err(Error::InvalidSheetName(format!(
                    "Sheet name cannot contain '{}'",
                    c
                )));
            }
        }

        // Check for duplicate names (case-insensitive)
        if self.sheet_index(name).is_some() {
            return Err(Error::DuplicateWorksheetName(name.into()));
        }

        Ok(())
    }
}

/// Sheet names compare case-insensitively
fn same_sheet_name(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Document properties carried alongside the workbook content
///
/// Timestamps are kept at millisecond precision, like cell dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkbookProperties {
    /// Author of the document
    pub creator: Option<String>,
    /// Last person to modify the document
    pub last_modified_by: Option<String>,
    /// Creation time
    created: Option<NaiveDateTime>,
    /// Last modification time
    modified: Option<NaiveDateTime>,
}

impl WorkbookProperties {
    /// Creation time
    pub fn created(&self) -> Option<NaiveDateTime> {
        self.created
    }

    /// Set the creation time, truncated to milliseconds
    pub fn set_created(&mut self, created: Option<NaiveDateTime>) {
        self.created = created.map(truncate_millis);
    }

    /// Last modification time
    pub fn modified(&self) -> Option<NaiveDateTime> {
        self.modified
    }

    /// Set the last modification time, truncated to milliseconds
    pub fn set_modified(&mut self, modified: Option<NaiveDateTime>) {
        self.modified = modified.map(truncate_millis);
    }
}
