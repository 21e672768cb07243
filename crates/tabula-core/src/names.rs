//! Defined names
//!
//! A defined name is a workbook-wide alias for one cell, e.g. `TaxRate`
//! referring to `Rates!B1`. Names are created by giving a cell an alias
//! (see [`CellMut::set_alias`](crate::CellMut::set_alias)), so every entry in
//! the table points at a cell that carries the same alias.
//!
//! Names are case-insensitive: `TaxRate` and `TAXRATE` are the same name.

use std::collections::BTreeMap;

use crate::cell::CellAddress;
use crate::error::{Error, Result};
use crate::MAX_NAME_LEN;

/// A defined name and the cell it refers to
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefinedName {
    /// The name as first written (e.g. "TaxRate")
    pub name: String,
    /// Name of the worksheet holding the cell
    pub sheet: String,
    /// Address of the cell
    pub address: CellAddress,
}

impl DefinedName {
    /// The reference in `Sheet!A1` form, quoting the sheet name when needed
    pub fn refers_to(&self) -> String {
        let plain = self
            .sheet
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '.');
        if plain {
            format!("{}!{}", self.sheet, self.address)
        } else {
            format!("'{}'!{}", self.sheet.replace('\'', "''"), self.address)
        }
    }
}

/// Table of defined names with case-insensitive lookup
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DefinedNames {
    /// Entries keyed by lowercase name
    names: BTreeMap<String, DefinedName>,
}

impl DefinedNames {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a name
    pub fn get(&self, name: &str) -> Option<&DefinedName> {
        self.names.get(&name_key(name))
    }

    /// Check whether a name is defined
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(&name_key(name))
    }

    /// Iterate over all names, ordered by lowercase name
    pub fn iter(&self) -> impl Iterator<Item = &DefinedName> {
        self.names.values()
    }

    /// All names that refer into one worksheet
    pub fn in_sheet<'a>(&'a self, sheet: &'a str) -> impl Iterator<Item = &'a DefinedName> + 'a {
        self.names.values().filter(move |n| n.sheet == sheet)
    }

    /// Get the number of names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Bind `name` to a cell
    ///
    /// Binding a name to the cell it already refers to succeeds without
    /// changes; binding it to any other cell fails with
    /// [`Error::DuplicateName`].
    pub(crate) fn bind(&mut self, name: &str, sheet: &str, address: CellAddress) -> Result<()> {
        validate_name(name)?;

        let key = name_key(name);
        if let Some(existing) = self.names.get(&key) {
            if existing.sheet == sheet && existing.address == address {
                return Ok(());
            }
            return Err(Error::DuplicateName {
                name: name.to_string(),
                existing: existing.refers_to(),
            });
        }

        self.names.insert(
            key,
            DefinedName {
                name: name.to_string(),
                sheet: sheet.to_string(),
                address,
            },
        );
        Ok(())
    }

    /// Remove a name
    pub(crate) fn remove(&mut self, name: &str) -> Option<DefinedName> {
        self.names.remove(&name_key(name))
    }

    /// Remove every name referring into `sheet`, returning what was removed
    pub(crate) fn remove_sheet(&mut self, sheet: &str) -> Vec<DefinedName> {
        let keys: Vec<String> = self
            .names
            .iter()
            .filter(|(_, n)| n.sheet == sheet)
            .map(|(k, _)| k.clone())
            .collect();
        keys.iter().filter_map(|k| self.names.remove(k)).collect()
    }
}

/// Lookup key for a name
pub(crate) fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Check that `name` is usable as a defined name
///
/// Names start with a letter, `_` or `\`, continue with letters, digits,
/// `_`, `.` or `\`, and must not look like a cell address.
pub fn validate_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let first = chars
        .next()
        .ok_or_else(|| Error::InvalidName("name cannot be empty".into()))?;

    if name.chars().count() > MAX_NAME_LEN {
        return Err(Error::InvalidName(format!(
            "'{}' is longer than {} characters",
            name, MAX_NAME_LEN
        )));
    }

    if !(first.is_alphabetic() || first == '_' || first == '\\') {
        return Err(Error::InvalidName(format!(
            "'{}' must start with a letter, '_' or '\\'",
            name
        )));
    }

    if let Some(c) = chars.find(|c| !(c.is_alphanumeric() || matches!(c, '_' | '.' | '\\'))) {
        return Err(Error::InvalidName(format!(
            "'{}' contains invalid character '{}'",
            name, c
        )));
    }

    if CellAddress::parse(name).is_ok() {
        return Err(Error::InvalidName(format!(
            "'{}' looks like a cell address",
            name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a1() -> CellAddress {
        CellAddress::new(1, 1)
    }

    #[test]
    fn test_bind_and_lookup() {
        let mut names = DefinedNames::new();
        names.bind("TaxRate", "Rates", a1()).unwrap();

        let found = names.get("TaxRate").unwrap();
        assert_eq!(found.sheet, "Rates");
        assert_eq!(found.address, a1());
        assert_eq!(found.refers_to(), "Rates!A1");
    }

    #[test]
    fn test_case_insensitive() {
        let mut names = DefinedNames::new();
        names.bind("TaxRate", "Rates", a1()).unwrap();

        assert!(names.get("taxrate").is_some());
        assert!(names.contains("TAXRATE"));

        // Keeps the spelling it was defined with
        assert_eq!(names.get("TAXRATE").unwrap().name, "TaxRate");
    }

    #[test]
    fn test_rebind_same_cell_is_noop() {
        let mut names = DefinedNames::new();
        names.bind("Seven", "blort", a1()).unwrap();
        names.bind("SEVEN", "blort", a1()).unwrap();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_rebind_other_cell_fails() {
        let mut names = DefinedNames::new();
        names.bind("Seven", "blort", a1()).unwrap();

        let err = names
            .bind("seven", "blort", CellAddress::new(2, 1))
            .unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateName {
                name: "seven".into(),
                existing: "blort!A1".into()
            }
        );

        let err = names.bind("Seven", "other", a1()).unwrap_err();
        assert!(matches!(err, Error::DuplicateName { .. }));
    }

    #[test]
    fn test_remove_sheet() {
        let mut names = DefinedNames::new();
        names.bind("One", "A", a1()).unwrap();
        names.bind("Two", "B", a1()).unwrap();
        names.bind("Three", "A", CellAddress::new(3, 1)).unwrap();

        let removed = names.remove_sheet("A");
        assert_eq!(removed.len(), 2);
        assert_eq!(names.len(), 1);
        assert!(names.contains("Two"));
        assert_eq!(names.in_sheet("B").count(), 1);
    }

    #[test]
    fn test_validate_name() {
        for ok in ["Seven", "_hidden", "\\path", "Tax.Rate", "Q1_Total", "Übersicht", "ABCD1234567"] {
            assert!(validate_name(ok).is_ok(), "expected '{}' to be valid", ok);
        }
        for bad in ["", "1abc", "has space", "a-b", "A1", "xfd100", ".dot"] {
            assert!(
                matches!(validate_name(bad), Err(Error::InvalidName(_))),
                "expected '{}' to be invalid",
                bad
            );
        }
        assert!(validate_name(&"n".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_refers_to_quotes_sheet() {
        let name = DefinedName {
            name: "X".into(),
            sheet: "My Sheet's".into(),
            address: CellAddress::new(2, 2),
        };
        assert_eq!(name.refers_to(), "'My Sheet''s'!B2");
    }
}
