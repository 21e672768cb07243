//! Cell address type

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "A1", "XFD1048576")
///
/// Both coordinates are 1-based: `A1` is row 1, column 1. Addresses order
/// row-major, so iterating a sorted collection walks the sheet row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellAddress {
    /// Row number (1-based)
    pub row: u32,
    /// Column number (1-based, A=1, B=2, ..., XFD=16384)
    pub col: u16,
}

impl CellAddress {
    /// Create a new cell address from 1-based indices without bounds checks
    pub const fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Create a new cell address, checking both indices against sheet limits
    pub fn try_new(row: u32, col: u16) -> Result<Self> {
        if row == 0 || row > MAX_ROWS {
            return Err(Error::InvalidAddress(format!(
                "row {} out of range 1..={}",
                row, MAX_ROWS
            )));
        }
        if col == 0 || col > MAX_COLS {
            return Err(Error::InvalidAddress(format!(
                "column {} out of range 1..={}",
                col, MAX_COLS
            )));
        }
        Ok(Self { row, col })
    }

    /// Parse a cell address from A1-style notation
    ///
    /// Column letters are case-insensitive. Anything other than letters
    /// followed by a row number without leading zeros is rejected.
    ///
    /// # Examples
    /// ```
    /// use tabula_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("A1").unwrap();
    /// assert_eq!(addr.row, 1);
    /// assert_eq!(addr.col, 1);
    ///
    /// let addr = CellAddress::parse("ab12").unwrap();
    /// assert_eq!(addr.col, 28);
    /// assert_eq!(addr.to_string(), "AB12");
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let bytes = s.as_bytes();
        let mut pos = 0;

        // Parse column letters
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }

        if pos == 0 {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }

        let col = Self::letters_to_column(&s[..pos])
            .map_err(|_| Error::InvalidAddress(format!("column out of range in '{}'", s)))?;

        // Parse row number
        let row_str = &s[pos..];
        if row_str.is_empty() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }
        if !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!("invalid row number in '{}'", s)));
        }
        if row_str.starts_with('0') {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 without leading zeros in '{}'",
                s
            )));
        }

        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("row number too large in '{}'", s)))?;

        if row > MAX_ROWS {
            return Err(Error::InvalidAddress(format!(
                "row {} exceeds {} in '{}'",
                row, MAX_ROWS, s
            )));
        }

        Ok(Self { row, col })
    }

    /// Convert a 1-based column number to letters (1 = A, 26 = Z, 27 = AA, etc.)
    pub fn column_to_letters(col: u16) -> String {
        let mut result = String::new();
        let mut n = col as u32;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Convert column letters to a 1-based column number (A = 1, Z = 26, AA = 27, etc.)
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
            if col > MAX_COLS as u32 {
                return Err(Error::InvalidAddress(format!(
                    "column '{}' exceeds {}",
                    letters,
                    Self::column_to_letters(MAX_COLS)
                )));
            }
        }

        Ok(col as u16)
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        let mut result = Self::column_to_letters(self.col);
        result.push_str(&self.row.to_string());
        result
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(CellAddress::column_to_letters(1), "A");
        assert_eq!(CellAddress::column_to_letters(2), "B");
        assert_eq!(CellAddress::column_to_letters(26), "Z");
        assert_eq!(CellAddress::column_to_letters(27), "AA");
        assert_eq!(CellAddress::column_to_letters(28), "AB");
        assert_eq!(CellAddress::column_to_letters(702), "ZZ");
        assert_eq!(CellAddress::column_to_letters(703), "AAA");
        assert_eq!(CellAddress::column_to_letters(16384), "XFD");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(CellAddress::letters_to_column("A").unwrap(), 1);
        assert_eq!(CellAddress::letters_to_column("Z").unwrap(), 26);
        assert_eq!(CellAddress::letters_to_column("AA").unwrap(), 27);
        assert_eq!(CellAddress::letters_to_column("ZZ").unwrap(), 702);
        assert_eq!(CellAddress::letters_to_column("XFD").unwrap(), 16384);

        // Case insensitive
        assert_eq!(CellAddress::letters_to_column("a").unwrap(), 1);
        assert_eq!(CellAddress::letters_to_column("xfd").unwrap(), 16384);

        assert!(CellAddress::letters_to_column("XFE").is_err());
        assert!(CellAddress::letters_to_column("AAAAAAAAAA").is_err());
    }

    #[test]
    fn test_cell_address_parse() {
        let addr = CellAddress::parse("A1").unwrap();
        assert_eq!(addr, CellAddress::new(1, 1));

        let addr = CellAddress::parse("E1").unwrap();
        assert_eq!(addr, CellAddress::new(1, 5));

        let addr = CellAddress::parse("c2").unwrap();
        assert_eq!(addr, CellAddress::new(2, 3));

        let addr = CellAddress::parse("XFD1048576").unwrap();
        assert_eq!(addr.row, 1_048_576);
        assert_eq!(addr.col, 16_384);
    }

    #[test]
    fn test_cell_address_parse_errors() {
        for bad in [
            "", "A", "1", "A0", "A01", "A-1", " A1", "A1 ", "$A$1", "A1B", "1A", "A1.5", "é1",
            "A1048577", "XFE1", "A99999999999",
        ] {
            assert!(
                matches!(CellAddress::parse(bad), Err(Error::InvalidAddress(_))),
                "expected '{}' to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_cell_address_display() {
        assert_eq!(CellAddress::new(1, 1).to_string(), "A1");
        assert_eq!(CellAddress::new(100, 3).to_string(), "C100");
        assert_eq!(CellAddress::new(7, 27).to_a1_string(), "AA7");
    }

    #[test]
    fn test_try_new_bounds() {
        assert!(CellAddress::try_new(1, 1).is_ok());
        assert!(CellAddress::try_new(0, 1).is_err());
        assert!(CellAddress::try_new(1, 0).is_err());
        assert!(CellAddress::try_new(MAX_ROWS + 1, 1).is_err());
        assert!(CellAddress::try_new(1, MAX_COLS + 1).is_err());
    }

    #[test]
    fn test_row_major_ordering() {
        let mut addrs = vec![
            CellAddress::parse("B2").unwrap(),
            CellAddress::parse("A2").unwrap(),
            CellAddress::parse("Z1").unwrap(),
        ];
        addrs.sort();
        let formatted: Vec<_> = addrs.iter().map(|a| a.to_string()).collect();
        assert_eq!(formatted, vec!["Z1", "A2", "B2"]);
    }

    proptest! {
        #[test]
        fn prop_format_then_parse(row in 1u32..=MAX_ROWS, col in 1u16..=MAX_COLS) {
            let addr = CellAddress::new(row, col);
            let text = addr.to_a1_string();
            prop_assert_eq!(CellAddress::parse(&text).unwrap(), addr);
            prop_assert_eq!(CellAddress::parse(&text.to_lowercase()).unwrap(), addr);
        }

        #[test]
        fn prop_parse_then_format(col in "[A-Z]{1,2}", row in 1u32..=MAX_ROWS) {
            let text = format!("{}{}", col, row);
            prop_assert_eq!(CellAddress::parse(&text).unwrap().to_a1_string(), text);
        }
    }
}
