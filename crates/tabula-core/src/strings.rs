//! Shared string table
//!
//! Every literal string stored in a cell goes through the workbook's
//! [`SharedStrings`] table. Cells hold a [`StringHandle`] instead of the text,
//! so two cells with the same content hold the same handle no matter how the
//! text was produced. Handles are dense indices in insertion order, which is
//! also the order the table is written out in.
//!
//! Formula results are never interned; they own their text.

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;

/// Opaque identifier of one interned string within a single workbook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StringHandle(u32);

impl StringHandle {
    /// Create a handle from a raw table index
    pub const fn from_index(index: u32) -> Self {
        StringHandle(index)
    }

    /// Position of this handle's entry in the string table
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for StringHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Content repeated while rebuilding a table with [`SharedStrings::from_table`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateString {
    /// Index of the first occurrence
    pub first: StringHandle,
    /// Index of the repeated entry
    pub duplicate: StringHandle,
}

/// Append-only interning table for literal cell strings
///
/// Entries are never removed or renumbered: once a string has a handle it
/// keeps it for the life of the table, even when no cell refers to it anymore.
#[derive(Debug, Default, Clone)]
pub struct SharedStrings {
    /// Content by handle index
    strings: Vec<Arc<str>>,
    /// Reverse lookup for deduplication
    index_map: AHashMap<Arc<str>, StringHandle>,
}

impl SharedStrings {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a table where entry `i` gets handle `i`
    ///
    /// Fails if any content appears twice, since the reverse lookup could
    /// then no longer give every piece of content exactly one handle.
    pub fn from_table<I, S>(entries: I) -> std::result::Result<Self, DuplicateString>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for entry in entries {
            let content = entry.as_ref();
            let next = StringHandle(table.strings.len() as u32);
            if let Some(&first) = table.index_map.get(content) {
                return Err(DuplicateString {
                    first,
                    duplicate: next,
                });
            }
            table.push(content);
        }
        Ok(table)
    }

    /// Get or create the handle for `content`
    ///
    /// Interning the same content twice returns the same handle.
    pub fn intern<S: AsRef<str>>(&mut self, content: S) -> StringHandle {
        let content = content.as_ref();
        if let Some(&handle) = self.index_map.get(content) {
            return handle;
        }
        let handle = self.push(content);
        log::trace!("interned shared string {} ({} bytes)", handle, content.len());
        handle
    }

    fn push(&mut self, content: &str) -> StringHandle {
        let handle = StringHandle(self.strings.len() as u32);
        let arc: Arc<str> = Arc::from(content);
        self.strings.push(arc.clone());
        self.index_map.insert(arc, handle);
        handle
    }

    /// Get the content behind a handle, if it was issued by this table
    pub fn resolve(&self, handle: StringHandle) -> Option<&str> {
        self.strings.get(handle.0 as usize).map(|s| &**s)
    }

    /// Find the handle for `content` without interning it
    pub fn lookup(&self, content: &str) -> Option<StringHandle> {
        self.index_map.get(content).copied()
    }

    /// Check whether a handle was issued by this table
    pub fn contains(&self, handle: StringHandle) -> bool {
        (handle.0 as usize) < self.strings.len()
    }

    /// All entries in handle order
    pub fn snapshot(&self) -> Vec<(StringHandle, &str)> {
        self.iter().collect()
    }

    /// Iterate over all entries in handle order
    pub fn iter(&self) -> impl Iterator<Item = (StringHandle, &str)> {
        self.strings
            .iter()
            .enumerate()
            .map(|(i, s)| (StringHandle(i as u32), &**s))
    }

    /// Get the number of unique strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl PartialEq for SharedStrings {
    fn eq(&self, other: &Self) -> bool {
        self.strings == other.strings
    }
}
