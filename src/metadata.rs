//! Metadata block of a CIC file.
//!
//! The lines between `META_START` and `META_END` are `KEY = VALUE` pairs.
//! Ingestion is permissive: comment lines and blank lines are ignored, and a
//! line that does not split into exactly two parts around `=` is dropped.
//! Values are kept as raw strings, each message kind interprets its own keys.
use std::fmt;

use itertools::Itertools;
use tracing::{trace, warn};

use crate::{cic_errors::MessageError, constants::COMMENT_KEYWORD};

/// Ordered `KEY = VALUE` mapping.
///
/// Keys are unique. Inserting an existing key replaces its value and keeps the
/// position of the first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataBlock {
    entries: Vec<(String, String)>,
}

/// Outcome of reading a single metadata line.
#[derive(Debug, PartialEq)]
pub(crate) enum MetadataLine<'a> {
    Entry(&'a str, &'a str),
    Ignored,
    Malformed,
}

/// Classify one line of the metadata block.
pub(crate) fn classify_line(line: &str) -> MetadataLine<'_> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(COMMENT_KEYWORD) {
        return MetadataLine::Ignored;
    }

    match line.split('=').collect_tuple() {
        Some((key, value)) => MetadataLine::Entry(key.trim(), value.trim()),
        None => MetadataLine::Malformed,
    }
}

impl MetadataBlock {
    pub fn new() -> Self {
        MetadataBlock::default()
    }

    /// Build a block from the raw lines found between the sentinels.
    ///
    /// Arguments
    /// ---------
    /// * `lines`: the lines of the block, without the `META_START`/`META_END` sentinels
    ///
    /// Return
    /// ------
    /// * the block; malformed lines are logged and skipped, never reported as errors
    pub fn parse_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut block = MetadataBlock::new();
        for line in lines {
            block.push_line(line.as_ref());
        }
        block
    }

    /// Ingest one raw line, see [`MetadataBlock::parse_lines`].
    pub(crate) fn push_line(&mut self, line: &str) {
        match classify_line(line) {
            MetadataLine::Entry(key, value) => self.insert(key, value),
            MetadataLine::Ignored => trace!("metadata line ignored: {line:?}"),
            MetadataLine::Malformed => warn!("malformed metadata line discarded: {line:?}"),
        }
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Like [`MetadataBlock::get`], failing with [`MessageError::MissingMetadata`].
    pub fn require(&self, key: &str) -> Result<&str, MessageError> {
        self.get(key)
            .ok_or_else(|| MessageError::MissingMetadata(key.to_string()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MetadataBlock
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut block = MetadataBlock::new();
        for (key, value) in iter {
            block.insert(key, value);
        }
        block
    }
}

/// Writes the block back in KVN form, one `KEY = VALUE` per line.
impl fmt::Display for MetadataBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.iter().map(|(k, v)| format!("{k} = {v}")).join("\n")
        )
    }
}
