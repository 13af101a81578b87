//! Compiled mapping table keyed by dotted path.

use crate::record::MappingRecord;
use std::collections::HashMap;

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// Append `name` to a dotted path. An empty prefix yields `name` alone.
pub fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}{}{}", prefix, PATH_SEPARATOR, name)
    }
}

/// Path → record lookup built once per mapping schema.
///
/// Read-only after compilation, so one table can serve any number of
/// transforms, including from several threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    records: HashMap<String, MappingRecord>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record, replacing any earlier one at the same path.
    pub fn insert(&mut self, path: impl Into<String>, record: MappingRecord) -> Option<MappingRecord> {
        self.records.insert(path.into(), record)
    }

    pub fn get(&self, path: &str) -> Option<&MappingRecord> {
        self.records.get(path)
    }

    /// Record for `name` directly below `position`.
    pub fn lookup(&self, position: &str, name: &str) -> Option<&MappingRecord> {
        self.records.get(&join_path(position, name))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.records.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MappingRecord)> + '_ {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.records.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}
