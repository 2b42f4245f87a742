//! Merged, read-only configuration view

use crate::sources::SourceInfo;
use crate::types::{is_valid_lookup_path, ConfigKey, EntrySet};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// The result of a build. Lookups are case-insensitive per segment and
/// never fail; an unknown or malformed path is simply absent.
#[derive(Debug, Clone)]
pub struct Configuration {
    entries: EntrySet,
    sources: Vec<SourceInfo>,
}

impl Configuration {
    pub(crate) fn new(entries: EntrySet, sources: Vec<SourceInfo>) -> Self {
        Self { entries, sources }
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        if !is_valid_lookup_path(path) {
            return None;
        }
        self.entries.get(&ConfigKey::new(path)).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, path: &str, default: &'a str) -> &'a str {
        self.get(path).unwrap_or(default)
    }

    /// Interpret a value as a boolean. Both `True` (as JSON booleans are
    /// rendered) and `true` are accepted.
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        let value = self.get(path)?.trim();
        if value.eq_ignore_ascii_case("true") {
            Some(true)
        } else if value.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }

    pub fn contains_key(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, ordered case-insensitively by path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Sources that contributed, in merge order.
    pub fn sources(&self) -> &[SourceInfo] {
        &self.sources
    }
}

impl Serialize for Configuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}
