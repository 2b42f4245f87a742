//! Configuration paths
//!
//! A path is a sequence of segments joined by `:`. Segments compare
//! case-insensitively, so `TestingPlatform:CrashDump` and
//! `testingplatform:crashdump` address the same entry.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

pub const KEY_DELIMITER: &str = ":";

/// Flattened path → value mapping produced by a provider.
pub type EntrySet = BTreeMap<ConfigKey, String>;

/// A configuration path that keeps its original spelling but compares,
/// orders and hashes by its lowercase form.
#[derive(Debug, Clone)]
pub struct ConfigKey {
    original: String,
    normalized: String,
}

impl ConfigKey {
    pub fn new(path: impl Into<String>) -> Self {
        let original = path.into();
        let normalized = original.to_lowercase();
        Self {
            original,
            normalized,
        }
    }

    /// The path as it was spelled by the source that produced it.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.original.split(KEY_DELIMITER)
    }
}

impl PartialEq for ConfigKey {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for ConfigKey {}

impl PartialOrd for ConfigKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ConfigKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized.cmp(&other.normalized)
    }
}

impl Hash for ConfigKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl From<&str> for ConfigKey {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for ConfigKey {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

/// Insert or replace an entry. Unlike `BTreeMap::insert`, the key spelling of
/// the newer entry replaces the old one.
pub fn upsert(entries: &mut EntrySet, key: ConfigKey, value: String) {
    entries.remove(&key);
    entries.insert(key, value);
}

/// Append `segment` to `prefix`, treating an empty prefix as the root.
pub fn combine(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}{KEY_DELIMITER}{segment}")
    }
}

/// A lookup path is usable only if it is non-empty and none of its segments
/// are empty (so a trailing `:` never matches anything).
pub fn is_valid_lookup_path(path: &str) -> bool {
    !path.is_empty() && path.split(KEY_DELIMITER).all(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_compare_case_insensitively() {
        let a = ConfigKey::new("TestingPlatform:CrashDump");
        let b = ConfigKey::new("testingplatform:CRASHDUMP");
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a.as_str(), "TestingPlatform:CrashDump");
    }

    #[test]
    fn test_case_variants_collapse_in_entry_set() {
        let mut entries = EntrySet::new();
        upsert(&mut entries, ConfigKey::new("A:B"), "1".to_string());
        upsert(&mut entries, ConfigKey::new("a:b"), "2".to_string());
        assert_eq!(entries.len(), 1);
        let (key, value) = entries.iter().next().unwrap();
        assert_eq!(key.as_str(), "a:b");
        assert_eq!(value, "2");
    }

    #[test]
    fn test_combine() {
        assert_eq!(combine("", "Root"), "Root");
        assert_eq!(combine("Root", "0"), "Root:0");
    }

    #[test]
    fn test_lookup_path_validation() {
        assert!(is_valid_lookup_path("a"));
        assert!(is_valid_lookup_path("a:b:0"));
        assert!(!is_valid_lookup_path(""));
        assert!(!is_valid_lookup_path("a:"));
        assert!(!is_valid_lookup_path(":a"));
        assert!(!is_valid_lookup_path("a::b"));
    }

    #[test]
    fn test_segments() {
        let key = ConfigKey::new("A:0:b");
        assert_eq!(key.segments().collect::<Vec<_>>(), vec!["A", "0", "b"]);
    }
}
