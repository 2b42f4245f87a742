//! Environment variable provider
//!
//! `PREFIX_TestingPlatform__CrashDump__Enable=1` becomes
//! `TestingPlatform:CrashDump:Enable = 1`. Variables without the prefix are
//! ignored; matching on the prefix is case-insensitive.

use crate::providers::ConfigurationProvider;
use crate::types::{upsert, ConfigKey, EntrySet, Result, KEY_DELIMITER};
use async_trait::async_trait;

const ENV_SEPARATOR: &str = "__";

pub struct EnvironmentVariablesProvider {
    prefix: String,
    vars: Vec<(String, String)>,
}

impl EnvironmentVariablesProvider {
    pub fn new(prefix: impl Into<String>, vars: Vec<(String, String)>) -> Self {
        Self {
            prefix: prefix.into(),
            vars,
        }
    }

    /// Map a variable name to a configuration path, or `None` when the
    /// variable does not belong to this provider.
    pub fn key_for(&self, name: &str) -> Option<String> {
        let head = name.get(..self.prefix.len())?;
        if !head.eq_ignore_ascii_case(&self.prefix) {
            return None;
        }
        let rest = &name[self.prefix.len()..];
        if rest.is_empty() {
            return None;
        }
        Some(rest.replace(ENV_SEPARATOR, KEY_DELIMITER))
    }
}

#[async_trait]
impl ConfigurationProvider for EnvironmentVariablesProvider {
    async fn load(&self) -> Result<EntrySet> {
        let mut entries = EntrySet::new();
        for (name, value) in &self.vars {
            if let Some(key) = self.key_for(name) {
                upsert(&mut entries, ConfigKey::new(key), value.clone());
            }
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_key_mapping() {
        let provider = EnvironmentVariablesProvider::new("TP_", Vec::new());
        assert_eq!(
            provider.key_for("TP_TestingPlatform__CrashDump__Enable").as_deref(),
            Some("TestingPlatform:CrashDump:Enable")
        );
        assert_eq!(provider.key_for("tp_Level").as_deref(), Some("Level"));
        assert_eq!(provider.key_for("TP_"), None);
        assert_eq!(provider.key_for("PATH"), None);
        assert_eq!(provider.key_for("T"), None);
    }

    #[test]
    fn test_empty_prefix_takes_everything() {
        let provider = EnvironmentVariablesProvider::new("", Vec::new());
        assert_eq!(provider.key_for("A__B").as_deref(), Some("A:B"));
    }

    #[tokio::test]
    async fn test_load_filters_by_prefix() {
        let provider = EnvironmentVariablesProvider::new(
            "TP_",
            vars(&[("TP_A__B", "1"), ("HOME", "/root"), ("TP_C", "two")]),
        );
        let entries = provider.load().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.get(&ConfigKey::new("a:b")).map(String::as_str), Some("1"));
        assert_eq!(entries.get(&ConfigKey::new("C")).map(String::as_str), Some("two"));
    }
}
