//! In-memory overrides source

use crate::fs::FileSystem;
use crate::providers::{ConfigurationProvider, InMemoryProvider};
use crate::sources::{ConfigurationSource, SourceInfo};
use crate::types::{ConfigError, Result};
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct InMemorySource {
    info: SourceInfo,
    values: Vec<(String, String)>,
    enabled: bool,
}

impl InMemorySource {
    pub fn new<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            info: SourceInfo::new(
                "InMemorySource",
                env!("CARGO_PKG_VERSION"),
                "In-memory overrides",
                "Explicit key/value overrides supplied by the host",
            ),
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            enabled: true,
        }
    }

    /// Parse `KEY=VALUE` pairs, as given on a command line.
    pub fn from_overrides<S: AsRef<str>>(overrides: &[S]) -> Result<Self> {
        let mut values = Vec::with_capacity(overrides.len());
        for raw in overrides {
            let raw = raw.as_ref();
            let (key, value) = raw
                .split_once('=')
                .ok_or_else(|| ConfigError::InvalidOverride(raw.to_string()))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigError::InvalidOverride(raw.to_string()));
            }
            values.push((key.to_string(), value.to_string()));
        }
        Ok(Self::new(values))
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

#[async_trait]
impl ConfigurationSource for InMemorySource {
    fn info(&self) -> &SourceInfo {
        &self.info
    }

    async fn is_enabled(&self) -> Result<bool> {
        Ok(self.enabled)
    }

    fn build_provider(
        &self,
        _file_system: &Arc<dyn FileSystem>,
    ) -> Result<Box<dyn ConfigurationProvider>> {
        Ok(Box::new(InMemoryProvider::new(self.values.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_overrides() {
        let source = InMemorySource::from_overrides(&["a:b=1", "c= spaced = value"]).unwrap();
        assert_eq!(
            source.values,
            vec![
                ("a:b".to_string(), "1".to_string()),
                ("c".to_string(), " spaced = value".to_string()),
            ]
        );
    }

    #[test]
    fn test_from_overrides_rejects_missing_separator() {
        let err = InMemorySource::from_overrides(&["novalue"]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOverride(ref raw) if raw == "novalue"));

        let err = InMemorySource::from_overrides(&["=x"]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOverride(_)));
    }

    #[tokio::test]
    async fn test_enablement_flag() {
        assert!(InMemorySource::new([("a", "1")]).is_enabled().await.unwrap());
        assert!(!InMemorySource::new([("a", "1")]).enabled(false).is_enabled().await.unwrap());
    }
}
