//! JSON file provider

use crate::fs::FileSystem;
use crate::providers::{flatten, ConfigurationProvider};
use crate::types::{ConfigError, EntrySet, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub struct JsonConfigurationProvider {
    path: PathBuf,
    file_system: Arc<dyn FileSystem>,
}

impl JsonConfigurationProvider {
    pub fn new(path: impl Into<PathBuf>, file_system: Arc<dyn FileSystem>) -> Self {
        Self {
            path: path.into(),
            file_system,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn malformed(&self, reason: impl Into<String>) -> ConfigError {
        ConfigError::MalformedDocument {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }

    /// Decode and parse raw file contents. The top-level element must be an
    /// object; an empty document is malformed, not an empty configuration.
    fn parse(&self, bytes: &[u8]) -> Result<EntrySet> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let text = std::str::from_utf8(bytes)
            .map_err(|e| self.malformed(format!("invalid UTF-8: {}", e)))?;

        let root: Value = serde_json::from_str(text).map_err(|e| self.malformed(e.to_string()))?;
        if !root.is_object() {
            return Err(self.malformed("top-level JSON element must be an object"));
        }

        Ok(flatten(&root))
    }
}

#[async_trait]
impl ConfigurationProvider for JsonConfigurationProvider {
    async fn load(&self) -> Result<EntrySet> {
        if !self.file_system.exists(&self.path).await {
            debug!("No JSON configuration at {}", self.path.display());
            return Ok(EntrySet::new());
        }

        debug!("Loading JSON configuration from {}", self.path.display());
        let mut stream = self.file_system.open_read(&self.path).await?;
        let mut bytes = Vec::new();
        stream.read_to_end(&mut bytes).await?;

        let entries = self.parse(&bytes)?;
        debug!(
            "Loaded {} entries from {}",
            entries.len(),
            self.path.display()
        );
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::InMemoryFileSystem;
    use crate::types::ConfigKey;

    fn provider(contents: &str) -> JsonConfigurationProvider {
        let fs = InMemoryFileSystem::new().with_file("testconfig.json", contents);
        JsonConfigurationProvider::new("testconfig.json", fs.into_shared())
    }

    #[tokio::test]
    async fn test_load_flattens_document() {
        let entries = provider(r#"{"TestingPlatform":{"Troubleshooting":{"CrashDump":{"Enable":true}}}}"#)
            .load()
            .await
            .unwrap();
        assert_eq!(
            entries
                .get(&ConfigKey::new("testingplatform:troubleshooting:crashdump:enable"))
                .map(String::as_str),
            Some("True")
        );
    }

    #[tokio::test]
    async fn test_missing_file_yields_no_entries() {
        let provider = JsonConfigurationProvider::new(
            "absent.json",
            InMemoryFileSystem::new().into_shared(),
        );
        assert!(provider.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_document_is_malformed() {
        let err = provider("").load().await.unwrap_err();
        assert!(matches!(err, ConfigError::MalformedDocument { .. }));
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed() {
        for contents in ["{", "{\"a\": 1,}", "// comment\n{}", "not json"] {
            let err = provider(contents).load().await.unwrap_err();
            assert!(
                matches!(err, ConfigError::MalformedDocument { .. }),
                "expected malformed for {:?}, got {:?}",
                contents,
                err
            );
        }
    }

    #[tokio::test]
    async fn test_non_object_root_is_malformed() {
        let err = provider("[1, 2]").load().await.unwrap_err();
        assert!(err.to_string().contains("must be an object"));
    }

    #[tokio::test]
    async fn test_bom_is_skipped() {
        let fs = InMemoryFileSystem::new().with_file("bom.json", b"\xEF\xBB\xBF{\"a\":1}".to_vec());
        let entries = JsonConfigurationProvider::new("bom.json", fs.into_shared())
            .load()
            .await
            .unwrap();
        assert_eq!(entries.get(&ConfigKey::new("a")).map(String::as_str), Some("1"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_malformed() {
        let fs = InMemoryFileSystem::new().with_file("bad.json", vec![b'{', 0xFF, b'}']);
        let err = JsonConfigurationProvider::new("bad.json", fs.into_shared())
            .load()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("invalid UTF-8"));
    }
}
