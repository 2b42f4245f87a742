//! JSON file source

use crate::fs::FileSystem;
use crate::providers::{ConfigurationProvider, JsonConfigurationProvider};
use crate::sources::{ConfigurationSource, SourceInfo};
use crate::types::Result;
use async_trait::async_trait;
use path_clean::PathClean;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name used when no path is given.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "testconfig.json";

const CONFIG_FILE_SUFFIX: &str = ".testconfig.json";

pub struct JsonConfigurationSource {
    info: SourceInfo,
    path: PathBuf,
}

impl JsonConfigurationSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            info: SourceInfo::new(
                "JsonConfigurationSource",
                env!("CARGO_PKG_VERSION"),
                "JSON configuration",
                "Reads configuration from a JSON document",
            ),
            path: path.as_ref().clean(),
        }
    }

    /// `<module>.testconfig.json` next to the module.
    pub fn for_module(module: impl AsRef<Path>) -> Self {
        let module = module.as_ref();
        let stem = module
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dir = module.parent().unwrap_or_else(|| Path::new(""));
        Self::new(dir.join(format!("{stem}{CONFIG_FILE_SUFFIX}")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonConfigurationSource {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_FILE_NAME)
    }
}

#[async_trait]
impl ConfigurationSource for JsonConfigurationSource {
    fn info(&self) -> &SourceInfo {
        &self.info
    }

    async fn is_enabled(&self) -> Result<bool> {
        Ok(true)
    }

    fn build_provider(
        &self,
        file_system: &Arc<dyn FileSystem>,
    ) -> Result<Box<dyn ConfigurationProvider>> {
        Ok(Box::new(JsonConfigurationProvider::new(
            self.path.clone(),
            Arc::clone(file_system),
        )))
    }
}
