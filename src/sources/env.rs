//! Environment variable source

use crate::env::Environment;
use crate::fs::FileSystem;
use crate::providers::{ConfigurationProvider, EnvironmentVariablesProvider};
use crate::sources::{AsyncInitializable, ConfigurationSource, SourceInfo};
use crate::types::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

pub struct EnvironmentVariablesSource {
    info: SourceInfo,
    prefix: String,
    environment: Arc<dyn Environment>,
    skip_when_empty: bool,
    snapshot: Option<Vec<(String, String)>>,
}

impl EnvironmentVariablesSource {
    pub fn new(prefix: impl Into<String>, environment: Arc<dyn Environment>) -> Self {
        Self {
            info: SourceInfo::new(
                "EnvironmentVariablesSource",
                env!("CARGO_PKG_VERSION"),
                "Environment variables",
                "Reads prefixed environment variables, mapping '__' to ':'",
            ),
            prefix: prefix.into(),
            environment,
            skip_when_empty: false,
            snapshot: None,
        }
    }

    /// Report the source as disabled when no variable carries the prefix.
    pub fn skip_when_empty(mut self, skip: bool) -> Self {
        self.skip_when_empty = skip;
        self
    }

    fn matching_vars(&self) -> Vec<(String, String)> {
        let matcher = EnvironmentVariablesProvider::new(self.prefix.clone(), Vec::new());
        self.environment
            .vars()
            .into_iter()
            .filter(|(name, _)| matcher.key_for(name).is_some())
            .collect()
    }
}

#[async_trait]
impl ConfigurationSource for EnvironmentVariablesSource {
    fn info(&self) -> &SourceInfo {
        &self.info
    }

    async fn is_enabled(&self) -> Result<bool> {
        if !self.skip_when_empty {
            return Ok(true);
        }
        Ok(!self.matching_vars().is_empty())
    }

    fn as_initializable(&mut self) -> Option<&mut dyn AsyncInitializable> {
        Some(self)
    }

    fn build_provider(
        &self,
        _file_system: &Arc<dyn FileSystem>,
    ) -> Result<Box<dyn ConfigurationProvider>> {
        let vars = match &self.snapshot {
            Some(vars) => vars.clone(),
            None => self.matching_vars(),
        };
        Ok(Box::new(EnvironmentVariablesProvider::new(
            self.prefix.clone(),
            vars,
        )))
    }
}

#[async_trait]
impl AsyncInitializable for EnvironmentVariablesSource {
    /// Capture the environment once so the provider sees a consistent view.
    async fn initialize(&mut self) -> Result<()> {
        let vars = self.matching_vars();
        debug!(
            "Captured {} environment variables with prefix '{}'",
            vars.len(),
            self.prefix
        );
        self.snapshot = Some(vars);
        Ok(())
    }
}
