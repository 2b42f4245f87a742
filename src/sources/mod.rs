//! Configuration sources
//!
//! A source is the gated, optionally initializable producer of a
//! [`ConfigurationProvider`]. The manager drives every source through the
//! same lifecycle:
//! 1. `is_enabled` (disabled sources are skipped entirely)
//! 2. `initialize`, only for sources exposing [`AsyncInitializable`]
//! 3. `build_provider`
//! 4. `load` on the returned provider

pub mod env;
pub mod json;
pub mod memory;

use crate::fs::FileSystem;
use crate::providers::ConfigurationProvider;
use crate::types::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

pub use env::EnvironmentVariablesSource;
pub use json::JsonConfigurationSource;
pub use memory::InMemorySource;

/// Identity of a source. Informational only, never used for merging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    pub uid: String,
    pub version: String,
    pub display_name: String,
    pub description: String,
}

impl SourceInfo {
    pub fn new(
        uid: impl Into<String>,
        version: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            version: version.into(),
            display_name: display_name.into(),
            description: description.into(),
        }
    }
}

#[async_trait]
pub trait ConfigurationSource: Send + Sync {
    fn info(&self) -> &SourceInfo;

    async fn is_enabled(&self) -> Result<bool>;

    /// Sources that need async setup before building their provider return
    /// themselves here.
    fn as_initializable(&mut self) -> Option<&mut dyn AsyncInitializable> {
        None
    }

    fn build_provider(
        &self,
        file_system: &Arc<dyn FileSystem>,
    ) -> Result<Box<dyn ConfigurationProvider>>;
}

#[async_trait]
pub trait AsyncInitializable: Send + Sync {
    async fn initialize(&mut self) -> Result<()>;
}
