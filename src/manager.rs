//! Configuration manager
//!
//! Holds the ordered list of source factories and drives each source through
//! its lifecycle at build time. Sources are processed one at a time in
//! registration order, and a later enabled source overrides equal paths from
//! an earlier one, so defaults go first and overrides last.

use crate::configuration::Configuration;
use crate::fs::FileSystem;
use crate::logging::{LogLevel, LoggerFactory};
use crate::sources::ConfigurationSource;
use crate::types::{upsert, ConfigError, ConfigKey, EntrySet, Result};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub type SourceFactory = Box<dyn Fn() -> Box<dyn ConfigurationSource> + Send + Sync>;

const LOGGER_CATEGORY: &str = "platform_config::manager";

#[derive(Default)]
pub struct ConfigurationManager {
    /// Factories in registration order; invoked once per build
    factories: Vec<SourceFactory>,
}

impl ConfigurationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source factory. Nothing is instantiated until `build`.
    pub fn add_source<F>(&mut self, factory: F) -> &mut Self
    where
        F: Fn() -> Box<dyn ConfigurationSource> + Send + Sync + 'static,
    {
        self.factories.push(Box::new(factory));
        self
    }

    pub fn source_count(&self) -> usize {
        self.factories.len()
    }

    /// Build the merged configuration. Any source failure aborts the whole
    /// build; a partial configuration is never returned.
    pub async fn build(
        &self,
        file_system: Arc<dyn FileSystem>,
        logger_factory: Option<&dyn LoggerFactory>,
    ) -> Result<Configuration> {
        if self.factories.is_empty() {
            return Err(ConfigError::NoSourcesRegistered);
        }

        let mut merged = EntrySet::new();
        let mut contributors = Vec::new();
        // Index into `contributors` of the source that set each key last
        let mut origins: BTreeMap<ConfigKey, usize> = BTreeMap::new();

        for factory in &self.factories {
            let mut source = factory();
            let uid = source.info().uid.clone();

            if !source.is_enabled().await? {
                debug!("Configuration source '{}' is disabled, skipping", uid);
                continue;
            }

            if let Some(initializable) = source.as_initializable() {
                debug!("Initializing configuration source '{}'", uid);
                initializable.initialize().await?;
            }

            let provider = source.build_provider(&file_system)?;
            let entries = provider.load().await?;
            debug!(
                "Configuration source '{}' provided {} entries",
                uid,
                entries.len()
            );

            let index = contributors.len();
            for (key, value) in entries {
                origins.remove(&key);
                origins.insert(key.clone(), index);
                upsert(&mut merged, key, value);
            }
            contributors.push(source.info().clone());
        }

        if contributors.is_empty() {
            return Err(ConfigError::NoSourcesEnabled {
                registered: self.factories.len(),
            });
        }

        info!(
            "Built configuration with {} entries from {} of {} sources",
            merged.len(),
            contributors.len(),
            self.factories.len()
        );

        let configuration = Configuration::new(merged, contributors);
        if let Some(factory) = logger_factory {
            let logger = factory.create_logger(LOGGER_CATEGORY);
            if logger.is_enabled(LogLevel::Trace) {
                logger.log(LogLevel::Trace, &describe(&configuration, &origins), None);
            }
        }

        Ok(configuration)
    }

    /// [`build`](Self::build) with a deadline. The build is cancelled when
    /// the deadline passes.
    pub async fn build_with_timeout(
        &self,
        file_system: Arc<dyn FileSystem>,
        logger_factory: Option<&dyn LoggerFactory>,
        timeout: Duration,
    ) -> Result<Configuration> {
        tokio::time::timeout(timeout, self.build(file_system, logger_factory))
            .await
            .map_err(|_| ConfigError::Timeout {
                millis: timeout_millis(timeout),
            })?
    }
}

fn timeout_millis(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
}

/// Summary of the merged state for the trace record. Lists each key with the
/// source that won it; values are left out since they may carry secrets.
fn describe(configuration: &Configuration, origins: &BTreeMap<ConfigKey, usize>) -> String {
    let names: Vec<&str> = configuration
        .sources()
        .iter()
        .map(|s| s.display_name.as_str())
        .collect();
    let mut text = format!(
        "Configuration built from [{}] with {} entries:",
        names.join(", "),
        configuration.len()
    );
    for (key, index) in origins {
        let source = configuration
            .sources()
            .get(*index)
            .map(|s| s.display_name.as_str())
            .unwrap_or("unknown");
        let _ = write!(text, "\n  {} <- {}", key, source);
    }
    text
}
