//! Platform Config - layered configuration for test platform startup
//!
//! This crate merges configuration from an ordered list of sources (JSON
//! documents, environment variables, in-memory overrides) into a single
//! read-only view addressed by `:`-separated, case-insensitive paths such as
//! `TestingPlatform:Troubleshooting:CrashDump:Enable`.

pub mod configuration;
pub mod env;
pub mod fs;
pub mod logging;
pub mod manager;
pub mod providers;
pub mod sources;
pub mod types;

pub use configuration::Configuration;
pub use fs::{FileSystem, InMemoryFileSystem, LocalFileSystem};
pub use logging::{LogLevel, Logger, LoggerFactory, TracingLoggerFactory};
pub use manager::ConfigurationManager;
pub use providers::ConfigurationProvider;
pub use sources::{
    AsyncInitializable, ConfigurationSource, EnvironmentVariablesSource, InMemorySource,
    JsonConfigurationSource, SourceInfo,
};
pub use types::{ConfigError, ConfigKey, Result};
