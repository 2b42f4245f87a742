//! Configuration providers
//!
//! A provider is bound to one concrete backing (a JSON file, the process
//! environment, a set of overrides) and turns it into an [`EntrySet`].

pub mod env;
pub mod flatten;
pub mod json;
pub mod memory;

use crate::types::{EntrySet, Result};
use async_trait::async_trait;

pub use env::EnvironmentVariablesProvider;
pub use flatten::{flatten, stringify_scalar};
pub use json::JsonConfigurationProvider;
pub use memory::InMemoryProvider;

#[async_trait]
pub trait ConfigurationProvider: Send + Sync {
    async fn load(&self) -> Result<EntrySet>;
}
