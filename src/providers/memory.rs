//! In-memory overrides provider

use crate::providers::ConfigurationProvider;
use crate::types::{upsert, ConfigKey, EntrySet, Result};
use async_trait::async_trait;

pub struct InMemoryProvider {
    values: Vec<(String, String)>,
}

impl InMemoryProvider {
    pub fn new(values: Vec<(String, String)>) -> Self {
        Self { values }
    }
}

#[async_trait]
impl ConfigurationProvider for InMemoryProvider {
    async fn load(&self) -> Result<EntrySet> {
        let mut entries = EntrySet::new();
        for (key, value) in &self.values {
            upsert(&mut entries, ConfigKey::new(key.as_str()), value.clone());
        }
        Ok(entries)
    }
}
