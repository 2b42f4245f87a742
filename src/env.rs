//! Process environment collaborator

use std::collections::BTreeMap;

pub trait Environment: Send + Sync {
    /// Snapshot of all variables visible to the process.
    fn vars(&self) -> Vec<(String, String)>;
}

/// Reads the real process environment. Variables that are not valid
/// Unicode are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn vars(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryEnvironment {
    vars: BTreeMap<String, String>,
}

impl InMemoryEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl Environment for InMemoryEnvironment {
    fn vars(&self) -> Vec<(String, String)> {
        self.vars.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}
