//! Shared types: configuration keys and the error taxonomy

mod errors;
mod path;

pub use errors::{ConfigError, Result};
pub use path::{combine, is_valid_lookup_path, upsert, ConfigKey, EntrySet, KEY_DELIMITER};
