//! Logger collaborator
//!
//! The build pipeline reports its final state through an optional
//! [`LoggerFactory`] handed in by the caller. [`TracingLoggerFactory`] bridges
//! that contract onto `tracing`, which is what the binary installs.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    Information,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Information => "information",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
        };
        f.write_str(name)
    }
}

/// Fire-and-forget diagnostic sink. Implementations must not fail.
pub trait Logger: Send + Sync {
    fn is_enabled(&self, level: LogLevel) -> bool;

    fn log(&self, level: LogLevel, message: &str, error: Option<&(dyn Error + 'static)>);
}

pub trait LoggerFactory: Send + Sync {
    fn create_logger(&self, category: &str) -> Arc<dyn Logger>;
}

/// Emits records as `tracing` events, with the logger category attached as a
/// field.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLoggerFactory;

impl LoggerFactory for TracingLoggerFactory {
    fn create_logger(&self, category: &str) -> Arc<dyn Logger> {
        Arc::new(TracingLogger {
            category: category.to_string(),
        })
    }
}

#[derive(Debug)]
struct TracingLogger {
    category: String,
}

impl Logger for TracingLogger {
    fn is_enabled(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Trace => tracing::enabled!(tracing::Level::TRACE),
            LogLevel::Debug => tracing::enabled!(tracing::Level::DEBUG),
            LogLevel::Information => tracing::enabled!(tracing::Level::INFO),
            LogLevel::Warning => tracing::enabled!(tracing::Level::WARN),
            LogLevel::Error | LogLevel::Critical => tracing::enabled!(tracing::Level::ERROR),
        }
    }

    fn log(&self, level: LogLevel, message: &str, error: Option<&(dyn Error + 'static)>) {
        let category = self.category.as_str();
        let error = error.map(|e| e.to_string());
        let error = error.as_deref();
        match level {
            LogLevel::Trace => tracing::trace!(category, error, "{}", message),
            LogLevel::Debug => tracing::debug!(category, error, "{}", message),
            LogLevel::Information => tracing::info!(category, error, "{}", message),
            LogLevel::Warning => tracing::warn!(category, error, "{}", message),
            LogLevel::Error | LogLevel::Critical => {
                tracing::error!(category, error, "{}", message)
            }
        }
    }
}
