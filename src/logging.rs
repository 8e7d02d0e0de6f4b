//! Name-keyed logger registry
//!
//! Thin level-gated adapters over the `log` facade. Loggers are registered
//! process-wide by name; requesting a name again returns the same shared
//! entry, so an entry's level is fixed by whoever registers it first.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Minimum level a [`Logger`] emits at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_log(self) -> log::Level {
        match self {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// A named, level-gated logger
///
/// Calls below the configured minimum level are no-ops; everything else is
/// forwarded to the `log` facade with the logger's name as target.
#[derive(Debug)]
pub struct Logger {
    name: String,
    level: LogLevel,
}

impl Logger {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Whether a message at `level` would be emitted
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    fn emit(&self, level: LogLevel, message: &str) {
        if self.enabled(level) {
            log::log!(target: &self.name, level.to_log(), "{message}");
        }
    }

    pub fn debug(&self, message: &str) {
        self.emit(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.emit(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.emit(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(LogLevel::Error, message);
    }
}

static LOGGERS: Lazy<RwLock<HashMap<String, Arc<Logger>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Registry entry for `name` at the default level (info)
pub fn logger(name: &str) -> Arc<Logger> {
    logger_with_level(name, LogLevel::default())
}

/// Registry entry for `name`, registering it at `level` on first use
///
/// The first registration wins: a later request for the same name returns
/// the existing entry and its level.
pub fn logger_with_level(name: &str, level: LogLevel) -> Arc<Logger> {
    if let Some(existing) = LOGGERS.read().unwrap().get(name) {
        return Arc::clone(existing);
    }
    let mut loggers = LOGGERS.write().unwrap();
    let entry = loggers.entry(name.to_string()).or_insert_with(|| {
        Arc::new(Logger {
            name: name.to_string(),
            level,
        })
    });
    Arc::clone(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_returns_same_entry() {
        let first = logger("logging-tests-same");
        let second = logger("logging-tests-same");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_first_registration_wins() {
        let first = logger_with_level("logging-tests-level", LogLevel::Error);
        let second = logger_with_level("logging-tests-level", LogLevel::Debug);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.level(), LogLevel::Error);
    }

    #[test]
    fn test_default_level_is_info() {
        let entry = logger("logging-tests-default");
        assert_eq!(entry.level(), LogLevel::Info);
        assert_eq!(entry.name(), "logging-tests-default");
    }

    #[test]
    fn test_level_gating() {
        let entry = logger_with_level("logging-tests-gating", LogLevel::Warn);
        assert!(!entry.enabled(LogLevel::Debug));
        assert!(!entry.enabled(LogLevel::Info));
        assert!(entry.enabled(LogLevel::Warn));
        assert!(entry.enabled(LogLevel::Error));
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }
}
