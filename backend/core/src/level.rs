//! Level registry and alias resolution.
//!
//! The canonical severity order is `trace < debug < info < warn < error < fatal`.
//! `warning` and `err` are accepted as aliases wherever a level is parsed from
//! a call, but never by `LevelSet`, which only takes canonical names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AxeError;

/// Named severity rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogLevel {
    /// Every level, least severe first.
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        }
    }

    /// Position in [`LogLevel::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Exact canonical name only.
    pub fn from_canonical(name: &str) -> Option<LogLevel> {
        LogLevel::ALL.iter().copied().find(|l| l.as_str() == name)
    }

    /// Canonical name or alias (`warning`, `err`).
    pub fn resolve(name: &str) -> Option<LogLevel> {
        match name {
            "warning" => Some(LogLevel::Warn),
            "err" => Some(LogLevel::Error),
            other => LogLevel::from_canonical(other),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = AxeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::resolve(s).ok_or_else(|| AxeError::invalid_level(s))
    }
}

/// Result of [`normalize_level`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalized {
    pub level: LogLevel,
    /// Set when the input was not a level and `info` was substituted.
    pub degraded: bool,
}

/// Map any input onto a level without ever failing.
///
/// Aliases resolve, canonical names pass through, and anything else degrades
/// to `info` with `degraded` raised.
pub fn normalize_level(input: Option<&str>) -> Normalized {
    match input.and_then(LogLevel::resolve) {
        Some(level) => Normalized { level, degraded: false },
        None => Normalized { level: LogLevel::Info, degraded: true },
    }
}

/// Underlying-logger method a record is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    /// Generic method used when the call carried no recognizable level.
    Log,
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::Trace,
        Method::Debug,
        Method::Info,
        Method::Warn,
        Method::Error,
        Method::Fatal,
        Method::Log,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Log => "log",
            other => other.level().map(|l| l.as_str()).unwrap_or("log"),
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The level a named method stands for; `None` for `log`.
    pub fn level(&self) -> Option<LogLevel> {
        match self {
            Method::Trace => Some(LogLevel::Trace),
            Method::Debug => Some(LogLevel::Debug),
            Method::Info => Some(LogLevel::Info),
            Method::Warn => Some(LogLevel::Warn),
            Method::Error => Some(LogLevel::Error),
            Method::Fatal => Some(LogLevel::Fatal),
            Method::Log => None,
        }
    }
}

impl From<LogLevel> for Method {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Method::Trace,
            LogLevel::Debug => Method::Debug,
            LogLevel::Info => Method::Info,
            LogLevel::Warn => Method::Warn,
            LogLevel::Error => Method::Error,
            LogLevel::Fatal => Method::Fatal,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = AxeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "log" {
            return Ok(Method::Log);
        }
        LogLevel::from_str(s).map(Method::from)
    }
}

/// The active severities: always a contiguous suffix of [`LogLevel::ALL`].
///
/// Stored as the threshold so the suffix invariant cannot be broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSet {
    threshold: LogLevel,
}

impl Default for LevelSet {
    fn default() -> Self {
        Self { threshold: LogLevel::Info }
    }
}

impl LevelSet {
    pub fn new(threshold: LogLevel) -> Self {
        Self { threshold }
    }

    /// Build from a canonical level name; aliases are rejected.
    pub fn from_level(name: &str) -> Result<Self, AxeError> {
        LogLevel::from_canonical(name)
            .map(Self::new)
            .ok_or_else(|| AxeError::invalid_level(name))
    }

    /// Build from an explicit list, which must be a non-empty contiguous
    /// suffix of the canonical order.
    pub fn from_levels<S: AsRef<str>>(names: &[S]) -> Result<Self, AxeError> {
        let first = names
            .first()
            .ok_or_else(|| AxeError::Configuration("`levels` must not be empty".into()))?;
        let set = Self::from_level(first.as_ref())?;
        let expected = set.levels();
        let matches = names.len() == expected.len()
            && names.iter().zip(expected).all(|(n, l)| n.as_ref() == l.as_str());
        if !matches {
            return Err(AxeError::Configuration(format!(
                "`levels` must be a contiguous suffix of: {}",
                level_names()
            )));
        }
        Ok(set)
    }

    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    /// Recompute the suffix starting at `name`.
    pub fn set_level(&mut self, name: &str) -> Result<(), AxeError> {
        *self = Self::from_level(name)?;
        Ok(())
    }

    pub fn levels(&self) -> &'static [LogLevel] {
        &LogLevel::ALL[self.threshold.index()..]
    }

    pub fn contains(&self, level: LogLevel) -> bool {
        level >= self.threshold
    }
}

/// Comma-separated canonical level names, for error messages.
pub fn level_names() -> String {
    LogLevel::ALL
        .iter()
        .map(|l| l.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve() {
        assert_eq!(LogLevel::resolve("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::resolve("err"), Some(LogLevel::Error));
        assert_eq!(LogLevel::resolve("fatal"), Some(LogLevel::Fatal));
        assert_eq!(LogLevel::resolve("verbose"), None);
    }

    #[test]
    fn test_normalize_degrades_unknown() {
        let n = normalize_level(Some("nope"));
        assert_eq!(n.level, LogLevel::Info);
        assert!(n.degraded);

        let n = normalize_level(None);
        assert_eq!(n.level, LogLevel::Info);
        assert!(n.degraded);

        let n = normalize_level(Some("warning"));
        assert_eq!(n.level, LogLevel::Warn);
        assert!(!n.degraded);
    }

    #[test]
    fn test_set_level_recomputes_suffix() {
        let mut set = LevelSet::default();
        assert_eq!(
            set.levels(),
            &[LogLevel::Info, LogLevel::Warn, LogLevel::Error, LogLevel::Fatal]
        );

        set.set_level("warn").unwrap();
        assert_eq!(set.levels(), &[LogLevel::Warn, LogLevel::Error, LogLevel::Fatal]);
        assert!(!set.contains(LogLevel::Info));
        assert!(set.contains(LogLevel::Warn));
    }

    #[test]
    fn test_set_level_rejects_alias_and_garbage() {
        let mut set = LevelSet::default();
        assert!(matches!(set.set_level("warning"), Err(AxeError::Configuration(_))));
        assert!(set.set_level("loud").is_err());
        // unchanged on failure
        assert_eq!(set.threshold(), LogLevel::Info);
    }

    #[test]
    fn test_from_levels_requires_suffix() {
        assert_eq!(
            LevelSet::from_levels(&["error", "fatal"]).unwrap().threshold(),
            LogLevel::Error
        );
        assert!(LevelSet::from_levels(&["info", "error"]).is_err());
        assert!(LevelSet::from_levels(&["info"]).is_err());
        assert!(LevelSet::from_levels::<&str>(&[]).is_err());
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("log".parse::<Method>().unwrap(), Method::Log);
        assert_eq!("warning".parse::<Method>().unwrap(), Method::Warn);
        assert_eq!(Method::Fatal.level(), Some(LogLevel::Fatal));
        assert_eq!(Method::Log.as_str(), "log");
        assert!("shout".parse::<Method>().is_err());
    }
}
