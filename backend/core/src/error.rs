use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::level::level_names;
use crate::value::{Meta, Value};

/// Top-level error type for the logging front-end.
#[derive(Debug, Error)]
pub enum AxeError {
    /// Invalid level or level list given at construction or to `set_level`.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid name: {0}")]
    InvalidName(String),

    /// The underlying logger has neither the method nor any fallback for it.
    #[error("`{method}` must be a function on the logger")]
    LoggerCapability { method: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("hook `{hook}` failed: {message}")]
    Hook { hook: String, message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AxeError {
    pub fn invalid_level(level: &str) -> Self {
        AxeError::Configuration(format!(
            "`level` invalid ({level:?}), must be: {}",
            level_names()
        ))
    }
}

/// An error value travelling through a log call.
#[derive(Debug, Clone, PartialEq)]
pub struct LogError {
    pub name: String,
    pub message: String,
    pub stack: Option<String>,
    /// Source errors of a composite, in encounter order. Empty otherwise.
    pub errors: Vec<LogError>,
}

impl LogError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            name: "Error".to_string(),
            message: message.into(),
            stack: None,
            errors: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn is_composite(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Plain, serializable representation stored under `meta.err`.
    pub fn to_plain(&self) -> Meta {
        let mut plain = Meta::new();
        plain.insert("name", self.name.as_str());
        plain.insert("message", self.message.as_str());
        if let Some(stack) = &self.stack {
            plain.insert("stack", stack.as_str());
        }
        if self.is_composite() {
            let errors = self.errors.iter().map(|e| Value::Map(e.to_plain())).collect::<Vec<_>>();
            plain.insert("errors", errors);
        }
        plain
    }
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}

impl std::error::Error for LogError {}

impl Serialize for LogError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_plain().serialize(serializer)
    }
}

impl From<anyhow::Error> for LogError {
    fn from(err: anyhow::Error) -> Self {
        LogError::new(err.to_string()).with_stack(format!("{err:?}"))
    }
}

impl From<&AxeError> for LogError {
    fn from(err: &AxeError) -> Self {
        let name = match err {
            AxeError::Configuration(_) => "ConfigurationError",
            AxeError::InvalidName(_) => "InvalidNameError",
            AxeError::LoggerCapability { .. } => "LoggerCapabilityError",
            AxeError::Transport(_) => "TransportError",
            AxeError::Hook { .. } => "HookError",
            AxeError::Other(_) => "Error",
        };
        LogError::new(err.to_string()).with_name(name)
    }
}

/// Message used when a composite has no non-empty source message.
const COMPOSITE_FALLBACK_MESSAGE: &str = "Multiple errors";

/// Combine every error collected during a call into at most one.
///
/// One error is returned as-is. Two or more become a composite whose message
/// is the unique non-empty messages joined by `"; "` and whose stack is the
/// unique stacks joined by a blank line, both in encounter order.
pub fn aggregate(mut errors: Vec<LogError>) -> Option<LogError> {
    match errors.len() {
        0 => None,
        1 => errors.pop(),
        _ => {
            let message = unique_joined(errors.iter().map(|e| e.message.as_str()), "; ");
            let stack = unique_joined(
                errors.iter().filter_map(|e| e.stack.as_deref()),
                "\n\n",
            );
            Some(LogError {
                name: "Error".to_string(),
                message: if message.is_empty() {
                    COMPOSITE_FALLBACK_MESSAGE.to_string()
                } else {
                    message
                },
                stack: (!stack.is_empty()).then_some(stack),
                errors,
            })
        }
    }
}

fn unique_joined<'a>(parts: impl Iterator<Item = &'a str>, sep: &str) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for part in parts.filter(|p| !p.is_empty()) {
        if !seen.contains(&part) {
            seen.push(part);
        }
    }
    seen.join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_one() {
        assert!(aggregate(vec![]).is_none());
        let one = aggregate(vec![LogError::new("a")]).unwrap();
        assert_eq!(one.message, "a");
        assert!(!one.is_composite());
    }

    #[test]
    fn test_composite_dedups_in_order() {
        let errs = vec![
            LogError::new("a").with_stack("Error: a\n    at x"),
            LogError::new("b").with_stack("Error: b\n    at y"),
            LogError::new("a").with_stack("Error: a\n    at x"),
            LogError::new(""),
        ];
        let err = aggregate(errs).unwrap();
        assert_eq!(err.message, "a; b");
        assert_eq!(
            err.stack.as_deref(),
            Some("Error: a\n    at x\n\nError: b\n    at y")
        );
        assert_eq!(err.errors.len(), 4);
        assert_eq!(err.errors[1].message, "b");
    }

    #[test]
    fn test_composite_message_never_empty() {
        let err = aggregate(vec![LogError::new(""), LogError::new("")]).unwrap();
        assert_eq!(err.message, "Multiple errors");
        assert!(err.stack.is_none());
    }

    #[test]
    fn test_plain_representation() {
        let err = LogError::new("boom").with_name("TypeError").with_stack("TypeError: boom");
        let plain = err.to_plain();
        assert_eq!(plain.get_str("name"), Some(&Value::from("TypeError")));
        assert_eq!(plain.get_str("message"), Some(&Value::from("boom")));
        assert!(plain.get_str("errors").is_none());
    }

    #[test]
    fn test_axe_error_messages() {
        let err = AxeError::invalid_level("loud");
        assert!(err.to_string().contains("trace, debug, info, warn, error, fatal"));
        let plain = LogError::from(&AxeError::Transport("refused".into()));
        assert_eq!(plain.name, "TransportError");
    }
}
