use serde::Serialize;

use crate::error::LogError;
use crate::level::{LogLevel, Method};
use crate::value::Meta;

/// The canonical shape of one log call once its arguments are resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    /// Underlying-logger method the record is (or was) routed to.
    pub method: Method,
    pub level: LogLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub err: Option<LogError>,
    pub meta: Meta,
}

impl LogRecord {
    pub fn new(method: Method, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            method,
            level,
            message: message.into(),
            err: None,
            meta: Meta::new(),
        }
    }

    pub fn with_err(mut self, err: LogError) -> Self {
        self.err = Some(err);
        self
    }

    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }
}
