//! `tracing` adapter
//!
//! Emits each call as a `tracing` event at the matching level. There is no
//! `fatal` level in `tracing`, so `fatal` is left unsupported and the
//! forwarding table routes it to `error`.

use std::sync::{Mutex, PoisonError};

use axe_core::{LogLevel, Method, Value, inspect};
use tracing::{debug, error, info, trace, warn};

use crate::console::Console;

#[derive(Debug, Default)]
pub struct TracingConsole {
    level: Mutex<Option<LogLevel>>,
    name: Mutex<Option<String>>,
}

impl TracingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<String> {
        self.name.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn level(&self) -> Option<LogLevel> {
        *self.level.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Split the argument list into message text, error text and a JSON meta
/// rendering.
fn render(args: &[Value]) -> (String, Option<String>, Option<String>) {
    let mut message = Vec::new();
    let mut err = None;
    let mut meta = None;
    for arg in args {
        match arg {
            Value::String(s) => message.push(s.clone()),
            Value::Error(e) => err = Some(e.stack.clone().unwrap_or_else(|| e.to_string())),
            Value::Map(m) => meta = serde_json::to_string(m).ok(),
            other => message.push(inspect(other)),
        }
    }
    (message.join(" "), err, meta)
}

impl Console for TracingConsole {
    fn supports(&self, method: Method) -> bool {
        method != Method::Fatal
    }

    fn write(&self, method: Method, args: &[Value]) {
        let (message, err, meta) = render(args);
        let name = self.name().unwrap_or_default();
        let err = err.unwrap_or_default();
        let meta = meta.unwrap_or_default();
        match method {
            Method::Trace => trace!(logger = %name, err = %err, meta = %meta, "{message}"),
            Method::Debug => debug!(logger = %name, err = %err, meta = %meta, "{message}"),
            Method::Info | Method::Log => {
                info!(logger = %name, err = %err, meta = %meta, "{message}")
            }
            Method::Warn => warn!(logger = %name, err = %err, meta = %meta, "{message}"),
            Method::Error | Method::Fatal => {
                error!(logger = %name, err = %err, meta = %meta, "{message}")
            }
        }
    }

    fn set_level_field(&self, _field: &str, level: LogLevel) {
        *self.level.lock().unwrap_or_else(PoisonError::into_inner) = Some(level);
    }

    fn set_name_field(&self, _field: &str, name: &str) {
        *self.name.lock().unwrap_or_else(PoisonError::into_inner) = Some(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axe_core::{LogError, meta};

    #[test]
    fn fatal_is_not_supported() {
        let console = TracingConsole::new();
        assert!(!console.supports(Method::Fatal));
        assert!(console.supports(Method::Log));
    }

    #[test]
    fn renders_message_error_and_meta() {
        let args = [
            Value::from("boom happened"),
            Value::from(LogError::new("boom").with_stack("Error: boom\n    at x")),
            Value::from(meta! { "user" => 7 }),
        ];
        let (message, err, meta) = render(&args);
        assert_eq!(message, "boom happened");
        assert_eq!(err.as_deref(), Some("Error: boom\n    at x"));
        assert_eq!(meta.as_deref(), Some(r#"{"user":7}"#));
    }

    #[test]
    fn remembers_fields() {
        let console = TracingConsole::new();
        console.set_name_field("name", "worker");
        console.set_level_field("level", LogLevel::Debug);
        assert_eq!(console.name().as_deref(), Some("worker"));
        assert_eq!(console.level(), Some(LogLevel::Debug));
        // writing without a subscriber is a no-op
        console.write(Method::Info, &[Value::from("hello")]);
    }
}
