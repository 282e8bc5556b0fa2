/// Built-in hook implementations.
///
/// Bundled hooks that can be registered on any logger. Each is a concrete
/// struct implementing [`PreHook`] or [`PostHook`].
use std::sync::LazyLock;

use anyhow::Result;
use async_trait::async_trait;
use axe_core::{LogRecord, Method, Value};
use chrono::{SecondsFormat, Utc};
use regex::Regex;
use tracing::debug;

use crate::registry::{PostHook, PreHook};

// ---------------------------------------------------------------------------
// Redact hook — scrubs secrets from the message
// ---------------------------------------------------------------------------

static TELEPHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap()
});
static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(sk-[a-zA-Z0-9]{32,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)").unwrap()
});

/// Replaces phone numbers and API tokens in the message.
#[derive(Debug, Default, Clone, Copy)]
pub struct RedactHook;

impl RedactHook {
    pub fn redact(input: &str) -> String {
        let redacted = TELEPHONE_RE.replace_all(input, "[REDACTED_PHONE]");
        API_KEY_RE.replace_all(&redacted, "[REDACTED_TOKEN]").into_owned()
    }
}

impl PreHook for RedactHook {
    fn name(&self) -> &str {
        "redact_hook"
    }

    fn run(&self, _method: Method, mut record: LogRecord) -> LogRecord {
        record.message = Self::redact(&record.message);
        record
    }
}

// ---------------------------------------------------------------------------
// Timestamp hook — stamps meta with the dispatch time
// ---------------------------------------------------------------------------

/// Sets `meta.<field>` to the current UTC time (RFC 3339, milliseconds)
/// unless the call already supplied one.
#[derive(Debug, Clone)]
pub struct TimestampHook {
    pub field: String,
}

impl Default for TimestampHook {
    fn default() -> Self {
        Self { field: "timestamp".to_string() }
    }
}

impl PreHook for TimestampHook {
    fn name(&self) -> &str {
        "timestamp_hook"
    }

    fn run(&self, _method: Method, mut record: LogRecord) -> LogRecord {
        if record.meta.get_str(&self.field).is_none() {
            let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            record.meta.insert(self.field.as_str(), Value::from(now));
        }
        record
    }
}

// ---------------------------------------------------------------------------
// Trace hook — mirrors every dispatch into `tracing`
// ---------------------------------------------------------------------------

pub struct TraceHook {
    pub prefix: String,
}

impl TraceHook {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

#[async_trait]
impl PostHook for TraceHook {
    fn name(&self) -> &str {
        "trace_hook"
    }

    async fn run(&self, method: Method, record: &LogRecord) -> Result<()> {
        debug!(
            method = %method,
            level = %record.level,
            has_err = record.err.is_some(),
            meta_fields = record.meta.len(),
            "[{}] {}",
            self.prefix,
            record.message
        );
        Ok(())
    }
}
