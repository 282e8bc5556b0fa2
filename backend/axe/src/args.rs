//! Argument disambiguation.
//!
//! A log call accepts loosely-typed arguments: an optional level, then any
//! mix of message, format arguments, errors and a metadata object. This
//! module turns the captured list into one canonical shape.

use axe_core::{format, has_format_token, LogError, LogLevel, Meta, Value};

/// The ordered arguments of one call, captured as given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args(Vec<Value>);

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.0.push(value.into());
        self
    }

    /// The same arguments with `level` in front.
    pub fn with_level(mut self, level: &str) -> Self {
        self.0.insert(0, Value::from(level));
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl FromIterator<Value> for Args {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Capture call arguments: `args!["info", "hi %s", "bob"]`.
#[macro_export]
macro_rules! args {
    () => { $crate::args::Args::new() };
    ($($value:expr),+ $(,)?) => {
        $crate::args::Args::from(vec![$($crate::Value::from($value)),+])
    };
}

/// Whether the call named its level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modifier {
    /// A level (or an error standing in for `error`) led the call.
    #[default]
    Named,
    /// No recognizable level; the record goes to the generic `log` method.
    Generic,
}

/// How the first argument was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Head {
    pub level: LogLevel,
    pub modifier: Modifier,
    /// Index of the message candidate.
    slot: usize,
}

impl Head {
    /// Rules 1 to 3: a level name (or alias), a leading error, or neither.
    pub fn read(args: &Args) -> Head {
        let first = args.0.first();
        let named = first.and_then(Value::as_str).and_then(LogLevel::resolve);
        match (named, first) {
            (Some(level), _) => Head { level, modifier: Modifier::Named, slot: 1 },
            (None, Some(Value::Error(_))) => {
                Head { level: LogLevel::Error, modifier: Modifier::Named, slot: 0 }
            }
            _ => Head { level: LogLevel::Info, modifier: Modifier::Generic, slot: 0 },
        }
    }

    /// Arguments after the level, counting an implied level as present and a
    /// leading error as occupying the level position.
    fn payload_len(&self, args: &Args) -> usize {
        match self.modifier {
            Modifier::Generic => args.len(),
            Modifier::Named => args.len().saturating_sub(1),
        }
    }
}

/// The canonical reading of one call.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedArgs {
    pub level: LogLevel,
    /// `None` when only errors were supplied; the aggregated error's message
    /// stands in.
    pub message: Option<String>,
    pub meta: Meta,
    /// Every error found, in encounter order.
    pub errors: Vec<LogError>,
    pub modifier: Modifier,
    /// Set when the message was built from arguments other than the error.
    pub has_message: bool,
}

/// Rules 6 to 12, mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    WrapLoneValue,
    FormatAll,
    FormatTemplate,
    ErrorPair,
    ErrorMeta,
    FormatMeta,
    StringifyMessage,
    Keep,
}

pub fn disambiguate(args: Args) -> ParsedArgs {
    let head = Head::read(&args);
    let payload_len = head.payload_len(&args);
    let payload: Vec<Value> = args.0.into_iter().skip(head.slot).collect();
    let level = head.level;

    let mut message = payload.first().cloned();
    let mut meta = payload.get(1).cloned();
    let mut errors = Vec::new();
    let mut has_message = false;

    // Rule 4: `(object, "message", ...format args)`
    let structured_first = matches!(
        (&message, &meta),
        (Some(m), Some(Value::String(_))) if m.is_structured()
    );
    if structured_first {
        let text = match &payload[1..] {
            [Value::String(only)] => only.clone(),
            rest => format(rest),
        };
        meta = message.replace(Value::String(text));
    }

    // Rule 5
    let message_value = message.unwrap_or_else(|| Value::from(level.as_str()));

    let rule = match (&message_value, &meta) {
        (m, _) if payload_len == 1 && !m.is_string() && !m.is_error() => Rule::WrapLoneValue,
        _ if !structured_first && payload_len >= 3 => Rule::FormatAll,
        (Value::String(m), _) if !structured_first && payload_len == 2 && has_format_token(m) => {
            Rule::FormatTemplate
        }
        (Value::Error(_), Some(Value::Error(_))) => Rule::ErrorPair,
        (m, Some(Value::Error(_))) if !m.is_error() => Rule::ErrorMeta,
        (m, Some(mt)) if !m.is_error() && !mt.is_map() && *mt != Value::Null => Rule::FormatMeta,
        (m, _) if !m.is_error() && !m.is_string() => Rule::StringifyMessage,
        _ => Rule::Keep,
    };

    let mut message = Some(message_value);
    match rule {
        Rule::WrapLoneValue => {
            let mut wrapped = Meta::new();
            if let Some(value) = message.take() {
                wrapped.insert("message", value);
            }
            meta = Some(Value::Map(wrapped));
            message = Some(Value::from(level.as_str()));
        }
        Rule::FormatAll => {
            let (errs, parts) = split_errors(payload);
            errors.extend(errs);
            message = None;
            if !parts.is_empty() {
                message = Some(Value::String(format(&parts)));
                has_message = true;
            }
            meta = None;
        }
        Rule::FormatTemplate => {
            let template = message.take().unwrap_or(Value::Null);
            let arg = meta.take().unwrap_or(Value::Null);
            message = Some(Value::String(format(&[template, arg])));
        }
        Rule::ErrorPair => {
            if let Some(Value::Error(first)) = message.take() {
                errors.push(first);
            }
            if let Some(Value::Error(second)) = meta.take() {
                errors.push(second);
            }
            let (errs, parts) = split_errors(payload.into_iter().skip(2).collect());
            errors.extend(errs);
            if !parts.is_empty() {
                message = Some(Value::String(format(&parts)));
                has_message = true;
            }
        }
        Rule::ErrorMeta => {
            if let Some(Value::Error(err)) = meta.take() {
                errors.push(err);
            }
        }
        Rule::FormatMeta => {
            let text = message.take().unwrap_or(Value::Null);
            let arg = meta.take().unwrap_or(Value::Null);
            message = Some(Value::String(format(&[text, arg])));
        }
        Rule::StringifyMessage => {
            message = message.map(|m| Value::String(format(&[m])));
        }
        Rule::Keep => {}
    }

    let mut meta = match meta {
        None | Some(Value::Null) => Meta::new(),
        Some(Value::Map(m)) => m,
        Some(Value::Error(err)) => {
            errors.push(err);
            Meta::new()
        }
        Some(other) => {
            let mut wrapped = Meta::new();
            wrapped.insert("original_meta", other);
            wrapped
        }
    };

    let message = match message {
        Some(Value::Error(err)) => {
            errors.insert(0, err);
            None
        }
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(format(&[other])),
        None => None,
    };

    // A caller-supplied `err` field is kept as `original_err`.
    match meta.get_str("err").cloned() {
        Some(Value::Error(err)) => {
            meta.insert("original_err", err.to_plain());
            errors.push(err);
        }
        Some(Value::Map(plain)) => {
            meta.insert("original_err", plain);
        }
        _ => {}
    }

    ParsedArgs {
        level,
        message,
        meta,
        errors,
        modifier: head.modifier,
        has_message,
    }
}

fn split_errors(values: Vec<Value>) -> (Vec<LogError>, Vec<Value>) {
    let mut errors = Vec::new();
    let mut parts = Vec::new();
    for value in values {
        match value {
            Value::Error(err) => errors.push(err),
            other => parts.push(other),
        }
    }
    (errors, parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use axe_core::meta;

    fn err(message: &str) -> LogError {
        LogError::new(message).with_stack(format!("Error: {message}\n    at test"))
    }

    #[test]
    fn level_then_message() {
        let parsed = disambiguate(args!["warn", "disk low"]);
        assert_eq!(parsed.level, LogLevel::Warn);
        assert_eq!(parsed.modifier, Modifier::Named);
        assert_eq!(parsed.message.as_deref(), Some("disk low"));
        assert!(parsed.meta.is_empty());
        assert!(parsed.errors.is_empty());
    }

    #[test]
    fn alias_is_consumed_as_level() {
        let parsed = disambiguate(args!["warning", "x"]);
        assert_eq!(parsed.level, LogLevel::Warn);
        let parsed = disambiguate(args!["err", "x"]);
        assert_eq!(parsed.level, LogLevel::Error);
    }

    #[test]
    fn leading_error_implies_error_level() {
        let parsed = disambiguate(args![err("boom")]);
        assert_eq!(parsed.level, LogLevel::Error);
        assert_eq!(parsed.modifier, Modifier::Named);
        assert!(parsed.message.is_none());
        assert_eq!(parsed.errors.len(), 1);
    }

    #[test]
    fn unknown_first_argument_is_generic() {
        let parsed = disambiguate(args!["hello"]);
        assert_eq!(parsed.level, LogLevel::Info);
        assert_eq!(parsed.modifier, Modifier::Generic);
        assert_eq!(parsed.message.as_deref(), Some("hello"));
    }

    #[test]
    fn missing_message_defaults_to_level() {
        let parsed = disambiguate(args!["debug"]);
        assert_eq!(parsed.message.as_deref(), Some("debug"));
    }

    #[test]
    fn lone_object_becomes_meta_message() {
        let parsed = disambiguate(args!["info", meta! { "a" => 1 }]);
        assert_eq!(parsed.message.as_deref(), Some("info"));
        assert_eq!(
            parsed.meta,
            meta! { "message" => meta! { "a" => 1 } }
        );

        let parsed = disambiguate(args![42]);
        assert_eq!(parsed.message.as_deref(), Some("info"));
        assert_eq!(parsed.meta.get_str("message"), Some(&Value::Int(42)));
    }

    #[test]
    fn structured_first_swaps_roles() {
        let parsed = disambiguate(args!["info", meta! { "user" => 1 }, "logged in"]);
        assert_eq!(parsed.message.as_deref(), Some("logged in"));
        assert_eq!(parsed.meta, meta! { "user" => 1 });

        let parsed = disambiguate(args!["info", meta! { "user" => 1 }, "hi %s", "bob"]);
        assert_eq!(parsed.message.as_deref(), Some("hi bob"));
        assert_eq!(parsed.meta, meta! { "user" => 1 });
    }

    #[test]
    fn structured_first_array_is_formatted_in() {
        let arr = Value::Array(vec![Value::from(1)]);
        let parsed = disambiguate(args!["info", arr, "list"]);
        assert_eq!(parsed.message.as_deref(), Some("list [ 1 ]"));
        assert!(parsed.meta.is_empty());
    }

    #[test]
    fn scalar_meta_without_message_rule_is_wrapped() {
        let parsed = disambiguate(args![LogError::new("boom"), 5]);
        assert_eq!(parsed.meta.get_str("original_meta"), Some(&Value::Int(5)));
        assert_eq!(parsed.errors.len(), 1);
    }

    #[test]
    fn error_then_string_uses_string_as_message() {
        let parsed = disambiguate(args![err("boom"), "while saving"]);
        assert_eq!(parsed.level, LogLevel::Error);
        assert_eq!(parsed.message.as_deref(), Some("while saving"));
        assert_eq!(parsed.errors.len(), 1);
        assert!(parsed.meta.is_empty());
    }

    #[test]
    fn four_or_more_arguments_format_everything() {
        let parsed = disambiguate(args!["info", "a", "b", "c", "d"]);
        assert_eq!(parsed.message.as_deref(), Some("a b c d"));
        assert!(parsed.has_message);
        assert!(parsed.meta.is_empty());

        let parsed = disambiguate(args!["arg1", "arg2", "arg3", "arg4"]);
        assert_eq!(parsed.modifier, Modifier::Generic);
        assert_eq!(parsed.message.as_deref(), Some("arg1 arg2 arg3 arg4"));
    }

    #[test]
    fn format_all_collects_errors() {
        let parsed = disambiguate(args!["info", "failed", err("a"), "retrying", err("b")]);
        assert_eq!(parsed.message.as_deref(), Some("failed retrying"));
        assert_eq!(parsed.errors.len(), 2);
        assert!(parsed.meta.is_empty());
    }

    #[test]
    fn three_arguments_with_token_format_meta_in() {
        let parsed = disambiguate(args!["info", "hi %s", "bob"]);
        assert_eq!(parsed.message.as_deref(), Some("hi bob"));
        assert!(parsed.meta.is_empty());
        assert!(!parsed.has_message);
    }

    #[test]
    fn three_arguments_without_token_keep_map_meta() {
        let parsed = disambiguate(args!["info", "hello", meta! { "a" => 1 }]);
        assert_eq!(parsed.message.as_deref(), Some("hello"));
        assert_eq!(parsed.meta, meta! { "a" => 1 });
    }

    #[test]
    fn two_errors_are_both_collected() {
        let parsed = disambiguate(args![err("a"), err("b")]);
        assert_eq!(parsed.level, LogLevel::Error);
        assert!(parsed.message.is_none());
        let messages: Vec<_> = parsed.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["a", "b"]);
    }

    #[test]
    fn error_pair_with_extra_parts() {
        let parsed = disambiguate(args!["error", err("a"), err("b")]);
        assert_eq!(parsed.errors.len(), 2);
        assert!(parsed.message.is_none());
    }

    #[test]
    fn error_in_meta_position_is_collected() {
        let parsed = disambiguate(args!["error", "could not save", err("disk")]);
        assert_eq!(parsed.message.as_deref(), Some("could not save"));
        assert_eq!(parsed.errors.len(), 1);
        assert!(parsed.meta.is_empty());
    }

    #[test]
    fn scalar_meta_is_formatted_into_message() {
        let parsed = disambiguate(args!["info", "count", 3]);
        assert_eq!(parsed.message.as_deref(), Some("count 3"));
        assert!(parsed.meta.is_empty());

        let arr = Value::Array(vec![Value::from(1), Value::from(2), Value::from(3)]);
        let parsed = disambiguate(args!["info", "hello", arr]);
        assert_eq!(parsed.message.as_deref(), Some("hello [ 1, 2, 3 ]"));
    }

    #[test]
    fn non_string_message_is_stringified() {
        let parsed = disambiguate(args!["info", false, meta! { "a" => 1 }]);
        assert_eq!(parsed.message.as_deref(), Some("false"));
        assert_eq!(parsed.meta, meta! { "a" => 1 });
    }

    #[test]
    fn null_meta_is_empty() {
        let parsed = disambiguate(args!["info", "x", Value::Null]);
        assert!(parsed.meta.is_empty());
    }

    #[test]
    fn meta_err_is_preserved_as_original_err() {
        let inner = err("nested");
        let parsed = disambiguate(args!["info", "x", meta! { "err" => inner.clone() }]);
        assert_eq!(parsed.meta.get_str("original_err"), Some(&Value::Map(inner.to_plain())));
        assert_eq!(parsed.errors, vec![inner]);

        let parsed = disambiguate(args!["info", "x", meta! { "err" => meta! { "code" => 7 } }]);
        assert_eq!(
            parsed.meta.get_str("original_err"),
            Some(&Value::Map(meta! { "code" => 7 }))
        );
        assert!(parsed.errors.is_empty());
    }

    #[test]
    fn head_reads_without_consuming() {
        let head = Head::read(&args!["fatal", "x"]);
        assert_eq!(head.level, LogLevel::Fatal);
        let head = Head::read(&args![]);
        assert_eq!(head.modifier, Modifier::Generic);
        assert_eq!(head.level, LogLevel::Info);
    }
}
