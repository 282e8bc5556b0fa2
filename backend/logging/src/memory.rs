//! Recording console that keeps every call in memory.

use std::sync::{Mutex, MutexGuard, PoisonError};

use axe_core::{LogLevel, Meta, Method, Value};

use crate::console::{Console, FieldShape};

/// One recorded `write`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub args: Vec<Value>,
}

impl Call {
    /// The first argument as a string, if it is one.
    pub fn message(&self) -> Option<&str> {
        self.args.first().and_then(Value::as_str)
    }
}

#[derive(Debug)]
pub struct MemoryConsole {
    methods: Vec<Method>,
    shape: FieldShape,
    calls: Mutex<Vec<Call>>,
    fields: Mutex<Meta>,
}

impl Default for MemoryConsole {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryConsole {
    /// Console implementing every method.
    pub fn new() -> Self {
        Self::with_methods(&Method::ALL)
    }

    /// Console implementing only `methods`.
    pub fn with_methods(methods: &[Method]) -> Self {
        Self {
            methods: methods.to_vec(),
            shape: FieldShape::LevelName,
            calls: Mutex::new(Vec::new()),
            fields: Mutex::new(Meta::new()),
        }
    }

    pub fn with_shape(mut self, shape: FieldShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    /// Drain the recorded calls.
    pub fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut *lock(&self.calls))
    }

    pub fn last_call(&self) -> Option<Call> {
        lock(&self.calls).last().cloned()
    }

    /// Raw value stored under `field`.
    pub fn field(&self, field: &str) -> Option<Value> {
        lock(&self.fields).get_str(field).cloned()
    }

    /// Level stored under this console's level field.
    pub fn level_field(&self) -> Option<LogLevel> {
        self.field(self.shape.level_field())
            .and_then(|v| v.as_str().and_then(LogLevel::from_canonical))
    }

    /// Name stored under this console's name field.
    pub fn name_field(&self) -> Option<String> {
        self.field(self.shape.name_field())
            .and_then(|v| v.as_str().map(String::from))
    }
}

impl Console for MemoryConsole {
    fn supports(&self, method: Method) -> bool {
        self.methods.contains(&method)
    }

    fn write(&self, method: Method, args: &[Value]) {
        lock(&self.calls).push(Call { method, args: args.to_vec() });
    }

    fn shape(&self) -> FieldShape {
        self.shape
    }

    fn set_level_field(&self, field: &str, level: LogLevel) {
        lock(&self.fields).insert(field, level.as_str());
    }

    fn set_name_field(&self, field: &str, name: &str) {
        lock(&self.fields).insert(field, name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_in_order() {
        let console = MemoryConsole::new();
        console.write(Method::Info, &[Value::from("a")]);
        console.write(Method::Warn, &[Value::from("b"), Value::from(1)]);
        let calls = console.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].message(), Some("a"));
        assert_eq!(calls[1].method, Method::Warn);

        assert_eq!(console.take_calls().len(), 2);
        assert!(console.last_call().is_none());
    }

    #[test]
    fn tracks_fields() {
        let console = MemoryConsole::new().with_shape(FieldShape::LogLevelScope);
        console.set_level_field("logLevel", LogLevel::Warn);
        console.set_name_field("scope", "api");
        assert_eq!(console.level_field(), Some(LogLevel::Warn));
        assert_eq!(console.name_field().as_deref(), Some("api"));
        assert_eq!(console.field("scope"), Some(Value::from("api")));
        assert_eq!(console.field("name"), None);
    }
}
