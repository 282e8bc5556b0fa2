use std::sync::Arc;

use axe_core::{AxeError, LogError, Method, Value};
use axe_logging::Console;

/// Writes out-of-band failures straight to the underlying logger's `error`
/// method (or whatever the forwarding table resolved it to).
#[derive(Clone)]
pub struct ErrorReporter {
    console: Arc<dyn Console>,
    method: Method,
}

impl ErrorReporter {
    pub fn new(console: Arc<dyn Console>, method: Method) -> Self {
        Self { console, method }
    }

    pub fn report(&self, err: &AxeError) {
        self.console.write(self.method, &[Value::Error(LogError::from(err))]);
    }
}

impl std::fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorReporter").field("method", &self.method).finish()
    }
}
