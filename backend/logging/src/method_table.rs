//! Forwarding table from requested method to implemented method.

use axe_core::{AxeError, Method};

use crate::console::Console;

/// Fallback order tried for each requested method.
fn candidates(method: Method) -> &'static [Method] {
    match method {
        Method::Fatal => &[Method::Fatal, Method::Error, Method::Info, Method::Log],
        Method::Trace => &[Method::Trace, Method::Info, Method::Log],
        Method::Debug => &[Method::Debug, Method::Info, Method::Log],
        Method::Info => &[Method::Info, Method::Log],
        Method::Warn => &[Method::Warn, Method::Info, Method::Log],
        Method::Error => &[Method::Error, Method::Info, Method::Log],
        Method::Log => &[Method::Log, Method::Info],
    }
}

/// Resolved once per logger; every requested method maps to one the console
/// implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodTable {
    targets: [Method; 7],
}

impl MethodTable {
    /// Inspect `console` and build the table.
    ///
    /// Fails with `LoggerCapability` naming the first method that has no
    /// implemented fallback.
    pub fn from_console(console: &dyn Console) -> Result<Self, AxeError> {
        let mut targets = Method::ALL;
        for method in Method::ALL {
            let target = candidates(method)
                .iter()
                .copied()
                .find(|m| console.supports(*m))
                .ok_or_else(|| AxeError::LoggerCapability { method: method.to_string() })?;
            targets[method.index()] = target;
        }
        Ok(Self { targets })
    }

    pub fn resolve(&self, method: Method) -> Method {
        self.targets[method.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryConsole;

    #[test]
    fn full_console_maps_to_itself() {
        let table = MethodTable::from_console(&MemoryConsole::new()).unwrap();
        for m in Method::ALL {
            assert_eq!(table.resolve(m), m);
        }
    }

    #[test]
    fn fatal_falls_back_to_error_then_info() {
        let console = MemoryConsole::with_methods(&[Method::Error, Method::Info, Method::Log]);
        let table = MethodTable::from_console(&console).unwrap();
        assert_eq!(table.resolve(Method::Fatal), Method::Error);
        assert_eq!(table.resolve(Method::Trace), Method::Info);

        let console = MemoryConsole::with_methods(&[Method::Log]);
        let table = MethodTable::from_console(&console).unwrap();
        assert_eq!(table.resolve(Method::Fatal), Method::Log);
        assert_eq!(table.resolve(Method::Warn), Method::Log);
    }

    #[test]
    fn log_falls_back_to_info() {
        let console = MemoryConsole::with_methods(&[Method::Info]);
        let table = MethodTable::from_console(&console).unwrap();
        assert_eq!(table.resolve(Method::Log), Method::Info);
    }

    #[test]
    fn missing_everything_is_a_capability_error() {
        let console = MemoryConsole::with_methods(&[Method::Warn]);
        let err = MethodTable::from_console(&console).unwrap_err();
        assert!(matches!(err, AxeError::LoggerCapability { ref method } if method == "trace"));
        assert!(err.to_string().contains("must be a function"));
    }
}
