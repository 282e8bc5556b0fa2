//! Built-in default values, the lowest layer of the override order.

use crate::env::EnvOverrides;

pub const DEFAULT_SHOW_STACK: bool = true;

pub const DEFAULT_SHOW_META: bool = true;

pub const DEFAULT_CLEANUP_REMAPPING: bool = true;

/// Meta field marking an HTTP request log.
pub const DEFAULT_HIDE_HTTP: &str = "is_http";

/// Meta field that hides metadata for one call.
pub const DEFAULT_HIDE_META: &str = "hide_meta";

pub const DEFAULT_SILENT: bool = false;

pub const DEFAULT_LEVEL: &str = "info";

/// Attach `meta.app` unless `AXE_APP_INFO` or `appInfo` turns it off.
pub const DEFAULT_APP_INFO: bool = true;

/// Default logger name: `HOSTNAME`, else the machine hostname.
///
/// Development runs (`RUST_ENV=development`) get no name.
pub fn default_name(env: &EnvOverrides) -> Option<String> {
    if env.is_development() {
        return None;
    }
    if let Some(host) = env.hostname() {
        return Some(host.to_string());
    }
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .filter(|h| !h.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn hostname_var_wins() {
        let env = EnvOverrides::from_map(HashMap::from([("HOSTNAME".to_string(), "web-1".to_string())]));
        assert_eq!(default_name(&env).as_deref(), Some("web-1"));
    }

    #[test]
    fn development_has_no_name() {
        let env = EnvOverrides::from_map(HashMap::from([
            ("HOSTNAME".to_string(), "web-1".to_string()),
            ("RUST_ENV".to_string(), "development".to_string()),
        ]));
        assert!(default_name(&env).is_none());
    }
}
