//! Process information attached as `meta.app`.

use axe_config::EnvOverrides;
use axe_core::{Meta, Value};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    /// Minimum Rust toolchain the logger was built for.
    pub rust: String,
    pub hostname: String,
    pub pid: u32,
    /// `RUST_ENV`, or `development` when unset.
    pub environment: String,
}

impl AppInfo {
    /// Collect from the running process. The name is the executable's file
    /// stem and the version this crate's.
    pub fn collect(env: &EnvOverrides) -> Self {
        let name = std::env::current_exe()
            .ok()
            .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
        let hostname = env
            .hostname()
            .map(String::from)
            .or_else(|| hostname::get().ok().and_then(|h| h.into_string().ok()))
            .unwrap_or_default();
        Self {
            name,
            version: env!("CARGO_PKG_VERSION").to_string(),
            rust: env!("CARGO_PKG_RUST_VERSION").to_string(),
            hostname,
            pid: std::process::id(),
            environment: env
                .get(axe_config::env::RUNTIME_ENV_VAR)
                .filter(|e| !e.is_empty())
                .unwrap_or("development")
                .to_string(),
        }
    }

    /// Override the name and version with the host application's own.
    pub fn with_identity(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.name = name.into();
        self.version = version.into();
        self
    }

    pub fn to_meta(&self) -> Meta {
        let mut meta = Meta::new();
        meta.insert("name", self.name.as_str());
        meta.insert("version", self.version.as_str());
        meta.insert("rust", self.rust.as_str());
        meta.insert("hostname", self.hostname.as_str());
        meta.insert("pid", Value::from(self.pid));
        meta.insert("environment", self.environment.as_str());
        meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn collects_from_env() {
        let env = EnvOverrides::from_map(HashMap::from([
            ("HOSTNAME".to_string(), "web-1".to_string()),
            ("RUST_ENV".to_string(), "production".to_string()),
        ]));
        let info = AppInfo::collect(&env);
        assert_eq!(info.hostname, "web-1");
        assert_eq!(info.environment, "production");
        assert_eq!(info.pid, std::process::id());
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn meta_shape() {
        let info = AppInfo::collect(&EnvOverrides::default()).with_identity("billing", "2.1.0");
        let meta = info.to_meta();
        assert_eq!(meta.get_str("name"), Some(&Value::from("billing")));
        assert_eq!(meta.get_str("version"), Some(&Value::from("2.1.0")));
        assert_eq!(meta.get_str("environment"), Some(&Value::from("development")));
        assert_eq!(meta.len(), 6);
    }
}
