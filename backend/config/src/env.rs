//! Environment overrides, read once at construction.
//!
//! | variable                   | shape                 |
//! |----------------------------|-----------------------|
//! | `AXE_SHOW_STACK`           | boolean               |
//! | `AXE_SHOW_META`            | boolean               |
//! | `AXE_APP_INFO`             | boolean               |
//! | `AXE_REMAPPED_META_FIELDS` | `a.b:c,d:e`           |
//! | `AXE_OMIT_META_FIELDS`     | `a,b.c`               |
//! | `AXE_PICK_META_FIELDS`     | `a,b.c`               |
//!
//! `HOSTNAME` and `RUST_ENV` feed the default logger name.

use std::collections::HashMap;

pub use axe_core::parse_bool;

use crate::schema::RemapFields;

pub const SHOW_STACK_VAR: &str = "AXE_SHOW_STACK";
pub const SHOW_META_VAR: &str = "AXE_SHOW_META";
pub const APP_INFO_VAR: &str = "AXE_APP_INFO";
pub const REMAPPED_FIELDS_VAR: &str = "AXE_REMAPPED_META_FIELDS";
pub const OMIT_FIELDS_VAR: &str = "AXE_OMIT_META_FIELDS";
pub const PICK_FIELDS_VAR: &str = "AXE_PICK_META_FIELDS";
pub const HOSTNAME_VAR: &str = "HOSTNAME";
pub const RUNTIME_ENV_VAR: &str = "RUST_ENV";

/// Snapshot of the variables that influence construction.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    vars: HashMap<String, String>,
}

impl EnvOverrides {
    /// Capture the relevant variables from the process environment.
    pub fn from_env() -> Self {
        let vars = std::env::vars()
            .filter(|(k, _)| k.starts_with("AXE_") || k == HOSTNAME_VAR || k == RUNTIME_ENV_VAR)
            .collect();
        Self { vars }
    }

    /// Use a provided map (useful for testing).
    pub fn from_map(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Boolean override; an empty variable counts as unset.
    fn flag(&self, name: &str) -> Option<bool> {
        self.get(name).filter(|v| !v.is_empty()).map(parse_bool)
    }

    pub fn show_stack(&self) -> Option<bool> {
        self.flag(SHOW_STACK_VAR)
    }

    pub fn show_meta(&self) -> Option<bool> {
        self.flag(SHOW_META_VAR)
    }

    pub fn app_info(&self) -> Option<bool> {
        self.flag(APP_INFO_VAR)
    }

    pub fn remapped_fields(&self) -> Option<RemapFields> {
        self.get(REMAPPED_FIELDS_VAR).map(parse_remap_pairs)
    }

    pub fn omitted_fields(&self) -> Option<Vec<String>> {
        self.get(OMIT_FIELDS_VAR).map(parse_list)
    }

    pub fn picked_fields(&self) -> Option<Vec<String>> {
        self.get(PICK_FIELDS_VAR).map(parse_list)
    }

    pub fn hostname(&self) -> Option<&str> {
        self.get(HOSTNAME_VAR).filter(|h| !h.is_empty())
    }

    pub fn is_development(&self) -> bool {
        self.get(RUNTIME_ENV_VAR) == Some("development")
    }
}


/// `a.b:c,d:e` → `[(a.b, c), (d, e)]`. Entries without a `:` are skipped.
pub fn parse_remap_pairs(raw: &str) -> RemapFields {
    raw.split(',')
        .filter_map(|pair| pair.split_once(':'))
        .map(|(source, dest)| (source.trim(), dest.trim()))
        .filter(|(source, dest)| !source.is_empty() && !dest.is_empty())
        .collect()
}

/// Comma list, trimmed, empties dropped.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
