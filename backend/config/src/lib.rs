//! `axe-config` — logger construction options.
//!
//! Provides:
//! - Typed options schema (camelCase, YAML/JSON)
//! - Default values
//! - `AXE_*` environment overrides
//! - Options validation
//! - Options file loading
//! - The resolved immutable [`Config`]

pub mod config;
pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use config::{Config, MetaConfig};
pub use env::EnvOverrides;
pub use io::load_options;
pub use schema::{FieldName, MetaOptions, Options, RemapFields};
pub use validation::{validate, OptionsValidationError, ValidationReport};
