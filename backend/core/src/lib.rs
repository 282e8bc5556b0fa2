//! Core types for the axe logging front-end: levels, the value tree carried
//! through a call, dot-path addressing, printf formatting and the error
//! taxonomy.

pub mod error;
pub mod format;
pub mod level;
pub mod path;
pub mod record;
pub mod value;

pub use error::{aggregate, AxeError, LogError};
pub use format::{format, has_format_token, inspect, FORMAT_SPECIFIERS};
pub use level::{normalize_level, LevelSet, LogLevel, Method, Normalized};
pub use path::Path;
pub use record::LogRecord;
pub use value::{parse_bool, Key, Meta, Symbol, Value, SILENT_SYMBOL};
