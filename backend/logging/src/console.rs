//! Underlying Logger Contract
//!
//! Anything exposing console-like methods can sit behind the front-end. The
//! front-end only ever calls the methods a [`Console`] says it supports.

use axe_core::{LogLevel, Method, Value};

/// Which pair of fields a logger keeps its level and name in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldShape {
    /// `level` and `name`
    #[default]
    LevelName,
    /// `logLevel` and `scope`
    LogLevelScope,
}

impl FieldShape {
    pub fn level_field(&self) -> &'static str {
        match self {
            FieldShape::LevelName => "level",
            FieldShape::LogLevelScope => "logLevel",
        }
    }

    pub fn name_field(&self) -> &'static str {
        match self {
            FieldShape::LevelName => "name",
            FieldShape::LogLevelScope => "scope",
        }
    }
}

/// An underlying logger.
///
/// `write` receives the final argument list: a message string, optionally an
/// error value, optionally a metadata map. Implementations use interior
/// mutability so one logger can be shared.
pub trait Console: Send + Sync {
    /// Whether `method` is implemented.
    fn supports(&self, method: Method) -> bool;

    fn write(&self, method: Method, args: &[Value]);

    /// Read once at construction.
    fn shape(&self) -> FieldShape {
        FieldShape::LevelName
    }

    /// Store the active threshold under `field`, one of
    /// [`FieldShape::level_field`].
    fn set_level_field(&self, _field: &str, _level: LogLevel) {}

    /// Store the logger name under `field`, one of [`FieldShape::name_field`].
    fn set_name_field(&self, _field: &str, _name: &str) {}
}
