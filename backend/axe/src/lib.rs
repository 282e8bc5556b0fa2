//! `axe` — a logging front-end.
//!
//! Wraps any underlying [`Console`] and turns loosely-typed log calls into a
//! canonical `(level, message, error, metadata)` record, shapes the metadata,
//! runs it through pre- and post-hooks, and forwards it.
//!
//! ```no_run
//! use std::sync::Arc;
//! use axe::{args, meta, Axe, Options, TracingConsole};
//!
//! # async fn demo() -> Result<(), axe::AxeError> {
//! let logger = Axe::new(Arc::new(TracingConsole::new()), Options::default())?;
//! logger.info(args!["user %s signed in", "ada"]).await;
//! logger.warn(args![meta! { "ms" => 930 }, "slow request"]).await;
//! # Ok(())
//! # }
//! ```

pub mod app_info;
pub mod args;
pub mod capture;
pub mod completion;
pub mod logger;
pub mod reporter;
pub mod transform;

pub use app_info::AppInfo;
pub use args::{disambiguate, Args, Modifier, ParsedArgs};
pub use capture::{CaptureDocument, HttpCapture};
pub use completion::Completion;
pub use logger::{silent_meta, Axe, AxeBuilder};
pub use reporter::ErrorReporter;

pub use axe_config::{load_options, Config, EnvOverrides, FieldName, MetaOptions, Options, RemapFields};
pub use axe_core::{meta, AxeError, Key, LogError, LogLevel, LogRecord, Meta, Method, Path, Symbol, Value};
pub use axe_hooks::{FnPostHook, PostHook, PreHook, RedactHook, TimestampHook, TraceHook};
pub use axe_logging::{Console, FieldShape, MemoryConsole, TracingConsole};
