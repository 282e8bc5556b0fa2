//! The dispatcher.
//!
//! One call runs synchronously from argument capture to the underlying
//! logger: disambiguate, aggregate errors, attach app info, shape metadata,
//! run pre-hooks, write. Post-hooks run from the returned [`Completion`].

use std::sync::Arc;

use axe_config::{Config, EnvOverrides, Options};
use axe_core::{
    aggregate, normalize_level, AxeError, Key, LogLevel, LogRecord, Meta, Method, Symbol, Value,
};
use axe_hooks::{HookChain, PostHook, PreHook};
use axe_logging::{Console, FieldShape, MethodTable};
use tracing::debug;

use crate::app_info::AppInfo;
use crate::args::{disambiguate, Args, Head, Modifier};
use crate::capture::HttpCapture;
use crate::completion::Completion;
use crate::reporter::ErrorReporter;
use crate::transform;

/// Logging front-end over an underlying [`Console`].
pub struct Axe {
    config: Config,
    console: Arc<dyn Console>,
    table: MethodTable,
    shape: FieldShape,
    hooks: HookChain,
    app_info: Option<AppInfo>,
}

/// Collects construction inputs for [`Axe`].
pub struct AxeBuilder {
    console: Arc<dyn Console>,
    options: Options,
    env: Option<EnvOverrides>,
    hooks: HookChain,
    app_info: Option<AppInfo>,
}

impl AxeBuilder {
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Use these environment values instead of the process environment.
    pub fn env(mut self, env: EnvOverrides) -> Self {
        self.env = Some(env);
        self
    }

    pub fn pre(mut self, filter: Option<Method>, hook: Arc<dyn PreHook>) -> Self {
        self.hooks.add_pre(filter, hook);
        self
    }

    pub fn post(mut self, filter: Option<Method>, hook: Arc<dyn PostHook>) -> Self {
        self.hooks.add_post(filter, hook);
        self
    }

    /// App info to attach when `appInfo` is enabled, instead of collecting it.
    pub fn app_info(mut self, info: AppInfo) -> Self {
        self.app_info = Some(info);
        self
    }

    pub fn build(self) -> Result<Axe, AxeError> {
        let env = self.env.unwrap_or_else(EnvOverrides::from_env);
        let config = Config::resolve(self.options, &env)?;
        let table = MethodTable::from_console(self.console.as_ref())?;
        let shape = self.console.shape();

        if let Some(name) = &config.name {
            self.console.set_name_field(shape.name_field(), name);
        }
        self.console
            .set_level_field(shape.level_field(), config.levels.threshold());

        let app_info = config
            .app_info
            .then(|| self.app_info.unwrap_or_else(|| AppInfo::collect(&env)));

        debug!(
            level = %config.levels.threshold(),
            name = config.name.as_deref().unwrap_or(""),
            level_field = shape.level_field(),
            "Logger constructed"
        );

        Ok(Axe {
            config,
            console: self.console,
            table,
            shape,
            hooks: self.hooks,
            app_info,
        })
    }
}

macro_rules! level_methods {
    ($($(#[$doc:meta])* $name:ident => $level:literal),+ $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $name(&self, args: Args) -> Completion {
                self.log(args.with_level($level))
            }
        )+
    };
}

impl Axe {
    pub fn builder(console: Arc<dyn Console>) -> AxeBuilder {
        AxeBuilder {
            console,
            options: Options::default(),
            env: None,
            hooks: HookChain::new(),
            app_info: None,
        }
    }

    /// Construct with `options` layered over the process environment.
    pub fn new(console: Arc<dyn Console>, options: Options) -> Result<Axe, AxeError> {
        Self::builder(console).options(options).build()
    }

    level_methods! {
        trace => "trace",
        debug => "debug",
        info => "info",
        warn => "warn",
        error => "error",
        fatal => "fatal",
        /// Alias of [`Axe::error`].
        err => "error",
        /// Alias of [`Axe::warn`].
        warning => "warn",
    }

    /// Log with loosely-typed arguments; see [`crate::args`].
    pub fn log(&self, args: Args) -> Completion {
        let head = Head::read(&args);
        if !self.config.levels.contains(head.level) {
            return Completion::skipped();
        }

        let parsed = disambiguate(args);
        let level = parsed.level;
        let mut meta = parsed.meta;

        let err = aggregate(parsed.errors);
        if let Some(e) = &err {
            meta.insert("err", e.to_plain());
        }
        let message = parsed
            .message
            .or_else(|| err.as_ref().map(|e| e.message.clone()))
            .unwrap_or_else(|| level.as_str().to_string());

        if let Some(app) = &self.app_info {
            meta.insert("app", app.to_meta());
        }

        let silent_key = Key::Symbol(Symbol::silent());
        let silenced_early = meta.is_affirmed(&silent_key);

        let meta = transform::apply(meta, &self.config.meta);

        let method = match parsed.modifier {
            Modifier::Generic => Method::Log,
            Modifier::Named => Method::from(level),
        };

        let record = LogRecord { method, level, message, err, meta };
        let record = self.hooks.run_pre(method, record);
        let silenced = silenced_early || record.meta.is_affirmed(&silent_key);

        if !self.config.silent && !silenced {
            self.write(&record, parsed.has_message);
        }

        Completion::new(self.hooks.post_for(method), method, record, self.error_reporter())
    }

    /// Build the final argument list and call the resolved method.
    fn write(&self, record: &LogRecord, has_message: bool) {
        let meta_config = &self.config.meta;
        let flagged = |field: &Option<String>| {
            field.as_deref().is_some_and(|f| record.meta.is_flagged(&Key::from(f)))
        };
        let meta_hidden = !meta_config.show || record.meta.is_empty();

        let mut args = Vec::with_capacity(3);
        match &record.err {
            Some(err) if self.config.show_stack => {
                if has_message || record.message != err.message {
                    args.push(Value::from(record.message.as_str()));
                }
                args.push(Value::Error(err.clone()));
                if !meta_hidden && !flagged(&meta_config.hide_meta) {
                    args.push(Value::Map(record.meta.clone()));
                }
            }
            _ => {
                args.push(Value::from(record.message.as_str()));
                if !meta_hidden
                    && !flagged(&meta_config.hide_meta)
                    && !flagged(&meta_config.hide_http)
                {
                    args.push(Value::Map(record.meta.clone()));
                }
            }
        }

        let target = self.table.resolve(record.method);
        debug!(method = %record.method, target = %target, args = args.len(), "Dispatching");
        self.console.write(target, &args);
    }

    /// Change the lowest active level. Aliases are rejected.
    pub fn set_level(&mut self, level: &str) -> Result<(), AxeError> {
        self.config.levels.set_level(level)?;
        self.console
            .set_level_field(self.shape.level_field(), self.config.levels.threshold());
        Ok(())
    }

    /// Map any input to a level; unknown input becomes `info`.
    pub fn get_normalized_level(&self, level: Option<&str>) -> LogLevel {
        normalize_level(level).level
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), AxeError> {
        if name.trim().is_empty() {
            return Err(AxeError::InvalidName("`name` must be a non-empty string".into()));
        }
        self.console.set_name_field(self.shape.name_field(), name);
        self.config.name = Some(name.to_string());
        Ok(())
    }

    /// Register a pre-hook for one method, or all with `None`.
    pub fn pre(&mut self, method: Option<Method>, hook: Arc<dyn PreHook>) {
        self.hooks.add_pre(method, hook);
    }

    /// Register a post-hook for one method, or all with `None`.
    pub fn post(&mut self, method: Option<Method>, hook: Arc<dyn PostHook>) {
        self.hooks.add_post(method, hook);
    }

    /// Register an [`HttpCapture`] post-hook for every method.
    pub fn capture(&mut self, endpoint: impl Into<String>) {
        let capture = HttpCapture::new(endpoint, self.error_reporter());
        self.post(None, Arc::new(capture));
    }

    /// Active levels, least severe first.
    pub fn levels(&self) -> &'static [LogLevel] {
        self.config.levels()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn shape(&self) -> FieldShape {
        self.shape
    }

    pub fn app_info(&self) -> Option<&AppInfo> {
        self.app_info.as_ref()
    }

    /// Reporter bound to this logger's resolved `error` method.
    pub fn error_reporter(&self) -> ErrorReporter {
        ErrorReporter::new(Arc::clone(&self.console), self.table.resolve(Method::Error))
    }
}

impl std::fmt::Debug for Axe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Axe")
            .field("config", &self.config)
            .field("shape", &self.shape)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

/// Metadata that silences the one call it is attached to.
pub fn silent_meta() -> Meta {
    let mut meta = Meta::new();
    meta.insert(Symbol::silent(), true);
    meta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use axe_core::LogError;
    use axe_logging::MemoryConsole;

    fn axe_with(options: Options) -> (Axe, Arc<MemoryConsole>) {
        let console = Arc::new(MemoryConsole::new());
        let options = Options { app_info: Some(false), ..options };
        let axe = Axe::builder(console.clone())
            .options(options)
            .env(EnvOverrides::default())
            .build()
            .unwrap();
        (axe, console)
    }

    #[test]
    fn construction_sets_level_field_and_name() {
        let console = Arc::new(MemoryConsole::new());
        let options = Options {
            name: Some("api".into()),
            level: Some("debug".into()),
            ..Default::default()
        };
        let axe = Axe::builder(console.clone())
            .options(options)
            .env(EnvOverrides::default())
            .build()
            .unwrap();
        assert_eq!(console.level_field(), Some(LogLevel::Debug));
        assert_eq!(console.name_field().as_deref(), Some("api"));
        assert_eq!(axe.config().name.as_deref(), Some("api"));
    }

    #[test]
    fn plain_message_is_the_only_argument() {
        let (axe, console) = axe_with(Options::default());
        let _ = axe.info(args!["hello"]);
        let call = console.last_call().unwrap();
        assert_eq!(call.method, Method::Info);
        assert_eq!(call.args, vec![Value::from("hello")]);
    }

    #[test]
    fn message_is_dropped_when_it_is_only_the_errors_own() {
        let (axe, console) = axe_with(Options::default());
        let _ = axe.log(args![LogError::new("boom")]);
        let call = console.last_call().unwrap();
        assert_eq!(call.method, Method::Error);
        assert!(call.args[0].is_error());
        assert_eq!(call.args.len(), 2);
        assert!(call.args[1].as_map().unwrap().get_str("err").is_some());
    }

    #[test]
    fn set_name_rejects_blank() {
        let (mut axe, console) = axe_with(Options::default());
        assert!(matches!(axe.set_name("  "), Err(AxeError::InvalidName(_))));
        axe.set_name("worker").unwrap();
        assert_eq!(console.name_field().as_deref(), Some("worker"));
    }

    #[test]
    fn normalized_level() {
        let (axe, _) = axe_with(Options::default());
        assert_eq!(axe.get_normalized_level(Some("warning")), LogLevel::Warn);
        assert_eq!(axe.get_normalized_level(Some("loud")), LogLevel::Info);
        assert_eq!(axe.get_normalized_level(None), LogLevel::Info);
    }

    #[test]
    fn capability_error_at_construction() {
        let console = Arc::new(MemoryConsole::with_methods(&[Method::Warn]));
        let result = Axe::builder(console).env(EnvOverrides::default()).build();
        assert!(matches!(result, Err(AxeError::LoggerCapability { .. })));
    }
}
