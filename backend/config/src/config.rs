//! Resolved, immutable configuration.

use axe_core::{AxeError, LevelSet, LogLevel, Path};
use tracing::warn;

use crate::defaults::{
    default_name, DEFAULT_APP_INFO, DEFAULT_CLEANUP_REMAPPING, DEFAULT_HIDE_HTTP,
    DEFAULT_HIDE_META, DEFAULT_LEVEL, DEFAULT_SHOW_META, DEFAULT_SHOW_STACK, DEFAULT_SILENT,
};
use crate::env::EnvOverrides;
use crate::schema::{FieldName, Options, RemapFields};
use crate::validation::validate;

/// Settings a logger runs with. Only the level set and name change after
/// construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub show_stack: bool,
    pub silent: bool,
    pub name: Option<String>,
    pub levels: LevelSet,
    pub app_info: bool,
    pub meta: MetaConfig,
}

#[derive(Debug, Clone, Default)]
pub struct MetaConfig {
    pub show: bool,
    /// `(source, destination)` pairs in application order.
    pub remapped_fields: Vec<(Path, Path)>,
    pub omitted_fields: Vec<Path>,
    pub picked_fields: Vec<Path>,
    pub cleanup_remapping: bool,
    pub hide_http: Option<String>,
    pub hide_meta: Option<String>,
}

impl MetaConfig {
    /// Whether any remap, omit or pick rule is configured.
    pub fn has_rules(&self) -> bool {
        !self.remapped_fields.is_empty()
            || !self.omitted_fields.is_empty()
            || !self.picked_fields.is_empty()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_stack: DEFAULT_SHOW_STACK,
            silent: DEFAULT_SILENT,
            name: None,
            levels: LevelSet::default(),
            app_info: DEFAULT_APP_INFO,
            meta: MetaConfig {
                show: DEFAULT_SHOW_META,
                cleanup_remapping: DEFAULT_CLEANUP_REMAPPING,
                hide_http: Some(DEFAULT_HIDE_HTTP.to_string()),
                hide_meta: Some(DEFAULT_HIDE_META.to_string()),
                ..Default::default()
            },
        }
    }
}

impl Config {
    /// Layer defaults, then the environment, then `options`.
    pub fn resolve(options: Options, env: &EnvOverrides) -> Result<Config, AxeError> {
        let report = validate(&options);
        for warning in &report.warnings {
            warn!(path = %warning.path, message = %warning.message, "Logger option warning");
        }
        if !report.is_valid() {
            if report.errors.iter().any(|e| e.path == "name") {
                return Err(AxeError::InvalidName(report.summary()));
            }
            return Err(AxeError::Configuration(report.summary()));
        }

        let levels = match (&options.level, &options.levels) {
            (Some(level), _) => LevelSet::from_level(level)?,
            (None, Some(levels)) => LevelSet::from_levels(levels)?,
            (None, None) => LevelSet::from_level(DEFAULT_LEVEL)?,
        };

        let name = match options.name {
            None => default_name(env),
            Some(field) => field.into_option(),
        };

        let meta = options.meta;
        let remapped = meta.remapped_fields.or_else(|| env.remapped_fields()).unwrap_or_default();

        Ok(Config {
            show_stack: options.show_stack.or(env.show_stack()).unwrap_or(DEFAULT_SHOW_STACK),
            silent: options.silent.unwrap_or(DEFAULT_SILENT),
            name,
            levels,
            app_info: options.app_info.or(env.app_info()).unwrap_or(DEFAULT_APP_INFO),
            meta: MetaConfig {
                show: meta.show.or(env.show_meta()).unwrap_or(DEFAULT_SHOW_META),
                remapped_fields: remap_paths(&remapped),
                omitted_fields: field_paths(meta.omitted_fields.or_else(|| env.omitted_fields())),
                picked_fields: field_paths(meta.picked_fields.or_else(|| env.picked_fields())),
                cleanup_remapping: meta.cleanup_remapping.unwrap_or(DEFAULT_CLEANUP_REMAPPING),
                hide_http: hide_field(meta.hide_http, DEFAULT_HIDE_HTTP),
                hide_meta: hide_field(meta.hide_meta, DEFAULT_HIDE_META),
            },
        })
    }

    /// Active levels, least severe first.
    pub fn levels(&self) -> &'static [LogLevel] {
        self.levels.levels()
    }
}

fn remap_paths(remap: &RemapFields) -> Vec<(Path, Path)> {
    remap
        .iter()
        .map(|(source, dest)| (Path::parse(source), Path::parse(dest)))
        .filter(|(source, dest)| !source.is_empty() && !dest.is_empty())
        .collect()
}

fn field_paths(fields: Option<Vec<String>>) -> Vec<Path> {
    fields
        .unwrap_or_default()
        .iter()
        .map(|f| Path::parse(f.trim()))
        .filter(|p| !p.is_empty())
        .collect()
}

fn hide_field(field: Option<FieldName>, default: &str) -> Option<String> {
    match field {
        None => Some(default.to_string()),
        Some(field) => field.into_option().filter(|name| !name.trim().is_empty()),
    }
}
