//! Options validation: collects every problem in one pass.

use thiserror::Error;

use axe_core::LogLevel;

use crate::schema::{FieldName, Options};

/// A validation finding with the option path it concerns.
#[derive(Debug, Error)]
#[error("Option error at '{path}': {message}")]
pub struct OptionsValidationError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<OptionsValidationError>,
    pub warnings: Vec<OptionsValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(OptionsValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(OptionsValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    /// All error messages joined, for a single configuration error.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Validate options and return a report of all errors and warnings.
///
/// Level names are checked again when the level set is built; here they only
/// produce a warning when both `level` and `levels` are given.
pub fn validate(options: &Options) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_levels(options, &mut report);
    validate_name(options, &mut report);
    validate_meta(options, &mut report);
    report
}

fn validate_levels(options: &Options, report: &mut ValidationReport) {
    if options.level.is_some() && options.levels.is_some() {
        report.warn("levels", "Both `level` and `levels` given; `level` takes precedence");
    }
    if let Some(level) = &options.level {
        if LogLevel::from_canonical(level).is_none() && LogLevel::resolve(level).is_some() {
            report.error("level", format!("Alias {level:?} is not accepted here"));
        }
    }
}

fn validate_name(options: &Options, report: &mut ValidationReport) {
    match &options.name {
        Some(FieldName::Name(name)) if name.trim().is_empty() => {
            report.error("name", "Name cannot be blank; use `false` for no name");
        }
        Some(FieldName::Disabled(true)) => {
            report.warn("name", "`name: true` has no meaning; treated as no name");
        }
        _ => {}
    }
}

fn validate_meta(options: &Options, report: &mut ValidationReport) {
    let meta = &options.meta;

    if let Some(remap) = &meta.remapped_fields {
        for (source, dest) in remap.iter() {
            if source.trim().is_empty() || dest.trim().is_empty() {
                report.error(
                    "meta.remappedFields",
                    format!("Remap {source:?} → {dest:?} has an empty side"),
                );
            } else if source == dest {
                report.warn("meta.remappedFields", format!("Remap of {source:?} onto itself"));
            }
        }
    }

    for (path, list) in [
        ("meta.omittedFields", &meta.omitted_fields),
        ("meta.pickedFields", &meta.picked_fields),
    ] {
        if list.iter().flatten().any(|f| f.trim().is_empty()) {
            report.warn(path, "Blank entries are ignored");
        }
    }

    for (path, field) in [("meta.hideHTTP", &meta.hide_http), ("meta.hideMeta", &meta.hide_meta)] {
        if matches!(field, Some(FieldName::Name(name)) if name.trim().is_empty()) {
            report.warn(path, "Blank field name disables the feature");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{MetaOptions, RemapFields};

    #[test]
    fn default_options_are_valid() {
        let report = validate(&Options::default());
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn blank_name_is_an_error() {
        let opts = Options { name: Some(FieldName::from("  ")), ..Default::default() };
        let report = validate(&opts);
        assert!(!report.is_valid());
        assert!(report.summary().contains("name"));
    }

    #[test]
    fn alias_level_is_an_error() {
        let opts = Options { level: Some("warning".into()), ..Default::default() };
        assert!(!validate(&opts).is_valid());
    }

    #[test]
    fn empty_remap_side_is_an_error() {
        let opts = Options {
            meta: MetaOptions {
                remapped_fields: Some(RemapFields::from_iter([("a", "")])),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(validate(&opts).errors.len(), 1);
    }

    #[test]
    fn level_and_levels_warns() {
        let opts = Options {
            level: Some("warn".into()),
            levels: Some(vec!["error".into(), "fatal".into()]),
            ..Default::default()
        };
        let report = validate(&opts);
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].path, "levels");
    }
}
