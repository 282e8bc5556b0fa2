//! Metadata shaping: remap, then omit, then pick.

use axe_config::MetaConfig;
use axe_core::path::{self, Path};
use axe_core::{Meta, Value};

/// Apply every configured rule. Without rules `meta` comes back untouched.
pub fn apply(meta: Meta, config: &MetaConfig) -> Meta {
    if !config.has_rules() {
        return meta;
    }
    let meta = remap(meta, &config.remapped_fields, config.cleanup_remapping);
    let meta = omit(meta, &config.omitted_fields);
    pick(meta, &config.picked_fields)
}

/// Move each `source` value to `dest`. A missing source is skipped. With
/// `cleanup`, the source's immediate parent is removed once empty.
pub fn remap(mut meta: Meta, pairs: &[(Path, Path)], cleanup: bool) -> Meta {
    for (source, dest) in pairs {
        let Some(value) = path::unset(&mut meta, source) else {
            continue;
        };
        path::set(&mut meta, dest, value);
        if !cleanup {
            continue;
        }
        if let Some(parent) = source.parent() {
            if path::get(&meta, &parent).is_some_and(Value::is_empty) {
                path::unset(&mut meta, &parent);
            }
        }
    }
    meta
}

/// Drop every entry at, or nested under, an omitted path.
pub fn omit(meta: Meta, omitted: &[Path]) -> Meta {
    if omitted.is_empty() {
        return meta;
    }
    omit_under(meta, &Path::default(), omitted)
}

fn omit_under(meta: Meta, prefix: &Path, omitted: &[Path]) -> Meta {
    meta.into_iter()
        .filter_map(|(key, value)| {
            let here = prefix.child(key.clone());
            if omitted.iter().any(|o| here.len() == o.len() && here.starts_with(o)) {
                return None;
            }
            let value = match value {
                Value::Map(inner) => Value::Map(omit_under(inner, &here, omitted)),
                other => other,
            };
            Some((key, value))
        })
        .collect()
}

/// Keep only entries at, or nested under, a picked path. Ancestors survive
/// only while they still hold something picked; order is preserved.
pub fn pick(meta: Meta, picked: &[Path]) -> Meta {
    if picked.is_empty() {
        return meta;
    }
    pick_under(meta, &Path::default(), picked)
}

fn pick_under(meta: Meta, prefix: &Path, picked: &[Path]) -> Meta {
    meta.into_iter()
        .filter_map(|(key, value)| {
            let here = prefix.child(key.clone());
            if picked.iter().any(|p| here.starts_with(p)) {
                return Some((key, value));
            }
            let leads_to_pick = picked.iter().any(|p| p.starts_with(&here));
            match value {
                Value::Map(inner) if leads_to_pick => {
                    let kept = pick_under(inner, &here, picked);
                    (!kept.is_empty()).then_some((key, Value::Map(kept)))
                }
                _ => None,
            }
        })
        .collect()
}
