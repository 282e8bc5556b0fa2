//! Construction options schema.
//!
//! Every field is optional; unset fields fall back to the environment and then
//! to the defaults in [`crate::defaults`]. Typed for serde YAML/JSON.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Root options accepted when constructing a logger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Pass errors themselves (not just their message) to the underlying logger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_stack: Option<bool>,

    /// Metadata shaping
    #[serde(default)]
    pub meta: MetaOptions,

    /// Suppress every underlying call (hooks still run)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub silent: Option<bool>,

    /// Logger name, or `false` for none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<FieldName>,

    /// Lowest active level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Active levels; must be a contiguous suffix of the level order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<String>>,

    /// Attach `meta.app` process information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_info: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaOptions {
    /// Pass metadata to the underlying logger at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,

    /// `source.path → dest.path` moves, applied in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remapped_fields: Option<RemapFields>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omitted_fields: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picked_fields: Option<Vec<String>>,

    /// Drop a remapped source's parent once it is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleanup_remapping: Option<bool>,

    /// Meta field that, when truthy, hides metadata for HTTP request logs
    #[serde(rename = "hideHTTP", default, skip_serializing_if = "Option::is_none")]
    pub hide_http: Option<FieldName>,

    /// Meta field that, when truthy, hides metadata for that call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_meta: Option<FieldName>,
}

/// A string, or `false` to switch the feature off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldName {
    Name(String),
    Disabled(bool),
}

impl FieldName {
    pub fn into_option(self) -> Option<String> {
        match self {
            FieldName::Name(name) => Some(name),
            FieldName::Disabled(_) => None,
        }
    }
}

impl From<&str> for FieldName {
    fn from(s: &str) -> Self {
        FieldName::Name(s.to_string())
    }
}

/// Ordered remap pairs. Serialized as a map; order of appearance is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemapFields(pub Vec<(String, String)>);

impl RemapFields {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(s, d)| (s.as_str(), d.as_str()))
    }
}

impl<S: Into<String>, D: Into<String>> FromIterator<(S, D)> for RemapFields {
    fn from_iter<I: IntoIterator<Item = (S, D)>>(iter: I) -> Self {
        RemapFields(iter.into_iter().map(|(s, d)| (s.into(), d.into())).collect())
    }
}

impl Serialize for RemapFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (source, dest) in &self.0 {
            map.serialize_entry(source, dest)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RemapFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = RemapFields;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of source paths to destination paths")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::new();
                while let Some((source, dest)) = access.next_entry::<String, String>()? {
                    pairs.push((source, dest));
                }
                Ok(RemapFields(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_yaml() {
        let yaml = r#"
showStack: false
level: warn
name: false
meta:
  hideHTTP: false
  hideMeta: quiet
  omittedFields: [req.headers]
  remappedFields:
    a.b: c
    x: y.z
"#;
        let opts: Options = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(opts.show_stack, Some(false));
        assert_eq!(opts.level.as_deref(), Some("warn"));
        assert_eq!(opts.name, Some(FieldName::Disabled(false)));
        assert_eq!(opts.meta.hide_http, Some(FieldName::Disabled(false)));
        assert_eq!(opts.meta.hide_meta, Some(FieldName::Name("quiet".into())));
        let remap = opts.meta.remapped_fields.unwrap();
        assert_eq!(
            remap.iter().collect::<Vec<_>>(),
            vec![("a.b", "c"), ("x", "y.z")]
        );
    }

    #[test]
    fn empty_document_is_all_unset() {
        let opts: Options = serde_json::from_str("{}").unwrap();
        assert!(opts.show_stack.is_none());
        assert!(opts.meta.show.is_none());
        assert!(opts.levels.is_none());
    }
}
