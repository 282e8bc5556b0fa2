//! Dot-path addressing over nested [`Meta`] maps.
//!
//! A [`Path`] is an ordered list of key segments. Parsing a dotted string only
//! ever yields string segments; symbol segments are added explicitly.

use std::fmt;

use crate::value::{Key, Meta, Symbol, Value};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    segments: Vec<Key>,
}

impl Path {
    /// Split on `.`; empty segments are dropped.
    pub fn parse(dotted: &str) -> Self {
        Self {
            segments: dotted
                .split('.')
                .filter(|s| !s.is_empty())
                .map(Key::from)
                .collect(),
        }
    }

    pub fn from_segments(segments: Vec<Key>) -> Self {
        Self { segments }
    }

    pub fn symbol(sym: Symbol) -> Self {
        Self { segments: vec![Key::Symbol(sym)] }
    }

    pub fn segments(&self) -> &[Key] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn first(&self) -> Option<&Key> {
        self.segments.first()
    }

    /// Path with `key` appended.
    pub fn child(&self, key: Key) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key);
        Self { segments }
    }

    /// The immediate parent, or `None` for top-level and empty paths.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self { segments: self.segments[..self.segments.len() - 1].to_vec() })
    }

    /// Whether `self` equals `prefix` or is nested under it.
    ///
    /// Segments compare by description, so a symbol segment matches a string
    /// segment of the same text.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        prefix.segments.len() <= self.segments.len()
            && prefix
                .segments
                .iter()
                .zip(&self.segments)
                .all(|(p, s)| p.description() == s.description())
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(seg.description())?;
        }
        Ok(())
    }
}

pub fn get<'a>(meta: &'a Meta, path: &Path) -> Option<&'a Value> {
    let (last, parents) = path.segments.split_last()?;
    let mut current = meta;
    for seg in parents {
        current = current.get(seg)?.as_map()?;
    }
    current.get(last)
}

/// Set `value` at `path`, creating intermediate maps. A non-map value in the
/// way is replaced by a map.
pub fn set(meta: &mut Meta, path: &Path, value: Value) {
    let Some((last, parents)) = path.segments.split_last() else {
        return;
    };
    let mut current = meta;
    for seg in parents {
        let is_map = current.get(seg).is_some_and(Value::is_map);
        if !is_map {
            current.insert(seg.clone(), Meta::new());
        }
        current = match current.get_mut(seg).and_then(Value::as_map_mut) {
            Some(next) => next,
            None => return,
        };
    }
    current.insert(last.clone(), value);
}

/// Remove and return the value at `path`.
pub fn unset(meta: &mut Meta, path: &Path) -> Option<Value> {
    let (last, parents) = path.segments.split_last()?;
    let mut current = meta;
    for seg in parents {
        current = current.get_mut(seg)?.as_map_mut()?;
    }
    current.remove(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta;

    #[test]
    fn test_get_nested() {
        let m = meta! { "a" => meta! { "b" => 1 } };
        assert_eq!(get(&m, &Path::parse("a.b")), Some(&Value::Int(1)));
        assert_eq!(get(&m, &Path::parse("a.c")), None);
        assert_eq!(get(&m, &Path::parse("a.b.c")), None);
    }

    #[test]
    fn test_set_creates_and_replaces_intermediates() {
        let mut m = meta! { "a" => "scalar" };
        set(&mut m, &Path::parse("a.b.c"), Value::from(true));
        assert_eq!(get(&m, &Path::parse("a.b.c")), Some(&Value::Bool(true)));

        set(&mut m, &Path::parse("x"), Value::from(2));
        assert_eq!(m.get_str("x"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_unset_leaves_parent() {
        let mut m = meta! { "a" => meta! { "b" => 1 } };
        assert_eq!(unset(&mut m, &Path::parse("a.b")), Some(Value::Int(1)));
        assert_eq!(m.get_str("a"), Some(&Value::Map(Meta::new())));
        assert_eq!(unset(&mut m, &Path::parse("nope.deeper")), None);
    }

    #[test]
    fn test_symbol_segments() {
        let sym = Symbol::for_key("req");
        let mut m = Meta::new();
        let path = Path::symbol(sym.clone()).child(Key::from("id"));
        set(&mut m, &path, Value::from(9));
        assert_eq!(get(&m, &path), Some(&Value::Int(9)));
        // dotted parsing never reaches a symbol key
        assert_eq!(get(&m, &Path::parse("req.id")), None);
    }

    #[test]
    fn test_starts_with_matches_by_description() {
        let p = Path::symbol(Symbol::for_key("x")).child(Key::from("y"));
        assert!(p.starts_with(&Path::parse("x")));
        assert!(p.starts_with(&Path::parse("x.y")));
        assert!(!p.starts_with(&Path::parse("x.y.z")));
        assert!(!Path::parse("xy").starts_with(&Path::parse("x")));
    }
}
