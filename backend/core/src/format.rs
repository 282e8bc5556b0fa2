//! printf-style message formatting.
//!
//! Recognized tokens: `%s %d %i %f %j %o %O %%`. Arguments left over after
//! the template is consumed are appended, space separated; strings verbatim,
//! everything else through [`inspect`].

use crate::value::{Key, Meta, Value};

pub const FORMAT_SPECIFIERS: [&str; 8] = ["%s", "%d", "%i", "%f", "%j", "%o", "%O", "%%"];

/// Whether `s` contains any recognized format token.
pub fn has_format_token(s: &str) -> bool {
    FORMAT_SPECIFIERS.iter().any(|t| s.contains(t))
}

/// Format `args` into one string.
pub fn format(args: &[Value]) -> String {
    let Some((first, rest)) = args.split_first() else {
        return String::new();
    };

    let (mut out, consumed) = match first {
        Value::String(template) => apply_template(template, rest),
        other => (inspect(other), 0),
    };

    for arg in &rest[consumed..] {
        out.push(' ');
        match arg {
            Value::String(s) => out.push_str(s),
            other => out.push_str(&inspect(other)),
        }
    }
    out
}

fn apply_template(template: &str, args: &[Value]) -> (String, usize) {
    let mut out = String::with_capacity(template.len());
    let mut next = 0;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let Some(&conv) = chars.peek() else {
            out.push('%');
            break;
        };
        if conv == '%' {
            chars.next();
            out.push('%');
            continue;
        }
        if !matches!(conv, 's' | 'd' | 'i' | 'f' | 'j' | 'o' | 'O') {
            out.push('%');
            continue;
        }
        chars.next();
        let Some(arg) = args.get(next) else {
            out.push('%');
            out.push(conv);
            continue;
        };
        next += 1;
        let rendered = match conv {
            's' => to_display(arg),
            'd' => number_repr(to_number(arg)),
            'i' => number_repr(to_integer(arg)),
            'f' => number_repr(to_float(arg)),
            'j' => serde_json::to_string(arg).unwrap_or_else(|_| "undefined".to_string()),
            _ => inspect(arg),
        };
        out.push_str(&rendered);
    }
    (out, next)
}

/// `%s` rendering: strings verbatim, errors by stack, structures inspected.
fn to_display(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Error(e) => e.stack.clone().unwrap_or_else(|| e.to_string()),
        other => inspect(other),
    }
}

fn to_number(v: &Value) -> f64 {
    match v {
        Value::Int(i) => *i as f64,
        Value::Float(f) => *f,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        Value::String(s) if s.trim().is_empty() => 0.0,
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn to_integer(v: &Value) -> f64 {
    match v {
        Value::Int(i) => *i as f64,
        Value::Float(f) => f.trunc(),
        Value::String(s) => leading_number(s, false).trunc(),
        _ => f64::NAN,
    }
}

fn to_float(v: &Value) -> f64 {
    match v {
        Value::Int(i) => *i as f64,
        Value::Float(f) => *f,
        Value::String(s) => leading_number(s, true),
        _ => f64::NAN,
    }
}

/// Longest numeric prefix of `s`, `NaN` when there is none.
fn leading_number(s: &str, allow_fraction: bool) -> f64 {
    let s = s.trim_start();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        let ok = c.is_ascii_digit()
            || (i == 0 && (c == '-' || c == '+'))
            || (allow_fraction && c == '.' && !seen_dot);
        if !ok {
            break;
        }
        seen_dot |= c == '.';
        end = i + c.len_utf8();
    }
    s[..end].parse().unwrap_or(f64::NAN)
}

fn number_repr(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Human-readable rendering of any value, `{ a: 1, b: 'x' }` style.
pub fn inspect(v: &Value) -> String {
    match v {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => number_repr(*f),
        Value::String(s) => format!("'{}'", s.replace('\'', "\\'")),
        Value::Symbol(sym) => sym.to_string(),
        Value::Error(e) => e.stack.clone().unwrap_or_else(|| format!("[{e}]")),
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(inspect_nested).collect();
            format!("[ {} ]", parts.join(", "))
        }
        Value::Map(m) => inspect_map(m),
    }
}

fn inspect_nested(v: &Value) -> String {
    match v {
        Value::Error(e) => format!("[{e}]"),
        other => inspect(other),
    }
}

fn inspect_map(m: &Meta) -> String {
    if m.is_empty() {
        return "{}".to_string();
    }
    let parts: Vec<String> = m
        .iter()
        .map(|(k, v)| format!("{}: {}", inspect_key(k), inspect_nested(v)))
        .collect();
    format!("{{ {} }}", parts.join(", "))
}

fn inspect_key(k: &Key) -> String {
    match k {
        Key::Symbol(sym) => format!("[{sym}]"),
        Key::Str(s) if is_identifier(s) => s.clone(),
        Key::Str(s) => format!("'{s}'"),
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
