//! Report metadata extraction from the leading header block.
//!
//! A document may start with a `---` delimited key/value header. The header
//! is parsed as a YAML-like mapping into a [`JsonMap`]; every key passes
//! through to the report, known or not. Required-key enforcement happens in
//! the assembler, not here.

use serde_json::Value;

use super::JsonMap;

/// Extract the metadata header, if the document has one.
pub fn extract_metadata(content: &str) -> Option<JsonMap> {
    detect_header(content).map(parse_header)
}

/// Detect a leading `---` delimited header block and return its contents.
fn detect_header(content: &str) -> Option<&str> {
    let trimmed = content.trim_start();
    if trimmed.starts_with("---")
        && let Some(end) = trimmed[3..].find("\n---")
    {
        return Some(trimmed[3..3 + end].trim());
    }
    None
}

/// Parse a header block into a key/value mapping.
///
/// Supports `key: value` lines, flow lists (`[a, b]`), and block lists
/// (`- item` continuation lines under a bare `key:`).
fn parse_header(block: &str) -> JsonMap {
    let mut map = JsonMap::new();
    let mut lines = block.lines().peekable();

    while let Some(line) = lines.next() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_string();
        let value = value.trim();

        if value.is_empty() {
            // Bare key: collect a block list from the following lines
            let mut items = Vec::new();
            while let Some(next) = lines.peek() {
                let Some(item) = next.trim().strip_prefix("- ") else {
                    break;
                };
                items.push(Value::String(unquote(item.trim()).to_string()));
                lines.next();
            }
            let value = if items.is_empty() {
                Value::Null
            } else {
                Value::Array(items)
            };
            map.insert(key, value);
        } else if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
            let items = inner
                .split(',')
                .map(|item| unquote(item.trim()))
                .filter(|item| !item.is_empty())
                .map(|item| Value::String(item.to_string()))
                .collect();
            map.insert(key, Value::Array(items));
        } else {
            map.insert(key, parse_scalar(value));
        }
    }

    map
}

/// Parse a YAML-like scalar string to a JSON value
///
/// Supports:
/// - Booleans: `true`, `false`
/// - Null: `null`, `~`
/// - Numbers: `123`, `3.14`
/// - Comma lists: `a, b, c` -> `["a", "b", "c"]`
/// - Strings: everything else, surrounding quotes stripped
fn parse_scalar(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    if s.eq_ignore_ascii_case("null") || s == "~" {
        return Value::Null;
    }

    if let Ok(n) = s.parse::<i64>() {
        return Value::Number(n.into());
    }

    if let Ok(n) = s.parse::<f64>()
        && let Some(num) = serde_json::Number::from_f64(n)
    {
        return Value::Number(num);
    }

    if s.contains(',') {
        let arr: Vec<Value> = s
            .split(',')
            .map(|item| unquote(item.trim()))
            .filter(|item| !item.is_empty())
            .map(|item| Value::String(item.to_string()))
            .collect();
        return Value::Array(arr);
    }

    Value::String(unquote(s).to_string())
}

/// Strip matching surrounding quotes from a scalar.
fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}
