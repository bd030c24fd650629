//! Query string encoding and decoding for nested parameter maps
//!
//! Nested objects and arrays use bracket notation, so
//! `{"filter": {"page": 2}}` encodes to `filter%5Bpage%5D=2` and decodes back.

use serde_json::{Map, Value};

/// Render a scalar parameter the way it appears in a URL.
///
/// Booleans follow the form-encoding convention of `1` and `0`. Returns
/// `None` for null, objects and arrays.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some("0".to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Encode parameters as a query string, dropping null values
#[must_use]
pub fn build_query(params: &Map<String, Value>) -> String {
    let mut pairs = Vec::new();
    for (key, value) in sorted_entries(params) {
        append_pairs(&mut pairs, key.clone(), value);
    }

    pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn append_pairs(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (child, value) in sorted_entries(map) {
                append_pairs(pairs, format!("{key}[{child}]"), value);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                append_pairs(pairs, format!("{key}[{index}]"), value);
            }
        }
        scalar => {
            if let Some(rendered) = scalar_to_string(scalar) {
                pairs.push((key, rendered));
            }
        }
    }
}

/// Entries with numeric keys first, in numeric order, then the rest by key
fn sorted_entries(map: &Map<String, Value>) -> Vec<(&String, &Value)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|(a, _), (b, _)| index_order(a).cmp(&index_order(b)));
    entries
}

fn index_order(key: &str) -> Result<u64, &str> {
    key.parse::<u64>().map_err(|_| key)
}

/// Decode a raw query string into a parameter map.
///
/// Values stay strings. `a[b]=1` nests, and `a[]=1` appends under the next
/// numeric key. Later pairs win over earlier ones.
#[must_use]
pub fn parse_query(query: &str) -> Map<String, Value> {
    let mut params = Map::new();

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_component(raw_key);
        if key.is_empty() {
            continue;
        }
        let value = Value::String(decode_component(raw_value));
        insert_segments(&mut params, &split_key(&key), value);
    }

    params
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Split `a[b][c]` into `["a", "b", "c"]`; malformed keys stay whole
fn split_key(key: &str) -> Vec<String> {
    let Some(open) = key.find('[') else {
        return vec![key.to_string()];
    };
    if open == 0 {
        return vec![key.to_string()];
    }

    let mut segments = vec![key[..open].to_string()];
    let mut rest = &key[open..];
    while let Some(inner) = rest.strip_prefix('[') {
        let Some(end) = inner.find(']') else {
            return vec![key.to_string()];
        };
        segments.push(inner[..end].to_string());
        rest = &inner[end + 1..];
    }

    if rest.is_empty() {
        segments
    } else {
        vec![key.to_string()]
    }
}

fn insert_segments(map: &mut Map<String, Value>, segments: &[String], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    let key = if first.is_empty() {
        next_index(map).to_string()
    } else {
        first.clone()
    };

    if rest.is_empty() {
        map.insert(key, value);
        return;
    }

    let entry = map
        .entry(key)
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    if let Value::Object(child) = entry {
        insert_segments(child, rest, value);
    }
}

/// One past the highest numeric key, 0 when there is none
fn next_index(map: &Map<String, Value>) -> u64 {
    map.keys()
        .filter_map(|key| key.parse::<u64>().ok())
        .max()
        .map_or(0, |max| max.saturating_add(1))
}
