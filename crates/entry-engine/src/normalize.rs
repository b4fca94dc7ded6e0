//! Case folding for loaded JSON structures.
//!
//! Every key and every string value is lowercased so that rule matching is
//! case-insensitive by construction.  Only strings and mappings survive:
//! numbers, booleans, nulls and arrays nested inside a mapping are dropped.

use serde_json::{Map, Value};

/// Return a lowercased copy of `value`.
///
/// * Strings are lowercased.
/// * Mappings are rebuilt with lowercased keys; each member is normalized
///   recursively and members that are neither strings nor mappings are
///   dropped.
/// * Keys that differ only by case collapse to one entry. A key that is
///   already lowercase wins; otherwise the first surviving variant in key
///   order is kept.
/// * Any other top-level value normalizes to an empty mapping.
///
/// The input is never modified, and normalizing twice gives the same result
/// as normalizing once.
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.to_lowercase()),
        Value::Object(map) => Value::Object(normalize_map(map)),
        _ => Value::Object(Map::new()),
    }
}

fn normalize_map(map: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, member) in map {
        let member = match member {
            Value::String(s) => Value::String(s.to_lowercase()),
            Value::Object(inner) => Value::Object(normalize_map(inner)),
            _ => continue,
        };
        let folded = key.to_lowercase();
        if folded == *key {
            out.insert(folded, member);
        } else {
            out.entry(folded).or_insert(member);
        }
    }
    out
}
