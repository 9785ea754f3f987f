//! Decoding of the CRM's loosely-shaped response payloads.
//!
//! The server wraps records inconsistently: list endpoints return
//! `{"data": [...]}`, some return a single object under `data`, search
//! endpoints nest results under a type-named key (`{"people": [...]}`), and
//! a few return a bare record or nothing at all. Rather than probing shapes
//! ad hoc at every call site, the possibilities are enumerated here.

use serde_json::Value;

/// The shapes a response payload can take.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `{"data": [...]}`, the only shape that can continue a pagination run.
    DataList(Vec<Value>),
    /// `{"<type>": [...]}` for the caller-supplied type key.
    TypedList(Vec<Value>),
    /// A bare JSON array.
    List(Vec<Value>),
    /// A single record, bare or with a non-array `data` member.
    Single(Value),
    /// Null or an empty object.
    Empty,
}

impl Payload {
    /// Classify a response payload. `type_key` is consulted before `data`.
    pub fn decode(response: Value, type_key: Option<&str>) -> Self {
        match response {
            Value::Null => Payload::Empty,
            Value::Array(items) => Payload::List(items),
            Value::Object(mut map) => {
                if let Some(key) = type_key {
                    if matches!(map.get(key), Some(Value::Array(_))) {
                        if let Some(Value::Array(items)) = map.remove(key) {
                            return Payload::TypedList(items);
                        }
                    }
                }
                if matches!(map.get("data"), Some(Value::Array(_))) {
                    if let Some(Value::Array(items)) = map.remove("data") {
                        return Payload::DataList(items);
                    }
                }
                if map.is_empty() {
                    Payload::Empty
                } else {
                    Payload::Single(Value::Object(map))
                }
            }
            other => Payload::Single(other),
        }
    }

    /// Flatten into a list of records.
    pub fn into_items(self) -> Vec<Value> {
        match self {
            Payload::DataList(items) | Payload::TypedList(items) | Payload::List(items) => items,
            Payload::Single(value) => vec![value],
            Payload::Empty => Vec::new(),
        }
    }
}

/// Pagination extraction: an array-valued `data` member yields the page
/// items; anything else is the whole response as a zero- or one-item page.
///
/// Returns the items and whether `data` was an array; only that shape can
/// signal that more pages may follow.
pub fn page(response: Value) -> (Vec<Value>, bool) {
    match response {
        Value::Null => (Vec::new(), false),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => (items, true),
            Some(data) => {
                map.insert("data".to_string(), data);
                (vec![Value::Object(map)], false)
            }
            None if map.is_empty() => (Vec::new(), false),
            None => (vec![Value::Object(map)], false),
        },
        other => (vec![other], false),
    }
}
