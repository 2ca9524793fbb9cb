use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One cafe record: an arbitrary JSON object in which only the `id` field
/// means anything to the service. `id` may be a number or a string; every
/// other field is opaque payload carried through unmodified.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cafe(pub Map<String, Value>);

impl Cafe {
    pub fn id(&self) -> Option<&Value> {
        self.0.get("id")
    }

    /// Whether the record carries a usable id: present and not falsy.
    pub fn has_usable_id(&self) -> bool {
        self.id().map(|v| !is_falsy(v)).unwrap_or(false)
    }

    /// Loose comparison of this record's id against another value.
    /// A record without an id matches nothing.
    pub fn matches_id(&self, other: &Value) -> bool {
        self.id().map(|v| loose_eq(v, other)).unwrap_or(false)
    }
}

/// Falsy in the ECMAScript sense, restricted to JSON values: `null`, `false`,
/// numeric zero and the empty string.
pub fn is_falsy(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !*b,
        Value::Number(n) => n.as_f64().map(|f| f == 0.0).unwrap_or(false),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Coercive scalar equality mirroring the `==` operator: strings compare
/// exactly against strings, everything else scalar goes through numeric
/// coercion (so `1` matches `"1"`, and `true` matches `1`). `null` only
/// matches `null`; arrays and objects never match.
///
/// Path parameters always arrive as strings, so this is what makes
/// `/cafes/1` find a record stored with a numeric id.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Array(_), _) | (_, Value::Array(_)) => false,
        (Value::Object(_), _) | (_, Value::Object(_)) => false,
        _ => match (as_number(a), as_number(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
    }
}

// Numeric coercion: numbers pass through, strings parse (blank strings
// coerce to zero, like Number("")), bools map to 0/1.
fn as_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() { Some(0.0) } else { t.parse::<f64>().ok() }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}
