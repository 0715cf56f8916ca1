//! Request/response body classification for log rows.
//!
//! A captured body lands in exactly one of two columns: a JSONB column when
//! it is structurally JSON, or a TEXT column when it is opaque text. Strings
//! that happen to contain a JSON object or array are parsed and stored as
//! structured JSON; every other string is kept verbatim.
//!
//! PostgreSQL accepts U+0000 in neither TEXT nor JSONB. Text containing it is
//! stored with each NUL written as the six characters `\u0000`, and JSON
//! containing it moves to the text slot as its compact serialization, where
//! serde_json already writes NUL that way.

use serde_json::Value;

/// The two mutually exclusive storage slots for a captured body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedPayload {
    /// Compact JSON text, destined for a JSONB column.
    pub json: Option<String>,
    /// Verbatim text, destined for a TEXT column.
    pub text: Option<String>,
}

impl ClassifiedPayload {
    fn structured(json: String) -> Self {
        Self {
            json: Some(json),
            text: None,
        }
    }

    fn opaque(text: String) -> Self {
        Self {
            json: None,
            text: Some(text),
        }
    }
}

/// Classify a body value into its storage slot.
///
/// - absent or `null` -> both slots empty
/// - object, array, number, boolean -> compact JSON
/// - string parsing into an object or array -> the re-serialized parse
/// - any other string -> the original string as text
///
/// NUL characters never reach either slot raw; see the module docs.
pub fn classify(value: Option<&Value>) -> ClassifiedPayload {
    match value {
        None | Some(Value::Null) => ClassifiedPayload::default(),
        Some(Value::String(s)) => classify_str(s),
        Some(other) => structured_or_escaped(other),
    }
}

fn classify_str(s: &str) -> ClassifiedPayload {
    match serde_json::from_str::<Value>(s) {
        Ok(parsed @ (Value::Object(_) | Value::Array(_))) => structured_or_escaped(&parsed),
        // Scalars and parse failures both stay text.
        _ => ClassifiedPayload::opaque(escape_nul(s)),
    }
}

fn structured_or_escaped(value: &Value) -> ClassifiedPayload {
    if contains_nul(value) {
        ClassifiedPayload::opaque(value.to_string())
    } else {
        ClassifiedPayload::structured(value.to_string())
    }
}

/// True if any string or object key in the tree holds U+0000.
fn contains_nul(value: &Value) -> bool {
    match value {
        Value::String(s) => s.contains('\0'),
        Value::Array(items) => items.iter().any(contains_nul),
        Value::Object(map) => map.iter().any(|(k, v)| k.contains('\0') || contains_nul(v)),
        _ => false,
    }
}

fn escape_nul(s: &str) -> String {
    if s.contains('\0') {
        s.replace('\0', "\\u0000")
    } else {
        s.to_owned()
    }
}
