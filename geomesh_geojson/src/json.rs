//! Small helpers for reading typed values out of a `serde_json` tree.

use geomesh_core::{AttributeType, AttributeValue};
use serde_json::Value;

/// The JSON type of a value, as used in error messages.
pub fn json_type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

/// Converts `value` into an attribute of type `expected`, or `None` if the JSON type
/// does not fit. Numbers are never turned into strings or vice versa.
pub fn typed_value(expected: AttributeType, value: &Value) -> Option<AttributeValue> {
	match (expected, value) {
		(AttributeType::String, Value::String(s)) => Some(AttributeValue::String(s.clone())),
		(AttributeType::Boolean, Value::Bool(b)) => Some(AttributeValue::Boolean(*b)),
		(AttributeType::Double, Value::Number(n)) => n.as_f64().map(AttributeValue::Double),
		(AttributeType::Integer, Value::Number(n)) => n.as_i64().or_else(|| whole_number(n.as_f64()?)).map(AttributeValue::Integer),
		_ => None,
	}
}

// 3.0 counts as an integer, 3.5 and 1e300 do not.
fn whole_number(value: f64) -> Option<i64> {
	if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
		Some(value as i64)
	} else {
		None
	}
}

/// Reads the `type` member of an object, if there is one and it is a string.
pub fn type_tag(node: &Value) -> Option<&str> {
	node.get("type").and_then(Value::as_str)
}
