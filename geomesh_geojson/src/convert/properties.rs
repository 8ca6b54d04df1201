use crate::json::{json_type_name, typed_value};
use geomesh_core::{AttributeRecord, AttributeSchema, AttributeValue, ColumnSource, ConversionError, Result};
use serde_json::Value;

/// Builds the attribute record of one feature from its `properties` member.
///
/// Declared properties are taken from the object when present with the declared type and
/// fall back to the column default when missing or `null`. A property of another JSON type
/// is an error. A missing or non-object `properties` member yields defaults and `{}`.
pub fn extract_properties(properties: Option<&Value>, schema: &AttributeSchema) -> Result<AttributeRecord> {
	let object = properties.and_then(Value::as_object);

	schema
		.columns()
		.iter()
		.map(|column| match &column.source {
			ColumnSource::Property { default } => {
				match object.and_then(|o| o.get(&column.name)) {
					None | Some(Value::Null) => Ok(default.clone()),
					Some(value) => typed_value(default.attribute_type(), value).ok_or_else(|| {
						ConversionError::PropertyTypeMismatch {
							name: column.name.clone(),
							expected: default.attribute_type(),
							found: json_type_name(value),
						}
					}),
				}
			}
			ColumnSource::SerializedProperties => Ok(AttributeValue::String(serialize_properties(properties))),
		})
		.collect::<Result<Vec<_>>>()
		.map(AttributeRecord)
}

/// Compact JSON text of a properties object, `{}` when there is none.
pub fn serialize_properties(properties: Option<&Value>) -> String {
	match properties {
		Some(value @ Value::Object(_)) => value.to_string(),
		_ => String::from("{}"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use geomesh_core::{AttributeColumn, AttributeType};
	use pretty_assertions::assert_eq;
	use rstest::rstest;
	use serde_json::json;

	fn schema() -> AttributeSchema {
		AttributeSchema::new(vec![
			AttributeColumn::property("name", AttributeValue::from("unnamed")),
			AttributeColumn::property("population", AttributeValue::from(-1)),
			AttributeColumn::property("area", AttributeValue::from(0.0)),
			AttributeColumn::property("capital", AttributeValue::from(false)),
		])
		.unwrap()
	}

	fn values(record: AttributeRecord) -> Vec<String> {
		record.0.iter().map(ToString::to_string).collect()
	}

	#[test]
	fn declared_string_property() {
		let schema = AttributeSchema::new(vec![AttributeColumn::property("name", AttributeValue::from(""))]).unwrap();
		let record = extract_properties(Some(&json!({"name": "X"})), &schema).unwrap();
		assert_eq!(record.0, vec![AttributeValue::from("X")]);
	}

	#[test]
	fn all_types_present() {
		let properties = json!({"name": "Nice", "population": 348085, "area": 71.92, "capital": true, "extra": [1]});
		let record = extract_properties(Some(&properties), &schema()).unwrap();
		assert_eq!(values(record), ["Nice", "348085", "71.92", "true"]);
	}

	#[rstest]
	#[case(Some(json!({})))]
	#[case(Some(json!({"name": null, "population": null})))]
	#[case(Some(json!(null)))]
	#[case(Some(json!([1, 2])))]
	#[case(None)]
	fn defaults_when_absent(#[case] properties: Option<Value>) {
		let record = extract_properties(properties.as_ref(), &schema()).unwrap();
		assert_eq!(record, schema().default_record());
	}

	#[rstest]
	#[case(json!({"name": 5}), "name", AttributeType::String, "number")]
	#[case(json!({"population": "many"}), "population", AttributeType::Integer, "string")]
	#[case(json!({"population": 2.5}), "population", AttributeType::Integer, "number")]
	#[case(json!({"area": "big"}), "area", AttributeType::Double, "string")]
	#[case(json!({"capital": "yes"}), "capital", AttributeType::Boolean, "string")]
	#[case(json!({"capital": {"really": true}}), "capital", AttributeType::Boolean, "object")]
	fn type_mismatch(
		#[case] properties: Value,
		#[case] name: &str,
		#[case] expected: AttributeType,
		#[case] found: &str,
	) {
		match extract_properties(Some(&properties), &schema()) {
			Err(ConversionError::PropertyTypeMismatch {
				name: n,
				expected: e,
				found: f,
			}) => {
				assert_eq!(n, name);
				assert_eq!(e, expected);
				assert_eq!(f, found);
			}
			other => panic!("unexpected result {other:?}"),
		}
	}

	#[test]
	fn serialized_properties_parse_back() {
		let schema = AttributeSchema::new(vec![
			AttributeColumn::property("name", AttributeValue::from("")),
			AttributeColumn::serialized_properties("props"),
		])
		.unwrap();
		let properties = json!({"name": "Nice", "tags": {"a": [1, 2.5, null]}, "ok": true});
		let record = extract_properties(Some(&properties), &schema).unwrap();

		assert_eq!(record.0[0], AttributeValue::from("Nice"));
		let text = record.0[1].as_str().unwrap();
		assert_eq!(serde_json::from_str::<Value>(text).unwrap(), properties);
	}

	#[rstest]
	#[case(None, "{}")]
	#[case(Some(json!(null)), "{}")]
	#[case(Some(json!("text")), "{}")]
	#[case(Some(json!({"b": 1, "a": "x"})), r#"{"a":"x","b":1}"#)]
	fn serialization(#[case] properties: Option<Value>, #[case] expected: &str) {
		assert_eq!(serialize_properties(properties.as_ref()), expected);
	}
}
