use crate::json::{json_type_name, typed_value};
use geomesh_core::{AttributeType, AttributeValue, ConversionError};
use serde::Deserialize;
use std::{fmt::Display, str::FromStr};

/// A feature property to extract as a typed attribute column.
///
/// The default value carries the column type: a feature without the property, or with
/// `null` in it, gets the default.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawPropertyDeclaration")]
pub struct PropertyDeclaration {
	pub name: String,
	pub default: AttributeValue,
}

impl PropertyDeclaration {
	pub fn new(name: impl Into<String>, default: impl Into<AttributeValue>) -> Self {
		Self {
			name: name.into(),
			default: default.into(),
		}
	}

	/// A declaration whose default is the zero value of `attribute_type`.
	pub fn of_type(name: impl Into<String>, attribute_type: AttributeType) -> Self {
		Self {
			name: name.into(),
			default: attribute_type.zero_value(),
		}
	}

	pub fn attribute_type(&self) -> AttributeType {
		self.default.attribute_type()
	}
}

impl Display for PropertyDeclaration {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}={}", self.name, self.attribute_type(), self.default)
	}
}

/// Parses `NAME:TYPE` or `NAME:TYPE=DEFAULT`, e.g. `population:integer=0`.
impl FromStr for PropertyDeclaration {
	type Err = ConversionError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let invalid = |reason: String| ConversionError::InvalidConfiguration(format!("property '{s}': {reason}"));

		let (name, rest) = s
			.split_once(':')
			.ok_or_else(|| invalid("expected NAME:TYPE[=DEFAULT]".to_string()))?;
		let (type_name, default) = match rest.split_once('=') {
			Some((t, d)) => (t, Some(d)),
			None => (rest, None),
		};
		let attribute_type = AttributeType::from_str(type_name.trim())?;

		let default = match default {
			None => attribute_type.zero_value(),
			Some(text) => match attribute_type {
				AttributeType::String => AttributeValue::from(text),
				AttributeType::Integer => AttributeValue::Integer(
					text.trim().parse().map_err(|_| invalid(format!("'{text}' is not an integer")))?,
				),
				AttributeType::Double => AttributeValue::Double(
					text.trim().parse().map_err(|_| invalid(format!("'{text}' is not a number")))?,
				),
				AttributeType::Boolean => AttributeValue::Boolean(
					text.trim().parse().map_err(|_| invalid(format!("'{text}' is not a boolean")))?,
				),
			},
		};

		Ok(Self::new(name.trim(), default))
	}
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPropertyDeclaration {
	name: String,
	#[serde(rename = "type")]
	attribute_type: AttributeType,
	#[serde(default)]
	default: Option<serde_json::Value>,
}

impl TryFrom<RawPropertyDeclaration> for PropertyDeclaration {
	type Error = ConversionError;

	fn try_from(raw: RawPropertyDeclaration) -> Result<Self, Self::Error> {
		let default = match raw.default {
			None | Some(serde_json::Value::Null) => raw.attribute_type.zero_value(),
			Some(value) => typed_value(raw.attribute_type, &value).ok_or_else(|| {
				ConversionError::InvalidConfiguration(format!(
					"default of property '{}' must be of type {}, but is a {}",
					raw.name,
					raw.attribute_type,
					json_type_name(&value)
				))
			})?,
		};
		Ok(Self {
			name: raw.name,
			default,
		})
	}
}
