//! Per-cell attribute data: value types, the column schema and the record table.

use crate::{ConversionError, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt::Display};

/// The declared type of an attribute column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
	String,
	Integer,
	Double,
	Boolean,
}

impl AttributeType {
	/// The value used when a declaration does not name a default.
	pub fn zero_value(&self) -> AttributeValue {
		match self {
			AttributeType::String => AttributeValue::String(String::new()),
			AttributeType::Integer => AttributeValue::Integer(0),
			AttributeType::Double => AttributeValue::Double(0.0),
			AttributeType::Boolean => AttributeValue::Boolean(false),
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			AttributeType::String => "string",
			AttributeType::Integer => "integer",
			AttributeType::Double => "double",
			AttributeType::Boolean => "boolean",
		}
	}
}

impl Display for AttributeType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl std::str::FromStr for AttributeType {
	type Err = ConversionError;

	fn from_str(s: &str) -> Result<Self> {
		Ok(match s {
			"string" | "str" => AttributeType::String,
			"integer" | "int" => AttributeType::Integer,
			"double" | "number" => AttributeType::Double,
			"boolean" | "bool" => AttributeType::Boolean,
			_ => {
				return Err(ConversionError::InvalidConfiguration(format!(
					"unknown property type '{s}', expected one of: string, integer, double, boolean"
				)));
			}
		})
	}
}

/// A typed attribute value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
	String(String),
	Integer(i64),
	Double(f64),
	Boolean(bool),
}

impl AttributeValue {
	pub fn attribute_type(&self) -> AttributeType {
		match self {
			AttributeValue::String(_) => AttributeType::String,
			AttributeValue::Integer(_) => AttributeType::Integer,
			AttributeValue::Double(_) => AttributeType::Double,
			AttributeValue::Boolean(_) => AttributeType::Boolean,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			AttributeValue::String(v) => Some(v),
			_ => None,
		}
	}
}

impl Display for AttributeValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			AttributeValue::String(v) => f.write_str(v),
			AttributeValue::Integer(v) => write!(f, "{v}"),
			AttributeValue::Double(v) => write!(f, "{v}"),
			AttributeValue::Boolean(v) => write!(f, "{v}"),
		}
	}
}

impl From<&str> for AttributeValue {
	fn from(value: &str) -> Self {
		AttributeValue::String(value.to_string())
	}
}

impl From<String> for AttributeValue {
	fn from(value: String) -> Self {
		AttributeValue::String(value)
	}
}

impl From<i64> for AttributeValue {
	fn from(value: i64) -> Self {
		AttributeValue::Integer(value)
	}
}

impl From<i32> for AttributeValue {
	fn from(value: i32) -> Self {
		AttributeValue::Integer(i64::from(value))
	}
}

impl From<f64> for AttributeValue {
	fn from(value: f64) -> Self {
		AttributeValue::Double(value)
	}
}

impl From<bool> for AttributeValue {
	fn from(value: bool) -> Self {
		AttributeValue::Boolean(value)
	}
}

/// Where the values of a column come from.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ColumnSource {
	/// A named feature property, with the value used when a feature lacks it.
	Property { default: AttributeValue },
	/// The whole `properties` object, serialized to a JSON string.
	SerializedProperties,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttributeColumn {
	pub name: String,
	#[serde(flatten)]
	pub source: ColumnSource,
}

impl AttributeColumn {
	pub fn property(name: impl Into<String>, default: AttributeValue) -> Self {
		Self {
			name: name.into(),
			source: ColumnSource::Property { default },
		}
	}

	pub fn serialized_properties(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			source: ColumnSource::SerializedProperties,
		}
	}

	pub fn attribute_type(&self) -> AttributeType {
		match &self.source {
			ColumnSource::Property { default } => default.attribute_type(),
			ColumnSource::SerializedProperties => AttributeType::String,
		}
	}
}

/// The ordered list of attribute columns every record of a mesh follows.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AttributeSchema {
	columns: Vec<AttributeColumn>,
}

impl AttributeSchema {
	/// Builds a schema, rejecting empty or duplicate column names.
	pub fn new(columns: Vec<AttributeColumn>) -> Result<Self> {
		let mut names = HashSet::new();
		for column in &columns {
			if column.name.is_empty() {
				return Err(ConversionError::InvalidConfiguration(
					"attribute names must not be empty".to_string(),
				));
			}
			if !names.insert(column.name.as_str()) {
				return Err(ConversionError::InvalidConfiguration(format!(
					"attribute '{}' is declared more than once",
					column.name
				)));
			}
		}
		Ok(Self { columns })
	}

	pub fn columns(&self) -> &[AttributeColumn] {
		&self.columns
	}

	pub fn len(&self) -> usize {
		self.columns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.columns.is_empty()
	}

	pub fn position(&self, name: &str) -> Option<usize> {
		self.columns.iter().position(|c| c.name == name)
	}

	/// A record holding every column's default; the serialized column gets `{}`.
	pub fn default_record(&self) -> AttributeRecord {
		AttributeRecord(
			self
				.columns
				.iter()
				.map(|column| match &column.source {
					ColumnSource::Property { default } => default.clone(),
					ColumnSource::SerializedProperties => AttributeValue::from("{}"),
				})
				.collect(),
		)
	}
}

/// One value per schema column, in schema order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AttributeRecord(pub Vec<AttributeValue>);

/// Attribute records aligned 1:1 with the cells of a mesh.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AttributeTable {
	schema: AttributeSchema,
	records: Vec<AttributeRecord>,
}

impl AttributeTable {
	pub fn new(schema: AttributeSchema) -> Self {
		Self {
			schema,
			records: Vec::new(),
		}
	}

	pub fn schema(&self) -> &AttributeSchema {
		&self.schema
	}

	pub fn records(&self) -> &[AttributeRecord] {
		&self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Appends `count` copies of `record`.
	pub fn push_repeated(&mut self, record: &AttributeRecord, count: usize) {
		debug_assert_eq!(record.0.len(), self.schema.len());
		self.records.extend(std::iter::repeat_n(record, count).cloned());
	}

	pub fn truncate(&mut self, len: usize) {
		self.records.truncate(len);
	}

	/// All values of the named column, one per cell.
	pub fn column(&self, name: &str) -> Option<Vec<&AttributeValue>> {
		let index = self.schema.position(name)?;
		Some(self.records.iter().map(|r| &r.0[index]).collect())
	}
}
