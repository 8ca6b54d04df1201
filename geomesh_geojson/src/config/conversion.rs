use super::PropertyDeclaration;
use anyhow::{Context, Result};
use geomesh_core::{AttributeColumn, AttributeSchema, ConversionError};
use serde::Deserialize;
use std::{
	fmt::Display,
	fs::File,
	io::{BufReader, Read},
	path::Path,
};

/// Options fixed before a conversion run.
///
/// ```yaml
/// triangulate_polygons: true
/// serialized_properties_array_name: props
/// feature_properties:
///   - name: name
///     type: string
///     default: unnamed
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionConfig {
	/// Replace every filled polygon by triangles.
	#[serde(default)]
	pub triangulate_polygons: bool,

	/// Emit one closed polyline per polygon ring instead of filled polygons.
	/// Takes precedence over `triangulate_polygons`.
	#[serde(default)]
	pub outline_polygons: bool,

	/// Name of a string column receiving each feature's serialized `properties` object.
	#[serde(default)]
	pub serialized_properties_array_name: Option<String>,

	/// Feature properties extracted as typed columns, in column order.
	#[serde(default)]
	pub feature_properties: Vec<PropertyDeclaration>,
}

impl ConversionConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_triangulation(mut self, triangulate: bool) -> Self {
		self.triangulate_polygons = triangulate;
		self
	}

	pub fn with_outline(mut self, outline: bool) -> Self {
		self.outline_polygons = outline;
		self
	}

	pub fn with_serialized_properties(mut self, name: impl Into<String>) -> Self {
		self.serialized_properties_array_name = Some(name.into());
		self
	}

	pub fn with_feature_property(mut self, declaration: PropertyDeclaration) -> Self {
		self.feature_properties.push(declaration);
		self
	}

	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		Ok(serde_yaml_ng::from_reader(reader)?)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(text)?)
	}

	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("opening config file {path:?}"))?;
		Self::from_reader(BufReader::new(file)).with_context(|| format!("parsing config file {path:?}"))
	}

	/// Whether polygons end up as triangles once outlining has been taken into account.
	pub fn triangulates(&self) -> bool {
		self.triangulate_polygons && !self.outline_polygons
	}

	/// Resolves the declarations into the attribute columns of the output mesh.
	///
	/// Typed properties come first, in declaration order, followed by the serialized
	/// properties column. Returns `None` when no attributes are requested.
	pub fn schema(&self) -> Result<Option<AttributeSchema>, ConversionError> {
		let mut columns: Vec<AttributeColumn> = self
			.feature_properties
			.iter()
			.map(|d| AttributeColumn::property(d.name.clone(), d.default.clone()))
			.collect();
		if let Some(name) = &self.serialized_properties_array_name {
			columns.push(AttributeColumn::serialized_properties(name.clone()));
		}
		if columns.is_empty() {
			return Ok(None);
		}
		AttributeSchema::new(columns).map(Some)
	}
}

impl Display for ConversionConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		writeln!(f, "triangulate polygons: {}", self.triangulate_polygons)?;
		writeln!(f, "outline polygons: {}", self.outline_polygons)?;
		writeln!(
			f,
			"serialized properties array: {}",
			self.serialized_properties_array_name.as_deref().unwrap_or("(none)")
		)?;
		write!(f, "feature properties:")?;
		if self.feature_properties.is_empty() {
			write!(f, " (none)")?;
		}
		for declaration in &self.feature_properties {
			write!(f, "\n  {declaration}")?;
		}
		Ok(())
	}
}
