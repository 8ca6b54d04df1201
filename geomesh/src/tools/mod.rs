pub mod convert;
pub mod probe;

use anyhow::{Context, Result};
use geomesh_geojson::{ConversionConfig, GeoJsonSource, PropertyDeclaration};
use std::path::PathBuf;

/// Input and conversion options shared by the subcommands.
#[derive(clap::Args, Debug)]
pub struct ConversionOptions {
	/// GeoJSON file, or the GeoJSON text itself when --string is set
	#[arg(required = true)]
	input: String,

	/// treat INPUT as GeoJSON text instead of a file name
	#[arg(long, display_order = 1)]
	string: bool,

	/// split filled polygons into triangles
	#[arg(long, short, display_order = 2)]
	triangulate: bool,

	/// emit polygon rings as closed polylines, takes precedence over --triangulate
	#[arg(long, display_order = 2)]
	outline: bool,

	/// add a string column holding each feature's properties as JSON
	#[arg(long, value_name = "NAME", display_order = 3)]
	serialized_properties: Option<String>,

	/// extract a feature property into a typed column,
	/// e.g. "population:integer=0" or "name:string"
	#[arg(long = "property", short, value_name = "NAME:TYPE[=DEFAULT]", verbatim_doc_comment, display_order = 3)]
	properties: Vec<PropertyDeclaration>,

	/// YAML configuration file, command line options are applied on top
	#[arg(long, short, value_name = "FILE", display_order = 4)]
	config: Option<PathBuf>,
}

impl ConversionOptions {
	pub fn source(&self) -> GeoJsonSource {
		GeoJsonSource::from_argument(&self.input, self.string)
	}

	pub fn config(&self) -> Result<ConversionConfig> {
		let mut config = match &self.config {
			Some(path) => ConversionConfig::from_path(path).context("loading configuration")?,
			None => ConversionConfig::new(),
		};
		if self.triangulate {
			config = config.with_triangulation(true);
		}
		if self.outline {
			config = config.with_outline(true);
		}
		if let Some(name) = &self.serialized_properties {
			config = config.with_serialized_properties(name.clone());
		}
		for declaration in &self.properties {
			config = config.with_feature_property(declaration.clone());
		}
		log::debug!("configuration:\n{config}");
		Ok(config)
	}
}
