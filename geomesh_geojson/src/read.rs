use crate::{Conversion, ConversionConfig, convert};
use anyhow::{Context, Result, bail};
use geomesh_core::ConversionError;
use serde_json::Value;
use std::{
	fmt::Display,
	fs::File,
	io::{BufReader, Read},
	path::PathBuf,
};

/// Where a GeoJSON document comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeoJsonSource {
	File(PathBuf),
	String(String),
}

impl GeoJsonSource {
	/// Interprets a command line argument either as a path or as the document itself.
	pub fn from_argument(argument: &str, is_string: bool) -> Self {
		if is_string {
			GeoJsonSource::String(argument.to_string())
		} else {
			GeoJsonSource::File(PathBuf::from(argument))
		}
	}

	/// Reads and parses the document.
	pub fn load(&self) -> Result<Value> {
		match self {
			GeoJsonSource::File(path) => {
				if !path.exists() {
					bail!("GeoJSON file {path:?} does not exist");
				}
				let file = File::open(path).with_context(|| format!("opening GeoJSON file {path:?}"))?;
				read_geojson(BufReader::new(file)).with_context(|| format!("reading GeoJSON file {path:?}"))
			}
			GeoJsonSource::String(text) => Ok(parse_geojson_str(text)?),
		}
	}

	/// Loads the document and converts it.
	pub fn convert(&self, config: &ConversionConfig) -> Result<Conversion> {
		let root = self.load()?;
		convert(&root, config).with_context(|| format!("converting {self}"))
	}
}

impl Display for GeoJsonSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			GeoJsonSource::File(path) => write!(f, "file {path:?}"),
			GeoJsonSource::String(text) => write!(f, "string of {} bytes", text.len()),
		}
	}
}

pub fn parse_geojson_str(text: &str) -> Result<Value, ConversionError> {
	Ok(serde_json::from_str(text)?)
}

pub fn read_geojson(mut reader: impl Read) -> Result<Value> {
	let mut buffer = String::new();
	reader.read_to_string(&mut buffer)?;
	Ok(parse_geojson_str(&buffer)?)
}

/// Parses and converts a GeoJSON document held in memory.
pub fn convert_str(text: &str, config: &ConversionConfig) -> Result<Conversion, ConversionError> {
	convert(&parse_geojson_str(text)?, config)
}
