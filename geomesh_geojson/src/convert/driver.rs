use super::{Conversion, MeshBuilder, extract_properties, parse_geometry};
use crate::{
	ConversionConfig,
	json::{json_type_name, type_tag},
};
use geomesh_core::{AttributeSchema, ConversionError, Result};
use log::{debug, trace};
use serde_json::Value;

/// Converts a parsed GeoJSON document into a mesh.
///
/// The root may be a `FeatureCollection`, a `Feature` or a bare geometry. Problems inside a
/// single feature skip that feature and are returned as warnings; a root without `type`,
/// a collection without `features` or an invalid configuration fail the whole run.
pub fn convert(root: &Value, config: &ConversionConfig) -> Result<Conversion> {
	let schema = config.schema()?;
	let root_type = type_tag(root).ok_or(ConversionError::MissingTypeField)?;
	let mut builder = MeshBuilder::new(config, schema);

	match root_type {
		"FeatureCollection" => {
			let features = root
				.get("features")
				.and_then(Value::as_array)
				.ok_or(ConversionError::MissingMember { member: "features" })?;
			debug!("converting {} features", features.len());

			for (index, feature) in features.iter().enumerate() {
				builder.set_feature(Some(index));
				if type_tag(feature) == Some("Feature") {
					convert_feature(feature, &mut builder);
				} else {
					builder.warn(ConversionError::UnexpectedType {
						expected: "Feature",
						found: describe(feature),
					});
				}
			}
			builder.set_feature(None);
		}
		"Feature" => convert_feature(root, &mut builder),
		_ => convert_bare_geometry(root, &mut builder),
	}

	let conversion = builder.finish();
	debug!(
		"converted into {} vertices and {} cells, {} warnings",
		conversion.mesh.vertices.len(),
		conversion.mesh.cells.len(),
		conversion.warnings.len()
	);
	Ok(conversion)
}

fn convert_feature(feature: &Value, builder: &mut MeshBuilder) {
	let record = match builder.schema() {
		Some(schema) => match extract_properties(feature.get("properties"), schema) {
			Ok(record) => Some(record),
			Err(error) => {
				builder.warn(error);
				return;
			}
		},
		None => None,
	};

	let geometry = match feature.get("geometry") {
		Some(Value::Null) => {
			trace!("feature without geometry");
			return;
		}
		Some(geometry) => geometry,
		None => {
			builder.warn(ConversionError::MissingMember { member: "geometry" });
			return;
		}
	};

	match parse_geometry(geometry, builder) {
		Ok(cells) => {
			if let Some(record) = record {
				builder.attach(&record, cells);
			}
		}
		Err(error) => builder.warn(error),
	}
}

fn convert_bare_geometry(geometry: &Value, builder: &mut MeshBuilder) {
	match parse_geometry(geometry, builder) {
		Ok(cells) => {
			if let Some(record) = builder.schema().map(AttributeSchema::default_record) {
				builder.attach(&record, cells);
			}
		}
		Err(error) => builder.warn(error),
	}
}

fn describe(node: &Value) -> String {
	match type_tag(node) {
		Some(tag) => format!("'{tag}'"),
		None => format!("a {}", json_type_name(node)),
	}
}
