use super::ConversionOptions;
use anyhow::Result;
use geomesh_core::{CellKind, Mesh};
use geomesh_geojson::Conversion;
use std::fmt::Write;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	#[command(flatten)]
	options: ConversionOptions,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let source = arguments.options.source();
	let config = arguments.options.config()?;
	eprintln!("probe {source}");

	let conversion = source.convert(&config)?;
	print!("{}", report(&conversion)?);
	Ok(())
}

/// Renders counts, bounds, attribute columns and warnings of a finished conversion.
fn report(conversion: &Conversion) -> Result<String> {
	let mesh: &Mesh = &conversion.mesh;
	let mut text = String::new();

	writeln!(text, "vertices: {}", mesh.vertices.len())?;
	if let Some(b) = mesh.vertices.bounds() {
		writeln!(text, "bounds: [{}, {}, {}] - [{}, {}, {}]", b[0], b[1], b[2], b[3], b[4], b[5])?;
	}

	writeln!(text, "cells: {}", mesh.cells.len())?;
	let counts = mesh.count_cells();
	for kind in CellKind::ALL {
		writeln!(text, "  {kind}: {}", counts.get(&kind).copied().unwrap_or(0))?;
	}

	match &mesh.attributes {
		Some(attributes) => {
			writeln!(text, "attributes: {} records", attributes.len())?;
			for column in attributes.schema().columns() {
				writeln!(text, "  {}: {}", column.name, column.attribute_type())?;
			}
		}
		None => writeln!(text, "attributes: (none)")?,
	}

	writeln!(text, "warnings: {}", conversion.warnings.len())?;
	for warning in &conversion.warnings {
		writeln!(text, "  {warning}")?;
	}
	Ok(text)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tests::run_command;
	use geomesh_geojson::{ConversionConfig, convert_str};
	use pretty_assertions::assert_eq;

	#[test]
	fn report_lists_everything() {
		let conversion = convert_str(
			r#"{"type":"FeatureCollection","features":[
				{"type":"Feature","geometry":{"type":"Polygon","coordinates":[[[0,0],[4,0],[4,3],[0,0]]]},"properties":{}},
				{"type":"Feature","geometry":{"type":"Circle","coordinates":[0,0]},"properties":{}}
			]}"#,
			&ConversionConfig::new().with_triangulation(true).with_serialized_properties("props"),
		)
		.unwrap();

		assert_eq!(
			report(&conversion).unwrap(),
			"vertices: 3\n\
			bounds: [0, 0, 0] - [4, 3, 0]\n\
			cells: 1\n  \
			Vertex: 0\n  \
			PolyLine: 0\n  \
			Polygon: 0\n  \
			Triangle: 1\n\
			attributes: 1 records\n  \
			props: string\n\
			warnings: 1\n  \
			feature 1: unsupported geometry type 'Circle'\n"
		);
	}

	#[test]
	fn probe_string() {
		run_command(vec![
			"geomesh",
			"probe",
			"--string",
			r#"{"type":"Point","coordinates":[1,2,3]}"#,
		])
		.unwrap();
	}

	#[test]
	fn probe_missing_file() {
		let error = run_command(vec!["geomesh", "probe", "/does/not/exist.geojson"]).unwrap_err();
		assert!(error.to_string().contains("does not exist"));
	}
}
