use super::ConversionOptions;
use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	#[command(flatten)]
	options: ConversionOptions,

	/// file to write the mesh to as JSON, stdout when omitted
	#[arg()]
	output: Option<PathBuf>,

	/// fail instead of skipping features that cannot be converted
	#[arg(long, display_order = 5)]
	strict: bool,

	/// indent the JSON output
	#[arg(long, display_order = 5)]
	pretty: bool,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let source = arguments.options.source();
	let config = arguments.options.config()?;
	log::info!("convert {source}");

	let conversion = source.convert(&config)?;
	let mesh = if arguments.strict {
		conversion.into_strict().context("strict mode")?
	} else {
		for warning in &conversion.warnings {
			eprintln!("skipped {warning}");
		}
		conversion.mesh
	};

	let json = if arguments.pretty {
		serde_json::to_string_pretty(&mesh)?
	} else {
		serde_json::to_string(&mesh)?
	};

	match &arguments.output {
		Some(path) => {
			fs::write(path, json).with_context(|| format!("writing mesh to {path:?}"))?;
			log::info!("finished writing {path:?}");
		}
		None => println!("{json}"),
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use crate::tests::run_command;
	use std::fs;

	const COLLECTION: &str = r#"{"type":"FeatureCollection","features":[
		{"type":"Feature","geometry":{"type":"Point","coordinates":[1,2]},"properties":{"name":"a"}},
		{"type":"Feature","geometry":{"type":"Point","coordinates":[1,"x"]},"properties":{}}
	]}"#;

	#[test]
	fn convert_string_to_file() {
		let dir = tempfile::tempdir().unwrap();
		let output = dir.path().join("mesh.json");
		run_command(vec![
			"geomesh",
			"convert",
			"--string",
			"--property",
			"name:string=none",
			COLLECTION,
			output.to_str().unwrap(),
		])
		.unwrap();

		let mesh: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
		assert_eq!(mesh["vertices"], serde_json::json!([[1.0, 2.0, 0.0]]));
		assert_eq!(mesh["attributes"]["records"], serde_json::json!([["a"]]));
	}

	#[test]
	fn strict_mode_fails() {
		let error = run_command(vec!["geomesh", "convert", "--string", "--strict", COLLECTION]).unwrap_err();
		assert!(format!("{error:#}").contains("malformed coordinate"));
	}

	#[test]
	fn invalid_property_argument() {
		let error = run_command(vec!["geomesh", "convert", "--string", "-p", "name", "{}"]).unwrap_err();
		assert!(error.to_string().contains("expected NAME:TYPE[=DEFAULT]"));
	}
}
