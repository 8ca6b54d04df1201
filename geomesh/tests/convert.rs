use predicates::str;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use test_utilities::*;

#[test]
fn convert_requires_input() {
	geomesh_cmd()
		.arg("convert")
		.assert()
		.failure()
		.code(2)
		.stdout(str::is_empty())
		.stderr(str::contains("Usage: geomesh convert"));
}

#[test]
fn convert_points_to_stdout() {
	let output = geomesh_cmd()
		.args(["convert", path_str(&get_testdata("cities.geojson"))])
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let mesh: Value = serde_json::from_slice(&output).unwrap();
	assert_eq!(mesh["vertices"][1], json!([9.9937, 53.5511, 6.0]));
	assert_eq!(mesh["cells"].as_array().unwrap().len(), 3);
	assert_eq!(mesh["cells"][2], json!({"type": "Vertex", "index": 2}));
	assert!(mesh.get("attributes").is_none());
}

#[test]
fn convert_with_properties() {
	let (temp_dir, output) = get_temp_output("cities.json");

	geomesh_cmd()
		.args([
			"convert",
			path_str(&get_testdata("cities.geojson")),
			path_str(&output),
			"--property",
			"name:string",
			"--property",
			"population:integer=-1",
			"--serialized-properties",
			"props",
		])
		.assert()
		.success()
		.stdout(str::is_empty());

	let mesh = read_mesh(&output);
	let records = mesh["attributes"]["records"].as_array().unwrap();
	assert_eq!(records[0][0], "Berlin");
	assert_eq!(records[2][1], -1);

	let props: Value = serde_json::from_str(records[1][2].as_str().unwrap()).unwrap();
	assert_eq!(props, json!({"name": "Hamburg", "population": 1910160, "capital": false}));

	drop(temp_dir);
}

#[test]
fn convert_with_config_file() {
	let (temp_dir, output) = get_temp_output("shapes.json");

	geomesh_cmd()
		.args([
			"convert",
			path_str(&get_testdata("shapes.geojson")),
			path_str(&output),
			"--config",
			path_str(&get_testdata("shapes.yml")),
		])
		.assert()
		.success();

	let mesh = read_mesh(&output);
	let cells = mesh["cells"].as_array().unwrap();
	assert_eq!(mesh["vertices"].as_array().unwrap().len(), 19);
	assert_eq!(cells.len(), 13);
	assert_eq!(cells.iter().filter(|c| c["type"] == "Triangle").count(), 11);
	assert_eq!(cells.iter().filter(|c| c["type"] == "Polygon").count(), 0);

	let records = mesh["attributes"]["records"].as_array().unwrap();
	assert_eq!(records.len(), 13);
	assert_eq!(records[0][0], "square");
	assert_eq!(records[0][1], 12.5);
	assert_eq!(records[12][0], "mixed");
	assert_eq!(records[12][1], 0.0);

	drop(temp_dir);
}

#[test]
fn outline_overrides_config() {
	let output = geomesh_cmd()
		.args([
			"convert",
			path_str(&get_testdata("shapes.geojson")),
			"--config",
			path_str(&get_testdata("shapes.yml")),
			"--outline",
		])
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let mesh: Value = serde_json::from_slice(&output).unwrap();
	let cells = mesh["cells"].as_array().unwrap();
	assert!(cells.iter().all(|c| c["type"] != "Triangle" && c["type"] != "Polygon"));
	// two rings of the square, one line, one point and two rings of the multipolygon
	assert_eq!(cells.len(), 6);
}

#[test]
fn convert_string_input() {
	geomesh_cmd()
		.args([
			"convert",
			"--string",
			r#"{"type":"LineString","coordinates":[[0,0],[1,1]]}"#,
		])
		.assert()
		.success()
		.stdout(str::contains(r#""cells":[{"type":"PolyLine","indices":[0,1]}]"#));
}

#[test]
fn broken_feature_is_skipped() {
	let output = geomesh_cmd()
		.args(["convert", path_str(&get_testdata("broken.geojson"))])
		.assert()
		.success()
		.stderr(str::contains("skipped feature 1: malformed coordinate"))
		.get_output()
		.stdout
		.clone();

	let mesh: Value = serde_json::from_slice(&output).unwrap();
	assert_eq!(mesh["vertices"], json!([[1.0, 1.0, 0.0], [4.0, 4.0, 0.0]]));
}

#[test]
fn broken_feature_fails_in_strict_mode() {
	geomesh_cmd()
		.args(["convert", "--strict", path_str(&get_testdata("broken.geojson"))])
		.assert()
		.failure()
		.code(1)
		.stdout(str::is_empty())
		.stderr(str::contains("malformed coordinate"));
}

#[test]
fn invalid_json_fails() {
	geomesh_cmd()
		.args(["convert", path_str(&get_testdata("invalid.geojson"))])
		.assert()
		.failure()
		.code(1)
		.stderr(str::contains("input is not valid JSON"));
}

#[test]
fn missing_input_file_fails() {
	geomesh_cmd()
		.args(["convert", "does_not_exist.geojson"])
		.assert()
		.failure()
		.code(1)
		.stderr(str::contains("does not exist"));
}
