use geomesh_core::{ConversionError, Position, Result, VertexBuffer};
use serde_json::Value;

/// Reads one GeoJSON position: an array of two or three numbers.
pub fn parse_position(node: &Value) -> Result<Position> {
	let malformed = || ConversionError::MalformedCoordinate(truncated(node));

	let values = node.as_array().ok_or_else(malformed)?;
	if !(2..=3).contains(&values.len()) {
		return Err(malformed());
	}

	let mut position = [0.0; 3];
	for (axis, value) in values.iter().enumerate() {
		position[axis] = value.as_f64().filter(|v| v.is_finite()).ok_or_else(malformed)?;
	}
	Ok(position)
}

/// Reads an array of positions, e.g. the coordinates of a LineString or of one ring.
pub fn parse_positions(node: &Value) -> Result<Vec<Position>> {
	node
		.as_array()
		.ok_or_else(|| ConversionError::MalformedCoordinate(truncated(node)))?
		.iter()
		.map(parse_position)
		.collect()
}

fn truncated(node: &Value) -> String {
	let mut text = node.to_string();
	if text.len() > 64 {
		let mut end = 61;
		while !text.is_char_boundary(end) {
			end -= 1;
		}
		text.truncate(end);
		text.push_str("...");
	}
	text
}

/// Owns the vertex buffer of a conversion run and hands out one new index per coordinate.
///
/// Positions are never deduplicated: two features touching the same point get two vertices.
#[derive(Debug, Default)]
pub struct CoordinateAccumulator {
	vertices: VertexBuffer,
}

impl CoordinateAccumulator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses `coordinate` and appends it, returning the new vertex index.
	pub fn append(&mut self, coordinate: &Value) -> Result<usize> {
		Ok(self.vertices.push(parse_position(coordinate)?))
	}

	/// Appends an already validated position.
	pub fn append_position(&mut self, position: Position) -> usize {
		self.vertices.push(position)
	}

	pub fn append_all(&mut self, positions: &[Position]) -> Vec<usize> {
		positions.iter().map(|p| self.vertices.push(*p)).collect()
	}

	pub fn len(&self) -> usize {
		self.vertices.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vertices.is_empty()
	}

	pub fn position(&self, index: usize) -> Option<&Position> {
		self.vertices.get(index)
	}

	pub(crate) fn truncate(&mut self, len: usize) {
		self.vertices.truncate(len);
	}

	pub fn into_vertices(self) -> VertexBuffer {
		self.vertices
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(json!([102.0, 0.5]), [102.0, 0.5, 0.0])]
	#[case(json!([1, 2, 3]), [1.0, 2.0, 3.0])]
	#[case(json!([-180, -90.5]), [-180.0, -90.5, 0.0])]
	fn parse_valid_position(#[case] node: Value, #[case] expected: Position) {
		assert_eq!(parse_position(&node).unwrap(), expected);
	}

	#[rstest]
	#[case(json!([1.0]))]
	#[case(json!([1.0, 2.0, 3.0, 4.0]))]
	#[case(json!(["1", 2]))]
	#[case(json!([1, null]))]
	#[case(json!({"x": 1, "y": 2}))]
	#[case(json!(5))]
	#[case(json!([[1, 2]]))]
	fn parse_malformed_position(#[case] node: Value) {
		assert!(matches!(
			parse_position(&node),
			Err(ConversionError::MalformedCoordinate(_))
		));
	}

	#[test]
	fn parse_position_list() {
		let positions = parse_positions(&json!([[0, 0], [1, 1, 1]])).unwrap();
		assert_eq!(positions, vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]);
		assert!(parse_positions(&json!([[0, 0], [1]])).is_err());
		assert!(parse_positions(&json!("nope")).is_err());
		assert!(parse_positions(&json!([])).unwrap().is_empty());
	}

	#[test]
	fn long_nodes_are_truncated_in_errors() {
		let node = json!((0..100).collect::<Vec<u32>>());
		let message = parse_position(&node).unwrap_err().to_string();
		assert!(message.ends_with("..."));
		assert!(message.len() < 100);
	}

	#[test]
	fn every_append_grows_the_buffer() {
		let mut accumulator = CoordinateAccumulator::new();
		assert_eq!(accumulator.append(&json!([1, 2])).unwrap(), 0);
		assert_eq!(accumulator.append(&json!([1, 2])).unwrap(), 1);
		assert!(accumulator.append(&json!([1])).is_err());
		assert_eq!(accumulator.len(), 2);
		assert_eq!(accumulator.append_all(&[[5.0; 3], [6.0; 3]]), vec![2, 3]);
		assert_eq!(accumulator.position(3), Some(&[6.0; 3]));

		accumulator.truncate(1);
		let vertices = accumulator.into_vertices();
		assert_eq!(vertices.as_slice(), &[[1.0, 2.0, 0.0]]);
	}
}
