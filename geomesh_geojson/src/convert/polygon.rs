//! Polygon rings: reading, degenerate ring recovery, outlines, fills and triangulation.

use super::{MeshBuilder, coordinates::parse_positions};
use geomesh_core::{Cell, ConversionError, Position, Result};
use log::trace;
use serde_json::Value;

/// Emits the cells of one polygon given its `coordinates` member (an array of rings).
///
/// Every ring is read before anything is appended. A degenerate hole is dropped, a
/// degenerate outer ring drops the polygon; both are reported as warnings.
pub(super) fn emit_polygon(builder: &mut MeshBuilder, node: &Value) -> Result<()> {
	let rings = node
		.as_array()
		.ok_or_else(|| ConversionError::MalformedCoordinate(node.to_string()))?
		.iter()
		.map(read_ring)
		.collect::<Result<Vec<_>>>()?;

	let mut rings = rings.into_iter();
	let Some(outer) = rings.next() else {
		trace!("empty polygon");
		return Ok(());
	};

	let distinct = count_distinct(&outer);
	if distinct < 3 {
		builder.warn(ConversionError::DegenerateRing { distinct });
		return Ok(());
	}

	let mut holes = Vec::new();
	for ring in rings {
		let distinct = count_distinct(&ring);
		if distinct < 3 {
			builder.warn(ConversionError::DegenerateRing { distinct });
		} else {
			holes.push(ring);
		}
	}

	let config = builder.config();
	if config.outline_polygons {
		emit_outlines(builder, &outer, &holes);
		Ok(())
	} else if config.triangulates() {
		emit_triangles(builder, &outer, &holes)
	} else {
		let outer = builder.append_positions(&outer);
		let holes = holes.iter().map(|hole| builder.append_positions(hole)).collect();
		builder.push_cell(Cell::polygon(outer, holes));
		Ok(())
	}
}

/// Reads a ring, leaving out the closing position if it repeats the first one.
fn read_ring(node: &Value) -> Result<Vec<Position>> {
	let mut ring = parse_positions(node)?;
	if ring.len() > 1 && ring.first() == ring.last() {
		ring.pop();
	}
	Ok(ring)
}

/// Counts distinct positions, stopping at three.
fn count_distinct(ring: &[Position]) -> usize {
	let mut seen: Vec<&Position> = Vec::with_capacity(3);
	for position in ring {
		if !seen.contains(&position) {
			seen.push(position);
			if seen.len() == 3 {
				break;
			}
		}
	}
	seen.len()
}

fn emit_outlines(builder: &mut MeshBuilder, outer: &[Position], holes: &[Vec<Position>]) {
	for ring in std::iter::once(outer).chain(holes.iter().map(Vec::as_slice)) {
		let mut indices = builder.append_positions(ring);
		indices.push(indices[0]);
		builder.push_cell(Cell::poly_line(indices));
	}
}

/// Ear-clips the polygon in the x/y plane and emits one cell per triangle.
fn emit_triangles(builder: &mut MeshBuilder, outer: &[Position], holes: &[Vec<Position>]) -> Result<()> {
	let mut data: Vec<f64> = Vec::with_capacity(2 * (outer.len() + holes.iter().map(Vec::len).sum::<usize>()));
	let mut hole_indices = Vec::with_capacity(holes.len());
	for p in outer {
		data.extend_from_slice(&p[..2]);
	}
	for hole in holes {
		hole_indices.push(data.len() / 2);
		for p in hole {
			data.extend_from_slice(&p[..2]);
		}
	}

	let triangles = earcutr::earcut(&data, &hole_indices, 2)
		.map_err(|e| ConversionError::TriangulationFailed(format!("{e:?}")))?;
	if triangles.is_empty() {
		return Err(ConversionError::TriangulationFailed(
			"polygon has no area".to_string(),
		));
	}

	let mut indices = builder.append_positions(outer);
	for hole in holes {
		indices.extend(builder.append_positions(hole));
	}
	for triangle in triangles.chunks_exact(3) {
		builder.push_cell(Cell::triangle([
			indices[triangle[0]],
			indices[triangle[1]],
			indices[triangle[2]],
		]));
	}
	Ok(())
}
