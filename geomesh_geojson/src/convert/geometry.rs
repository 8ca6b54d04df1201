use super::{MeshBuilder, polygon::emit_polygon};
use crate::json::type_tag;
use geomesh_core::{Cell, ConversionError, Result};
use log::trace;
use serde_json::Value;
use std::{fmt::Display, ops::Range};

/// Maximum number of nested GeometryCollections below a root geometry.
pub const MAX_GEOMETRY_DEPTH: usize = 64;

/// The seven GeoJSON geometry types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
	Point,
	MultiPoint,
	LineString,
	MultiLineString,
	Polygon,
	MultiPolygon,
	GeometryCollection,
}

impl GeometryKind {
	/// Resolves a type tag. Matching is exact and case-sensitive.
	pub fn from_tag(tag: &str) -> Option<Self> {
		Some(match tag {
			"Point" => GeometryKind::Point,
			"MultiPoint" => GeometryKind::MultiPoint,
			"LineString" => GeometryKind::LineString,
			"MultiLineString" => GeometryKind::MultiLineString,
			"Polygon" => GeometryKind::Polygon,
			"MultiPolygon" => GeometryKind::MultiPolygon,
			"GeometryCollection" => GeometryKind::GeometryCollection,
			_ => return None,
		})
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			GeometryKind::Point => "Point",
			GeometryKind::MultiPoint => "MultiPoint",
			GeometryKind::LineString => "LineString",
			GeometryKind::MultiLineString => "MultiLineString",
			GeometryKind::Polygon => "Polygon",
			GeometryKind::MultiPolygon => "MultiPolygon",
			GeometryKind::GeometryCollection => "GeometryCollection",
		}
	}
}

impl Display for GeometryKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Walks one GeoJSON geometry object and emits its cells into `builder`.
///
/// Returns the range of cell indices that were added. On error nothing the geometry
/// added is kept.
pub fn parse_geometry(node: &Value, builder: &mut MeshBuilder) -> Result<Range<usize>> {
	let checkpoint = builder.checkpoint();
	let start = builder.cell_count();
	match parse_nested(node, builder, 0) {
		Ok(()) => Ok(start..builder.cell_count()),
		Err(error) => {
			builder.rollback(checkpoint);
			Err(error)
		}
	}
}

fn parse_nested(node: &Value, builder: &mut MeshBuilder, depth: usize) -> Result<()> {
	let tag = type_tag(node);
	let kind = tag
		.and_then(GeometryKind::from_tag)
		.ok_or_else(|| ConversionError::UnsupportedGeometryType(tag.map(str::to_string)))?;
	trace!("{kind} at depth {depth}");

	match kind {
		GeometryKind::Point => {
			let index = builder.accumulator().append(coordinates(node)?)?;
			builder.push_cell(Cell::vertex(index));
		}
		GeometryKind::MultiPoint => {
			for coordinate in members(coordinates(node)?)? {
				let index = builder.accumulator().append(coordinate)?;
				builder.push_cell(Cell::vertex(index));
			}
		}
		GeometryKind::LineString => emit_line(builder, coordinates(node)?)?,
		GeometryKind::MultiLineString => {
			for line in members(coordinates(node)?)? {
				emit_line(builder, line)?;
			}
		}
		GeometryKind::Polygon => emit_polygon(builder, coordinates(node)?)?,
		GeometryKind::MultiPolygon => {
			for polygon in members(coordinates(node)?)? {
				emit_polygon(builder, polygon)?;
			}
		}
		GeometryKind::GeometryCollection => {
			if depth >= MAX_GEOMETRY_DEPTH {
				return Err(ConversionError::GeometryNestingTooDeep {
					limit: MAX_GEOMETRY_DEPTH,
				});
			}
			let geometries = node
				.get("geometries")
				.and_then(Value::as_array)
				.ok_or(ConversionError::MissingMember { member: "geometries" })?;
			for geometry in geometries {
				parse_nested(geometry, builder, depth + 1)?;
			}
		}
	}
	Ok(())
}

fn coordinates(node: &Value) -> Result<&Value> {
	node
		.get("coordinates")
		.ok_or(ConversionError::MissingMember { member: "coordinates" })
}

fn members(node: &Value) -> Result<&Vec<Value>> {
	node
		.as_array()
		.ok_or_else(|| ConversionError::MalformedCoordinate(node.to_string()))
}

/// One polyline through all positions, in order. An empty line emits nothing.
fn emit_line(builder: &mut MeshBuilder, node: &Value) -> Result<()> {
	let positions = members(node)?;
	if positions.is_empty() {
		return Ok(());
	}
	let indices = positions
		.iter()
		.map(|p| builder.accumulator().append(p))
		.collect::<Result<Vec<_>>>()?;
	builder.push_cell(Cell::poly_line(indices));
	Ok(())
}
