use serde::Serialize;
use std::fmt::Display;

/// The kind tag of a [`Cell`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CellKind {
	Vertex,
	PolyLine,
	Polygon,
	Triangle,
}

impl CellKind {
	pub const ALL: [CellKind; 4] = [CellKind::Vertex, CellKind::PolyLine, CellKind::Polygon, CellKind::Triangle];

	pub fn as_str(&self) -> &'static str {
		match self {
			CellKind::Vertex => "Vertex",
			CellKind::PolyLine => "PolyLine",
			CellKind::Polygon => "Polygon",
			CellKind::Triangle => "Triangle",
		}
	}
}

impl Display for CellKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// An output primitive referencing positions in the mesh's vertex buffer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Cell {
	Vertex { index: usize },
	PolyLine { indices: Vec<usize> },
	/// A filled region. `outer` is the boundary, every entry of `holes` cuts out an inner ring.
	/// Rings are stored without repeating their first index.
	Polygon { outer: Vec<usize>, holes: Vec<Vec<usize>> },
	Triangle { indices: [usize; 3] },
}

impl Cell {
	pub fn vertex(index: usize) -> Self {
		Cell::Vertex { index }
	}

	pub fn poly_line(indices: Vec<usize>) -> Self {
		Cell::PolyLine { indices }
	}

	pub fn polygon(outer: Vec<usize>, holes: Vec<Vec<usize>>) -> Self {
		Cell::Polygon { outer, holes }
	}

	pub fn triangle(indices: [usize; 3]) -> Self {
		Cell::Triangle { indices }
	}

	pub fn kind(&self) -> CellKind {
		match self {
			Cell::Vertex { .. } => CellKind::Vertex,
			Cell::PolyLine { .. } => CellKind::PolyLine,
			Cell::Polygon { .. } => CellKind::Polygon,
			Cell::Triangle { .. } => CellKind::Triangle,
		}
	}

	/// Iterates over every vertex index the cell references, holes included.
	pub fn indices(&self) -> Box<dyn Iterator<Item = usize> + '_> {
		match self {
			Cell::Vertex { index } => Box::new(std::iter::once(*index)),
			Cell::PolyLine { indices } => Box::new(indices.iter().copied()),
			Cell::Polygon { outer, holes } => Box::new(outer.iter().chain(holes.iter().flatten()).copied()),
			Cell::Triangle { indices } => Box::new(indices.iter().copied()),
		}
	}

	/// `true` for a polyline whose last index repeats its first one.
	pub fn is_closed(&self) -> bool {
		match self {
			Cell::PolyLine { indices } => indices.len() > 2 && indices.first() == indices.last(),
			Cell::Polygon { .. } | Cell::Triangle { .. } => true,
			Cell::Vertex { .. } => false,
		}
	}
}
