use super::{AttributeTable, Cell, CellKind, VertexBuffer};
use crate::{ConversionError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// The result of a conversion: a shared vertex buffer, the cells referencing it,
/// and optionally one attribute record per cell.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Mesh {
	pub vertices: VertexBuffer,
	pub cells: Vec<Cell>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub attributes: Option<AttributeTable>,
}

impl Mesh {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.vertices.is_empty() && self.cells.is_empty()
	}

	pub fn cells_of_kind(&self, kind: CellKind) -> impl Iterator<Item = &Cell> {
		self.cells.iter().filter(move |c| c.kind() == kind)
	}

	/// Number of cells per kind; kinds without cells are left out.
	pub fn count_cells(&self) -> BTreeMap<CellKind, usize> {
		let mut counts = BTreeMap::new();
		for cell in &self.cells {
			*counts.entry(cell.kind()).or_insert(0) += 1;
		}
		counts
	}

	/// Checks that every cell index points into the vertex buffer and that the
	/// attribute table, if any, holds exactly one record per cell.
	pub fn validate(&self) -> Result<()> {
		let len = self.vertices.len();
		for (cell_index, cell) in self.cells.iter().enumerate() {
			if let Some(index) = cell.indices().find(|i| *i >= len) {
				return Err(ConversionError::InvalidMesh(format!(
					"cell {cell_index} references vertex {index}, but there are only {len} vertices"
				)));
			}
		}
		if let Some(attributes) = &self.attributes {
			if attributes.len() != self.cells.len() {
				return Err(ConversionError::InvalidMesh(format!(
					"{} attribute records for {} cells",
					attributes.len(),
					self.cells.len()
				)));
			}
		}
		Ok(())
	}
}
