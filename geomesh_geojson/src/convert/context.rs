use super::CoordinateAccumulator;
use crate::ConversionConfig;
use geomesh_core::{AttributeRecord, AttributeSchema, AttributeTable, Cell, ConversionError, Mesh, Position, Result};
use log::warn;
use std::{fmt::Display, ops::Range};

/// A problem that was recovered from: the affected feature, geometry or ring was skipped.
#[derive(Debug)]
pub struct ConversionWarning {
	/// Index of the feature in its collection, `None` for a bare root geometry or feature.
	pub feature: Option<usize>,
	pub error: ConversionError,
}

impl Display for ConversionWarning {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.feature {
			Some(index) => write!(f, "feature {index}: {}", self.error),
			None => write!(f, "{}", self.error),
		}
	}
}

/// A finished run: the mesh and every skip that happened while building it.
#[derive(Debug)]
pub struct Conversion {
	pub mesh: Mesh,
	pub warnings: Vec<ConversionWarning>,
}

impl Conversion {
	pub fn is_clean(&self) -> bool {
		self.warnings.is_empty()
	}

	/// Returns the mesh, or the first recorded problem if anything was skipped.
	pub fn into_strict(self) -> Result<Mesh> {
		match self.warnings.into_iter().next() {
			Some(warning) => Err(warning.error),
			None => Ok(self.mesh),
		}
	}
}

/// Lengths of the vertex buffer, cell list and warning list at some point of the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint {
	vertices: usize,
	cells: usize,
	warnings: usize,
}

/// The state of one conversion run, threaded through every parsing call.
pub struct MeshBuilder<'a> {
	config: &'a ConversionConfig,
	accumulator: CoordinateAccumulator,
	cells: Vec<Cell>,
	attributes: Option<AttributeTable>,
	warnings: Vec<ConversionWarning>,
	feature: Option<usize>,
}

impl<'a> MeshBuilder<'a> {
	pub fn new(config: &'a ConversionConfig, schema: Option<AttributeSchema>) -> Self {
		Self {
			config,
			accumulator: CoordinateAccumulator::new(),
			cells: Vec::new(),
			attributes: schema.map(AttributeTable::new),
			warnings: Vec::new(),
			feature: None,
		}
	}

	pub fn config(&self) -> &'a ConversionConfig {
		self.config
	}

	pub fn accumulator(&mut self) -> &mut CoordinateAccumulator {
		&mut self.accumulator
	}

	pub fn append_positions(&mut self, positions: &[Position]) -> Vec<usize> {
		self.accumulator.append_all(positions)
	}

	/// Adds a finished cell and returns its index.
	pub fn push_cell(&mut self, cell: Cell) -> usize {
		debug_assert!(cell.indices().all(|i| i < self.accumulator.len()));
		self.cells.push(cell);
		self.cells.len() - 1
	}

	pub fn cell_count(&self) -> usize {
		self.cells.len()
	}

	pub fn cells(&self) -> &[Cell] {
		&self.cells
	}

	pub fn schema(&self) -> Option<&AttributeSchema> {
		self.attributes.as_ref().map(AttributeTable::schema)
	}

	/// Sets the feature index that subsequent warnings refer to.
	pub fn set_feature(&mut self, feature: Option<usize>) {
		self.feature = feature;
	}

	/// Records a recovered problem.
	pub fn warn(&mut self, error: ConversionError) {
		let warning = ConversionWarning {
			feature: self.feature,
			error,
		};
		warn!("skipped: {warning}");
		self.warnings.push(warning);
	}

	pub fn checkpoint(&self) -> Checkpoint {
		Checkpoint {
			vertices: self.accumulator.len(),
			cells: self.cells.len(),
			warnings: self.warnings.len(),
		}
	}

	/// Forgets every vertex, cell, attribute record and warning added after `checkpoint`.
	pub fn rollback(&mut self, checkpoint: Checkpoint) {
		self.accumulator.truncate(checkpoint.vertices);
		self.cells.truncate(checkpoint.cells);
		self.warnings.truncate(checkpoint.warnings);
		if let Some(attributes) = &mut self.attributes {
			attributes.truncate(checkpoint.cells);
		}
	}

	/// Attaches `record` to every cell in `cells`.
	pub fn attach(&mut self, record: &AttributeRecord, cells: Range<usize>) {
		debug_assert_eq!(cells.end, self.cells.len());
		if let Some(attributes) = &mut self.attributes {
			debug_assert_eq!(cells.start, attributes.len());
			attributes.push_repeated(record, cells.len());
		}
	}

	pub fn finish(self) -> Conversion {
		Conversion {
			mesh: Mesh {
				vertices: self.accumulator.into_vertices(),
				cells: self.cells,
				attributes: self.attributes,
			},
			warnings: self.warnings,
		}
	}
}
