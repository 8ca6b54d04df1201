use serde::Serialize;
use std::{fmt::Debug, ops::Index};

/// A vertex position `[x, y, z]`. Two dimensional input gets `z = 0`.
pub type Position = [f64; 3];

/// Append-only list of vertex positions shared by all cells of a mesh.
///
/// Indices handed out by [`VertexBuffer::push`] stay valid for the lifetime of the buffer,
/// unless the buffer is explicitly [truncated](VertexBuffer::truncate) below them.
#[derive(Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VertexBuffer(Vec<Position>);

impl VertexBuffer {
	pub fn new() -> Self {
		Self(Vec::new())
	}

	/// Appends a position and returns its index.
	pub fn push(&mut self, position: Position) -> usize {
		self.0.push(position);
		self.0.len() - 1
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<&Position> {
		self.0.get(index)
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Position> {
		self.0.iter()
	}

	/// Drops every vertex from `len` onwards.
	pub fn truncate(&mut self, len: usize) {
		self.0.truncate(len);
	}

	pub fn as_slice(&self) -> &[Position] {
		&self.0
	}

	/// Returns `[x_min, y_min, z_min, x_max, y_max, z_max]`, or `None` for an empty buffer.
	pub fn bounds(&self) -> Option<[f64; 6]> {
		let first = self.0.first()?;
		let mut bounds = [first[0], first[1], first[2], first[0], first[1], first[2]];
		for p in &self.0[1..] {
			for axis in 0..3 {
				bounds[axis] = bounds[axis].min(p[axis]);
				bounds[axis + 3] = bounds[axis + 3].max(p[axis]);
			}
		}
		Some(bounds)
	}
}

impl Index<usize> for VertexBuffer {
	type Output = Position;
	fn index(&self, index: usize) -> &Self::Output {
		&self.0[index]
	}
}

impl From<Vec<Position>> for VertexBuffer {
	fn from(value: Vec<Position>) -> Self {
		Self(value)
	}
}

impl Debug for VertexBuffer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}
