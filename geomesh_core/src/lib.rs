//! Mesh data model shared by the geomesh crates.
//!
//! A [`Mesh`] is a [`VertexBuffer`] plus typed [`Cell`]s referencing it, with an optional
//! [`AttributeTable`] holding one [`AttributeRecord`] per cell.

mod error;
mod mesh;

pub use error::*;
pub use mesh::*;
