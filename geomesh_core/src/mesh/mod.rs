#![allow(clippy::module_inception)]

mod attributes;
mod cell;
mod mesh;
mod vertex_buffer;

pub use attributes::*;
pub use cell::*;
pub use mesh::*;
pub use vertex_buffer::*;
