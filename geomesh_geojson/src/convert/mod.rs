mod context;
mod coordinates;
mod driver;
mod geometry;
mod polygon;
mod properties;

pub use context::*;
pub use coordinates::*;
pub use driver::*;
pub use geometry::*;
pub use properties::*;
