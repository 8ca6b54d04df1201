//! Converts GeoJSON documents into meshes.
//!
//! A document is parsed into a [`serde_json::Value`] tree and handed to [`convert`] together with a
//! [`ConversionConfig`]. The result is a [`Conversion`]: the mesh plus the features that had to be skipped.
//!
//! ```
//! use geomesh_geojson::{ConversionConfig, convert_str};
//!
//! let config = ConversionConfig::new().with_serialized_properties("props");
//! let conversion = convert_str(
//! 	r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[1,2]},"properties":{"a":1}}"#,
//! 	&config,
//! )
//! .unwrap();
//! assert_eq!(conversion.mesh.vertices.len(), 1);
//! ```

mod config;
mod convert;
mod json;
mod read;

pub use config::*;
pub use convert::*;
pub use json::{json_type_name, typed_value};
pub use read::*;
