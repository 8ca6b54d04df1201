//! Error kinds raised while turning a GeoJSON tree into a [`Mesh`](crate::Mesh).
//!
//! Some kinds abort the whole run (see [`ConversionError::is_fatal`]), the others only
//! abort the feature or ring they occur in and are reported as warnings.

use crate::AttributeType;

/// Everything that can go wrong during a conversion run.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
	#[error("malformed coordinate: {0}")]
	MalformedCoordinate(String),
	#[error("unsupported geometry type {}", .0.as_deref().map_or_else(|| "<missing>".to_string(), |t| format!("'{t}'")))]
	UnsupportedGeometryType(Option<String>),
	#[error("degenerate ring: {distinct} distinct positions, at least 3 are required")]
	DegenerateRing { distinct: usize },
	#[error("geometry collections are nested deeper than {limit} levels")]
	GeometryNestingTooDeep { limit: usize },
	#[error("property '{name}' has type {found}, expected {expected}")]
	PropertyTypeMismatch {
		name: String,
		expected: AttributeType,
		found: &'static str,
	},
	#[error("root object has no 'type' member")]
	MissingTypeField,
	#[error("input is not valid JSON: {0}")]
	InputParseFailure(#[from] serde_json::Error),
	#[error("'{member}' is missing or has the wrong JSON type")]
	MissingMember { member: &'static str },
	#[error("expected a {expected}, but found {found}")]
	UnexpectedType { expected: &'static str, found: String },
	#[error("triangulation failed: {0}")]
	TriangulationFailed(String),
	#[error("invalid configuration: {0}")]
	InvalidConfiguration(String),
	#[error("invalid mesh: {0}")]
	InvalidMesh(String),
}

impl ConversionError {
	/// Returns `true` for errors that discard the whole document instead of a single feature.
	pub fn is_fatal(&self) -> bool {
		use ConversionError::*;
		matches!(
			self,
			MissingTypeField | InputParseFailure(_) | InvalidConfiguration(_) | MissingMember { member: "features" }
		)
	}
}

pub type Result<T, E = ConversionError> = std::result::Result<T, E>;
