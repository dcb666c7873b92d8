//! Build errors

use crate::float_types::Real;

/// Everything that can stop a part from being generated.
///
/// A failed build never yields a partial solid: the caller either receives a
/// validated [`Mesh`](crate::mesh::Mesh) or one of these.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// (InvalidDimension) A dimension is non-finite, non-positive or outside its declared bounds
    #[error("(InvalidDimension) `{key}` resolved to {value}, which is not a usable dimension")]
    InvalidDimension { key: String, value: Real },

    /// (InvalidParameter) A parameter has the wrong type or an unknown value
    #[error("(InvalidParameter) `{key}`: {reason}")]
    InvalidParameter { key: String, reason: String },

    /// (GeometryError) A boolean operation failed or produced an invalid solid
    #[error("(GeometryError) {backend} backend: {reason}")]
    Geometry { backend: &'static str, reason: String },

    /// (UnknownFamily) No recipe is registered under this identifier
    #[error("(UnknownFamily) no part family named `{0}`")]
    UnknownFamily(String),
}

impl BuildError {
    pub fn invalid_dimension(key: impl Into<String>, value: Real) -> Self {
        BuildError::InvalidDimension {
            key: key.into(),
            value,
        }
    }

    pub fn invalid_parameter(key: impl Into<String>, reason: impl Into<String>) -> Self {
        BuildError::InvalidParameter {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn geometry(backend: &'static str, reason: impl Into<String>) -> Self {
        BuildError::Geometry {
            backend,
            reason: reason.into(),
        }
    }
}

/// Rejects non-finite and non-positive values for `key`.
pub(crate) fn require_positive(key: &str, value: Real) -> Result<Real, BuildError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(BuildError::invalid_dimension(key, value))
    }
}
