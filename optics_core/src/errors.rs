//! # Error Types
//!
//! Structured error types for optics_core. These errors are designed to be
//! informative for both humans and LLMs, providing enough context to
//! understand and fix issues programmatically.
//!
//! Every failure is a deterministic property of the inputs: the formulas
//! never return `NaN` or `Infinity` in place of an undefined result.
//!
//! ## Example
//!
//! ```rust
//! use optics_core::errors::{OpticsError, OpticsResult};
//!
//! fn validate_diameter(diameter_mm: f64) -> OpticsResult<()> {
//!     if diameter_mm <= 0.0 {
//!         return Err(OpticsError::InvalidInput {
//!             field: "diameter_mm".to_string(),
//!             value: diameter_mm.to_string(),
//!             reason: "Lens diameter must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for optics_core operations
pub type OpticsResult<T> = Result<T, OpticsError>;

/// Structured error type for calculation operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by LLMs and other consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum OpticsError {
    /// An input value violates a precondition (out of range, wrong sign,
    /// cross-field relationship broken, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The requested optical geometry is physically inconsistent: the
    /// surface radius is too short to span the lens aperture.
    #[error(
        "Impossible geometry on the {meridian} meridian: \
         radius of curvature {radius_mm:.2} mm is not greater than \
         semi-diameter {semi_diameter_mm:.2} mm"
    )]
    ImpossibleGeometry {
        meridian: String,
        radius_mm: f64,
        semi_diameter_mm: f64,
    },

    /// A vergence or power transformation's denominator evaluates to zero,
    /// making the result mathematically undefined (e.g. the new vertex
    /// plane coincides with a focal point).
    #[error("Undefined result in {calculation}: {reason}")]
    VergenceSingularity {
        calculation: String,
        reason: String,
    },

    /// Lens material not found in the database
    #[error("Lens material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// The external text-completion service failed to produce a response
    #[error("Analysis service error ({service}): {reason}")]
    ServiceError { service: String, reason: String },

    /// JSON serialization/deserialization error (e.g. a malformed
    /// structured response from the analysis service)
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl OpticsError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        OpticsError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an ImpossibleGeometry error
    pub fn impossible_geometry(
        meridian: impl Into<String>,
        radius_mm: f64,
        semi_diameter_mm: f64,
    ) -> Self {
        OpticsError::ImpossibleGeometry {
            meridian: meridian.into(),
            radius_mm,
            semi_diameter_mm,
        }
    }

    /// Create a VergenceSingularity error
    pub fn vergence_singularity(
        calculation: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        OpticsError::VergenceSingularity {
            calculation: calculation.into(),
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        OpticsError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a ServiceError
    pub fn service_error(service: impl Into<String>, reason: impl Into<String>) -> Self {
        OpticsError::ServiceError {
            service: service.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry).
    ///
    /// The mathematical failures are deterministic properties of the input
    /// and never worth retrying; only a service failure may be transient.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, OpticsError::ServiceError { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            OpticsError::InvalidInput { .. } => "INVALID_INPUT",
            OpticsError::ImpossibleGeometry { .. } => "IMPOSSIBLE_GEOMETRY",
            OpticsError::VergenceSingularity { .. } => "VERGENCE_SINGULARITY",
            OpticsError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            OpticsError::ServiceError { .. } => "SERVICE_ERROR",
            OpticsError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = OpticsError::invalid_input("diameter_mm", "-70", "Diameter must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: OpticsError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            OpticsError::material_not_found("unobtainium").error_code(),
            "MATERIAL_NOT_FOUND"
        );
        assert_eq!(
            OpticsError::impossible_geometry("90°", 24.9, 35.0).error_code(),
            "IMPOSSIBLE_GEOMETRY"
        );
    }

    #[test]
    fn test_only_service_errors_recoverable() {
        assert!(OpticsError::service_error("completion", "timeout").is_recoverable());
        assert!(!OpticsError::vergence_singularity("vertex", "1 - d*F is zero").is_recoverable());
        assert!(!OpticsError::invalid_input("axis_deg", "200", "out of range").is_recoverable());
    }
}
