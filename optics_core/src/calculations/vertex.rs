//! # Vertex Distance Compensation
//!
//! Effective-power change when a lens is moved toward or away from the eye:
//! `F' = F / (1 − d·F)` with `d` the vertex change in meters. Clinically
//! relevant above about ±4.00 D.
//!
//! The underlying [`compensate_power`] helper is shared with the contact
//! lens converter so both tools agree on the formula.
//!
//! ## Example
//!
//! ```rust
//! use optics_core::calculations::vertex::{VertexInput, calculate};
//!
//! // +10.00 D refracted at 12 mm, fitted at 10 mm
//! let input = VertexInput {
//!     power_d: 10.0,
//!     original_vertex_mm: 12.0,
//!     new_vertex_mm: 10.0,
//! };
//! let result = calculate(&input).unwrap();
//! assert!((result.compensated_power_d - 10.204).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::require_finite;
use crate::errors::{OpticsError, OpticsResult};
use crate::units::{Meters, Millimeters};

/// Denominators smaller than this are treated as the singular case rather
/// than letting the quotient blow up.
const SINGULARITY_EPS: f64 = 1e-9;

/// Compensate a power for a vertex-distance change of `distance_change_m`
/// meters (positive = moved toward the eye).
///
/// Fails with [`OpticsError::VergenceSingularity`] when `1 − d·F` vanishes:
/// the new vergence plane coincides with a focal point and no spectacle
/// power reproduces the correction there.
pub fn compensate_power(power_d: f64, distance_change_m: f64) -> OpticsResult<f64> {
    let denominator = 1.0 - distance_change_m * power_d;
    if denominator.abs() < SINGULARITY_EPS {
        return Err(OpticsError::vergence_singularity(
            "vertex compensation",
            format!(
                "1 - d*F is zero for F = {power_d} D at a vertex change of \
                 {:.1} mm; the new plane coincides with a focal point",
                distance_change_m * 1000.0
            ),
        ));
    }
    Ok(power_d / denominator)
}

/// Input parameters for vertex compensation.
///
/// ## JSON Example
///
/// ```json
/// { "power_d": 10.0, "original_vertex_mm": 12.0, "new_vertex_mm": 10.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VertexInput {
    /// Power as refracted, diopters
    pub power_d: f64,

    /// Vertex distance at refraction, millimeters
    pub original_vertex_mm: f64,

    /// Vertex distance as worn, millimeters
    pub new_vertex_mm: f64,
}

/// Results from vertex compensation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VertexResult {
    /// Power required at the new vertex distance, diopters
    pub compensated_power_d: f64,

    /// Vertex change applied, millimeters (positive = moved toward the eye)
    pub vertex_change_mm: f64,
}

impl VertexInput {
    /// Validate input parameters.
    pub fn validate(&self) -> OpticsResult<()> {
        require_finite("power_d", self.power_d)?;
        require_finite("original_vertex_mm", self.original_vertex_mm)?;
        require_finite("new_vertex_mm", self.new_vertex_mm)?;

        if self.original_vertex_mm < 0.0 {
            return Err(OpticsError::invalid_input(
                "original_vertex_mm",
                self.original_vertex_mm.to_string(),
                "Vertex distance cannot be negative",
            ));
        }
        if self.new_vertex_mm < 0.0 {
            return Err(OpticsError::invalid_input(
                "new_vertex_mm",
                self.new_vertex_mm.to_string(),
                "Vertex distance cannot be negative",
            ));
        }
        Ok(())
    }
}

/// Calculate the compensated power at a new vertex distance.
pub fn calculate(input: &VertexInput) -> OpticsResult<VertexResult> {
    input.validate()?;

    let vertex_change = Millimeters(input.original_vertex_mm) - Millimeters(input.new_vertex_mm);
    let compensated_power_d = compensate_power(input.power_d, Meters::from(vertex_change).value())?;

    Ok(VertexResult {
        compensated_power_d,
        vertex_change_mm: vertex_change.value(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_diopters_moved_two_millimeters() {
        let result = calculate(&VertexInput {
            power_d: 10.0,
            original_vertex_mm: 12.0,
            new_vertex_mm: 10.0,
        })
        .unwrap();
        // 10 / (1 - 0.002 * 10) = 10 / 0.98 = 10.2041
        assert!((result.compensated_power_d - 10.204_081_6).abs() < 1e-4);
        assert_eq!(result.vertex_change_mm, 2.0);
    }

    #[test]
    fn test_plano_unaffected_by_vertex() {
        for &(orig, new) in &[(12.0, 0.0), (0.0, 14.0), (13.5, 8.0)] {
            let result = calculate(&VertexInput {
                power_d: 0.0,
                original_vertex_mm: orig,
                new_vertex_mm: new,
            })
            .unwrap();
            assert_eq!(result.compensated_power_d, 0.0);
        }
    }

    #[test]
    fn test_minus_lens_weakens_toward_eye() {
        // -10 D moved 12 mm closer: -10 / (1 + 0.012*10) = -8.93
        let result = calculate(&VertexInput {
            power_d: -10.0,
            original_vertex_mm: 12.0,
            new_vertex_mm: 0.0,
        })
        .unwrap();
        assert!((result.compensated_power_d - (-8.928_571)).abs() < 1e-4);
    }

    #[test]
    fn test_singularity() {
        // d = 0.1 m, F = 10 D: 1 - d*F = 0
        let err = calculate(&VertexInput {
            power_d: 10.0,
            original_vertex_mm: 112.0,
            new_vertex_mm: 12.0,
        })
        .unwrap_err();
        assert_eq!(err.error_code(), "VERGENCE_SINGULARITY");
    }

    #[test]
    fn test_negative_vertex_rejected() {
        let result = calculate(&VertexInput {
            power_d: 5.0,
            original_vertex_mm: -1.0,
            new_vertex_mm: 12.0,
        });
        assert!(result.is_err());
    }
}
