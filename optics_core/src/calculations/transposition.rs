//! # Prescription Transposition
//!
//! Rewrites a sphero-cylindrical prescription between plus- and
//! minus-cylinder form: new sphere = sphere + cylinder, the cylinder
//! changes sign, and the axis rotates 90° (wrapped into 1-180).
//! Transposing twice returns the original prescription.
//!
//! ## Example
//!
//! ```rust
//! use optics_core::calculations::transposition::{TranspositionInput, calculate};
//!
//! let input = TranspositionInput { sphere_d: -2.0, cylinder_d: -1.0, axis_deg: 90.0 };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.sphere_d, -3.0);
//! assert_eq!(result.cylinder_d, 1.0);
//! assert_eq!(result.axis_deg, 180.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{require_finite, validate_axis};
use crate::errors::OpticsResult;

/// A prescription in sphere/cylinder/axis form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranspositionInput {
    /// Sphere power, diopters
    pub sphere_d: f64,

    /// Cylinder power, diopters (either sign convention)
    pub cylinder_d: f64,

    /// Cylinder axis in degrees, (0, 180]
    pub axis_deg: f64,
}

/// The transposed prescription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranspositionResult {
    /// Transposed sphere power, diopters
    pub sphere_d: f64,

    /// Transposed cylinder power (sign flipped), diopters
    pub cylinder_d: f64,

    /// Transposed axis in degrees, always in (0, 180]
    pub axis_deg: f64,
}

impl TranspositionInput {
    /// Validate input parameters.
    pub fn validate(&self) -> OpticsResult<()> {
        require_finite("sphere_d", self.sphere_d)?;
        require_finite("cylinder_d", self.cylinder_d)?;
        validate_axis("axis_deg", self.axis_deg)?;
        Ok(())
    }
}

/// Transpose a prescription to the opposite cylinder form.
pub fn calculate(input: &TranspositionInput) -> OpticsResult<TranspositionResult> {
    input.validate()?;

    let mut axis = input.axis_deg + 90.0;
    if axis > 180.0 {
        axis -= 180.0;
    }

    Ok(TranspositionResult {
        sphere_d: input.sphere_d + input.cylinder_d,
        cylinder_d: -input.cylinder_d,
        axis_deg: axis,
    })
}
