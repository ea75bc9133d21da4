//! # Spectacle-to-Contact-Lens Conversion
//!
//! Vertex-compensates the sphere of a spectacle prescription to the corneal
//! plane and rounds it to the nearest quarter diopter, the step contact
//! lenses are manufactured in.
//!
//! Known limitation: the cylinder and axis pass through unchanged. Proper
//! toric vertex compensation works per principal meridian and is not
//! offered by this tool.
//!
//! ## Example
//!
//! ```rust
//! use optics_core::calculations::contact_lens::{ContactLensInput, calculate};
//!
//! let input = ContactLensInput {
//!     sphere_d: -9.0,
//!     cylinder_d: -0.75,
//!     axis_deg: 180.0,
//!     vertex_mm: 12.0,
//! };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.sphere_d, -8.0);
//! assert_eq!(result.cylinder_d, -0.75);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::vertex::compensate_power;
use crate::calculations::{require_finite, validate_axis};
use crate::errors::{OpticsError, OpticsResult};
use crate::units::{Meters, Millimeters};

/// Contact lens powers come in quarter-diopter steps.
pub const DIOPTER_STEP: f64 = 0.25;

/// Input parameters: the spectacle prescription and its vertex distance.
///
/// ## JSON Example
///
/// ```json
/// { "sphere_d": -9.0, "cylinder_d": -0.75, "axis_deg": 180.0, "vertex_mm": 12.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactLensInput {
    /// Spectacle sphere power, diopters
    pub sphere_d: f64,

    /// Spectacle cylinder power, diopters (passed through unchanged)
    pub cylinder_d: f64,

    /// Cylinder axis in degrees, (0, 180]; ignored when cylinder is zero
    pub axis_deg: f64,

    /// Spectacle vertex distance, millimeters
    pub vertex_mm: f64,
}

/// The contact lens prescription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactLensResult {
    /// Compensated sphere, rounded to the nearest 0.25 D
    pub sphere_d: f64,

    /// Compensated sphere before rounding, for reference
    pub exact_sphere_d: f64,

    /// Cylinder, unchanged from the spectacle prescription
    pub cylinder_d: f64,

    /// Axis, unchanged from the spectacle prescription
    pub axis_deg: f64,
}

impl ContactLensInput {
    /// Validate input parameters.
    pub fn validate(&self) -> OpticsResult<()> {
        require_finite("sphere_d", self.sphere_d)?;
        require_finite("cylinder_d", self.cylinder_d)?;
        // The axis is echoed into the result even for spheres, so it must
        // at least be a real number; the range convention only binds when
        // there is a cylinder for it to orient.
        require_finite("axis_deg", self.axis_deg)?;
        require_finite("vertex_mm", self.vertex_mm)?;
        if self.cylinder_d != 0.0 {
            validate_axis("axis_deg", self.axis_deg)?;
        }
        if self.vertex_mm < 0.0 {
            return Err(OpticsError::invalid_input(
                "vertex_mm",
                self.vertex_mm.to_string(),
                "Vertex distance cannot be negative",
            ));
        }
        Ok(())
    }
}

/// Round a power to the nearest manufacturing step.
fn round_to_step(power_d: f64) -> f64 {
    (power_d / DIOPTER_STEP).round() * DIOPTER_STEP
}

/// Convert a spectacle prescription to a contact lens prescription.
pub fn calculate(input: &ContactLensInput) -> OpticsResult<ContactLensResult> {
    input.validate()?;

    let exact = compensate_power(
        input.sphere_d,
        Meters::from(Millimeters(input.vertex_mm)).value(),
    )?;

    Ok(ContactLensResult {
        sphere_d: round_to_step(exact),
        exact_sphere_d: exact,
        cylinder_d: input.cylinder_d,
        axis_deg: input.axis_deg,
    })
}
