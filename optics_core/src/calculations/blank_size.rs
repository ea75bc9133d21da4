//! # Minimum Blank Size
//!
//! The smallest uncut lens blank that can be edged to a frame, from either
//! the boxed frame measurements or the frame's effective diameter. Both
//! variants add the conventional 2 mm edging allowance.
//!
//! ## Example
//!
//! ```rust
//! use optics_core::calculations::blank_size::{FrameBlankInput, calculate_from_frame};
//!
//! let input = FrameBlankInput {
//!     eye_size_mm: 50.0,
//!     bridge_size_mm: 20.0,
//!     patient_pd_mm: 64.0,
//! };
//! let result = calculate_from_frame(&input).unwrap();
//! assert_eq!(result.minimum_blank_mm, 58.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::require_finite;
use crate::errors::{OpticsError, OpticsResult};

/// Extra diameter added for edging and glazing. A trade convention, not a
/// derived value.
pub const EDGING_ALLOWANCE_MM: f64 = 2.0;

/// Input for the frame-measurement variant (boxed eye and bridge sizes).
///
/// ## JSON Example
///
/// ```json
/// { "eye_size_mm": 50.0, "bridge_size_mm": 20.0, "patient_pd_mm": 64.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameBlankInput {
    /// Boxed lens (eye) size, millimeters
    pub eye_size_mm: f64,

    /// Bridge size (distance between lenses), millimeters
    pub bridge_size_mm: f64,

    /// Patient's pupillary distance, millimeters
    pub patient_pd_mm: f64,
}

/// Input for the effective-diameter variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveDiameterBlankInput {
    /// Effective diameter of the lens shape, millimeters
    pub effective_diameter_mm: f64,

    /// Frame PD (geometric center distance), millimeters
    pub frame_pd_mm: f64,

    /// Patient's pupillary distance, millimeters
    pub patient_pd_mm: f64,
}

/// Results from either blank-size variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlankSizeResult {
    /// Minimum blank diameter, millimeters
    pub minimum_blank_mm: f64,

    /// Total decentration (frame PD minus patient PD), millimeters
    pub decentration_mm: f64,

    /// Frame PD used in the computation, millimeters
    pub frame_pd_mm: f64,
}

impl FrameBlankInput {
    /// Validate input parameters.
    pub fn validate(&self) -> OpticsResult<()> {
        require_finite("eye_size_mm", self.eye_size_mm)?;
        require_finite("bridge_size_mm", self.bridge_size_mm)?;
        require_finite("patient_pd_mm", self.patient_pd_mm)?;

        if self.eye_size_mm <= 0.0 {
            return Err(OpticsError::invalid_input(
                "eye_size_mm",
                self.eye_size_mm.to_string(),
                "Eye size must be positive",
            ));
        }
        if self.bridge_size_mm < 0.0 {
            return Err(OpticsError::invalid_input(
                "bridge_size_mm",
                self.bridge_size_mm.to_string(),
                "Bridge size cannot be negative",
            ));
        }
        if self.patient_pd_mm <= 0.0 {
            return Err(OpticsError::invalid_input(
                "patient_pd_mm",
                self.patient_pd_mm.to_string(),
                "Patient PD must be positive",
            ));
        }

        let frame_pd = self.eye_size_mm + self.bridge_size_mm;
        if frame_pd < self.patient_pd_mm {
            return Err(OpticsError::invalid_input(
                "patient_pd_mm",
                self.patient_pd_mm.to_string(),
                format!(
                    "Patient PD exceeds frame PD ({frame_pd} mm); \
                     decentration would be negative"
                ),
            ));
        }
        Ok(())
    }
}

impl EffectiveDiameterBlankInput {
    /// Validate input parameters.
    pub fn validate(&self) -> OpticsResult<()> {
        require_finite("effective_diameter_mm", self.effective_diameter_mm)?;
        require_finite("frame_pd_mm", self.frame_pd_mm)?;
        require_finite("patient_pd_mm", self.patient_pd_mm)?;

        if self.effective_diameter_mm <= 0.0 {
            return Err(OpticsError::invalid_input(
                "effective_diameter_mm",
                self.effective_diameter_mm.to_string(),
                "Effective diameter must be positive",
            ));
        }
        if self.patient_pd_mm <= 0.0 {
            return Err(OpticsError::invalid_input(
                "patient_pd_mm",
                self.patient_pd_mm.to_string(),
                "Patient PD must be positive",
            ));
        }
        if self.frame_pd_mm < self.patient_pd_mm {
            return Err(OpticsError::invalid_input(
                "patient_pd_mm",
                self.patient_pd_mm.to_string(),
                format!(
                    "Patient PD exceeds frame PD ({} mm); \
                     decentration would be negative",
                    self.frame_pd_mm
                ),
            ));
        }
        Ok(())
    }
}

/// Minimum blank size from boxed frame measurements.
///
/// Frame PD = eye + bridge; blank = eye size + decentration + allowance.
pub fn calculate_from_frame(input: &FrameBlankInput) -> OpticsResult<BlankSizeResult> {
    input.validate()?;

    let frame_pd_mm = input.eye_size_mm + input.bridge_size_mm;
    let decentration_mm = frame_pd_mm - input.patient_pd_mm;

    Ok(BlankSizeResult {
        minimum_blank_mm: input.eye_size_mm + decentration_mm + EDGING_ALLOWANCE_MM,
        decentration_mm,
        frame_pd_mm,
    })
}

/// Minimum blank size from the frame's effective diameter.
pub fn calculate_from_effective_diameter(
    input: &EffectiveDiameterBlankInput,
) -> OpticsResult<BlankSizeResult> {
    input.validate()?;

    let decentration_mm = input.frame_pd_mm - input.patient_pd_mm;

    Ok(BlankSizeResult {
        minimum_blank_mm: input.effective_diameter_mm + decentration_mm + EDGING_ALLOWANCE_MM,
        decentration_mm,
        frame_pd_mm: input.frame_pd_mm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_based_scenario() {
        // 50/20 frame on a 64 mm PD: frame PD 70, decentration 6,
        // blank = 50 + 6 + 2 = 58
        let result = calculate_from_frame(&FrameBlankInput {
            eye_size_mm: 50.0,
            bridge_size_mm: 20.0,
            patient_pd_mm: 64.0,
        })
        .unwrap();
        assert_eq!(result.minimum_blank_mm, 58.0);
        assert_eq!(result.decentration_mm, 6.0);
        assert_eq!(result.frame_pd_mm, 70.0);
    }

    #[test]
    fn test_effective_diameter_scenario() {
        let result = calculate_from_effective_diameter(&EffectiveDiameterBlankInput {
            effective_diameter_mm: 58.0,
            frame_pd_mm: 70.0,
            patient_pd_mm: 64.0,
        })
        .unwrap();
        assert_eq!(result.minimum_blank_mm, 66.0);
        assert_eq!(result.decentration_mm, 6.0);
    }

    #[test]
    fn test_zero_decentration() {
        let result = calculate_from_frame(&FrameBlankInput {
            eye_size_mm: 48.0,
            bridge_size_mm: 18.0,
            patient_pd_mm: 66.0,
        })
        .unwrap();
        assert_eq!(result.decentration_mm, 0.0);
        assert_eq!(result.minimum_blank_mm, 48.0 + EDGING_ALLOWANCE_MM);
    }

    #[test]
    fn test_pd_wider_than_frame_rejected() {
        let err = calculate_from_frame(&FrameBlankInput {
            eye_size_mm: 44.0,
            bridge_size_mm: 16.0,
            patient_pd_mm: 68.0,
        })
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let err = calculate_from_effective_diameter(&EffectiveDiameterBlankInput {
            effective_diameter_mm: 52.0,
            frame_pd_mm: 60.0,
            patient_pd_mm: 68.0,
        })
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
