//! # Step-Along Vergence
//!
//! Image vergence and image distance after refraction at a surface:
//! `L' = L + F`, `l' = n'/L'`. An optional second meridian handles
//! astigmatic systems; both meridians see the same object vergence and are
//! computed independently.
//!
//! ## Example
//!
//! ```rust
//! use optics_core::calculations::vergence::{VergenceInput, calculate};
//!
//! // Distant object through a +5.00 D surface in air
//! let input = VergenceInput {
//!     object_vergence_d: 0.0,
//!     surface_power_d: 5.0,
//!     cross_surface_power_d: None,
//!     refractive_index: 1.0,
//! };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.primary.image_distance_cm, 20.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::require_finite;
use crate::errors::{OpticsError, OpticsResult};
use crate::units::{Centimeters, Meters};

/// Image vergences below this magnitude are treated as the singular case.
const SINGULARITY_EPS: f64 = 1e-9;

/// Input parameters for the step-along calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "object_vergence_d": -2.0,
///   "surface_power_d": 5.0,
///   "cross_surface_power_d": 7.0,
///   "refractive_index": 1.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VergenceInput {
    /// Object vergence arriving at the surface, diopters
    pub object_vergence_d: f64,

    /// Surface power in the primary meridian, diopters
    pub surface_power_d: f64,

    /// Surface power in the cross meridian, diopters (astigmatic systems)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_surface_power_d: Option<f64>,

    /// Refractive index of the image space (1.0 for air)
    pub refractive_index: f64,
}

/// Vergence outcome for a single meridian.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeridianVergence {
    /// Surface power used for this meridian, diopters
    pub surface_power_d: f64,

    /// Image vergence L' = L + F, diopters
    pub image_vergence_d: f64,

    /// Image distance l' = n'/L', centimeters (signed; positive is to the
    /// right of the surface)
    pub image_distance_cm: f64,
}

/// Results from the step-along calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VergenceResult {
    /// Primary meridian
    pub primary: MeridianVergence,

    /// Cross meridian, when a second surface power was supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross: Option<MeridianVergence>,
}

impl VergenceInput {
    /// Validate input parameters.
    pub fn validate(&self) -> OpticsResult<()> {
        require_finite("object_vergence_d", self.object_vergence_d)?;
        require_finite("surface_power_d", self.surface_power_d)?;
        if let Some(cross) = self.cross_surface_power_d {
            require_finite("cross_surface_power_d", cross)?;
        }
        require_finite("refractive_index", self.refractive_index)?;

        if self.refractive_index < 1.0 {
            return Err(OpticsError::invalid_input(
                "refractive_index",
                self.refractive_index.to_string(),
                "Image-space index must be at least 1 (1.0 for air)",
            ));
        }
        Ok(())
    }
}

fn step_meridian(
    object_vergence_d: f64,
    surface_power_d: f64,
    index: f64,
    meridian: &str,
) -> OpticsResult<MeridianVergence> {
    let image_vergence_d = object_vergence_d + surface_power_d;
    if image_vergence_d.abs() < SINGULARITY_EPS {
        return Err(OpticsError::vergence_singularity(
            "step-along vergence",
            format!(
                "image vergence is zero in the {meridian} meridian \
                 (L = {object_vergence_d} D, F = {surface_power_d} D); \
                 the image is at infinity"
            ),
        ));
    }

    // l' = n'/L' meters, reported in centimeters
    let image_distance = Centimeters::from(Meters(index / image_vergence_d));

    Ok(MeridianVergence {
        surface_power_d,
        image_vergence_d,
        image_distance_cm: image_distance.value(),
    })
}

/// Step the object vergence through the surface, per meridian.
pub fn calculate(input: &VergenceInput) -> OpticsResult<VergenceResult> {
    input.validate()?;

    let primary = step_meridian(
        input.object_vergence_d,
        input.surface_power_d,
        input.refractive_index,
        "primary",
    )?;

    let cross = input
        .cross_surface_power_d
        .map(|power| {
            step_meridian(
                input.object_vergence_d,
                power,
                input.refractive_index,
                "cross",
            )
        })
        .transpose()?;

    Ok(VergenceResult { primary, cross })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distant_object_focal_length() {
        let result = calculate(&VergenceInput {
            object_vergence_d: 0.0,
            surface_power_d: 5.0,
            cross_surface_power_d: None,
            refractive_index: 1.0,
        })
        .unwrap();
        assert_eq!(result.primary.image_vergence_d, 5.0);
        assert_eq!(result.primary.image_distance_cm, 20.0);
        assert!(result.cross.is_none());
    }

    #[test]
    fn test_near_object() {
        // Object at -50 cm: L = -2 D; through +5 D: L' = 3 D, l' = 33.3 cm
        let result = calculate(&VergenceInput {
            object_vergence_d: -2.0,
            surface_power_d: 5.0,
            cross_surface_power_d: None,
            refractive_index: 1.0,
        })
        .unwrap();
        assert_eq!(result.primary.image_vergence_d, 3.0);
        assert!((result.primary.image_distance_cm - 33.333_333).abs() < 1e-4);
    }

    #[test]
    fn test_astigmatic_meridians_independent() {
        let result = calculate(&VergenceInput {
            object_vergence_d: 0.0,
            surface_power_d: 5.0,
            cross_surface_power_d: Some(7.0),
            refractive_index: 1.0,
        })
        .unwrap();
        let cross = result.cross.unwrap();
        assert_eq!(cross.image_vergence_d, 7.0);
        assert!((cross.image_distance_cm - 14.285_714).abs() < 1e-4);
        // Primary unchanged by the presence of a cross meridian
        assert_eq!(result.primary.image_distance_cm, 20.0);
    }

    #[test]
    fn test_denser_image_space() {
        // Inside n' = 1.336: l' = 100 * 1.336 / 5 = 26.72 cm
        let result = calculate(&VergenceInput {
            object_vergence_d: 0.0,
            surface_power_d: 5.0,
            cross_surface_power_d: None,
            refractive_index: 1.336,
        })
        .unwrap();
        assert!((result.primary.image_distance_cm - 26.72).abs() < 1e-9);
    }

    #[test]
    fn test_singularity_at_focal_conjugate() {
        let err = calculate(&VergenceInput {
            object_vergence_d: -5.0,
            surface_power_d: 5.0,
            cross_surface_power_d: None,
            refractive_index: 1.0,
        })
        .unwrap_err();
        assert_eq!(err.error_code(), "VERGENCE_SINGULARITY");
    }

    #[test]
    fn test_singularity_in_cross_meridian_only() {
        let err = calculate(&VergenceInput {
            object_vergence_d: -5.0,
            surface_power_d: 3.0,
            cross_surface_power_d: Some(5.0),
            refractive_index: 1.0,
        })
        .unwrap_err();
        match err {
            OpticsError::VergenceSingularity { reason, .. } => {
                assert!(reason.contains("cross"));
            }
            other => panic!("expected VergenceSingularity, got {other:?}"),
        }
    }

    #[test]
    fn test_sub_unity_index_rejected() {
        let result = calculate(&VergenceInput {
            object_vergence_d: 0.0,
            surface_power_d: 5.0,
            cross_surface_power_d: None,
            refractive_index: 0.9,
        });
        assert!(result.is_err());
    }
}
