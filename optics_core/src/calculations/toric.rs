//! # Toric Edge Thickness
//!
//! Thickness profile of a sphero-cylindrical lens: the thinnest and
//! thickest edge and the center substance, from the two principal meridian
//! powers. Uses the same shared sagitta formula as the spherical
//! calculator, so with zero cylinder the two agree exactly.
//!
//! ## Example
//!
//! ```rust
//! use optics_core::calculations::toric::{ToricThicknessInput, calculate};
//!
//! let input = ToricThicknessInput {
//!     sphere_d: -2.0,
//!     cylinder_d: -1.5,
//!     axis_deg: 180.0,
//!     refractive_index: 1.498,
//!     diameter_mm: 65.0,
//!     reference_thickness_mm: 2.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!(result.max_edge_mm >= result.min_edge_mm);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{require_finite, validate_axis};
use crate::errors::{OpticsError, OpticsResult};
use crate::geometry::sagitta_mm;

/// Input parameters for the toric thickness profile.
///
/// ## JSON Example
///
/// ```json
/// {
///   "sphere_d": -2.0,
///   "cylinder_d": -1.5,
///   "axis_deg": 180.0,
///   "refractive_index": 1.498,
///   "diameter_mm": 65.0,
///   "reference_thickness_mm": 2.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToricThicknessInput {
    /// Sphere power in diopters
    pub sphere_d: f64,

    /// Cylinder power in diopters (either sign convention)
    pub cylinder_d: f64,

    /// Cylinder axis in degrees, (0, 180]
    pub axis_deg: f64,

    /// Refractive index of the lens material (> 1)
    pub refractive_index: f64,

    /// Finished blank diameter in millimeters
    pub diameter_mm: f64,

    /// Reference substance thickness in millimeters: the minimum edge for a
    /// plus-form lens, the center for a minus-form lens
    pub reference_thickness_mm: f64,
}

/// Results from the toric thickness calculation. All values ≥ 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToricThicknessResult {
    /// Thinnest edge thickness (mm)
    pub min_edge_mm: f64,

    /// Thickest edge thickness (mm)
    pub max_edge_mm: f64,

    /// Center thickness (mm)
    pub center_mm: f64,
}

impl ToricThicknessInput {
    /// Validate input parameters.
    pub fn validate(&self) -> OpticsResult<()> {
        require_finite("sphere_d", self.sphere_d)?;
        require_finite("cylinder_d", self.cylinder_d)?;
        require_finite("refractive_index", self.refractive_index)?;
        require_finite("diameter_mm", self.diameter_mm)?;
        require_finite("reference_thickness_mm", self.reference_thickness_mm)?;
        validate_axis("axis_deg", self.axis_deg)?;

        if self.refractive_index <= 1.0 {
            return Err(OpticsError::invalid_input(
                "refractive_index",
                self.refractive_index.to_string(),
                "Refractive index must be greater than 1",
            ));
        }
        if self.diameter_mm <= 0.0 {
            return Err(OpticsError::invalid_input(
                "diameter_mm",
                self.diameter_mm.to_string(),
                "Blank diameter must be positive",
            ));
        }
        if self.reference_thickness_mm < 0.0 {
            return Err(OpticsError::invalid_input(
                "reference_thickness_mm",
                self.reference_thickness_mm.to_string(),
                "Reference thickness cannot be negative",
            ));
        }
        Ok(())
    }

    /// Axis of the cross meridian, 90° from the cylinder axis, kept in
    /// (0, 180].
    pub fn cross_axis_deg(&self) -> f64 {
        let cross = self.axis_deg + 90.0;
        if cross > 180.0 {
            cross - 180.0
        } else {
            cross
        }
    }
}

/// Calculate the toric thickness profile.
///
/// The two principal powers are `sphere` (along the cylinder axis) and
/// `sphere + cylinder` (along the cross meridian). A geometry failure
/// reports which meridian could not be formed.
pub fn calculate(input: &ToricThicknessInput) -> OpticsResult<ToricThicknessResult> {
    input.validate()?;

    let power_axis = input.sphere_d;
    let power_cross = input.sphere_d + input.cylinder_d;

    let sag_axis = sagitta_mm(
        power_axis,
        input.refractive_index,
        input.diameter_mm,
        &format!("{:.0}°", input.axis_deg),
    )?;
    let sag_cross = sagitta_mm(
        power_cross,
        input.refractive_index,
        input.diameter_mm,
        &format!("{:.0}°", input.cross_axis_deg()),
    )?;

    let min_sag = sag_axis.min(sag_cross);
    let max_sag = sag_axis.max(sag_cross);

    let t_ref = input.reference_thickness_mm;

    // Plus form: the strongest meridian is plus, so the curve builds center
    // substance and the reference thickness is the thinnest edge.
    // Minus form: the curve builds edge substance over the reference center.
    let (min_edge, max_edge, center) = if power_axis.max(power_cross) > 0.0 {
        let center = max_sag + t_ref;
        (t_ref, center - min_sag, center)
    } else {
        (min_sag + t_ref, max_sag + t_ref, t_ref)
    };

    Ok(ToricThicknessResult {
        min_edge_mm: min_edge,
        max_edge_mm: max_edge,
        center_mm: center,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::thickness::{self, ThicknessInput, ThicknessKind};

    fn test_input() -> ToricThicknessInput {
        ToricThicknessInput {
            sphere_d: -2.0,
            cylinder_d: -1.5,
            axis_deg: 180.0,
            refractive_index: 1.498,
            diameter_mm: 65.0,
            reference_thickness_mm: 2.0,
        }
    }

    #[test]
    fn test_minus_form_profile() {
        let result = calculate(&test_input()).unwrap();
        // Minus form: center is the reference substance
        assert_eq!(result.center_mm, 2.0);
        assert!(result.min_edge_mm > result.center_mm);
        assert!(result.max_edge_mm > result.min_edge_mm);
    }

    #[test]
    fn test_plus_form_profile() {
        let mut input = test_input();
        input.sphere_d = 3.0;
        input.cylinder_d = -1.0;
        let result = calculate(&input).unwrap();
        // Plus form: thinnest edge is the reference substance
        assert_eq!(result.min_edge_mm, 2.0);
        assert!(result.center_mm > result.min_edge_mm);
        assert!(result.max_edge_mm >= result.min_edge_mm);
        assert!(result.max_edge_mm <= result.center_mm);
    }

    #[test]
    fn test_zero_cylinder_matches_spherical_minus() {
        let mut input = test_input();
        input.cylinder_d = 0.0;
        let toric = calculate(&input).unwrap();

        let spherical = thickness::calculate(&ThicknessInput {
            sphere_d: input.sphere_d,
            refractive_index: input.refractive_index,
            diameter_mm: input.diameter_mm,
            min_thickness_mm: input.reference_thickness_mm,
        })
        .unwrap();

        assert_eq!(spherical.kind, ThicknessKind::Edge);
        assert!((toric.min_edge_mm - spherical.thickness_mm).abs() < 1e-12);
        assert!((toric.max_edge_mm - spherical.thickness_mm).abs() < 1e-12);
        assert_eq!(toric.center_mm, input.reference_thickness_mm);
    }

    #[test]
    fn test_zero_cylinder_matches_spherical_plus() {
        let mut input = test_input();
        input.sphere_d = 4.0;
        input.cylinder_d = 0.0;
        let toric = calculate(&input).unwrap();

        let spherical = thickness::calculate(&ThicknessInput {
            sphere_d: input.sphere_d,
            refractive_index: input.refractive_index,
            diameter_mm: input.diameter_mm,
            min_thickness_mm: input.reference_thickness_mm,
        })
        .unwrap();

        assert_eq!(spherical.kind, ThicknessKind::Center);
        assert!((toric.center_mm - spherical.thickness_mm).abs() < 1e-12);
        assert_eq!(toric.min_edge_mm, input.reference_thickness_mm);
    }

    #[test]
    fn test_geometry_failure_names_cross_meridian() {
        let mut input = test_input();
        // Axis meridian is fine at -2 D; cross meridian at -22 D is not
        input.cylinder_d = -20.0;
        input.axis_deg = 90.0;
        let err = calculate(&input).unwrap_err();
        match err {
            OpticsError::ImpossibleGeometry { meridian, .. } => {
                assert_eq!(meridian, "180°");
            }
            other => panic!("expected ImpossibleGeometry, got {other:?}"),
        }
    }

    #[test]
    fn test_cross_axis_wraps() {
        let mut input = test_input();
        input.axis_deg = 135.0;
        assert_eq!(input.cross_axis_deg(), 45.0);
        input.axis_deg = 90.0;
        assert_eq!(input.cross_axis_deg(), 180.0);
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        // NaN slips past ordinary range comparisons; every field must be
        // screened before the arithmetic runs.
        let mut input = test_input();
        input.refractive_index = f64::NAN;
        assert!(calculate(&input).is_err());

        let mut input = test_input();
        input.diameter_mm = f64::NAN;
        assert!(calculate(&input).is_err());

        let mut input = test_input();
        input.sphere_d = f64::INFINITY;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_invalid_axis() {
        let mut input = test_input();
        input.axis_deg = 181.0;
        assert!(calculate(&input).is_err());
        input.axis_deg = 0.0;
        assert!(calculate(&input).is_err());
    }
}
