//! # Shared Surface Geometry
//!
//! The sagitta and radius-of-curvature formulas used by every thickness
//! calculation. Both the spherical and toric calculators go through this
//! one implementation so a geometry check behaves identically everywhere.
//!
//! A surface of power `F` in a material of index `n` has radius
//! `r = 1000·(n − 1) / F` millimeters; its sagitta over an aperture of
//! semi-diameter `s` is `r − sqrt(r² − s²)`. The sagitta is only defined
//! while `r > s` — a stronger curve cannot physically span the aperture.

use crate::errors::{OpticsError, OpticsResult};

/// Radius of curvature in millimeters for a surface of the given power.
///
/// Returns the magnitude; the sign convention is handled by the caller.
/// Power must be non-zero (a plano surface has no finite radius).
pub fn radius_of_curvature_mm(power_d: f64, index: f64) -> f64 {
    (1000.0 * (index - 1.0) / power_d).abs()
}

/// Sagitta in millimeters of a surface of `power_d` diopters over a lens of
/// `diameter_mm`, in a material of refractive index `index`.
///
/// A plano surface (`power_d == 0`) has zero sagitta. Fails with
/// [`OpticsError::ImpossibleGeometry`] when the radius of curvature is not
/// greater than the semi-diameter; `meridian` labels the failing meridian
/// in the error (e.g. `"90°"` or `"sphere"`).
pub fn sagitta_mm(
    power_d: f64,
    index: f64,
    diameter_mm: f64,
    meridian: &str,
) -> OpticsResult<f64> {
    if power_d == 0.0 {
        return Ok(0.0);
    }

    let radius = radius_of_curvature_mm(power_d, index);
    let semi_diameter = diameter_mm / 2.0;

    if radius <= semi_diameter {
        return Err(OpticsError::impossible_geometry(
            meridian,
            radius,
            semi_diameter,
        ));
    }

    Ok(radius - (radius.powi(2) - semi_diameter.powi(2)).sqrt())
}
