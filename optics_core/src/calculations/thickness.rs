//! # Spherical Lens Thickness
//!
//! Approximate center or edge thickness of a spherical lens from its power,
//! material index, blank diameter, and minimum substance.
//!
//! ## Assumptions
//!
//! - All the power is placed on one surface (thin-lens form)
//! - Plus lenses are knife-edged: the minimum thickness sits at the edge
//!   and the sagitta adds to the center
//! - Minus lenses carry the minimum thickness at the center and the sagitta
//!   adds to the edge
//!
//! ## Example
//!
//! ```rust
//! use optics_core::calculations::thickness::{ThicknessInput, ThicknessKind, calculate};
//!
//! let input = ThicknessInput {
//!     sphere_d: -4.0,
//!     refractive_index: 1.498,
//!     diameter_mm: 70.0,
//!     min_thickness_mm: 2.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.kind, ThicknessKind::Edge);
//! assert!((result.thickness_mm - 7.02).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::require_finite;
use crate::errors::{OpticsError, OpticsResult};
use crate::geometry::sagitta_mm;

/// Input parameters for a spherical thickness estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "sphere_d": -4.0,
///   "refractive_index": 1.498,
///   "diameter_mm": 70.0,
///   "min_thickness_mm": 2.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThicknessInput {
    /// Signed sphere power in diopters
    pub sphere_d: f64,

    /// Refractive index of the lens material (> 1)
    pub refractive_index: f64,

    /// Finished blank diameter in millimeters
    pub diameter_mm: f64,

    /// Minimum substance thickness in millimeters (edge for plus lenses,
    /// center for minus lenses)
    pub min_thickness_mm: f64,
}

/// Which thickness the result value describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThicknessKind {
    /// Center thickness (plus or plano lens)
    Center,
    /// Edge thickness (minus lens)
    Edge,
}

/// Results from the spherical thickness calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThicknessResult {
    /// Estimated thickness in millimeters
    pub thickness_mm: f64,

    /// Whether the value is a center or an edge thickness
    pub kind: ThicknessKind,

    /// Surface sagitta over the blank diameter (mm), for reference
    pub sagitta_mm: f64,
}

impl ThicknessInput {
    /// Validate input parameters.
    pub fn validate(&self) -> OpticsResult<()> {
        require_finite("sphere_d", self.sphere_d)?;
        require_finite("refractive_index", self.refractive_index)?;
        require_finite("diameter_mm", self.diameter_mm)?;
        require_finite("min_thickness_mm", self.min_thickness_mm)?;

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
        if self.min_thickness_mm < 0.0 {
            return Err(OpticsError::invalid_input(
                "min_thickness_mm",
                self.min_thickness_mm.to_string(),
                "Minimum thickness cannot be negative",
            ));
        }
        Ok(())
    }
}

/// Calculate the center or edge thickness of a spherical lens.
///
/// # Returns
///
/// * `Ok(ThicknessResult)` - thickness, which kind it is, and the sagitta
/// * `Err(OpticsError)` - invalid input, or `ImpossibleGeometry` when the
///   power is too strong for the requested diameter
pub fn calculate(input: &ThicknessInput) -> OpticsResult<ThicknessResult> {
    input.validate()?;

    // Plano: no curve, the lens is the minimum substance throughout.
    if input.sphere_d == 0.0 {
        return Ok(ThicknessResult {
            thickness_mm: input.min_thickness_mm,
            kind: ThicknessKind::Center,
            sagitta_mm: 0.0,
        });
    }

    let sag = sagitta_mm(
        input.sphere_d,
        input.refractive_index,
        input.diameter_mm,
        "sphere",
    )?;

    let kind = if input.sphere_d > 0.0 {
        ThicknessKind::Center
    } else {
        ThicknessKind::Edge
    };

    Ok(ThicknessResult {
        thickness_mm: sag + input.min_thickness_mm,
        kind,
        sagitta_mm: sag,
    })
}
