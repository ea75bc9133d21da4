//! # Optical Calculations
//!
//! This module contains all dispensing calculation types. Each calculation
//! follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, OpticsError>` - Pure calculation function
//!
//! All functions are pure and stateless: same input, same output, no side
//! effects, safe to call concurrently without synchronization.
//!
//! ## Available Calculations
//!
//! - [`thickness`] - Spherical lens center/edge thickness
//! - [`toric`] - Toric edge thickness profile
//! - [`prism`] - Induced prism (Prentice's rule)
//! - [`vertex`] - Vertex distance power compensation
//! - [`transposition`] - Plus/minus cylinder transposition
//! - [`contact_lens`] - Spectacle-to-contact-lens conversion
//! - [`blank_size`] - Minimum blank size (frame and effective-diameter)
//! - [`effective_add`] - Progressive effective add
//! - [`vergence`] - Step-along vergence, per meridian

pub mod blank_size;
pub mod contact_lens;
pub mod effective_add;
pub mod prism;
pub mod thickness;
pub mod toric;
pub mod transposition;
pub mod vergence;
pub mod vertex;

use serde::{Deserialize, Serialize};

use crate::errors::{OpticsError, OpticsResult};

// Re-export commonly used types
pub use blank_size::{BlankSizeResult, EffectiveDiameterBlankInput, FrameBlankInput};
pub use contact_lens::{ContactLensInput, ContactLensResult};
pub use effective_add::{EffectiveAddInput, EffectiveAddResult};
pub use prism::{PrismInput, PrismResult};
pub use thickness::{ThicknessInput, ThicknessKind, ThicknessResult};
pub use toric::{ToricThicknessInput, ToricThicknessResult};
pub use transposition::{TranspositionInput, TranspositionResult};
pub use vergence::{VergenceInput, VergenceResult};
pub use vertex::{VertexInput, VertexResult};

/// Reject NaN and infinite inputs before they reach the arithmetic.
pub(crate) fn require_finite(field: &str, value: f64) -> OpticsResult<()> {
    if !value.is_finite() {
        return Err(OpticsError::invalid_input(
            field,
            value.to_string(),
            "Value must be a finite number",
        ));
    }
    Ok(())
}

/// Validate a cylinder axis against the (0, 180] degree convention.
pub(crate) fn validate_axis(field: &str, axis_deg: f64) -> OpticsResult<()> {
    require_finite(field, axis_deg)?;
    if axis_deg <= 0.0 || axis_deg > 180.0 {
        return Err(OpticsError::invalid_input(
            field,
            axis_deg.to_string(),
            "Axis must be in the range (0, 180] degrees",
        ));
    }
    Ok(())
}

/// Enum wrapper for all calculation types.
///
/// This allows storing heterogeneous calculations in a single collection
/// and driving any tool through one JSON entry point while maintaining
/// type safety and clean serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Spherical lens thickness
    Thickness(ThicknessInput),
    /// Toric edge thickness profile
    ToricThickness(ToricThicknessInput),
    /// Induced prism (Prentice's rule)
    Prism(PrismInput),
    /// Vertex distance compensation
    Vertex(VertexInput),
    /// Prescription transposition
    Transposition(TranspositionInput),
    /// Spectacle-to-contact-lens conversion
    ContactLens(ContactLensInput),
    /// Minimum blank size from frame measurements
    FrameBlank(FrameBlankInput),
    /// Minimum blank size from effective diameter
    EffectiveDiameterBlank(EffectiveDiameterBlankInput),
    /// Progressive effective add
    EffectiveAdd(EffectiveAddInput),
    /// Step-along vergence
    Vergence(VergenceInput),
}

/// Result counterpart of [`CalculationItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    Thickness(ThicknessResult),
    ToricThickness(ToricThicknessResult),
    Prism(PrismResult),
    Vertex(VertexResult),
    Transposition(TranspositionResult),
    ContactLens(ContactLensResult),
    FrameBlank(BlankSizeResult),
    EffectiveDiameterBlank(BlankSizeResult),
    EffectiveAdd(EffectiveAddResult),
    Vergence(VergenceResult),
}

impl CalculationItem {
    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Thickness(_) => "Thickness",
            CalculationItem::ToricThickness(_) => "ToricThickness",
            CalculationItem::Prism(_) => "Prism",
            CalculationItem::Vertex(_) => "Vertex",
            CalculationItem::Transposition(_) => "Transposition",
            CalculationItem::ContactLens(_) => "ContactLens",
            CalculationItem::FrameBlank(_) => "FrameBlank",
            CalculationItem::EffectiveDiameterBlank(_) => "EffectiveDiameterBlank",
            CalculationItem::EffectiveAdd(_) => "EffectiveAdd",
            CalculationItem::Vergence(_) => "Vergence",
        }
    }

    /// Run the wrapped calculation.
    pub fn run(&self) -> OpticsResult<CalculationOutput> {
        match self {
            CalculationItem::Thickness(input) => {
                thickness::calculate(input).map(CalculationOutput::Thickness)
            }
            CalculationItem::ToricThickness(input) => {
                toric::calculate(input).map(CalculationOutput::ToricThickness)
            }
            CalculationItem::Prism(input) => prism::calculate(input).map(CalculationOutput::Prism),
            CalculationItem::Vertex(input) => {
                vertex::calculate(input).map(CalculationOutput::Vertex)
            }
            CalculationItem::Transposition(input) => {
                transposition::calculate(input).map(CalculationOutput::Transposition)
            }
            CalculationItem::ContactLens(input) => {
                contact_lens::calculate(input).map(CalculationOutput::ContactLens)
            }
            CalculationItem::FrameBlank(input) => {
                blank_size::calculate_from_frame(input).map(CalculationOutput::FrameBlank)
            }
            CalculationItem::EffectiveDiameterBlank(input) => {
                blank_size::calculate_from_effective_diameter(input)
                    .map(CalculationOutput::EffectiveDiameterBlank)
            }
            CalculationItem::EffectiveAdd(input) => {
                effective_add::calculate(input).map(CalculationOutput::EffectiveAdd)
            }
            CalculationItem::Vergence(input) => {
                vergence::calculate(input).map(CalculationOutput::Vergence)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_from_json() {
        let json = r#"{
            "type": "Prism",
            "power_d": 4.0,
            "decentration_mm": 3.0
        }"#;
        let item: CalculationItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.calc_type(), "Prism");

        match item.run().unwrap() {
            CalculationOutput::Prism(result) => {
                assert!((result.prism_diopters - 1.2).abs() < 1e-9);
            }
            other => panic!("expected Prism output, got {other:?}"),
        }
    }

    #[test]
    fn test_dispatch_surfaces_errors() {
        let item = CalculationItem::FrameBlank(FrameBlankInput {
            eye_size_mm: 44.0,
            bridge_size_mm: 14.0,
            patient_pd_mm: 70.0,
        });
        let err = item.run().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_axis_validation_bounds() {
        assert!(validate_axis("axis_deg", 1.0).is_ok());
        assert!(validate_axis("axis_deg", 180.0).is_ok());
        assert!(validate_axis("axis_deg", 0.0).is_err());
        assert!(validate_axis("axis_deg", 180.5).is_err());
        assert!(validate_axis("axis_deg", f64::NAN).is_err());
    }
}
