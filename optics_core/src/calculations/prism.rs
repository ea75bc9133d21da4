//! # Induced Prism (Prentice's Rule)
//!
//! Prism induced by viewing through a lens away from its optical center:
//! `Δ = |F| × c`, power in diopters, decentration in centimeters.
//!
//! ## Example
//!
//! ```rust
//! use optics_core::calculations::prism::{PrismInput, calculate};
//!
//! let input = PrismInput { power_d: 4.0, decentration_mm: 3.0 };
//! let result = calculate(&input).unwrap();
//! assert!((result.prism_diopters - 1.2).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::require_finite;
use crate::errors::OpticsResult;
use crate::units::{Centimeters, Millimeters};

/// Input parameters for Prentice's rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrismInput {
    /// Lens power in the meridian of decentration, diopters
    pub power_d: f64,

    /// Decentration from the optical center in millimeters
    pub decentration_mm: f64,
}

/// Results from the induced-prism calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrismResult {
    /// Induced prism in prism diopters (Δ), always ≥ 0
    pub prism_diopters: f64,

    /// Decentration converted to centimeters, for reference
    pub decentration_cm: f64,
}

impl PrismInput {
    /// Validate input parameters.
    pub fn validate(&self) -> OpticsResult<()> {
        require_finite("power_d", self.power_d)?;
        require_finite("decentration_mm", self.decentration_mm)?;
        Ok(())
    }
}

/// Calculate induced prism by Prentice's rule.
///
/// Total over all finite inputs; magnitudes are used so the result is
/// never negative regardless of the signs supplied.
pub fn calculate(input: &PrismInput) -> OpticsResult<PrismResult> {
    input.validate()?;

    let decentration = Centimeters::from(Millimeters(input.decentration_mm.abs()));
    let decentration_cm = decentration.value();
    let prism_diopters = input.power_d.abs() * decentration_cm;

    Ok(PrismResult {
        prism_diopters,
        decentration_cm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_diopters_three_millimeters() {
        let result = calculate(&PrismInput {
            power_d: 4.0,
            decentration_mm: 3.0,
        })
        .unwrap();
        assert!((result.prism_diopters - 1.2).abs() < 1e-9);
        assert!((result.decentration_cm - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_never_negative() {
        for &(power, dec) in &[(-6.0, 2.5), (6.0, -2.5), (-6.0, -2.5), (0.0, 5.0)] {
            let result = calculate(&PrismInput {
                power_d: power,
                decentration_mm: dec,
            })
            .unwrap();
            assert!(result.prism_diopters >= 0.0);
        }
    }

    #[test]
    fn test_rejects_non_finite() {
        let result = calculate(&PrismInput {
            power_d: f64::NAN,
            decentration_mm: 1.0,
        });
        assert!(result.is_err());
    }
}
