//! # Progressive Effective Add
//!
//! Add power available part-way down a progressive corridor, as a linear
//! interpolation between the fitting cross (0%) and the full add (100%).
//!
//! This is a simplified linear approximation for dispensing guidance, not a
//! physical model of any particular progressive design's power profile.
//!
//! ## Example
//!
//! ```rust
//! use optics_core::calculations::effective_add::{EffectiveAddInput, calculate};
//!
//! let input = EffectiveAddInput {
//!     add_power_d: 2.0,
//!     corridor_length_mm: 14.0,
//!     distance_mm: 7.0,
//! };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.effective_add_d, 1.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::require_finite;
use crate::errors::{OpticsError, OpticsResult};

/// Input parameters for the effective-add estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveAddInput {
    /// Prescribed add power, diopters
    pub add_power_d: f64,

    /// Corridor length from fitting cross to full add, millimeters
    pub corridor_length_mm: f64,

    /// Distance down the corridor from the fitting cross, millimeters
    pub distance_mm: f64,
}

/// Results from the effective-add estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveAddResult {
    /// Add power available at the given distance, diopters
    pub effective_add_d: f64,

    /// Fraction of the corridor traversed, 0 to 1
    pub corridor_fraction: f64,
}

impl EffectiveAddInput {
    /// Validate input parameters.
    pub fn validate(&self) -> OpticsResult<()> {
        require_finite("add_power_d", self.add_power_d)?;
        require_finite("corridor_length_mm", self.corridor_length_mm)?;
        require_finite("distance_mm", self.distance_mm)?;

        if self.corridor_length_mm <= 0.0 {
            return Err(OpticsError::invalid_input(
                "corridor_length_mm",
                self.corridor_length_mm.to_string(),
                "Corridor length must be positive",
            ));
        }
        if self.distance_mm < 0.0 || self.distance_mm > self.corridor_length_mm {
            return Err(OpticsError::invalid_input(
                "distance_mm",
                self.distance_mm.to_string(),
                format!(
                    "Distance must lie within the corridor (0 to {} mm)",
                    self.corridor_length_mm
                ),
            ));
        }
        Ok(())
    }
}

/// Estimate the effective add power at a point down the corridor.
pub fn calculate(input: &EffectiveAddInput) -> OpticsResult<EffectiveAddResult> {
    input.validate()?;

    let corridor_fraction = input.distance_mm / input.corridor_length_mm;

    Ok(EffectiveAddResult {
        effective_add_d: corridor_fraction * input.add_power_d,
        corridor_fraction,
    })
}
