//! # Lens Materials Database
//!
//! Common spectacle lens materials and their optical properties. The
//! refractive index drives the thickness and sagitta calculations; Abbe
//! value and density are reported for dispensing guidance.
//!
//! ## Example
//!
//! ```rust
//! use optics_core::materials::LensMaterial;
//!
//! let material = LensMaterial::Polycarbonate;
//! let props = material.properties();
//! assert_eq!(props.refractive_index, 1.586);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{OpticsError, OpticsResult};

/// Spectacle lens materials in common dispensing use.
///
/// Serialized by trade name so stored inputs read naturally:
///
/// ```json
/// { "material": "CR-39" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LensMaterial {
    /// CR-39 hard resin, the dispensing baseline (n = 1.498)
    #[serde(rename = "CR-39")]
    Cr39,
    /// Trivex, impact-resistant with high Abbe (n = 1.53)
    #[serde(rename = "Trivex")]
    Trivex,
    /// Polycarbonate, impact-resistant (n = 1.586)
    #[serde(rename = "Polycarbonate")]
    Polycarbonate,
    /// Mid-index resin (n = 1.60)
    #[serde(rename = "1.60")]
    MidIndex160,
    /// High-index resin (n = 1.67)
    #[serde(rename = "1.67")]
    HighIndex167,
    /// Very high-index resin (n = 1.74)
    #[serde(rename = "1.74")]
    HighIndex174,
    /// Ophthalmic crown glass (n = 1.523)
    #[serde(rename = "Crown glass")]
    CrownGlass,
}

/// Optical and physical properties of a lens material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Refractive index n (always > 1)
    pub refractive_index: f64,
    /// Abbe value (higher = less chromatic aberration)
    pub abbe_value: f64,
    /// Density in g/cm³
    pub density_g_cm3: f64,
}

impl LensMaterial {
    /// Get the optical and physical properties for this material.
    pub fn properties(&self) -> MaterialProperties {
        match self {
            LensMaterial::Cr39 => MaterialProperties {
                refractive_index: 1.498,
                abbe_value: 58.0,
                density_g_cm3: 1.32,
            },
            LensMaterial::Trivex => MaterialProperties {
                refractive_index: 1.53,
                abbe_value: 45.0,
                density_g_cm3: 1.11,
            },
            LensMaterial::Polycarbonate => MaterialProperties {
                refractive_index: 1.586,
                abbe_value: 30.0,
                density_g_cm3: 1.20,
            },
            LensMaterial::MidIndex160 => MaterialProperties {
                refractive_index: 1.60,
                abbe_value: 36.0,
                density_g_cm3: 1.30,
            },
            LensMaterial::HighIndex167 => MaterialProperties {
                refractive_index: 1.67,
                abbe_value: 32.0,
                density_g_cm3: 1.35,
            },
            LensMaterial::HighIndex174 => MaterialProperties {
                refractive_index: 1.74,
                abbe_value: 33.0,
                density_g_cm3: 1.47,
            },
            LensMaterial::CrownGlass => MaterialProperties {
                refractive_index: 1.523,
                abbe_value: 59.0,
                density_g_cm3: 2.54,
            },
        }
    }

    /// Refractive index shortcut, the property the formulas need.
    pub fn refractive_index(&self) -> f64 {
        self.properties().refractive_index
    }

    /// Trade name as shown to the user (matches the serde rename).
    pub fn name(&self) -> &'static str {
        match self {
            LensMaterial::Cr39 => "CR-39",
            LensMaterial::Trivex => "Trivex",
            LensMaterial::Polycarbonate => "Polycarbonate",
            LensMaterial::MidIndex160 => "1.60",
            LensMaterial::HighIndex167 => "1.67",
            LensMaterial::HighIndex174 => "1.74",
            LensMaterial::CrownGlass => "Crown glass",
        }
    }

    /// Look up a material by its trade name.
    pub fn from_name(name: &str) -> OpticsResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| OpticsError::material_not_found(name))
    }

    /// All materials in the database, in index order.
    pub fn all() -> &'static [LensMaterial] {
        &[
            LensMaterial::Cr39,
            LensMaterial::CrownGlass,
            LensMaterial::Trivex,
            LensMaterial::Polycarbonate,
            LensMaterial::MidIndex160,
            LensMaterial::HighIndex167,
            LensMaterial::HighIndex174,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_physical() {
        for material in LensMaterial::all() {
            assert!(material.refractive_index() > 1.0, "{}", material.name());
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let m = LensMaterial::from_name("cr-39").unwrap();
        assert_eq!(m, LensMaterial::Cr39);

        let err = LensMaterial::from_name("unobtainium").unwrap_err();
        assert_eq!(err.error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_serialization_uses_trade_names() {
        let json = serde_json::to_string(&LensMaterial::HighIndex167).unwrap();
        assert_eq!(json, "\"1.67\"");

        let roundtrip: LensMaterial = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, LensMaterial::HighIndex167);
    }
}
