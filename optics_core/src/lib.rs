//! # optics_core - Ophthalmic Dispensing Calculation Engine
//!
//! `optics_core` is the computational heart of OptiCalc, providing the
//! optical formulas behind a dispensing workbench with a clean,
//! LLM-friendly API. All inputs and outputs are JSON-serializable, making
//! it ideal for integration with AI assistants via MCP or similar
//! protocols.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **No garbage numbers**: undefined results come back as typed errors,
//!   never as `NaN` or `Infinity`
//!
//! ## Quick Start
//!
//! ```rust
//! use optics_core::calculations::prism::{PrismInput, calculate};
//!
//! // 4.00 D lens decentred 3 mm: Prentice gives 1.2 prism diopters
//! let result = calculate(&PrismInput { power_d: 4.0, decentration_mm: 3.0 }).unwrap();
//! assert!((result.prism_diopters - 1.2).abs() < 1e-9);
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - All dispensing calculation types (thickness, prism,
//!   vertex, transposition, blank size, vergence, ...)
//! - [`geometry`] - Shared sagitta/radius surface formulas
//! - [`materials`] - Lens material database
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`analysis`] - Text-completion service abstraction for the
//!   judgement-based tools

pub mod analysis;
pub mod calculations;
pub mod errors;
pub mod geometry;
pub mod materials;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, CalculationOutput};
pub use errors::{OpticsError, OpticsResult};
pub use materials::{LensMaterial, MaterialProperties};
