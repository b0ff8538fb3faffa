//! # Engine Calculations
//!
//! This module contains all calculation types. Each calculation follows the
//! pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! All three calculators are stateless functions of their inputs; invoking
//! them in any order, or in parallel, yields the same results.
//!
//! ## Available Calculations
//!
//! - [`kinematics`] - Piston motion, cylinder volume, compression metrics
//! - [`resonance`] - Intake/exhaust tuned pipe lengths
//! - [`port_flow`] - Port diameter sizing and valve flow-area curves

pub mod kinematics;
pub mod port_flow;
pub mod resonance;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use kinematics::{EngineGeometry, MotionResult, MotionSample};
pub use port_flow::{FlowAreaCurve, FlowAreaSample, PortSizingInput, ValveGeometry};
pub use resonance::{DuctKind, ResonanceInput, ResonanceResult};

/// Enum wrapper for all calculation types.
///
/// This allows storing heterogeneous calculations in a single collection
/// while maintaining type safety and clean serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Full-cycle piston motion sweep
    Motion(EngineGeometry),
    /// Tuned pipe length for one duct
    Resonance(ResonanceInput),
    /// Port diameter sizing
    PortSizing(PortSizingInput),
    /// Valve lift-vs-flow-area curve
    ValveFlow(ValveGeometry),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Motion(g) => &g.label,
            CalculationItem::Resonance(r) => &r.label,
            CalculationItem::PortSizing(p) => &p.label,
            CalculationItem::ValveFlow(v) => &v.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Motion(_) => "Motion",
            CalculationItem::Resonance(_) => "Resonance",
            CalculationItem::PortSizing(_) => "PortSizing",
            CalculationItem::ValveFlow(_) => "ValveFlow",
        }
    }
}
