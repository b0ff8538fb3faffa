//! # Error Types
//!
//! Structured error types for crank_core. Every failure carries the
//! parameter(s) at fault so callers can surface a precise message instead
//! of a NaN-poisoned chart.
//!
//! ## Example
//!
//! ```rust
//! use crank_core::errors::{CalcError, CalcResult};
//!
//! fn validate_rpm(rpm: f64) -> CalcResult<()> {
//!     if rpm <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "engine_rpm".to_string(),
//!             value: rpm.to_string(),
//!             reason: "Engine speed must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for crank_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Each variant provides specific context about what went wrong. Errors are
/// local to a single calculation call; none are retryable and none are
/// process-fatal.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-positive, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Crank/rod/offset combination has no real piston position at some angle
    #[error("Infeasible geometry at {angle_deg}°: rod {rod_mm} mm is shorter than the {required_mm} mm throw at that angle")]
    InfeasibleGeometry {
        angle_deg: u32,
        rod_mm: f64,
        required_mm: f64,
    },

    /// Combustion chamber volume makes the compression ratio undefined
    #[error("Degenerate combustion chamber: {volume_cm3} cm³ leaves the compression ratio undefined")]
    DegenerateChamber { volume_cm3: f64 },

    /// Calculation failed for a reason not covered by the variants above
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InfeasibleGeometry error
    pub fn infeasible_geometry(angle_deg: u32, rod_mm: f64, required_mm: f64) -> Self {
        CalcError::InfeasibleGeometry {
            angle_deg,
            rod_mm,
            required_mm,
        }
    }

    /// Create a DegenerateChamber error
    pub fn degenerate_chamber(volume_cm3: f64) -> Self {
        CalcError::DegenerateChamber { volume_cm3 }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InfeasibleGeometry { .. } => "INFEASIBLE_GEOMETRY",
            CalcError::DegenerateChamber { .. } => "DEGENERATE_CHAMBER",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("engine_rpm", "-500", "Engine speed must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_infeasible_geometry_carries_angle() {
        let error = CalcError::infeasible_geometry(44, 20.0, 20.07);
        match &error {
            CalcError::InfeasibleGeometry { angle_deg, .. } => assert_eq!(*angle_deg, 44),
            other => panic!("unexpected variant: {:?}", other),
        }
        assert!(error.to_string().contains("44°"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::degenerate_chamber(0.0).error_code(), "DEGENERATE_CHAMBER");
        assert_eq!(
            CalcError::calculation_failed("kinematics", "test").error_code(),
            "CALCULATION_FAILED"
        );
    }
}
