//! # Unit Types
//!
//! Type-safe wrappers for the units the engine calculations move between.
//! These provide compile-time safety against unit confusion while remaining
//! lightweight (just f64 wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - Engine design uses a small, fixed set of units
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! ## Unit Set
//!
//! Geometry is entered in millimetres and cubic centimetres, the way engine
//! blueprints quote it; outputs are SI (m/s, m/s², metres of pipe):
//! - Length: millimetres (mm), centimetres (cm), metres (m)
//! - Angle: degrees, radians
//! - Temperature: Celsius (°C), Kelvin (K)
//! - Engine speed: revolutions per minute (rpm)
//!
//! ## Example
//!
//! ```rust
//! use crank_core::units::{Millimeters, Centimeters, Degrees, Radians};
//!
//! let bore = Millimeters(59.0);
//! let bore_cm: Centimeters = bore.into();
//! assert!((bore_cm.0 - 5.9).abs() < 1e-12);
//!
//! let half_turn: Radians = Degrees(180.0).into();
//! assert!((half_turn.0 - std::f64::consts::PI).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in centimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Centimeters {
    fn from(mm: Millimeters) -> Self {
        Centimeters(mm.0 / 10.0)
    }
}

impl From<Centimeters> for Millimeters {
    fn from(cm: Centimeters) -> Self {
        Millimeters(cm.0 * 10.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0 * std::f64::consts::PI / 180.0)
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0 * 180.0 / std::f64::consts::PI)
    }
}

// ============================================================================
// Temperature Units
// ============================================================================

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

/// Temperature in Kelvin
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kelvin(pub f64);

// The acoustic model works with T_K = T_C + 273, not 273.15.
impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Self {
        Kelvin(c.0 + 273.0)
    }
}

impl From<Kelvin> for Celsius {
    fn from(k: Kelvin) -> Self {
        Celsius(k.0 - 273.0)
    }
}

// ============================================================================
// Engine Speed
// ============================================================================

/// Engine speed in revolutions per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rpm(pub f64);

impl Rpm {
    /// Crankshaft angular velocity in rad/s: ω = rpm·2π/60
    pub fn angular_velocity_rad_s(self) -> f64 {
        self.0 * 2.0 * std::f64::consts::PI / 60.0
    }

    /// Duration of one crankshaft degree in seconds: 1/(6·rpm)
    pub fn seconds_per_degree(self) -> f64 {
        1.0 / (6.0 * self.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Centimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(Degrees);
impl_arithmetic!(Radians);
impl_arithmetic!(Celsius);
impl_arithmetic!(Kelvin);
impl_arithmetic!(Rpm);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millimeters_to_centimeters() {
        let mm = Millimeters(57.8);
        let cm: Centimeters = mm.into();
        assert!((cm.0 - 5.78).abs() < 1e-12);

        let back: Millimeters = cm.into();
        assert!((back.0 - 57.8).abs() < 1e-12);
    }

    #[test]
    fn test_degrees_to_radians() {
        let rad: Radians = Degrees(90.0).into();
        assert!((rad.0 - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_celsius_to_kelvin() {
        let k: Kelvin = Celsius(50.0).into();
        assert_eq!(k.0, 323.0);
    }

    #[test]
    fn test_angular_velocity() {
        // 11000 rpm -> 11000·2π/60 ≈ 1151.9 rad/s
        let omega = Rpm(11000.0).angular_velocity_rad_s();
        assert!((omega - 1151.917).abs() < 0.01);
    }

    #[test]
    fn test_arithmetic() {
        let a = Millimeters(10.0);
        let b = Millimeters(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_serialization() {
        let mm = Millimeters(59.0);
        let json = serde_json::to_string(&mm).unwrap();
        assert_eq!(json, "59.0");

        let roundtrip: Millimeters = serde_json::from_str(&json).unwrap();
        assert_eq!(mm, roundtrip);
    }
}
