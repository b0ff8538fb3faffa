//! # Gas Properties
//!
//! Acoustic and thermodynamic properties of the working gases. The resonance
//! model only needs two gases: fresh air on the intake side and hot combustion
//! products on the exhaust side, each with a fixed heat-capacity ratio and
//! specific gas constant.
//!
//! ## Example
//!
//! ```rust
//! use crank_core::gas::{speed_of_sound_m_s, INTAKE_AIR};
//! use crank_core::units::Celsius;
//!
//! // v = √(γ·R·T) ≈ 360 m/s for air at 50 °C
//! let c = speed_of_sound_m_s(Celsius(50.0), &INTAKE_AIR);
//! assert!((c - 360.2).abs() < 0.1);
//! ```

use serde::{Deserialize, Serialize};

use crate::units::{Celsius, Kelvin};

/// Heat-capacity ratio and specific gas constant of a working gas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasProperties {
    /// Ratio of specific heats γ (dimensionless)
    pub gamma: f64,
    /// Specific gas constant R in J/(kg·K)
    pub specific_gas_constant: f64,
}

/// Fresh intake charge: dry air, γ = 1.4, R = 287 J/(kg·K)
pub const INTAKE_AIR: GasProperties = GasProperties {
    gamma: 1.4,
    specific_gas_constant: 287.0,
};

/// Hot exhaust gas: γ = 1.35, R = 310 J/(kg·K)
pub const EXHAUST_GAS: GasProperties = GasProperties {
    gamma: 1.35,
    specific_gas_constant: 310.0,
};

/// Speed of sound v = √(γ·R·T) in m/s.
pub fn speed_of_sound_m_s(temperature: Celsius, gas: &GasProperties) -> f64 {
    let kelvin: Kelvin = temperature.into();
    (gas.gamma * gas.specific_gas_constant * kelvin.0).sqrt()
}

/// Gas density ρ = P/(R·T) in kg/m³.
///
/// Pressure in pascals; for dry air at one atmosphere and 20 °C this gives
/// the familiar 1.2 kg/m³.
pub fn density_kg_m3(pressure_pa: f64, temperature: Celsius, gas: &GasProperties) -> f64 {
    let kelvin: Kelvin = temperature.into();
    pressure_pa / (gas.specific_gas_constant * kelvin.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_of_sound_air_50c() {
        let c = speed_of_sound_m_s(Celsius(50.0), &INTAKE_AIR);
        let expected = (1.4_f64 * 287.0 * 323.0).sqrt();
        assert!((c - expected).abs() < 1e-12);
    }

    #[test]
    fn test_speed_of_sound_rises_with_temperature() {
        let cold = speed_of_sound_m_s(Celsius(0.0), &EXHAUST_GAS);
        let hot = speed_of_sound_m_s(Celsius(900.0), &EXHAUST_GAS);
        assert!(hot > cold);
    }

    #[test]
    fn test_air_density_at_one_atmosphere() {
        let rho = density_kg_m3(101_325.0, Celsius(20.0), &INTAKE_AIR);
        assert!((rho - 1.205).abs() < 0.005);
    }
}
