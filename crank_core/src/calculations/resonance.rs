//! # Resonance Tuning
//!
//! Sizes intake and exhaust runners so the pressure wave reflected from the
//! open end arrives back at the valve in step with the gas-exchange event.
//! The intake side is tuned as a quarter-wave pipe on fresh air, the exhaust
//! side as a half-wave pipe on hot combustion gas.
//!
//! ## Example
//!
//! ```rust
//! use crank_core::calculations::resonance::{DuctKind, ResonanceInput, calculate};
//!
//! let input = ResonanceInput {
//!     label: "Intake".to_string(),
//!     kind: DuctKind::Intake,
//!     rpm: 11500.0,
//!     reference_angle_a_deg: 40.0,
//!     reference_angle_b_deg: 70.0,
//!     harmonic: 3,
//!     gas_temperature_c: 50.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! println!("runner length: {:.3} m", result.length_m);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::gas::{speed_of_sound_m_s, GasProperties, EXHAUST_GAS, INTAKE_AIR};
use crate::units::{Celsius, Rpm};

/// Which duct is being tuned. The two ducts use different open-period
/// conventions, different resonance modes, and different gases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuctKind {
    /// Quarter-wave tuning on fresh air
    Intake,
    /// Half-wave tuning on hot exhaust gas
    Exhaust,
}

impl DuctKind {
    /// Working gas in this duct
    pub fn gas(&self) -> &'static GasProperties {
        match self {
            DuctKind::Intake => &INTAKE_AIR,
            DuctKind::Exhaust => &EXHAUST_GAS,
        }
    }

    /// Resonance-mode divisor: 4 for a quarter-wave intake, 2 for a
    /// half-wave exhaust
    pub fn harmonic_divisor(&self) -> f64 {
        match self {
            DuctKind::Intake => 4.0,
            DuctKind::Exhaust => 2.0,
        }
    }
}

/// Valve timing and operating point for one duct.
///
/// Angle semantics differ per duct: for the intake, `a` is the opening
/// advance before TDC and `b` the closing delay after BDC (open period =
/// a + 180 + b); for the exhaust, `a` is the exhaust opening advance and `b`
/// the *intake* opening advance that ends the blowdown-to-overlap window
/// (period = a + 180 − b).
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Intake",
///   "kind": "Intake",
///   "rpm": 11500.0,
///   "reference_angle_a_deg": 40.0,
///   "reference_angle_b_deg": 70.0,
///   "harmonic": 3,
///   "gas_temperature_c": 50.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResonanceInput {
    /// User label for this duct (e.g., "Intake", "Exhaust primary")
    pub label: String,

    /// Which duct is being tuned
    pub kind: DuctKind,

    /// Engine speed to tune for, in rpm
    pub rpm: f64,

    /// First timing reference in degrees (valve opening advance)
    pub reference_angle_a_deg: f64,

    /// Second timing reference in degrees (see duct semantics above)
    pub reference_angle_b_deg: f64,

    /// Harmonic order to tune to (1 = fundamental)
    pub harmonic: u32,

    /// Gas temperature in the duct in °C
    pub gas_temperature_c: f64,
}

impl ResonanceInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.rpm <= 0.0 {
            return Err(CalcError::invalid_input(
                "rpm",
                self.rpm.to_string(),
                "Engine speed must be positive",
            ));
        }
        if self.harmonic == 0 {
            return Err(CalcError::invalid_input(
                "harmonic",
                self.harmonic.to_string(),
                "Harmonic order must be at least 1",
            ));
        }
        if self.total_angle_deg() <= 0.0 {
            return Err(CalcError::invalid_input(
                "reference_angle_b_deg",
                self.reference_angle_b_deg.to_string(),
                "Timing references leave no open period",
            ));
        }
        Ok(())
    }

    /// Total tuned angle in crank degrees: a + 180 + b for the intake,
    /// a + 180 − b for the exhaust.
    pub fn total_angle_deg(&self) -> f64 {
        match self.kind {
            DuctKind::Intake => self.reference_angle_a_deg + 180.0 + self.reference_angle_b_deg,
            DuctKind::Exhaust => self.reference_angle_a_deg + 180.0 - self.reference_angle_b_deg,
        }
    }
}

/// Tuned pipe length and the speed of sound it was computed with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResonanceResult {
    /// Resonant pipe length in metres
    pub length_m: f64,

    /// Speed of sound in the duct gas in m/s
    pub speed_of_sound_m_s: f64,
}

/// Compute the tuned pipe length for one duct.
///
/// The open period in seconds is angle/(6·rpm); the pipe is sized so the
/// chosen harmonic of the reflected wave spans that period:
/// length = c·t/(divisor·harmonic).
pub fn calculate(input: &ResonanceInput) -> CalcResult<ResonanceResult> {
    input.validate()?;

    let time_s = input.total_angle_deg() * Rpm(input.rpm).seconds_per_degree();
    let speed_of_sound = speed_of_sound_m_s(Celsius(input.gas_temperature_c), input.kind.gas());

    let length_m =
        speed_of_sound * time_s / (input.kind.harmonic_divisor() * input.harmonic as f64);

    Ok(ResonanceResult {
        length_m,
        speed_of_sound_m_s: speed_of_sound,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intake_input() -> ResonanceInput {
        ResonanceInput {
            label: "Intake".to_string(),
            kind: DuctKind::Intake,
            rpm: 11500.0,
            reference_angle_a_deg: 40.0,
            reference_angle_b_deg: 70.0,
            harmonic: 3,
            gas_temperature_c: 50.0,
        }
    }

    fn exhaust_input() -> ResonanceInput {
        ResonanceInput {
            label: "Exhaust".to_string(),
            kind: DuctKind::Exhaust,
            rpm: 11500.0,
            reference_angle_a_deg: 70.0,
            reference_angle_b_deg: 40.0,
            harmonic: 2,
            gas_temperature_c: 900.0,
        }
    }

    #[test]
    fn test_intake_example() {
        let result = calculate(&intake_input()).unwrap();

        // c = √(1.4·287·323)
        let expected_c = (1.4_f64 * 287.0 * 323.0).sqrt();
        assert!((result.speed_of_sound_m_s - expected_c).abs() < 1e-9);

        // 290° at 11500 rpm, third harmonic quarter-wave
        let expected_length = expected_c * (290.0 / (6.0 * 11500.0)) / 12.0;
        assert!((result.length_m - expected_length).abs() < 1e-9);
        assert!(result.length_m > 0.0 && result.length_m.is_finite());
    }

    #[test]
    fn test_exhaust_uses_blowdown_window_and_half_wave() {
        let input = exhaust_input();
        assert!((input.total_angle_deg() - 210.0).abs() < 1e-12);

        let result = calculate(&input).unwrap();
        let expected_c = (1.35_f64 * 310.0 * 1173.0).sqrt();
        assert!((result.speed_of_sound_m_s - expected_c).abs() < 1e-9);

        let expected_length = expected_c * (210.0 / (6.0 * 11500.0)) / 4.0;
        assert!((result.length_m - expected_length).abs() < 1e-9);
    }

    #[test]
    fn test_doubling_harmonic_halves_length() {
        let mut input = intake_input();
        let base = calculate(&input).unwrap();

        input.harmonic = 6;
        let doubled = calculate(&input).unwrap();

        assert!((doubled.length_m - base.length_m / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_length_scales_with_speed_of_sound() {
        let cold = calculate(&intake_input()).unwrap();

        let mut input = intake_input();
        input.gas_temperature_c = 100.0;
        let hot = calculate(&input).unwrap();

        let length_ratio = hot.length_m / cold.length_m;
        let speed_ratio = hot.speed_of_sound_m_s / cold.speed_of_sound_m_s;
        assert!((length_ratio - speed_ratio).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let mut input = intake_input();
        input.rpm = 0.0;
        assert!(calculate(&input).is_err());

        let mut input = intake_input();
        input.harmonic = 0;
        assert!(calculate(&input).is_err());

        // exhaust window collapses when the intake advance eats the period
        let mut input = exhaust_input();
        input.reference_angle_b_deg = 260.0;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_serialization() {
        let input = intake_input();
        let json = serde_json::to_string(&input).unwrap();
        let roundtrip: ResonanceInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input.kind, roundtrip.kind);
        assert_eq!(input.harmonic, roundtrip.harmonic);
    }
}
