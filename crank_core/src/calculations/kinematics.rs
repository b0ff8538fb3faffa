//! # Piston Kinematics
//!
//! Sweeps a crank-slider mechanism through one full revolution and reports
//! piston position, velocity, acceleration, and cylinder volume at every
//! integer crank angle, together with the derived compression metrics.
//!
//! ## Assumptions
//!
//! - Rigid crank, rod, and piston; no bearing clearances
//! - Optional wrist-pin offset (désaxé layouts supported)
//! - Angle 0 corresponds to top dead centre for zero offset; with an offset
//!   the true TDC is located by scanning the sweep for the minimum position
//!
//! ## Example
//!
//! ```rust
//! use crank_core::calculations::kinematics::{EngineGeometry, calculate};
//!
//! let geometry = EngineGeometry {
//!     label: "Engine 1".to_string(),
//!     piston_diameter_mm: 59.0,
//!     stroke_mm: 57.8,
//!     connecting_rod_length_mm: 96.0,
//!     piston_offset_mm: 0.0,
//!     combustion_chamber_volume_cm3: 13.0,
//!     engine_rpm: 11000.0,
//!     intake_valve_closing_deg: 70,
//! };
//!
//! let result = calculate(&geometry).unwrap();
//! assert_eq!(result.samples.len(), 360);
//! println!("static CR = {:.2}", result.static_compression_ratio);
//! ```

use serde::{Deserialize, Serialize};

use crate::characterization::{
    classify_bore_stroke, classify_dynamic_compression, classify_rod_stroke,
    classify_static_compression, BoreStrokeClass, CompressionLevel, RodStrokeClass,
};
use crate::errors::{CalcError, CalcResult};
use crate::units::{Centimeters, Degrees, Millimeters, Radians, Rpm};

/// Number of motion samples per revolution, one per integer crank degree.
pub const SAMPLES_PER_REVOLUTION: usize = 360;

/// Crank-slider geometry and operating point for one engine.
///
/// Lengths in millimetres, chamber volume in cm³, as quoted on a blueprint.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Engine 1",
///   "piston_diameter_mm": 59.0,
///   "stroke_mm": 57.8,
///   "connecting_rod_length_mm": 96.0,
///   "piston_offset_mm": 0.0,
///   "combustion_chamber_volume_cm3": 13.0,
///   "engine_rpm": 11000.0,
///   "intake_valve_closing_deg": 70
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineGeometry {
    /// User label for this engine (e.g., "Engine 1", "Road cam")
    pub label: String,

    /// Cylinder bore / piston diameter in mm
    pub piston_diameter_mm: f64,

    /// Full stroke in mm (crank radius is half of this)
    pub stroke_mm: f64,

    /// Connecting rod length between centres in mm
    pub connecting_rod_length_mm: f64,

    /// Wrist-pin offset from the crank axis in mm (0 for an inline layout)
    pub piston_offset_mm: f64,

    /// Combustion chamber volume at TDC in cm³
    pub combustion_chamber_volume_cm3: f64,

    /// Operating speed in revolutions per minute
    pub engine_rpm: f64,

    /// Crank angle at which the intake valve closes, in degrees after TDC
    pub intake_valve_closing_deg: u32,
}

impl EngineGeometry {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.piston_diameter_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "piston_diameter_mm",
                self.piston_diameter_mm.to_string(),
                "Bore must be positive",
            ));
        }
        if self.stroke_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "stroke_mm",
                self.stroke_mm.to_string(),
                "Stroke must be positive",
            ));
        }
        if self.connecting_rod_length_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "connecting_rod_length_mm",
                self.connecting_rod_length_mm.to_string(),
                "Rod length must be positive",
            ));
        }
        if self.combustion_chamber_volume_cm3 <= 0.0 {
            return Err(CalcError::degenerate_chamber(self.combustion_chamber_volume_cm3));
        }
        if self.engine_rpm <= 0.0 {
            return Err(CalcError::invalid_input(
                "engine_rpm",
                self.engine_rpm.to_string(),
                "Engine speed must be positive",
            ));
        }
        if self.intake_valve_closing_deg as usize >= SAMPLES_PER_REVOLUTION {
            return Err(CalcError::invalid_input(
                "intake_valve_closing_deg",
                self.intake_valve_closing_deg.to_string(),
                "Valve closing angle must be below 360 degrees",
            ));
        }
        Ok(())
    }

    /// Crank radius r = stroke/2 in mm
    pub fn crank_radius_mm(&self) -> f64 {
        self.stroke_mm / 2.0
    }

    /// Piston crown area in cm²
    pub fn piston_area_cm2(&self) -> f64 {
        let bore_cm: Centimeters = Millimeters(self.piston_diameter_mm).into();
        std::f64::consts::PI * (bore_cm.0 / 2.0).powi(2)
    }

    /// Swept volume π·(bore/2)²·stroke in cm³
    pub fn swept_volume_cm3(&self) -> f64 {
        std::f64::consts::PI * (self.piston_diameter_mm / 2.0).powi(2) * self.stroke_mm / 1000.0
    }
}

/// Piston state at one integer crank angle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MotionSample {
    /// Crank angle in degrees after TDC
    pub angle_deg: u32,

    /// Piston position relative to TDC in mm
    pub position_mm: f64,

    /// Piston velocity in m/s
    pub velocity_m_s: f64,

    /// Piston acceleration in m/s²
    pub acceleration_m_s2: f64,

    /// Cylinder volume in cm³
    pub volume_cm3: f64,
}

/// Full-cycle motion data plus the derived compression metrics.
///
/// ## JSON Example (derived scalars)
///
/// ```json
/// {
///   "swept_volume_cm3": 158.02,
///   "static_compression_ratio": 13.16,
///   "dynamic_compression_ratio": 8.98,
///   "bore_stroke_ratio": 1.02,
///   "rod_stroke_ratio": 1.66
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionResult {
    /// One sample per integer crank degree; index equals angle
    pub samples: Vec<MotionSample>,

    /// Swept volume in cm³
    pub swept_volume_cm3: f64,

    /// Static compression ratio (swept + chamber)/chamber
    pub static_compression_ratio: f64,

    /// Dynamic compression ratio using the charge trapped at intake closing
    pub dynamic_compression_ratio: f64,

    /// Bore/stroke ratio, rounded to two decimals
    pub bore_stroke_ratio: f64,

    /// Rod/stroke ratio, rounded to two decimals
    pub rod_stroke_ratio: f64,

    /// Qualitative band of the static compression ratio
    pub static_compression_class: CompressionLevel,

    /// Qualitative band of the dynamic compression ratio
    pub dynamic_compression_class: CompressionLevel,

    /// Over-squared / squared / under-squared
    pub bore_stroke_class: BoreStrokeClass,

    /// Qualitative band of the rod/stroke ratio
    pub rod_stroke_class: RodStrokeClass,
}

impl MotionResult {
    /// Sample at a given crank angle (index == angle).
    pub fn at_angle(&self, angle_deg: u32) -> Option<&MotionSample> {
        self.samples.get(angle_deg as usize)
    }
}

/// Sweep the mechanism through one revolution and derive the compression
/// metrics.
///
/// # Arguments
///
/// * `input` - Engine geometry and operating point
///
/// # Returns
///
/// * `Ok(MotionResult)` - 360 samples plus derived ratios
/// * `Err(CalcError)` - Invalid parameters, or a rod too short to span the
///   crank throw at some angle (`InfeasibleGeometry` names the first such
///   angle)
pub fn calculate(input: &EngineGeometry) -> CalcResult<MotionResult> {
    input.validate()?;

    let mut absolute_positions = Vec::with_capacity(SAMPLES_PER_REVOLUTION);
    for angle in 0..SAMPLES_PER_REVOLUTION as u32 {
        absolute_positions.push(piston_position(angle, input)?);
    }

    // TDC is wherever the sweep bottoms out, not assumed at angle 0: a wrist
    // pin offset shifts the true dead centre away from the geometric one.
    let tdc_position = absolute_positions
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);

    let piston_area_cm2 = input.piston_area_cm2();
    let chamber = input.combustion_chamber_volume_cm3;

    let mut raw_volumes = Vec::with_capacity(SAMPLES_PER_REVOLUTION);
    for position in &absolute_positions {
        let relative_cm: Centimeters = Millimeters(position - tdc_position).into();
        raw_volumes.push(chamber + piston_area_cm2 * relative_cm.0);
    }

    // Pin the volume minimum to the chamber volume exactly, absorbing the
    // floating-point residue of the TDC subtraction.
    let min_volume = raw_volumes.iter().copied().fold(f64::INFINITY, f64::min);

    let omega = Rpm(input.engine_rpm).angular_velocity_rad_s();

    let samples: Vec<MotionSample> = (0..SAMPLES_PER_REVOLUTION as u32)
        .map(|angle| {
            let index = angle as usize;
            MotionSample {
                angle_deg: angle,
                position_mm: absolute_positions[index] - tdc_position,
                velocity_m_s: position_derivative(angle, input) * omega / 1000.0,
                acceleration_m_s2: position_second_derivative(angle, input) * omega.powi(2) / 1000.0,
                volume_cm3: raw_volumes[index] - min_volume + chamber,
            }
        })
        .collect();

    let swept_volume_cm3 = input.swept_volume_cm3();
    let static_compression_ratio = (swept_volume_cm3 + chamber) / chamber;

    let trapped_volume_cm3 =
        swept_volume_cm3 - samples[input.intake_valve_closing_deg as usize].volume_cm3;
    let dynamic_compression_ratio = (trapped_volume_cm3 + chamber) / chamber;

    let bore_stroke_ratio =
        (input.piston_diameter_mm * 100.0 / input.stroke_mm).round() / 100.0;
    let rod_stroke_ratio =
        (input.connecting_rod_length_mm / input.stroke_mm * 100.0).round() / 100.0;

    Ok(MotionResult {
        samples,
        swept_volume_cm3,
        static_compression_ratio,
        dynamic_compression_ratio,
        bore_stroke_ratio,
        rod_stroke_ratio,
        static_compression_class: classify_static_compression(static_compression_ratio),
        dynamic_compression_class: classify_dynamic_compression(dynamic_compression_ratio),
        bore_stroke_class: classify_bore_stroke(bore_stroke_ratio),
        rod_stroke_class: classify_rod_stroke(rod_stroke_ratio),
    })
}

/// Crank angle converted to radians with the 180° phase shift that puts
/// angle 0 at top dead centre.
fn phase_shifted_rad(angle: u32) -> f64 {
    let rad: Radians = Degrees(angle as f64 - 180.0).into();
    rad.0
}

/// Absolute piston position r·cosθ + √(L² − (r·sinθ − offset)²) in mm.
///
/// A negative radicand means the rod cannot span the crank throw at this
/// angle; that is reported, never left to produce NaN.
fn piston_position(angle: u32, geometry: &EngineGeometry) -> CalcResult<f64> {
    let r = geometry.crank_radius_mm();
    let rod = geometry.connecting_rod_length_mm;
    let theta = phase_shifted_rad(angle);

    let throw = r * theta.sin() - geometry.piston_offset_mm;
    let radicand = rod.powi(2) - throw.powi(2);
    if radicand < 0.0 {
        return Err(CalcError::infeasible_geometry(angle, rod, throw.abs()));
    }

    Ok(r * theta.cos() + radicand.sqrt())
}

/// First derivative of the position expression with respect to crank angle,
/// in mm per radian. Only called after the position sweep has proven the
/// radicand non-negative at every sampled angle.
fn position_derivative(angle: u32, geometry: &EngineGeometry) -> f64 {
    let r = geometry.crank_radius_mm();
    let rod = geometry.connecting_rod_length_mm;
    let theta = phase_shifted_rad(angle);

    let sin_theta = theta.sin();
    let cos_theta = theta.cos();

    let throw = r * sin_theta - geometry.piston_offset_mm;
    let sqrt_term = (rod * rod - throw * throw).sqrt();

    -r * sin_theta + (r * cos_theta * throw) / sqrt_term
}

/// Second derivative of the position expression with respect to crank angle,
/// in mm per radian².
fn position_second_derivative(angle: u32, geometry: &EngineGeometry) -> f64 {
    let r = geometry.crank_radius_mm();
    let rod = geometry.connecting_rod_length_mm;
    let theta = phase_shifted_rad(angle);

    let sin_theta = theta.sin();
    let cos_theta = theta.cos();

    let throw = r * sin_theta - geometry.piston_offset_mm;
    let sqrt_term = (rod * rod - throw * throw).sqrt();
    let sqrt_term_cubed = sqrt_term.powi(3);

    -r * cos_theta
        + (r * cos_theta * r * cos_theta) / sqrt_term
        + (r * sin_theta * throw) / sqrt_term
        - (r * cos_theta * throw).powi(2) / sqrt_term_cubed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_engine() -> EngineGeometry {
        EngineGeometry {
            label: "Engine 1".to_string(),
            piston_diameter_mm: 59.0,
            stroke_mm: 57.8,
            connecting_rod_length_mm: 96.0,
            piston_offset_mm: 0.0,
            combustion_chamber_volume_cm3: 13.0,
            engine_rpm: 11000.0,
            intake_valve_closing_deg: 70,
        }
    }

    #[test]
    fn test_sample_count_and_indexing() {
        let result = calculate(&test_engine()).unwrap();
        assert_eq!(result.samples.len(), 360);
        for (index, sample) in result.samples.iter().enumerate() {
            assert_eq!(sample.angle_deg as usize, index);
        }
    }

    #[test]
    fn test_position_normalized_to_tdc() {
        let result = calculate(&test_engine()).unwrap();
        let min_position = result
            .samples
            .iter()
            .map(|s| s.position_mm)
            .fold(f64::INFINITY, f64::min);
        assert!(min_position.abs() < 1e-9);

        // with no pin offset the full travel equals the stroke
        let max_position = result
            .samples
            .iter()
            .map(|s| s.position_mm)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!((max_position - 57.8).abs() < 1e-9);
    }

    #[test]
    fn test_volume_minimum_equals_chamber() {
        let result = calculate(&test_engine()).unwrap();
        let min_volume = result
            .samples
            .iter()
            .map(|s| s.volume_cm3)
            .fold(f64::INFINITY, f64::min);
        assert!((min_volume - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_velocity_vanishes_at_dead_centres() {
        // zero offset puts the dead centres exactly at angles 0 and 180
        let result = calculate(&test_engine()).unwrap();
        assert!(result.at_angle(0).unwrap().velocity_m_s.abs() < 1e-9);
        assert!(result.at_angle(180).unwrap().velocity_m_s.abs() < 1e-9);
    }

    #[test]
    fn test_compression_metrics() {
        let result = calculate(&test_engine()).unwrap();

        // swept = π·29.5²·57.8/1000 ≈ 158.02 cm³
        assert!((result.swept_volume_cm3 - 158.02).abs() < 0.01);

        // static CR = (158.02 + 13)/13 ≈ 13.156
        assert!((result.static_compression_ratio - 13.156).abs() < 0.01);
        assert_eq!(result.static_compression_class, CompressionLevel::VeryHigh);

        // trapped charge at 70° after TDC gives ≈ 8.98
        assert!((result.dynamic_compression_ratio - 8.981).abs() < 0.01);
        assert_eq!(result.dynamic_compression_class, CompressionLevel::High);
        assert!(result.dynamic_compression_ratio < result.static_compression_ratio);
    }

    #[test]
    fn test_ratio_characterizations() {
        let result = calculate(&test_engine()).unwrap();

        // 59/57.8 rounds to 1.02 - squared
        assert!((result.bore_stroke_ratio - 1.02).abs() < 1e-12);
        assert_eq!(result.bore_stroke_class, BoreStrokeClass::Squared);

        // 96/57.8 rounds to 1.66 - moderate
        assert!((result.rod_stroke_ratio - 1.66).abs() < 1e-12);
        assert_eq!(result.rod_stroke_class, RodStrokeClass::Moderate);
    }

    #[test]
    fn test_offset_moves_tdc_but_keeps_normalization() {
        let mut engine = test_engine();
        engine.piston_offset_mm = 10.0;
        let result = calculate(&engine).unwrap();

        let min_position = result
            .samples
            .iter()
            .map(|s| s.position_mm)
            .fold(f64::INFINITY, f64::min);
        assert!(min_position.abs() < 1e-9);

        let min_volume = result
            .samples
            .iter()
            .map(|s| s.volume_cm3)
            .fold(f64::INFINITY, f64::min);
        assert!((min_volume - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_rod_reports_first_offending_angle() {
        let mut engine = test_engine();
        engine.connecting_rod_length_mm = 20.0;

        // |sin θ| first exceeds 20/28.9 at 44°
        match calculate(&engine) {
            Err(CalcError::InfeasibleGeometry { angle_deg, rod_mm, required_mm }) => {
                assert_eq!(angle_deg, 44);
                assert_eq!(rod_mm, 20.0);
                assert!(required_mm > 20.0);
            }
            other => panic!("expected InfeasibleGeometry, got {:?}", other),
        }
    }

    #[test]
    fn test_degenerate_chamber_rejected() {
        let mut engine = test_engine();
        engine.combustion_chamber_volume_cm3 = 0.0;
        assert!(matches!(
            calculate(&engine),
            Err(CalcError::DegenerateChamber { .. })
        ));
    }

    #[test]
    fn test_invalid_rpm_rejected() {
        let mut engine = test_engine();
        engine.engine_rpm = 0.0;
        assert!(calculate(&engine).is_err());
    }

    #[test]
    fn test_serialization() {
        let engine = test_engine();
        let json = serde_json::to_string_pretty(&engine).unwrap();
        let roundtrip: EngineGeometry = serde_json::from_str(&json).unwrap();
        assert_eq!(engine.stroke_mm, roundtrip.stroke_mm);
        assert_eq!(engine.intake_valve_closing_deg, roundtrip.intake_valve_closing_deg);

        let result = calculate(&engine).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let roundtrip: MotionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result.samples.len(), roundtrip.samples.len());
    }
}
