//! # Port and Valve Flow
//!
//! Sizes the intake/exhaust port diameter from the volumetric flow the
//! cylinder demands, and builds the valve flow-area curve: the annular gap
//! between valve head and seat as lift rises, capped by the fixed geometric
//! ceiling of the seat throat.
//!
//! ## Example
//!
//! ```rust
//! use crank_core::calculations::port_flow::{ValveGeometry, flow_area_curve};
//!
//! let valve = ValveGeometry {
//!     label: "Intake".to_string(),
//!     valve_diameter_mm: 31.5,
//!     valve_stem_diameter_mm: 5.0,
//!     valve_seat_inner_diameter_mm: 28.35,
//!     seat_angle_deg: 45.0,
//! };
//!
//! let curve = flow_area_curve(&valve).unwrap();
//! assert_eq!(curve.points.len(), 201);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Degrees, Radians};

/// Lift sweep resolution: 0 to 20 mm in 0.1 mm steps, 201 samples.
pub const LIFT_STEP_MM: f64 = 0.1;
pub const LIFT_SAMPLES: usize = 201;

/// Engine parameters for port diameter sizing.
///
/// The same formula serves intake and exhaust ports; only the gas speed,
/// efficiency, and valve count differ between the two calls.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Intake",
///   "rpm": 11500.0,
///   "piston_diameter_mm": 59.0,
///   "stroke_mm": 57.8,
///   "average_gas_speed_m_s": 90.0,
///   "volumetric_efficiency": 0.95,
///   "valve_count": 1
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortSizingInput {
    /// User label for this port (e.g., "Intake", "Exhaust")
    pub label: String,

    /// Engine speed in rpm
    pub rpm: f64,

    /// Cylinder bore in mm
    pub piston_diameter_mm: f64,

    /// Stroke in mm
    pub stroke_mm: f64,

    /// Target mean gas speed through the port in m/s (75-95 intake,
    /// 90-120 exhaust)
    pub average_gas_speed_m_s: f64,

    /// Volumetric efficiency as a ratio (0.8-1.2)
    pub volumetric_efficiency: f64,

    /// Number of valves sharing the flow
    pub valve_count: u32,
}

impl PortSizingInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.rpm <= 0.0 {
            return Err(CalcError::invalid_input(
                "rpm",
                self.rpm.to_string(),
                "Engine speed must be positive",
            ));
        }
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
        if self.average_gas_speed_m_s <= 0.0 {
            return Err(CalcError::invalid_input(
                "average_gas_speed_m_s",
                self.average_gas_speed_m_s.to_string(),
                "Gas speed must be positive",
            ));
        }
        if self.volumetric_efficiency <= 0.0 {
            return Err(CalcError::invalid_input(
                "volumetric_efficiency",
                self.volumetric_efficiency.to_string(),
                "Volumetric efficiency must be a positive ratio",
            ));
        }
        if self.valve_count == 0 {
            return Err(CalcError::invalid_input(
                "valve_count",
                self.valve_count.to_string(),
                "At least one valve is required",
            ));
        }
        Ok(())
    }
}

/// Poppet valve and seat geometry for the flow-area curve.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Intake",
///   "valve_diameter_mm": 31.5,
///   "valve_stem_diameter_mm": 5.0,
///   "valve_seat_inner_diameter_mm": 28.35,
///   "seat_angle_deg": 45.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValveGeometry {
    /// User label for this valve (e.g., "Intake", "Exhaust")
    pub label: String,

    /// Valve head diameter in mm
    pub valve_diameter_mm: f64,

    /// Valve stem diameter in mm
    pub valve_stem_diameter_mm: f64,

    /// Seat inner diameter in mm (also the port proxy diameter)
    pub valve_seat_inner_diameter_mm: f64,

    /// Seat angle from the valve plane in degrees (typically 45)
    pub seat_angle_deg: f64,
}

impl ValveGeometry {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.valve_diameter_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "valve_diameter_mm",
                self.valve_diameter_mm.to_string(),
                "Valve diameter must be positive",
            ));
        }
        if self.valve_stem_diameter_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "valve_stem_diameter_mm",
                self.valve_stem_diameter_mm.to_string(),
                "Stem diameter must be positive",
            ));
        }
        if self.valve_seat_inner_diameter_mm <= 0.0
            || self.valve_seat_inner_diameter_mm > self.valve_diameter_mm
        {
            return Err(CalcError::invalid_input(
                "valve_seat_inner_diameter_mm",
                self.valve_seat_inner_diameter_mm.to_string(),
                "Seat inner diameter must be positive and no larger than the valve head",
            ));
        }
        if self.valve_stem_diameter_mm >= self.valve_seat_inner_diameter_mm {
            return Err(CalcError::invalid_input(
                "valve_stem_diameter_mm",
                self.valve_stem_diameter_mm.to_string(),
                "Stem must be narrower than the seat throat",
            ));
        }
        if self.seat_angle_deg <= 0.0 || self.seat_angle_deg >= 90.0 {
            return Err(CalcError::invalid_input(
                "seat_angle_deg",
                self.seat_angle_deg.to_string(),
                "Seat angle must be between 0 and 90 degrees",
            ));
        }
        Ok(())
    }

    /// Seat width (valve − seat inner)/2 in mm
    pub fn seat_width_mm(&self) -> f64 {
        (self.valve_diameter_mm - self.valve_seat_inner_diameter_mm) / 2.0
    }

    /// Seat-throat annulus minus the stem cross-section, in mm²
    pub fn throat_area_mm2(&self) -> f64 {
        let seat_inner_radius = self.valve_seat_inner_diameter_mm / 2.0;
        let stem_radius = self.valve_stem_diameter_mm / 2.0;
        std::f64::consts::PI * (seat_inner_radius.powi(2) - stem_radius.powi(2))
    }

    /// Port cross-section using the seat inner diameter as proxy, in mm²
    pub fn port_area_mm2(&self) -> f64 {
        std::f64::consts::PI * (self.valve_seat_inner_diameter_mm / 2.0).powi(2)
    }

    /// Geometric flow ceiling: the smaller of throat and port areas, in mm²
    pub fn ceiling_area_mm2(&self) -> f64 {
        self.throat_area_mm2().min(self.port_area_mm2())
    }
}

/// One point of the lift sweep.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FlowAreaSample {
    /// Valve lift in mm
    pub lift_mm: f64,

    /// Effective flow area in mm², clamped to the geometric ceiling
    pub area_mm2: f64,
}

/// Lift-vs-flow-area curve with the lift at which the ceiling is first hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowAreaCurve {
    /// 201 samples from lift 0 to 20 mm
    pub points: Vec<FlowAreaSample>,

    /// First lift at which the seat area reaches the ceiling; lifting past
    /// this buys no more area. None if the sweep never reaches the ceiling.
    pub max_theoretical_lift_mm: Option<f64>,

    /// The geometric ceiling itself, in mm²
    pub ceiling_area_mm2: f64,
}

/// Port diameter in mm sized for the cylinder's volumetric flow demand.
///
/// Cylinder volume = stroke·π·(bore/2)²; volumetric flow =
/// rpm·η_v·volume/120 (one induction event per two revolutions); diameter =
/// 2·√(flow/(250·π·v̄·valves)).
pub fn port_diameter_mm(input: &PortSizingInput) -> CalcResult<f64> {
    input.validate()?;

    let cylinder_volume =
        input.stroke_mm * std::f64::consts::PI * (input.piston_diameter_mm / 2.0).powi(2);

    let volumetric_flow = input.rpm * input.volumetric_efficiency * cylinder_volume / 120.0;

    Ok(2.0
        * (volumetric_flow
            / (250.0
                * std::f64::consts::PI
                * input.average_gas_speed_m_s
                * input.valve_count as f64))
            .sqrt())
}

/// Build the lift-vs-flow-area curve for a valve/seat pair.
///
/// Raw seat area at lift L is π·L·cos(α)·(valve − 2·seat_width +
/// L·sin(2α)/2). The first sample where the raw area reaches the geometric
/// ceiling latches `max_theoretical_lift_mm`; from there on the emitted area
/// is the ceiling itself, so the curve never dips back even if the raw
/// expression would.
pub fn flow_area_curve(valve: &ValveGeometry) -> CalcResult<FlowAreaCurve> {
    valve.validate()?;

    let seat_angle: Radians = Degrees(valve.seat_angle_deg).into();
    let seat_width = valve.seat_width_mm();
    let ceiling = valve.ceiling_area_mm2();

    let mut points = Vec::with_capacity(LIFT_SAMPLES);
    let mut max_theoretical_lift_mm = None;
    let mut ceiling_reached = false;

    for step in 0..LIFT_SAMPLES {
        let lift = step as f64 * LIFT_STEP_MM;

        let raw_area = std::f64::consts::PI
            * lift
            * seat_angle.0.cos()
            * (valve.valve_diameter_mm - 2.0 * seat_width
                + lift * (2.0 * seat_angle.0).sin() / 2.0);

        if !ceiling_reached && raw_area >= ceiling {
            ceiling_reached = true;
            max_theoretical_lift_mm = Some(lift);
        }

        let area_mm2 = if ceiling_reached { ceiling } else { raw_area };
        points.push(FlowAreaSample { lift_mm: lift, area_mm2 });
    }

    Ok(FlowAreaCurve {
        points,
        max_theoretical_lift_mm,
        ceiling_area_mm2: ceiling,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intake_port() -> PortSizingInput {
        PortSizingInput {
            label: "Intake".to_string(),
            rpm: 11500.0,
            piston_diameter_mm: 59.0,
            stroke_mm: 57.8,
            average_gas_speed_m_s: 90.0,
            volumetric_efficiency: 0.95,
            valve_count: 1,
        }
    }

    fn intake_valve() -> ValveGeometry {
        ValveGeometry {
            label: "Intake".to_string(),
            valve_diameter_mm: 31.5,
            valve_stem_diameter_mm: 5.0,
            valve_seat_inner_diameter_mm: 28.35,
            seat_angle_deg: 45.0,
        }
    }

    #[test]
    fn test_port_diameter_example() {
        let diameter = port_diameter_mm(&intake_port()).unwrap();
        assert!((diameter - 28.53).abs() < 0.05);
    }

    #[test]
    fn test_port_diameter_shrinks_with_more_valves() {
        let single = port_diameter_mm(&intake_port()).unwrap();

        let mut twin = intake_port();
        twin.valve_count = 2;
        let split = port_diameter_mm(&twin).unwrap();

        // area splits across valves: diameter scales with 1/√2
        assert!((split - single / 2.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_flow_area_curve_shape() {
        let curve = flow_area_curve(&intake_valve()).unwrap();
        assert_eq!(curve.points.len(), 201);
        assert_eq!(curve.points[0].lift_mm, 0.0);
        assert!(curve.points[0].area_mm2.abs() < 1e-12);
        assert!((curve.points[200].lift_mm - 20.0).abs() < 1e-9);

        let max_lift = curve.max_theoretical_lift_mm.expect("ceiling reached");
        for pair in curve.points.windows(2) {
            if pair[1].lift_mm <= max_lift {
                assert!(pair[1].area_mm2 >= pair[0].area_mm2);
            } else {
                assert_eq!(pair[1].area_mm2, curve.ceiling_area_mm2);
            }
        }
    }

    #[test]
    fn test_first_crossing_latch() {
        let valve = intake_valve();
        let curve = flow_area_curve(&valve).unwrap();

        // throat annulus π/4·(28.35² − 5²) ≈ 611.6 mm² governs over the
        // port proxy; the raw seat area first reaches it at 8.5 mm lift
        let max_lift = curve.max_theoretical_lift_mm.unwrap();
        assert!((max_lift - 8.5).abs() < 1e-9);

        // the sample just below still sits under the ceiling
        let below = &curve.points[84];
        assert!(below.area_mm2 < curve.ceiling_area_mm2);

        // everything at or past the latch is exactly the ceiling
        for sample in &curve.points[85..] {
            assert_eq!(sample.area_mm2, curve.ceiling_area_mm2);
        }
    }

    #[test]
    fn test_ceiling_is_smaller_of_throat_and_port() {
        let valve = intake_valve();
        assert!((valve.throat_area_mm2() - 611.6).abs() < 0.1);
        assert!((valve.port_area_mm2() - 631.2).abs() < 0.1);
        assert_eq!(valve.ceiling_area_mm2(), valve.throat_area_mm2());
    }

    #[test]
    fn test_tight_seat_never_reaches_ceiling() {
        // a steep shallow seat on a big throat keeps the curtain area under
        // the ceiling across the whole 20 mm sweep
        let valve = ValveGeometry {
            label: "Test".to_string(),
            valve_diameter_mm: 80.0,
            valve_stem_diameter_mm: 6.0,
            valve_seat_inner_diameter_mm: 79.0,
            seat_angle_deg: 85.0,
        };
        let curve = flow_area_curve(&valve).unwrap();
        assert!(curve.max_theoretical_lift_mm.is_none());
        assert!(curve
            .points
            .iter()
            .all(|sample| sample.area_mm2 < curve.ceiling_area_mm2));
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let mut valve = intake_valve();
        valve.valve_seat_inner_diameter_mm = 40.0; // wider than the head
        assert!(flow_area_curve(&valve).is_err());

        let mut valve = intake_valve();
        valve.valve_stem_diameter_mm = 30.0; // thicker than the throat
        assert!(flow_area_curve(&valve).is_err());

        let mut port = intake_port();
        port.valve_count = 0;
        assert!(port_diameter_mm(&port).is_err());

        let mut port = intake_port();
        port.rpm = -100.0;
        assert!(port_diameter_mm(&port).is_err());
    }

    #[test]
    fn test_serialization() {
        let curve = flow_area_curve(&intake_valve()).unwrap();
        let json = serde_json::to_string(&curve).unwrap();
        let roundtrip: FlowAreaCurve = serde_json::from_str(&json).unwrap();
        assert_eq!(curve.points.len(), roundtrip.points.len());
        assert_eq!(curve.max_theoretical_lift_mm, roundtrip.max_theoretical_lift_mm);
    }
}
