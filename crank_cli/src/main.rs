//! # Cranklab CLI Application
//!
//! Terminal front end for the engine-design calculators: enter a crank-slider
//! geometry, get the motion sweep summary, tuned runner lengths, and port
//! sizing for one operating point.

use std::io::{self, BufRead, Write};

use crank_core::calculations::kinematics::{calculate as calculate_motion, EngineGeometry};
use crank_core::calculations::port_flow::{
    flow_area_curve, port_diameter_mm, PortSizingInput, ValveGeometry,
};
use crank_core::calculations::resonance::{
    calculate as calculate_resonance, DuctKind, ResonanceInput,
};
use crank_core::calculations::CalculationItem;
use crank_core::equations::Equation;
use crank_core::EngineProject;

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn main() {
    println!("Cranklab CLI - Engine Design Calculator");
    println!("=======================================");
    println!();

    let bore = prompt_f64("Bore (mm) [59.0]: ", 59.0);
    let stroke = prompt_f64("Stroke (mm) [57.8]: ", 57.8);
    let rod = prompt_f64("Rod length (mm) [96.0]: ", 96.0);
    let chamber = prompt_f64("Chamber volume (cm³) [13.0]: ", 13.0);
    let rpm = prompt_f64("Engine speed (rpm) [11000]: ", 11000.0);

    let mut project = EngineProject::new("CLI Session", "-", "-");
    let settings = project.settings.clone();

    let geometry = EngineGeometry {
        label: "Engine 1".to_string(),
        piston_diameter_mm: bore,
        stroke_mm: stroke,
        connecting_rod_length_mm: rod,
        piston_offset_mm: 0.0,
        combustion_chamber_volume_cm3: chamber,
        engine_rpm: rpm,
        intake_valve_closing_deg: 70,
    };

    project.add_item(CalculationItem::Motion(geometry.clone()));

    println!();
    match calculate_motion(&geometry) {
        Ok(motion) => {
            let peak_velocity = motion
                .samples
                .iter()
                .map(|s| s.velocity_m_s.abs())
                .fold(0.0_f64, f64::max);

            println!("═══════════════════════════════════════");
            println!("  PISTON MOTION RESULTS");
            println!("═══════════════════════════════════════");
            println!();
            println!("Input:");
            println!("  Bore × stroke: {:.1} × {:.1} mm", bore, stroke);
            println!("  Rod:           {:.1} mm", rod);
            println!("  Speed:         {:.0} rpm", rpm);
            println!();
            println!("Derived:");
            println!("  Swept volume:  {:.1} cm³", motion.swept_volume_cm3);
            println!("  Peak |v|:      {:.1} m/s", peak_velocity);
            println!(
                "  Static CR:     {:.2} ({}) - {}",
                motion.static_compression_ratio,
                motion.static_compression_class.label(),
                motion.static_compression_class.static_description()
            );
            println!(
                "  Dynamic CR:    {:.2} ({}) - {}",
                motion.dynamic_compression_ratio,
                motion.dynamic_compression_class.label(),
                motion.dynamic_compression_class.dynamic_description()
            );
            println!(
                "  Bore/stroke:   {:.2} ({}) - {}",
                motion.bore_stroke_ratio,
                motion.bore_stroke_class.label(),
                motion.bore_stroke_class.description()
            );
            println!(
                "  Rod/stroke:    {:.2} ({}) - {}",
                motion.rod_stroke_ratio,
                motion.rod_stroke_class.label(),
                motion.rod_stroke_class.description()
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            return;
        }
    }

    let intake = ResonanceInput {
        label: "Intake".to_string(),
        kind: DuctKind::Intake,
        rpm,
        reference_angle_a_deg: 40.0,
        reference_angle_b_deg: 70.0,
        harmonic: 3,
        gas_temperature_c: settings.intake_temperature_c,
    };
    let exhaust = ResonanceInput {
        label: "Exhaust".to_string(),
        kind: DuctKind::Exhaust,
        rpm,
        reference_angle_a_deg: 70.0,
        reference_angle_b_deg: 40.0,
        harmonic: 2,
        gas_temperature_c: settings.exhaust_temperature_c,
    };
    project.add_item(CalculationItem::Resonance(intake.clone()));
    project.add_item(CalculationItem::Resonance(exhaust.clone()));

    println!();
    println!("═══════════════════════════════════════");
    println!("  RESONANCE TUNING");
    println!("═══════════════════════════════════════");
    println!();
    for duct in [&intake, &exhaust] {
        match calculate_resonance(duct) {
            Ok(result) => println!(
                "  {:<8} length {:.1} cm  (c = {:.1} m/s, harmonic {})",
                duct.label,
                result.length_m * 100.0,
                result.speed_of_sound_m_s,
                duct.harmonic
            ),
            Err(e) => eprintln!("  {:<8} error: {}", duct.label, e),
        }
    }

    let port = PortSizingInput {
        label: "Intake".to_string(),
        rpm,
        piston_diameter_mm: bore,
        stroke_mm: stroke,
        average_gas_speed_m_s: 90.0,
        volumetric_efficiency: settings.volumetric_efficiency,
        valve_count: 1,
    };
    let valve = ValveGeometry {
        label: "Intake".to_string(),
        valve_diameter_mm: 31.5,
        valve_stem_diameter_mm: 5.0,
        valve_seat_inner_diameter_mm: 0.9 * 31.5,
        seat_angle_deg: 45.0,
    };

    println!();
    println!("═══════════════════════════════════════");
    println!("  PORT AND VALVE FLOW");
    println!("═══════════════════════════════════════");
    println!();
    match port_diameter_mm(&port) {
        Ok(diameter) => println!("  Intake port diameter: {:.1} mm", diameter),
        Err(e) => eprintln!("  Port sizing error: {}", e),
    }
    project.add_item(CalculationItem::PortSizing(port.clone()));
    project.add_item(CalculationItem::ValveFlow(valve.clone()));

    match flow_area_curve(&valve) {
        Ok(curve) => {
            println!("  Flow ceiling:         {:.0} mm²", curve.ceiling_area_mm2);
            match curve.max_theoretical_lift_mm {
                Some(lift) => println!("  Max theoretical lift: {:.1} mm", lift),
                None => println!("  Max theoretical lift: not reached below 20 mm"),
            }

            println!();
            println!("JSON Output (for API use):");
            if let Ok(json) = serde_json::to_string_pretty(&curve.points[..5.min(curve.points.len())]) {
                println!("{}", json);
            }
        }
        Err(e) => eprintln!("  Flow curve error: {}", e),
    }

    println!();
    println!("Formulas used:");
    for equation in Equation::ALL {
        let meta = equation.metadata();
        println!("  {:<26} {}  [{}]", meta.name, meta.formula, meta.reference.citation());
    }

    println!();
    println!(
        "Session project: {} calculation(s) recorded ({} motion sweeps)",
        project.items.len(),
        project.items_of_type("Motion").len()
    );
}
