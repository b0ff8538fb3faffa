//! # Equation Registry
//!
//! Central registry of the formulas the engine evaluates. Each equation
//! carries a display formula, a variable legend, and a literature reference,
//! so consumers can show the math behind a number without duplicating it.
//!
//! ## Usage
//!
//! ```rust
//! use crank_core::equations::Equation;
//!
//! let meta = Equation::PistonPosition.metadata();
//! println!("{}: {}", meta.name, meta.formula);
//! println!("per {}", meta.reference.citation());
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Reference to an engine-design text or to first principles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reference {
    /// Heywood, Internal Combustion Engine Fundamentals
    Heywood { chapter: u8 },
    /// Blair, Design and Simulation of Four-Stroke Engines
    Blair { chapter: u8 },
    /// Taylor, The Internal-Combustion Engine in Theory and Practice
    Taylor { volume: u8 },
    /// Fundamental mechanics or gas dynamics (no text citation needed)
    FirstPrinciples,
}

impl Reference {
    /// Format the reference for display
    pub fn citation(&self) -> String {
        match self {
            Reference::Heywood { chapter } => {
                format!("Heywood, ICE Fundamentals, Ch. {}", chapter)
            }
            Reference::Blair { chapter } => {
                format!("Blair, Four-Stroke Engines, Ch. {}", chapter)
            }
            Reference::Taylor { volume } => {
                format!("Taylor, The Internal-Combustion Engine, Vol. {}", volume)
            }
            Reference::FirstPrinciples => "First principles".to_string(),
        }
    }
}

/// Every formula the calculators evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equation {
    PistonPosition,
    PistonVelocity,
    PistonAcceleration,
    CylinderVolume,
    StaticCompressionRatio,
    DynamicCompressionRatio,
    SpeedOfSound,
    GasDensity,
    ResonantPipeLength,
    PortDiameter,
    SeatFlowArea,
}

impl Equation {
    /// All registered equations, in presentation order.
    pub const ALL: &'static [Equation] = &[
        Equation::PistonPosition,
        Equation::PistonVelocity,
        Equation::PistonAcceleration,
        Equation::CylinderVolume,
        Equation::StaticCompressionRatio,
        Equation::DynamicCompressionRatio,
        Equation::SpeedOfSound,
        Equation::GasDensity,
        Equation::ResonantPipeLength,
        Equation::PortDiameter,
        Equation::SeatFlowArea,
    ];

    /// Look up the metadata for this equation.
    pub fn metadata(&self) -> &'static EquationMeta {
        REGISTRY.get(self).expect("every equation variant is registered")
    }
}

/// Display metadata for one equation. Serializes for JSON export; the
/// static registry is the single source, so there is no deserialize path.
#[derive(Debug, Clone, Serialize)]
pub struct EquationMeta {
    /// Short human-readable name
    pub name: &'static str,
    /// The formula in plain notation
    pub formula: &'static str,
    /// Variable legend
    pub variables: &'static str,
    /// Where the formula comes from
    pub reference: Reference,
}

static REGISTRY: Lazy<HashMap<Equation, EquationMeta>> = Lazy::new(|| {
    let mut map = HashMap::new();

    map.insert(
        Equation::PistonPosition,
        EquationMeta {
            name: "Piston position",
            formula: "x(θ) = r·cos θ + √(L² − (r·sin θ − e)²)",
            variables: "r crank radius, L rod length, e pin offset, θ crank angle from TDC",
            reference: Reference::Heywood { chapter: 2 },
        },
    );
    map.insert(
        Equation::PistonVelocity,
        EquationMeta {
            name: "Piston velocity",
            formula: "v(θ) = dx/dθ · ω",
            variables: "ω = rpm·2π/60 crank angular velocity",
            reference: Reference::Heywood { chapter: 2 },
        },
    );
    map.insert(
        Equation::PistonAcceleration,
        EquationMeta {
            name: "Piston acceleration",
            formula: "a(θ) = d²x/dθ² · ω²",
            variables: "ω crank angular velocity",
            reference: Reference::Heywood { chapter: 2 },
        },
    );
    map.insert(
        Equation::CylinderVolume,
        EquationMeta {
            name: "Cylinder volume",
            formula: "V(θ) = V_c + A_p·s(θ)",
            variables: "V_c chamber volume, A_p piston area, s position below TDC",
            reference: Reference::Heywood { chapter: 2 },
        },
    );
    map.insert(
        Equation::StaticCompressionRatio,
        EquationMeta {
            name: "Static compression ratio",
            formula: "CR = (V_d + V_c)/V_c",
            variables: "V_d swept volume, V_c chamber volume",
            reference: Reference::Heywood { chapter: 2 },
        },
    );
    map.insert(
        Equation::DynamicCompressionRatio,
        EquationMeta {
            name: "Dynamic compression ratio",
            formula: "CR_dyn = (V_d − V(θ_ivc) + V_c)/V_c",
            variables: "V(θ_ivc) cylinder volume at intake valve closing",
            reference: Reference::Taylor { volume: 1 },
        },
    );
    map.insert(
        Equation::SpeedOfSound,
        EquationMeta {
            name: "Speed of sound",
            formula: "c = √(γ·R·T)",
            variables: "γ heat-capacity ratio, R specific gas constant, T absolute temperature",
            reference: Reference::FirstPrinciples,
        },
    );
    map.insert(
        Equation::GasDensity,
        EquationMeta {
            name: "Gas density",
            formula: "ρ = P/(R·T)",
            variables: "P pressure, R specific gas constant, T absolute temperature",
            reference: Reference::FirstPrinciples,
        },
    );
    map.insert(
        Equation::ResonantPipeLength,
        EquationMeta {
            name: "Resonant pipe length",
            formula: "l = c·t/(k·n)",
            variables: "c speed of sound, t open period, k wave divisor (4 intake, 2 exhaust), n harmonic",
            reference: Reference::Blair { chapter: 6 },
        },
    );
    map.insert(
        Equation::PortDiameter,
        EquationMeta {
            name: "Port diameter",
            formula: "d = 2·√(Q/(250·π·v̄·N))",
            variables: "Q = rpm·η_v·V_cyl/120 volumetric flow, v̄ mean gas speed, N valve count",
            reference: Reference::Blair { chapter: 4 },
        },
    );
    map.insert(
        Equation::SeatFlowArea,
        EquationMeta {
            name: "Seat flow area",
            formula: "A(L) = π·L·cos α·(d_v − 2·w + L·sin 2α/2), capped at min(A_throat, A_port)",
            variables: "L lift, α seat angle, d_v valve diameter, w seat width",
            reference: Reference::Blair { chapter: 4 },
        },
    );

    map
});
