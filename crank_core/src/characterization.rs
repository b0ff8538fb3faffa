//! # Qualitative Characterizations
//!
//! Maps the dimensionless engine ratios onto the qualitative bands a designer
//! reads off a data sheet: compression "very low" through "very high",
//! rod/stroke "very short" through "very long", bore/stroke over-squared /
//! squared / under-squared.
//!
//! The five-level scales are fixed ordered tables of upper bounds scanned
//! top-down; the bore/stroke scale is a three-way comparison around the
//! square window (0.95, 1.05).
//!
//! ## Example
//!
//! ```rust
//! use crank_core::characterization::{classify_bore_stroke, BoreStrokeClass};
//!
//! let class = classify_bore_stroke(1.02);
//! assert_eq!(class, BoreStrokeClass::Squared);
//! assert_eq!(class.label(), "squared");
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Compression Ratio Bands
// ============================================================================

/// Qualitative compression-ratio level, shared by the static and dynamic
/// scales (the two scales use different thresholds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompressionLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl CompressionLevel {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            CompressionLevel::VeryLow => "very low",
            CompressionLevel::Low => "low",
            CompressionLevel::Moderate => "moderate",
            CompressionLevel::High => "high",
            CompressionLevel::VeryHigh => "very high",
        }
    }

    /// Designer-facing description for the static compression scale
    pub fn static_description(&self) -> &'static str {
        match self {
            CompressionLevel::VeryLow => "Poor efficiency, for heavily boosted engines or low-grade fuel",
            CompressionLevel::Low => "Suited to moderate turbo/supercharging or low-octane fuel",
            CompressionLevel::Moderate => "Balances efficiency and safety, premium fuel",
            CompressionLevel::High => "High thermal efficiency, requires high-octane fuel",
            CompressionLevel::VeryHigh => "Naturally aspirated competition engines, special fuels",
        }
    }

    /// Designer-facing description for the dynamic compression scale
    pub fn dynamic_description(&self) -> &'static str {
        match self {
            CompressionLevel::VeryLow => "Very aggressive cams, poor low-rpm torque, risk of weak combustion",
            CompressionLevel::Low => "For high-rpm engines, needs high static compression",
            CompressionLevel::Moderate => "Ideal balance on premium fuel, good midrange torque",
            CompressionLevel::High => "Maximum low-rpm torque, detonation risk on standard fuel",
            CompressionLevel::VeryHigh => "High detonation risk, requires special fuels or ethanol",
        }
    }
}

/// One row of a five-level band table: the class applies to ratios strictly
/// below `upper`.
struct CompressionBand {
    upper: f64,
    level: CompressionLevel,
}

static STATIC_COMPRESSION_BANDS: &[CompressionBand] = &[
    CompressionBand { upper: 8.0, level: CompressionLevel::VeryLow },
    CompressionBand { upper: 9.5, level: CompressionLevel::Low },
    CompressionBand { upper: 11.0, level: CompressionLevel::Moderate },
    CompressionBand { upper: 13.0, level: CompressionLevel::High },
    CompressionBand { upper: f64::INFINITY, level: CompressionLevel::VeryHigh },
];

static DYNAMIC_COMPRESSION_BANDS: &[CompressionBand] = &[
    CompressionBand { upper: 6.5, level: CompressionLevel::VeryLow },
    CompressionBand { upper: 7.5, level: CompressionLevel::Low },
    CompressionBand { upper: 8.5, level: CompressionLevel::Moderate },
    CompressionBand { upper: 9.0, level: CompressionLevel::High },
    CompressionBand { upper: f64::INFINITY, level: CompressionLevel::VeryHigh },
];

fn scan_bands(bands: &[CompressionBand], ratio: f64) -> CompressionLevel {
    bands
        .iter()
        .find(|band| ratio < band.upper)
        .map(|band| band.level)
        .unwrap_or(CompressionLevel::VeryHigh)
}

/// Classify a static compression ratio.
pub fn classify_static_compression(ratio: f64) -> CompressionLevel {
    scan_bands(STATIC_COMPRESSION_BANDS, ratio)
}

/// Classify a dynamic compression ratio.
pub fn classify_dynamic_compression(ratio: f64) -> CompressionLevel {
    scan_bands(DYNAMIC_COMPRESSION_BANDS, ratio)
}

// ============================================================================
// Rod/Stroke Ratio Bands
// ============================================================================

/// Qualitative connecting-rod length relative to stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RodStrokeClass {
    VeryShort,
    Short,
    Moderate,
    Long,
    VeryLong,
}

impl RodStrokeClass {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            RodStrokeClass::VeryShort => "very short",
            RodStrokeClass::Short => "short",
            RodStrokeClass::Moderate => "moderate",
            RodStrokeClass::Long => "long",
            RodStrokeClass::VeryLong => "very long",
        }
    }

    /// Designer-facing description
    pub fn description(&self) -> &'static str {
        match self {
            RodStrokeClass::VeryShort => "High piston speed, high wear",
            RodStrokeClass::Short => "High power, high piston acceleration",
            RodStrokeClass::Moderate => "Balanced",
            RodStrokeClass::Long => "Low wear, good efficiency",
            RodStrokeClass::VeryLong => "Maximum efficiency, low piston speed",
        }
    }
}

struct RodStrokeBand {
    upper: f64,
    class: RodStrokeClass,
}

static ROD_STROKE_BANDS: &[RodStrokeBand] = &[
    RodStrokeBand { upper: 1.4, class: RodStrokeClass::VeryShort },
    RodStrokeBand { upper: 1.6, class: RodStrokeClass::Short },
    RodStrokeBand { upper: 1.8, class: RodStrokeClass::Moderate },
    RodStrokeBand { upper: 2.0, class: RodStrokeClass::Long },
    RodStrokeBand { upper: f64::INFINITY, class: RodStrokeClass::VeryLong },
];

/// Classify a rod/stroke ratio.
pub fn classify_rod_stroke(ratio: f64) -> RodStrokeClass {
    ROD_STROKE_BANDS
        .iter()
        .find(|band| ratio < band.upper)
        .map(|band| band.class)
        .unwrap_or(RodStrokeClass::VeryLong)
}

// ============================================================================
// Bore/Stroke Classification
// ============================================================================

/// Bore relative to stroke: over-squared engines rev, under-squared engines
/// pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoreStrokeClass {
    OverSquared,
    Squared,
    UnderSquared,
}

impl BoreStrokeClass {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            BoreStrokeClass::OverSquared => "over-squared",
            BoreStrokeClass::Squared => "squared",
            BoreStrokeClass::UnderSquared => "under-squared",
        }
    }

    /// Designer-facing description
    pub fn description(&self) -> &'static str {
        match self {
            BoreStrokeClass::OverSquared => "Power at higher rpm, room for large valves",
            BoreStrokeClass::Squared => "Balance between torque and high-rpm power",
            BoreStrokeClass::UnderSquared => "High torque at low rpm, reduced rpm ceiling",
        }
    }
}

/// Classify a bore/stroke ratio. Over-squared above 1.05, under-squared
/// below 0.95, squared in between.
pub fn classify_bore_stroke(ratio: f64) -> BoreStrokeClass {
    if ratio > 1.05 {
        BoreStrokeClass::OverSquared
    } else if ratio < 0.95 {
        BoreStrokeClass::UnderSquared
    } else {
        BoreStrokeClass::Squared
    }
}
